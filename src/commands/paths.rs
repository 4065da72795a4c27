use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Root directory name under the home directory when nothing is configured
pub const DEFAULT_ROOT_NAME: &str = "bundle";

/// Turn a configured root value into a path.
///
/// - empty: `<home>/bundle`
/// - `~` or `~/...`: relative to the home directory
/// - one trailing `/` is dropped, except for `/` itself
/// - `$NAME` and `${NAME}` are expanded via `lookup`
///
/// The home directory is only required when the value refers to it.
pub fn resolve_root<F>(value: &str, home: Option<&Path>, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let home = || {
        home.map(Path::to_path_buf)
            .context("Could not find home directory")
    };

    if value.is_empty() {
        return Ok(home()?.join(DEFAULT_ROOT_NAME));
    }

    let trimmed = match value.strip_suffix('/') {
        Some(t) if !t.is_empty() => t,
        _ => value,
    };

    if trimmed == "~" {
        return home();
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        let rest = expand_env(rest, &lookup);
        let rest = rest.trim_start_matches('/');
        let home = home()?;
        return Ok(if rest.is_empty() { home } else { home.join(rest) });
    }

    Ok(PathBuf::from(expand_env(trimmed, &lookup)))
}

/// Expand `$NAME` and `${NAME}` references. Unset variables expand to nothing;
/// a `$` that starts no reference is kept as is.
pub fn expand_env<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                rest = &braced[end + 1..];
                continue;
            }
        } else {
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if len > 0 {
                out.push_str(&lookup(&after[..len]).unwrap_or_default());
                rest = &after[len..];
                continue;
            }
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}
