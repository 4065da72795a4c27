//! Path utility functions for normalization and relative link targets.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
/// This does not access the filesystem and does not follow symlinks.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root; leading `..` of a relative path is kept
                match result.components().next_back() {
                    Some(Component::Normal(_)) => {
                        result.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => result.push(component),
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Calculate the relative path from a directory to a target path.
/// This is the text a symlink placed inside `from_dir` needs to reach `to_path`.
///
/// For example, from `/r/usr/bin` to `/r/pkgA/bin/tool` this returns
/// `../../pkgA/bin/tool`.
///
/// Returns `None` if a relative path cannot be computed (e.g., different drive letters on Windows).
pub fn relative_path_from_dir(from_dir: &Path, to_path: &Path) -> Option<PathBuf> {
    let result = pathdiff::diff_paths(to_path, from_dir)?;

    // An absolute result means no relative form exists
    if result.is_absolute() {
        return None;
    }

    Some(result)
}

/// Resolve a possibly relative link text against the directory holding the link.
/// Absolute paths are returned unchanged.
pub fn resolve_relative_path(base_dir: &Path, relative_path: &Path) -> PathBuf {
    if relative_path.is_absolute() {
        relative_path.to_path_buf()
    } else {
        normalize_path(&base_dir.join(relative_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_simple() {
        assert_eq!(
            normalize_path(Path::new("/r/usr/bin")),
            PathBuf::from("/r/usr/bin")
        );
    }

    #[test]
    fn test_normalize_path_with_dot() {
        assert_eq!(
            normalize_path(Path::new("/r/./pkgA/./bin")),
            PathBuf::from("/r/pkgA/bin")
        );
    }

    #[test]
    fn test_normalize_path_link_text_from_shared_bin() {
        assert_eq!(
            normalize_path(Path::new("/r/usr/bin/../../pkgA/bin/tool")),
            PathBuf::from("/r/pkgA/bin/tool")
        );
    }

    #[test]
    fn test_normalize_path_parent_at_root() {
        #[cfg(unix)]
        assert_eq!(
            normalize_path(Path::new("/usr/../../../etc")),
            PathBuf::from("/etc")
        );
    }

    #[test]
    fn test_normalize_path_relative_keeps_leading_parent() {
        assert_eq!(
            normalize_path(Path::new("../a/../b")),
            PathBuf::from("../b")
        );
        assert_eq!(
            normalize_path(Path::new("foo/bar/../baz")),
            PathBuf::from("foo/baz")
        );
    }

    #[test]
    fn test_normalize_path_trailing_parent() {
        assert_eq!(
            normalize_path(Path::new("/r/pkgA/bin/..")),
            PathBuf::from("/r/pkgA")
        );
    }

    #[test]
    fn test_normalize_path_only_dots() {
        assert_eq!(normalize_path(Path::new("./././.")), PathBuf::from(""));
    }

    #[test]
    fn test_relative_path_from_shared_bin_to_bundle() {
        let result = relative_path_from_dir(
            Path::new("/r/usr/bin"),
            Path::new("/r/pkgA/bin/tool"),
        );
        assert_eq!(result, Some(PathBuf::from("../../pkgA/bin/tool")));
    }

    #[test]
    fn test_relative_path_from_dir_same_directory() {
        let result = relative_path_from_dir(
            Path::new("/r/usr/bin"),
            Path::new("/r/usr/bin/tool"),
        );
        assert_eq!(result, Some(PathBuf::from("tool")));
    }

    #[test]
    fn test_relative_path_from_dir_unrelated_trees() {
        let result = relative_path_from_dir(
            Path::new("/home/u/bundle/usr/bin"),
            Path::new("/opt/pkg/bin/tool"),
        );
        assert_eq!(
            result,
            Some(PathBuf::from("../../../../../opt/pkg/bin/tool"))
        );
    }

    #[test]
    fn test_relative_path_from_relative_base_to_absolute_fails() {
        // pathdiff cannot relate a relative base to an absolute target
        let result = relative_path_from_dir(Path::new("usr/bin"), Path::new("/r/pkgA/bin/tool"));
        assert_eq!(result, None);
    }

    #[cfg(windows)]
    #[test]
    fn test_relative_path_from_dir_windows_different_drives() {
        let result = relative_path_from_dir(
            Path::new("C:\\bundle\\usr\\bin"),
            Path::new("D:\\pkg\\bin\\tool.exe"),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_resolve_relative_path_basic() {
        let result = resolve_relative_path(
            Path::new("/r/usr/bin"),
            Path::new("../../pkgA/bin/tool"),
        );
        assert_eq!(result, PathBuf::from("/r/pkgA/bin/tool"));
    }

    #[test]
    fn test_resolve_relative_path_absolute_passthrough() {
        let result = resolve_relative_path(
            Path::new("/r/usr/bin"),
            Path::new("/opt/pkg/bin/tool"),
        );
        assert_eq!(result, PathBuf::from("/opt/pkg/bin/tool"));
    }

    #[test]
    fn test_roundtrip_relative_path() {
        let shared_bin = Path::new("/home/u/bundle/usr/bin");
        let target = Path::new("/home/u/bundle/ripgrep/bin/rg");

        let relative = relative_path_from_dir(shared_bin, target).unwrap();
        assert_eq!(relative, PathBuf::from("../../ripgrep/bin/rg"));
        assert_eq!(resolve_relative_path(shared_bin, &relative), target);
    }
}
