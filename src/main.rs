use anyhow::Result;
use bundlebin::commands::{self, Config, SyncOptions};
use clap::Parser;

/// bundlebin - expose every bundle's executables through one shared bin directory
///
/// Every subdirectory of the bundle root (except `usr`) is a bundle. Each file in
/// `<bundle>/bin` gets a relative symlink in `<root>/usr/bin`; existing links are
/// never replaced and links whose target is gone are removed first.
///
/// Examples:
///   bundlebin                    # Same as `bundlebin sync`
///   bundlebin --root ~/apps list # List bundles under ~/apps
#[derive(Parser, Debug)]
#[command(author, version = env!("BUNDLEBIN_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Bundle root directory (defaults to ~/bundle; also via BUNDLE_PATH)
    #[arg(
        long = "root",
        short = 'r',
        env = commands::ROOT_ENV,
        value_name = "PATH",
        global = true
    )]
    pub root: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Remove dead links, then link every bundle (default)
    Sync(SyncArgs),

    /// Only remove dead links from the shared bin directory
    Prune(PruneArgs),

    /// List installed bundles
    List,
}

#[derive(clap::Args, Debug, Default)]
pub struct SyncArgs {
    /// Show what would change without touching anything
    #[arg(long = "dry-run", short = 'n')]
    pub dry_run: bool,

    /// Keep linking the remaining bundles after one fails
    #[arg(long = "keep-going", short = 'k')]
    pub keep_going: bool,

    /// Print a JSON report
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct PruneArgs {
    /// Show dead links without removing them
    #[arg(long = "dry-run", short = 'n')]
    pub dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = bundlebin::runtime::RealRuntime;
    let config = Config::new(&runtime, cli.root)?;

    match cli.command.unwrap_or_else(|| Commands::Sync(SyncArgs::default())) {
        Commands::Sync(args) => commands::sync(
            runtime,
            SyncOptions {
                dry_run: args.dry_run,
                keep_going: args.keep_going,
                json: args.json,
            },
            config,
        )?,
        Commands::Prune(args) => commands::prune(runtime, args.dry_run, config)?,
        Commands::List => commands::list(runtime, config)?,
    }
    Ok(())
}
