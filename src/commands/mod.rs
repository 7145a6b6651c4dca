use clap::Args;
use std::path::PathBuf;

use alphafix::config::{self, ConfigOverrides, MigrateConfig};

pub type CmdResult<T> = alphafix::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Emit the JSON envelope instead of plain text.
    pub json: bool,
}

/// Which tree to work on. Shared by every command.
#[derive(Args, Default, Debug)]
pub struct TargetArgs {
    /// Root directory to walk (default: "lib")
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// File extension to include; repeat for several (default: "dart")
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// JSON config file (default: ./alphafix.json when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl TargetArgs {
    pub fn resolve(&self) -> alphafix::Result<MigrateConfig> {
        let cwd = std::env::current_dir().map_err(|e| {
            alphafix::Error::internal_io(e.to_string(), Some("read current dir".to_string()))
        })?;

        let overrides = ConfigOverrides {
            root: self.path.clone(),
            extensions: self.extensions.clone(),
        };

        config::resolve(self.config.as_deref(), &cwd, &overrides)
    }
}

pub mod migrate;
pub mod scan;

/// Run a command in text mode. Returns what to print on stdout and the exit code.
pub(crate) fn run_text(
    command: crate::Commands,
    global: &GlobalArgs,
) -> alphafix::Result<(String, i32)> {
    match command {
        crate::Commands::Migrate(args) => {
            let (output, exit_code) = migrate::run(args, global)?;
            Ok((migrate::render_text(&output), exit_code))
        }
        crate::Commands::Scan(args) => {
            let (output, exit_code) = scan::run(args, global)?;
            Ok((scan::render_text(&output), exit_code))
        }
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (alphafix::Result<serde_json::Value>, i32) {
    crate::tty::status("alphafix is working...");

    match command {
        crate::Commands::Migrate(args) => dispatch!(args, global, migrate),
        crate::Commands::Scan(args) => dispatch!(args, global, scan),
    }
}
