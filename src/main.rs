use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Text,
}

mod commands;
mod output;
mod tty;

use commands::{migrate, scan};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "alphafix")]
#[command(version = VERSION)]
#[command(about = "Migrate Flutter .withOpacity(x) calls to .withValues(alpha: x)")]
struct Cli {
    /// Print a JSON envelope instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Defaults to `migrate` with no options
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite .withOpacity(x) to .withValues(alpha: x) in place
    Migrate(migrate::MigrateArgs),
    /// List .withOpacity(...) occurrences without writing
    Scan(scan::ScanArgs),
}

fn response_mode(cli: &Cli) -> ResponseMode {
    if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Text
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = response_mode(&cli);
    let global = GlobalArgs { json: cli.json };

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Migrate(migrate::MigrateArgs::default()));

    let exit_code = match mode {
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(command, &global);
            match output::print_json_result(json_result) {
                Ok(()) => exit_code,
                Err(err) => output::print_text_error(&err),
            }
        }
        ResponseMode::Text => match commands::run_text(command, &global) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                exit_code
            }
            Err(err) => output::print_text_error(&err),
        },
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
