use clap::Args;
use serde::Serialize;

use alphafix::migrate::{self, FileEdit, MigrateOptions, Rewriter};

use super::{CmdResult, GlobalArgs, TargetArgs};

#[derive(Args, Default, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Report files that would change without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 when any file would change
    #[arg(long)]
    pub check: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum MigrateOutput {
    #[serde(rename = "migrate")]
    Migrate {
        root: String,
        dry_run: bool,
        files_scanned: usize,
        files_changed: usize,
        total_replacements: usize,
        edits: Vec<FileEdit>,
        applied: bool,
    },
}

pub fn run(args: MigrateArgs, global: &GlobalArgs) -> CmdResult<MigrateOutput> {
    let config = args.target.resolve()?;
    let rewriter = Rewriter::new()?;
    let dry_run = args.dry_run || args.check;

    // Text mode reports each file as soon as it is handled, so a failure
    // further down the tree still leaves a record of what was written.
    let stream = !global.json;
    let result = migrate::migrate_tree(&config, &rewriter, MigrateOptions { dry_run }, |edit| {
        if stream {
            println!("{}", edit_line(edit));
        }
    })?;

    let exit_code = if args.check && result.files_changed() > 0 {
        1
    } else {
        0
    };

    Ok((
        MigrateOutput::Migrate {
            root: result.root.clone(),
            dry_run,
            files_scanned: result.files_scanned,
            files_changed: result.files_changed(),
            total_replacements: result.total_replacements,
            edits: result.edits,
            applied: result.applied,
        },
        exit_code,
    ))
}

fn edit_line(edit: &FileEdit) -> String {
    if edit.written {
        format!("updated {}", edit.file)
    } else {
        format!("would update {}", edit.file)
    }
}

/// Per-file lines are already streamed by `run`; nothing is left for stdout.
pub fn render_text(_output: &MigrateOutput) -> String {
    String::new()
}
