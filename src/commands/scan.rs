use clap::Args;
use serde::Serialize;

use alphafix::migrate::{self, Reference, Rewriter};

use super::{CmdResult, GlobalArgs, TargetArgs};

#[derive(Args, Default, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ScanOutput {
    #[serde(rename = "scan")]
    Scan {
        root: String,
        total_references: usize,
        total_files: usize,
        references: Vec<Reference>,
    },
}

pub fn run(args: ScanArgs, _global: &GlobalArgs) -> CmdResult<ScanOutput> {
    let config = args.target.resolve()?;
    let rewriter = Rewriter::new()?;
    let references = migrate::find_references(&config, &rewriter)?;

    let mut files: Vec<&str> = references.iter().map(|r| r.file.as_str()).collect();
    files.dedup();
    let total_files = files.len();

    Ok((
        ScanOutput::Scan {
            root: config.root.to_string_lossy().to_string(),
            total_references: references.len(),
            total_files,
            references,
        },
        0,
    ))
}

/// One `file:line:column: matched -> replacement` line per occurrence.
pub fn render_text(output: &ScanOutput) -> String {
    let ScanOutput::Scan { references, .. } = output;

    references
        .iter()
        .map(|r| {
            format!(
                "{}:{}:{}: {} -> {}\n",
                r.file, r.line, r.column, r.matched, r.replacement
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_text_one_line_per_reference() {
        let output = ScanOutput::Scan {
            root: "lib".to_string(),
            total_references: 2,
            total_files: 1,
            references: vec![
                Reference {
                    file: "lib/a.dart".to_string(),
                    line: 3,
                    column: 14,
                    matched: ".withOpacity(0.5)".to_string(),
                    replacement: ".withValues(alpha: 0.5)".to_string(),
                    context: "final b = red.withOpacity(0.5);".to_string(),
                },
                Reference {
                    file: "lib/a.dart".to_string(),
                    line: 9,
                    column: 1,
                    matched: ".withOpacity(x)".to_string(),
                    replacement: ".withValues(alpha: x)".to_string(),
                    context: ".withOpacity(x)".to_string(),
                },
            ],
        };

        assert_eq!(
            render_text(&output),
            "lib/a.dart:3:14: .withOpacity(0.5) -> .withValues(alpha: 0.5)\n\
             lib/a.dart:9:1: .withOpacity(x) -> .withValues(alpha: x)\n"
        );
    }
}
