use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use workbench_core::report_store::{load_report, ReportStore};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print aggregate totals for one report file.
    Summary { path: PathBuf },
    /// Check that a report file parses and validates.
    Validate { path: PathBuf },
    /// List every report in a directory, newest first.
    List { dir: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Summary { path } => {
            let snapshot =
                load_report(&path).with_context(|| format!("loading {}", path.display()))?;
            let totals = snapshot.totals();
            println!("run {} ({})", snapshot.run_id, snapshot.label);
            println!("generated  {}", snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"));
            println!("files      {}", snapshot.file_count());
            println!(
                "statements {}/{} ({:.1}%)",
                totals.statements.covered,
                totals.statements.total,
                totals.statements.percent()
            );
            println!(
                "branches   {}/{} ({:.1}%)",
                totals.branches.covered,
                totals.branches.total,
                totals.branches.percent()
            );
            println!(
                "functions  {}/{} ({:.1}%)",
                totals.functions.covered,
                totals.functions.total,
                totals.functions.percent()
            );
        }
        Command::Validate { path } => {
            load_report(&path).with_context(|| format!("validating {}", path.display()))?;
            println!("ok {}", path.display());
        }
        Command::List { dir } => {
            let mut store = ReportStore::new();
            let loaded = store
                .load_dir(&dir)
                .with_context(|| format!("scanning {}", dir.display()))?;

            let mut reports = store.reports().to_vec();
            reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
            for report in reports {
                println!(
                    "{}  {}  files={}  statements={:.1}%",
                    report.generated_at.format("%Y-%m-%d %H:%M"),
                    report.label,
                    report.file_count(),
                    report.totals().statements.percent()
                );
            }
            println!("{loaded} report(s)");
        }
    }

    Ok(())
}
