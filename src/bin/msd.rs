//! msd - Map Style Diff CLI tool
//!
//! A command line tool for structural operations on map style documents.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use map_style_diff::reference::{self, PropertyCategory};
use map_style_diff::{declassify, diff, migrate, StyleDocument};

#[derive(Debug, Parser)]
#[command(
    name = "msd",
    version,
    about = "Structural operations on map style documents"
)]
struct Cli {
    /// Output location. Use '-' for stdout.
    #[arg(short, long, global = true, default_value = "-")]
    output: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the operations transforming one style into another
    Diff {
        /// The previous style document
        before: PathBuf,
        /// The next style document
        after: PathBuf,
    },
    /// Flatten class-scoped paint overlays into the base paint blocks
    Declass {
        /// Class names to merge, in order; later classes win
        #[arg(short, long = "class")]
        classes: Vec<String>,
        style: PathBuf,
    },
    /// Migrate a style document one schema version forward
    Migrate { style: PathBuf },
    /// List the properties known to the embedded reference
    ListProperties,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(fs::File::create(&cli.output).map_err(|e| {
            format!("failed to create output file {:?}: {}", cli.output, e)
        })?)
    };

    match cli.command {
        Command::Diff { before, after } => {
            let before = read_style(&before)?;
            let after = read_style(&after)?;
            for operation in diff(&before, &after) {
                writeln!(output, "{}", serde_json::to_string(&operation)?)?;
            }
        }
        Command::Declass { classes, style } => {
            let style = read_style(&style)?;
            let flattened = declassify(&style, &classes);
            writeln!(output, "{}", flattened.to_json_pretty()?)?;
        }
        Command::Migrate { style } => {
            let style = read_style(&style)?;
            let migrated = migrate(&style, reference::latest())
                .map_err(|e| format!("migration failed: {}", e))?;
            writeln!(output, "{}", migrated.to_json_pretty()?)?;
        }
        Command::ListProperties => {
            let latest = reference::latest();
            writeln!(output, "Layout properties:")?;
            for name in latest.property_names(PropertyCategory::Layout) {
                writeln!(output, "  - {}", name)?;
            }
            writeln!(output, "Paint properties:")?;
            for name in latest.property_names(PropertyCategory::Paint) {
                writeln!(output, "  - {}", name)?;
            }
        }
    }

    Ok(())
}

fn read_style(path: &Path) -> Result<StyleDocument, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read style file {:?}: {}", path, e))?;
    let style = StyleDocument::from_json(&content)
        .map_err(|e| format!("failed to parse style file {:?}: {}", path, e))?;
    Ok(style)
}
