use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pds4_browser::pds4::{resolve, LoadAttempt};
use pds4_browser::state::{list_directory, BrowserSettings, DirectoryListing};

/// Browse directories and resolve PDS4 path expressions
#[derive(Parser, Debug)]
#[command(name = "pds4-browser", version, about)]
struct Args {
    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    settings: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a directory or `<dir>/<glob>` pattern
    Ls {
        /// Pattern to list (defaults to the configured home directory)
        pattern: Option<String>,
    },
    /// Show which files a path expression would load
    Expand {
        /// Path expression, e.g. `/data/img*.xml[1]`
        expression: String,
    },
}

/// Print a listing with the configured columns
fn print_listing(listing: &DirectoryListing, settings: &BrowserSettings) {
    let rows: Vec<Vec<String>> = listing
        .entries
        .iter()
        .map(|entry| {
            settings
                .columns
                .iter()
                .map(|column| entry.column_text(&column.attribute))
                .collect()
        })
        .collect();

    // Size columns to their content unless the table is too large
    let widths: Vec<usize> = settings
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if settings.should_resize_columns(rows.len()) {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(column.header.len()))
                    .max()
                    .unwrap_or(0)
            } else {
                column.header.len().max(12)
            }
        })
        .collect();

    println!("{}", listing.pattern);
    let header: Vec<String> = settings
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.header, width = width))
        .collect();
    println!("{}", header.join("  "));
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let settings = match args.settings.or_else(BrowserSettings::default_path) {
        Some(path) => BrowserSettings::load_or_default(&path),
        None => BrowserSettings::default(),
    };

    match args.command {
        Command::Ls { pattern } => {
            let pattern = pattern.unwrap_or_else(|| settings.initial_pattern());
            match list_directory(&pattern) {
                Ok(listing) => {
                    print_listing(&listing, &settings);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Expand { expression } => match resolve(expression.trim()) {
            Ok(LoadAttempt::Loaded(locators)) => {
                for locator in locators {
                    println!("{}", locator);
                }
                ExitCode::SUCCESS
            }
            Ok(LoadAttempt::IsDirectory) => {
                println!("{} is a directory", expression);
                ExitCode::SUCCESS
            }
            Ok(LoadAttempt::NoMatch) => {
                eprintln!("No files matched {}", expression);
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
