//! Scrambler CLI - shuffle a column of words into fixed-size groups

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scrambler::prelude::*;
use scrambler::{DEFAULT_GROUP_SIZE, DEFAULT_SHEET_NAME, DEFAULT_WORD_COLUMN};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrambler")]
#[command(
    author,
    version,
    about = "Shuffle a spreadsheet column of words into fixed-size groups"
)]
struct Cli {
    /// Input spreadsheet (xlsx, xlsm, csv)
    input: PathBuf,

    /// Sheet holding the words
    #[arg(short, long, default_value = DEFAULT_SHEET_NAME)]
    sheet: String,

    /// Sheet holding the words, by 0-based position
    #[arg(long, conflicts_with = "sheet")]
    sheet_index: Option<usize>,

    /// Header of the word column
    #[arg(short, long, default_value = DEFAULT_WORD_COLUMN)]
    column: String,

    /// Words per group
    #[arg(short, long, default_value_t = DEFAULT_GROUP_SIZE as i64, allow_negative_numbers = true)]
    group_size: i64,

    /// Output file, xlsx or csv (default: word_groups_<timestamp>.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Do not print the groups
    #[arg(long)]
    no_preview: bool,

    /// Print the groups without writing a file
    #[arg(long)]
    dry_run: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> GroupOptions {
        let sheet = match self.sheet_index {
            Some(index) => SheetSelector::Index(index),
            None => SheetSelector::Name(self.sheet.clone()),
        };
        GroupOptions {
            sheet,
            column: self.column.clone(),
            group_size: self.group_size,
        }
    }
}

/// A library failure, tagged with the stage it happened in
#[derive(Debug)]
enum Failure {
    Load(Error),
    Save(Error),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Load(Error::SourceNotFound { path, .. }) => {
                write!(f, "Error: File '{}' not found.", path.display())
            }
            Failure::Load(Error::ColumnNotFound { column, .. }) => {
                write!(f, "Error: Column '{}' not found in the Excel file.", column)
            }
            Failure::Load(Error::SheetNotFound { path, sheet, .. }) => {
                write!(f, "Error: Sheet '{}' not found in '{}'.", sheet, path.display())
            }
            Failure::Load(Error::InvalidConfiguration(message)) => write!(f, "Error: {}", message),
            Failure::Load(err) => write!(f, "An error occurred: {}", err),
            Failure::Save(err) => write!(f, "Error saving groups: {}", err),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Failure::Load(err) | Failure::Save(err) => Some(err),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Failure>() {
                Some(failure) => eprintln!("{}", failure),
                None => eprintln!("An error occurred: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options();
    let groups = match cli.seed {
        Some(seed) => {
            group_words_with_rng(&cli.input, &options, &mut StdRng::seed_from_u64(seed))
        }
        None => group_words(&cli.input, &options),
    }
    .map_err(Failure::Load)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.no_preview {
        print_groups(&mut out, &groups).context("Failed to print groups")?;
    }

    if cli.dry_run {
        tracing::info!("dry run, no file written");
        return Ok(());
    }

    let path = write_groups(&groups, cli.output.as_deref()).map_err(Failure::Save)?;
    writeln!(out)?;
    writeln!(out, "Groups have been saved to: {}", path.display())?;
    Ok(())
}

fn print_groups<W: Write>(out: &mut W, groups: &GroupCollection) -> io::Result<()> {
    writeln!(out, "Word Groups:")?;
    for (i, group) in groups.iter().enumerate() {
        let words: Vec<&str> = group.words().map(Word::as_str).collect();
        writeln!(out)?;
        writeln!(out, "Group {}:", i + 1)?;
        writeln!(out, "{}", words.join(", "))?;
    }
    Ok(())
}
