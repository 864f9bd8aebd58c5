use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use photo_organizer_core::{organize_directory, OrganizeOptions, Reporter, Stats};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "organize-photos")]
#[command(version)]
#[command(about = "Organize photos into year/month folders or month-only folders.")]
struct Cli {
    /// Directory containing photos (default: current directory)
    #[arg(short, long, default_value = ".")]
    directory: PathBuf,
    /// Organize photos by month only, without creating year folders
    #[arg(short, long = "no-year-folders", default_value_t = false)]
    no_year_folders: bool,
    /// Increase diagnostic logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let options = OrganizeOptions {
        directory: cli.directory,
        skip_year: cli.no_year_folders,
    };
    let mut reporter = ConsoleReporter::new(cli.output);
    let stats = organize_directory(&options, &mut reporter)?;

    if cli.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Progress lines go to stdout, or to stderr when stdout carries JSON.
struct ConsoleReporter {
    format: OutputFormat,
}

impl ConsoleReporter {
    fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn line(&self, message: &str) {
        match self.format {
            OutputFormat::Table => println!("{message}"),
            OutputFormat::Json => eprintln!("{message}"),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn started(&mut self, directory: &Path, skip_year: bool) {
        self.line(&format!(
            "Starting photo organization in: {}",
            directory.display()
        ));
        self.line(if skip_year {
            "Organizing by month only"
        } else {
            "Organizing by year and month"
        });
    }

    fn skipped(&mut self, path: &Path) {
        log::debug!("skipped {}", path.display());
    }

    fn moved(&mut self, source: &Path, destination: &Path, base_dir: &Path) {
        self.line(&moved_line(source, destination, base_dir));
    }

    fn failed(&mut self, path: &Path, error: &anyhow::Error) {
        self.line(&format!(
            "Error processing {}: {error:#}",
            display_name(path)
        ));
    }

    fn finished(&mut self, stats: &Stats) {
        if self.format == OutputFormat::Json {
            return;
        }
        self.line("\nSummary:");
        self.line(&format!("Processed: {} images", stats.processed));
        self.line(&format!("Skipped: {} files", stats.skipped));
        self.line(&format!("Errors: {} files", stats.errors));
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// `Moved: a.jpg -> 2022/01/`, naming the new file only when it was renamed.
fn moved_line(source: &Path, destination: &Path, base_dir: &Path) -> String {
    let folder = destination
        .parent()
        .map(|parent| parent.strip_prefix(base_dir).unwrap_or(parent))
        .unwrap_or(destination);
    let folder = folder
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/");

    let original = display_name(source);
    let placed = display_name(destination);
    if original == placed {
        format!("Moved: {original} -> {folder}/")
    } else {
        format!("Moved: {original} -> {folder}/{placed}")
    }
}
