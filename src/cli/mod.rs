//! # CLI Module
//!
//! Command-line interface for the photo library.
//!
//! ## Usage
//! ```bash
//! # Import a memory card into the default library
//! photoshell import /media/card
//!
//! # Use another decoder and a custom library location
//! photoshell --library ~/Photos/lib import /media/card --decoder darktable-cli
//!
//! # List everything as JSON
//! photoshell list --output json
//!
//! # Show one photo by digest prefix
//! photoshell show 3f2a9c
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photoshell::core::develop::DecoderConfig;
use photoshell::core::library::{ImportOutcome, ImportReport, Library, LibraryBuilder};
use photoshell::core::selection::{Image, Selection};
use photoshell::error::{Result, SidecarError};
use photoshell::events::{EventChannel, ImportEvent};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Photoshell - import raw photos once, browse them forever
#[derive(Parser, Debug)]
#[command(name = "photoshell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library root (defaults to <Pictures>/photoshell)
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import raw files from a directory
    Import {
        /// Directory to import from
        source: PathBuf,

        /// Raw decoder program
        #[arg(long, default_value = "dcraw")]
        decoder: String,

        /// Arguments passed to the decoder before the file path
        #[arg(long = "decoder-arg", allow_hyphen_values = true)]
        decoder_args: Vec<String>,

        /// Seconds before a decoder run is killed
        #[arg(long, default_value = "120")]
        timeout_secs: u64,

        /// Raw file extensions to import (case-sensitive, repeatable)
        #[arg(short, long = "extension")]
        extensions: Vec<String>,

        /// JPEG quality of developed images (1-100)
        #[arg(short, long, default_value = "90")]
        quality: u8,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Skip checking already-imported photos for missing files
        #[arg(long)]
        no_verify: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// List every photo in the library
    List {
        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Show one photo, addressed by digest or digest prefix
    Show {
        digest: String,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (developed image paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = cli.library.unwrap_or_else(default_library_root);

    match cli.command {
        Commands::Import {
            source,
            decoder,
            decoder_args,
            timeout_secs,
            extensions,
            quality,
            include_hidden,
            no_verify,
            output,
        } => {
            let mut builder = Library::builder(root)
                .decoder_config(decoder_config(decoder, decoder_args, timeout_secs))
                .jpeg_quality(quality)
                .include_hidden(include_hidden)
                .verify_existing(!no_verify);
            if !extensions.is_empty() {
                builder = builder.raw_extensions(extensions);
            }
            run_import(builder, &source, output)
        }
        Commands::List { output } => {
            let library = Library::open(root)?;
            let selection = library.query_all();
            match output {
                OutputFormat::Pretty => print_pretty_list(&Term::stdout(), &library, &selection),
                OutputFormat::Json => print_json(&selection.iter().collect::<Vec<_>>())?,
                OutputFormat::Minimal => {
                    for image in &selection {
                        println!("{}", image.derived_path().display());
                    }
                }
            }
            Ok(())
        }
        Commands::Show { digest, output } => {
            let library = Library::open(root)?;
            let mut selection = library.query_all();
            let prefix = digest.to_lowercase();
            let target = selection
                .iter()
                .find(|image| image.digest().as_str().starts_with(&prefix))
                .map(|image| image.digest().clone())
                .ok_or(SidecarError::NotFound { digest })?;
            let total = selection.len();
            let image = selection
                .jump(&target)
                .cloned()
                .ok_or_else(|| SidecarError::NotFound {
                    digest: target.to_string(),
                })?;
            match output {
                OutputFormat::Pretty => {
                    print_pretty_image(&Term::stdout(), &image, selection.position(), total)
                }
                OutputFormat::Json => print_json(&image)?,
                OutputFormat::Minimal => println!("{}", image.derived_path().display()),
            }
            Ok(())
        }
    }
}

fn default_library_root() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photoshell")
}

fn decoder_config(program: String, args: Vec<String>, timeout_secs: u64) -> DecoderConfig {
    let defaults = DecoderConfig::default();
    // The stock arguments only make sense for the stock decoder
    let args = if args.is_empty() && program == defaults.program {
        defaults.args
    } else {
        args
    };
    DecoderConfig {
        program,
        args,
        timeout: Duration::from_secs(timeout_secs),
    }
}

fn run_import(builder: LibraryBuilder, source: &Path, output: OutputFormat) -> Result<()> {
    let term = Term::stderr();

    // Print header
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photoshell").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let library = builder.open()?;

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        if let Ok(bar_style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("█▓░"));
        }
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let mut processed = 0u64;
        let mut counting = false;
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                ImportEvent::Discovered { total_files } => {
                    pb.set_length(total_files as u64);
                    counting = true;
                }
                ImportEvent::FileStarted { file_name } => {
                    pb.set_message(file_name);
                }
                ImportEvent::FileDone { .. } | ImportEvent::FileFailed { .. } if counting => {
                    processed += 1;
                    pb.set_position(processed);
                }
                ImportEvent::Completed { .. } | ImportEvent::Error { .. } => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = library.import_with_events(source, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let report = result?;

    match output {
        OutputFormat::Pretty => print_pretty_report(&term, &library, &report),
        OutputFormat::Json => print_json(&report.summary())?,
        OutputFormat::Minimal => {
            for file in &report.imported {
                if file.outcome == ImportOutcome::Imported {
                    println!("{}", file.image.derived_path().display());
                }
            }
        }
    }

    Ok(())
}

fn print_pretty_report(term: &Term, library: &Library, report: &ImportReport) {
    let (mark, headline) = if report.cancelled {
        (style("!").yellow().bold(), "Import Cancelled")
    } else {
        (style("✓").green().bold(), "Import Complete")
    };
    term.write_line(&format!("{} {}", mark, headline)).ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} raw files found in {:.1}s",
        style(report.total_files).cyan(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();

    let rows = [
        (report.count(ImportOutcome::Imported), "new photos imported"),
        (report.count(ImportOutcome::AlreadyInLibrary), "already in library"),
        (report.count(ImportOutcome::Repaired), "repaired"),
        (report.count(ImportOutcome::RecoveredSidecar), "recovered from existing sidecars"),
    ];
    for (count, label) in rows {
        if count > 0 {
            term.write_line(&format!("  {} {}", style(count).cyan(), label))
                .ok();
        }
    }

    if !report.failures.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!(
            "{}",
            style(format!("{} failed:", report.failures.len())).red().bold()
        ))
        .ok();
        for failure in &report.failures {
            term.write_line(&format!(
                "    {} {}",
                style("✗").red(),
                display_path(&failure.source)
            ))
            .ok();
            term.write_line(&format!("      {}", style(&failure.error).dim()))
                .ok();
        }
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{}",
        style(format!(
            "Library at {} now holds {} photos.",
            display_path(library.root()),
            library.len()
        ))
        .dim()
    ))
    .ok();
}

fn print_pretty_list(term: &Term, library: &Library, selection: &Selection) {
    if selection.is_empty() {
        term.write_line(&format!(
            "  No photos in {} yet. Try `photoshell import <dir>`.",
            display_path(library.root())
        ))
        .ok();
        return;
    }

    for image in selection {
        let marker = if image.derived_path().is_file() {
            style("●").green().to_string()
        } else {
            style("○").red().to_string()
        };
        term.write_line(&format!(
            "  {} {}  {}",
            marker,
            style(image.digest().short()).yellow(),
            display_path(image.derived_path())
        ))
        .ok();
    }

    term.write_line("").ok();
    term.write_line(&format!("{}", style(format!("{} photos", selection.len())).dim()))
        .ok();
}

fn print_pretty_image(term: &Term, image: &Image, position: Option<usize>, total: usize) {
    term.write_line(&format!(
        "{} {}",
        style("Photo").bold(),
        style(image.digest()).yellow()
    ))
    .ok();
    if let Some(position) = position {
        term.write_line(&format!("  {} of {}", position + 1, total))
            .ok();
    }
    term.write_line(&format!("  {}", display_path(image.derived_path())))
        .ok();
    if !image.derived_path().is_file() {
        term.write_line(&format!(
            "  {}",
            style("Developed image is missing; re-import to restore it.").red()
        ))
        .ok();
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| photoshell::PhotoshellError::Config(format!("JSON output failed: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn display_path(path: &Path) -> String {
    let home = dirs::home_dir().unwrap_or_default();
    match path.strip_prefix(&home) {
        Ok(relative) if !home.as_os_str().is_empty() => format!("~/{}", relative.display()),
        _ => path.display().to_string(),
    }
}
