// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use gpa_ledger::{logging, Config, GradeLedger, GradeScale};

#[derive(Parser, Debug)]
#[command(name = "gpa-ledger", version)]
#[command(about = "Semester GPA and cumulative CGPA calculator", long_about = None)]
struct Args {
    /// JSON config file (grade scale, log file)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Grade scale for the course grade picker (overrides the config file)
    #[arg(short, long, global = true)]
    scale: Option<GradeScale>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive calculator (default)
    Tui,

    /// Compute the report for a JSON ledger snapshot
    Report {
        /// Snapshot file
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the grades of the selected scale
    Scales,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(scale) = args.scale {
        config.grade_scale = scale;
    }

    match args.command.unwrap_or(Command::Tui) {
        Command::Tui => run_ui_mode(&config)?,
        Command::Report { file, json } => {
            logging::init_stderr();
            run_report(&file, json)?;
        }
        Command::Scales => {
            logging::init_stderr();
            print_scale(config.grade_scale);
        }
    }

    Ok(())
}

fn run_report(file: &Path, json: bool) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read snapshot {}", file.display()))?;
    let ledger = GradeLedger::from_snapshot(&contents)
        .with_context(|| format!("Invalid snapshot {}", file.display()))?;
    log::info!(
        "loaded {} semester(s) from {}",
        ledger.semesters().len(),
        file.display()
    );

    let report = ledger.report();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}

fn print_scale(scale: GradeScale) {
    println!("Grade scale: {}", scale);
    for grade in scale.grades() {
        println!("  {:<3} {:.2}", grade.letter, grade.point);
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    logging::init_for_tui(config.log_file.as_deref())?;
    log::info!("gpa-ledger {} starting (scale: {})", gpa_ledger::VERSION, config.grade_scale);

    let mut app = ui::App::new(config.grade_scale);
    ui::run_ui(&mut app)?;

    log::info!("ui closed, final CGPA {}", app.report.cgpa_display);
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or compute a snapshot: gpa-ledger report <FILE>");
    std::process::exit(1);
}
