//! Syllabus tracker CLI.

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use syllabus_core::{Catalog, Course, FilterMode, PyqYear, SortMode};
use syllabus_progress::TrackerEngine;
use syllabus_storage::JsonStorage;

#[derive(Parser)]
#[command(name = "syllabus")]
#[command(about = "Track course module and PYQ progress", long_about = None)]
struct Cli {
    /// Directory holding tracker state
    #[arg(long, global = true, default_value = ".syllabus")]
    data_dir: PathBuf,

    /// Seed catalog JSON file (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall and per-course progress
    Status {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// List courses
    List {
        /// all, incomplete, pyq2023, pyq2024 or completed
        #[arg(long, default_value = "all")]
        filter: String,
        /// none, completion or lectures
        #[arg(long, default_value = "none")]
        sort: String,
    },
    /// Show a course with its modules
    Show {
        /// Course code
        code: String,
    },
    /// Toggle a module's completion
    Toggle {
        /// Course code
        code: String,
        /// Module ID
        module_id: String,
    },
    /// Replace a module's notes
    Notes {
        /// Course code
        code: String,
        /// Module ID
        module_id: String,
        /// New notes
        text: String,
    },
    /// Toggle previous year question coverage
    Pyq {
        /// Course code
        code: String,
        /// 2023 or 2024
        year: String,
    },
    /// Export all progress to a dated JSON file
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace all progress with an exported file
    Import {
        /// File to import
        file: PathBuf,
    },
    /// Discard progress and reseed from the catalog
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading catalog {}", path.display()))?;
            Catalog::from_json(&json).context("parsing catalog")?
        }
        None => Catalog::builtin(),
    };

    debug!("Using data directory {}", cli.data_dir.display());
    let storage = JsonStorage::new(&cli.data_dir).await?;
    let mut tracker = TrackerEngine::open(storage, catalog).await;

    match cli.command {
        Commands::Status { json } => {
            let snapshot = tracker.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }

            println!("Overall progress: {:.0}%", snapshot.global_completion);
            println!("Remaining lectures: {}", snapshot.remaining_lectures());
            for course in &snapshot.courses {
                println!(
                    "  {:<8} {:>4.0}%  {}/{} modules  {} lectures left",
                    course.code,
                    course.completion,
                    course.completed_modules,
                    course.total_modules,
                    course.remaining_lectures,
                );
            }
        }
        Commands::List { filter, sort } => {
            let filter: FilterMode = filter.parse()?;
            let sort: SortMode = sort.parse()?;
            let view = tracker.view(filter, sort);

            if view.is_empty() {
                println!("No courses match the current filter");
                return Ok(());
            }
            println!("Courses ({})", view.len());
            for course in view {
                println!(
                    "  {} | {:>3.0}% | {} | {} - {}",
                    course.code,
                    course.completion(),
                    format_pyq(course),
                    course.remaining_lectures(),
                    course.name,
                );
            }
        }
        Commands::Show { code } => {
            let Some(course) = tracker.collection().course(&code) else {
                println!("Course not found");
                return Ok(());
            };

            println!("Course: {} - {}", course.code, course.name);
            println!("  Completion: {:.0}%", course.completion());
            println!("  PYQ: {}", format_pyq(course));
            for module in &course.modules {
                println!(
                    "  [{}] {} {} ({} lectures)",
                    if module.completed { "x" } else { " " },
                    module.id,
                    module.name,
                    module.lectures,
                );
                println!("      {}", module.topics);
                if !module.notes.is_empty() {
                    println!("      Notes: {}", module.notes);
                }
            }
        }
        Commands::Toggle { code, module_id } => {
            if tracker.toggle_module_completion(&code, &module_id).await {
                println!("Toggled {} in {}", module_id, code);
            } else {
                println!("Module not found");
            }
        }
        Commands::Notes { code, module_id, text } => {
            if tracker.set_module_notes(&code, &module_id, text).await {
                println!("Updated notes for {}", module_id);
            } else {
                println!("Module not found");
            }
        }
        Commands::Pyq { code, year } => {
            let year: PyqYear = year.parse()?;
            if tracker.toggle_pyq(&code, year).await {
                println!("Toggled {} for {}", year.as_str(), code);
            } else {
                println!("Course not found");
            }
        }
        Commands::Export { out } => {
            let path = tracker.export_to_dir(&out).await?;
            println!("Exported to {}", path.display());
        }
        Commands::Import { file } => {
            let report = tracker
                .import_file(&file)
                .await
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!(
                "Imported {} courses ({} modules): {}",
                report.course_codes.len(),
                report.module_count,
                report.course_codes.join(", "),
            );
        }
        Commands::Reset => {
            tracker.reset().await;
            println!("Progress reset");
        }
    }

    Ok(())
}

fn format_pyq(course: &Course) -> String {
    let mark = |done: bool| if done { "done" } else { "todo" };
    format!(
        "2023 {} / 2024 {}",
        mark(course.pyq(PyqYear::Y2023)),
        mark(course.pyq(PyqYear::Y2024)),
    )
}
