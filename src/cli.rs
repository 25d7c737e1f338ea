use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::data::grouping::group;
use crate::error::DataError;
use crate::report::{Document, render, to_html, to_text};
use crate::state::AppState;

/// File name the data export is deployed under.
pub const DEFAULT_DATA_FILE: &str = "data (1).csv";

#[derive(Parser)]
#[command(name = "trainee-lookup")]
#[command(version)]
#[command(about = "Look up trainee records and print their course reports", long_about = None)]
pub struct Cli {
    /// Trainee data file (.csv, .tsv, .json or .parquet)
    #[arg(short, long, global = true, default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show an overview of the dataset
    Stats,
    /// Find trainees by name fragment or exact trainee number
    Search {
        /// Part of a name (case-sensitive) or a full trainee number
        query: String,
        /// Write one HTML report per match into this directory
        #[arg(long)]
        export: Option<PathBuf>,
        /// Print the reports as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the printable HTML report of one trainee
    Report {
        /// Trainee number
        id: String,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(ExitCode::SUCCESS);
    };

    if let Commands::Search { query, .. } = &command {
        if query.is_empty() {
            eprintln!("أدخل اسم المتدرب أو الرقم التدريبي.");
            return Ok(ExitCode::FAILURE);
        }
    }

    let mut state = AppState::new(&cli.data);
    if let Err(e) = state.load() {
        eprintln!(
            "ملف البيانات {} غير موجود أو تعذرت قراءته.",
            cli.data.display()
        );
        eprintln!("Error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    match command {
        Commands::Stats => show_stats(&state)?,
        Commands::Search {
            query,
            export,
            json,
        } => search_trainees(&state, &query, export.as_deref(), json)?,
        Commands::Report { id, output } => return write_report(&state, &id, output.as_deref()),
    }

    Ok(ExitCode::SUCCESS)
}

fn show_stats(state: &AppState) -> Result<()> {
    let stats = state.stats()?;

    println!("بوابة شؤون المتدربين");
    println!("================================");
    println!("عدد المتدربين: {}", stats.trainees);
    println!("المقررات المطروحة: {}", stats.courses);
    println!("عدد الأقسام: {}", stats.departments.len());
    println!();
    println!("التخصصات المتاحة في النظام:");
    for (specialization, count) in &stats.specializations {
        println!("  {specialization} (عدد الطلاب: {count})");
    }
    println!();
    println!("ملف البيانات: {}", state.data_path().display());

    Ok(())
}

fn search_trainees(state: &AppState, query: &str, export: Option<&Path>, json: bool) -> Result<()> {
    let trainees = state.lookup(query)?;

    if trainees.is_empty() {
        println!("لم يتم العثور على متدرب بهذا الاسم أو الرقم.");
        return Ok(());
    }

    let documents: Vec<Document> = trainees.iter().map(render).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
    } else {
        println!("تم العثور على {} نتيجة:", trainees.len());
        println!();
        for trainee in &trainees {
            print!("{}", to_text(trainee));
            println!("---");
        }
    }

    if let Some(dir) = export {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating export directory {}", dir.display()))?;
        let names = export_file_names(documents.iter().map(|d| d.trainee_id.as_str()));
        for (doc, name) in documents.iter().zip(names) {
            let path = dir.join(name);
            fs::write(&path, to_html(doc))
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn write_report(state: &AppState, id: &str, output: Option<&Path>) -> Result<ExitCode> {
    let trainee = match group(state.dataset()?, id) {
        Ok(trainee) => trainee,
        Err(DataError::IdentifierNotFound(id)) => {
            eprintln!("لم يتم العثور على متدرب بالرقم {id}.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let html = to_html(&render(&trainee));
    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{html}"),
    }

    Ok(ExitCode::SUCCESS)
}

/// One file name per identifier. Identifiers that sanitize to the same name
/// get a `-2`, `-3`, ... suffix so no report overwrites another.
pub fn export_file_names<'a>(trainee_ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut names = Vec::new();
    for id in trainee_ids {
        let mut name = report_file_name(id);
        let stem = name.trim_end_matches(".html").to_string();
        let mut n = 2;
        while !taken.insert(name.clone()) {
            name = format!("{stem}-{n}.html");
            n += 1;
        }
        names.push(name);
    }
    names
}

/// `<id>.html`, with path separators replaced so the id cannot leave the
/// export directory.
pub fn report_file_name(trainee_id: &str) -> String {
    let safe: String = trainee_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let safe = if safe.is_empty() || safe.chars().all(|c| c == '.') {
        "trainee".to_string()
    } else {
        safe
    };
    format!("{safe}.html")
}
