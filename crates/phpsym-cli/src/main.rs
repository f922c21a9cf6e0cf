//! CLI binary for phpsym: scan PHP projects and detect their Symfony version.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phpsym_core::config::PhpsymConfig;
use phpsym_core::symbol::SymbolRecord;
use phpsym_core::table::SymbolTable;
use phpsym_parser::files::WalkOptions;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "phpsym", about = "PHP symbol index and Symfony version detection")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every PHP class and interface in the project
    Scan {
        /// Print the JSON export instead of a summary
        #[arg(long)]
        json: bool,

        /// Maximum number of files parsed concurrently
        #[arg(short, long)]
        limit: Option<usize>,

        /// Glob patterns to exclude files (repeatable)
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// Show one class or interface by qualified or short name
    Show {
        /// Qualified (App\Kernel) or short (Kernel) name
        name: String,
    },

    /// Detect the Symfony major version from Composer manifests
    Version,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = PhpsymConfig::load(&project_root)?;

    match cli.command {
        Commands::Scan {
            json,
            limit,
            exclude,
        } => cmd_scan(&project_root, config, json, limit, exclude).await,
        Commands::Show { name } => cmd_show(&project_root, &config, &name).await,
        Commands::Version => cmd_version(&project_root, &config),
    }
}

/// Index the project behind a spinner.
async fn scan_with_progress(project_root: &Path, config: &PhpsymConfig) -> Result<SymbolTable> {
    use indicatif::{ProgressBar, ProgressStyle};

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("invalid spinner template")?,
    );
    spinner.set_message("Parsing PHP sources...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let table = phpsym_index::indexer::index_project(project_root, config).await;
    spinner.finish_and_clear();
    table
}

async fn cmd_scan(
    project_root: &Path,
    mut config: PhpsymConfig,
    json: bool,
    limit: Option<usize>,
    exclude: Vec<String>,
) -> Result<()> {
    if let Some(limit) = limit {
        config.parser.max_concurrent_parses = limit;
    }
    config.walk.exclude.extend(exclude);
    config.validate()?;

    let table = scan_with_progress(project_root, &config).await?;

    if json {
        println!("{}", phpsym_core::schema::to_json(&table.to_records())?);
        return Ok(());
    }

    for file in table.files() {
        println!("{}", display_path(project_root, file));
        for record in table.records_in(file) {
            println!(
                "  {} {} (line {}, {} methods)",
                record.kind,
                record.qualified_name,
                record.location.line,
                record.methods.len()
            );
        }
    }
    eprintln!(
        "{} symbols in {} files",
        table.len(),
        table.files().count()
    );
    Ok(())
}

async fn cmd_show(project_root: &Path, config: &PhpsymConfig, name: &str) -> Result<()> {
    let table = scan_with_progress(project_root, config).await?;

    let matches: Vec<&SymbolRecord> = match table.get(name) {
        Some(record) => vec![record],
        None => table.find_by_short_name(name).collect(),
    };
    if matches.is_empty() {
        anyhow::bail!("no class or interface named {}", name);
    }

    for (i, record) in matches.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_record(project_root, record);
    }
    Ok(())
}

fn print_record(project_root: &Path, record: &SymbolRecord) {
    println!("{} {}", record.kind, record.qualified_name);
    println!(
        "  defined at {}:{}:{}",
        display_path(project_root, &record.location.file),
        record.location.line,
        record.location.column
    );
    if !record.methods.is_empty() {
        println!("  methods:");
        for method in &record.methods {
            println!("    {}()", method);
        }
    }
    if !record.imports.is_empty() {
        println!("  imports:");
        for import in &record.imports {
            match &import.alias {
                Some(alias) => println!("    {} as {}", import.imported_name, alias),
                None => println!("    {}", import.imported_name),
            }
        }
    }
}

fn cmd_version(project_root: &Path, config: &PhpsymConfig) -> Result<()> {
    let options = WalkOptions {
        respect_gitignore: config.walk.respect_gitignore,
        exclude: config.walk.exclude.clone(),
    };
    let fact = phpsym_index::manifest::resolve_with(project_root, &options)?;
    println!(
        "Symfony {} ({})",
        fact.major_version,
        display_path(project_root, &fact.source)
    );
    Ok(())
}

fn display_path(project_root: &Path, path: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}
