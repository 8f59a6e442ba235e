use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::info;

use figure_catalog::collection::{self, SortOrder};
use figure_catalog::config::Settings;
use figure_catalog::db::{self, FigureRecord};
use figure_catalog::draft::{Draft, Prefill};
use figure_catalog::listing::{FixtureListings, ListingProvider};
use figure_catalog::{enrich, extract, stats, transfer, CatalogError};

#[derive(Parser)]
#[command(name = "figures", about = "Action figure catalog with metadata pre-fill")]
struct Cli {
    /// SQLite file (default: FIGURES_DB_PATH or data/figures.sqlite)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the figures table
    Init,
    /// Print the fields inferred from a title and notes, as JSON
    Extract {
        #[arg(short, long, default_value = "")]
        title: String,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Add a figure; blank fields are pre-filled from name + notes
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        photo: Option<String>,
        #[arg(long)]
        series: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        packaging: Option<String>,
    },
    /// Look up a barcode and build a draft from the chosen listing
    Scan {
        barcode: String,
        /// Which result to use (0-based)
        #[arg(long, default_value = "0")]
        pick: usize,
        /// Save the draft instead of only printing it
        #[arg(long)]
        save: bool,
    },
    /// List figures
    List {
        /// Filter on name, series or manufacturer
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long, value_enum, default_value_t = SortOrder::Name)]
        sort: SortOrder,
    },
    /// Show one figure
    Show { id: i64 },
    /// Delete one figure
    Delete { id: i64 },
    /// Write all figures to a JSON file
    Export { path: PathBuf },
    /// Add figures from a JSON file
    Import { path: PathBuf },
    /// Collection statistics
    Stats,
    /// Fill blank fields of stored figures from their name + notes
    Enrich,
    /// Drop all figures
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let result = run(cli.db.as_deref(), cli.command);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    result
}

/// Open the catalog at `--db`, else at the configured path, creating the table if needed.
fn open(db_override: Option<&Path>) -> Result<Connection> {
    let path = match db_override {
        Some(p) => p.to_path_buf(),
        None => Settings::load()?.db_path,
    };
    info!(db = ?path, "opening catalog");
    let conn = db::connect(&path)?;
    db::init_schema(&conn)?;
    Ok(conn)
}

fn run(db_path: Option<&Path>, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {
            let conn = open(db_path)?;
            println!("Catalog ready ({} figures).", db::count_figures(&conn)?);
        }
        Commands::Extract { title, notes } => {
            let fields = extract(&title, &notes);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Commands::Add {
            name,
            notes,
            photo,
            series,
            price,
            quantity,
            description,
            packaging,
        } => {
            let mut draft = Draft::from_prefill(Prefill {
                name,
                notes: notes.unwrap_or_default(),
                photo_uri: photo.unwrap_or_default(),
            });
            let overrides = [
                (&mut draft.series, series),
                (&mut draft.purchase_price, price),
                (&mut draft.quantity, quantity),
                (&mut draft.description, description),
                (&mut draft.packaging, packaging),
            ];
            for (field, value) in overrides {
                if let Some(v) = value {
                    *field = v;
                }
            }
            let figure = draft.to_new_figure()?;
            let conn = open(db_path)?;
            let id = db::insert_figure(&conn, &figure)?;
            println!("Saved figure #{}.", id);
            print_draft(&draft)?;
        }
        Commands::Scan { barcode, pick, save } => {
            let provider = FixtureListings::default();
            let mut listings = provider.search_by_barcode(&barcode)?;
            if listings.is_empty() {
                println!("No results for {}.", barcode);
                let known: Vec<&str> = provider.barcodes().collect();
                println!("Known test barcodes: {}", known.join(", "));
                return Ok(());
            }
            for (i, l) in listings.iter().enumerate() {
                println!("[{}] {} | {}", i, l.title, l.description);
            }
            if pick >= listings.len() {
                bail!("--pick {} out of range ({} results)", pick, listings.len());
            }
            let draft = Draft::from_prefill(listings.swap_remove(pick).into());
            print_draft(&draft)?;
            if save {
                let conn = open(db_path)?;
                let id = db::insert_figure(&conn, &draft.to_new_figure()?)?;
                println!("Saved figure #{}.", id);
            }
        }
        Commands::List { query, sort } => {
            let conn = open(db_path)?;
            let mut records = db::fetch_figures(&conn)?;
            collection::sort(&mut records, sort);
            let shown = collection::filter(&records, query.as_deref().unwrap_or_default());
            if shown.is_empty() {
                println!("No figures found.");
                return Ok(());
            }
            println!(
                "{:>4} | {:<32} | {:<16} | {:>4} | {:>8}",
                "#", "Name", "Manufacturer", "Year", "Price"
            );
            println!("{}", "-".repeat(76));
            for r in &shown {
                print_row(r);
            }
            println!("\n{} of {} figures", shown.len(), records.len());
        }
        Commands::Show { id } => {
            let conn = open(db_path)?;
            let record = db::fetch_figure_by_id(&conn, id)?.ok_or(CatalogError::NotFound(id))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Delete { id } => {
            let conn = open(db_path)?;
            if !db::delete_figure(&conn, id)? {
                return Err(CatalogError::NotFound(id).into());
            }
            println!("Deleted figure #{}.", id);
        }
        Commands::Export { path } => {
            let conn = open(db_path)?;
            let n = transfer::export_json(&conn, &path)?;
            println!("Exported {} figures to {:?}", n, path);
        }
        Commands::Import { path } => {
            let conn = open(db_path)?;
            let n = transfer::import_json(&conn, &path)
                .with_context(|| format!("Import from {:?} failed", path))?;
            println!("Import complete: {} figures added.", n);
        }
        Commands::Stats => {
            let conn = open(db_path)?;
            let s = stats::compute(&db::fetch_figures(&conn)?);
            let year = |y: Option<i64>| y.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
            println!("Total figures:       {}", s.total);
            println!("Total spent:         ${:.2}", s.total_price);
            println!("Average price:       ${:.2}", s.avg_price);
            println!("Most common maker:   {}", or_dash(&s.most_common_maker));
            println!("Most common series:  {}", or_dash(&s.most_common_series));
            println!("Year range:          {} - {}", year(s.min_year), year(s.max_year));
        }
        Commands::Enrich => {
            let conn = open(db_path)?;
            let counts = enrich::run(&conn)?;
            println!(
                "Scanned {} figures, updated {} ({} fields filled).",
                counts.scanned, counts.updated, counts.fields_filled
            );
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("reset deletes all local data; pass --yes to confirm");
            }
            let conn = open(db_path)?;
            db::reset_database(&conn)?;
            println!("Local database has been cleared.");
        }
    }
    Ok(())
}

fn print_draft(draft: &Draft) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(draft)?);
    Ok(())
}

fn print_row(r: &FigureRecord) {
    let f = &r.figure;
    println!(
        "{:>4} | {:<32} | {:<16} | {:>4} | {:>8}",
        r.id,
        truncate(&f.name, 32),
        truncate(f.manufacturer.as_deref().unwrap_or("-"), 16),
        f.year.map(|y| y.to_string()).unwrap_or_else(|| "-".into()),
        f.purchase_price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".into()),
    );
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
