mod config;
mod db;
mod error;
mod fetch;
mod movies;
mod weather;

use clap::{Parser, Subcommand};

use config::{MovieConfig, WeatherConfig};

#[derive(Parser)]
#[command(name = "feed_scraper", about = "CWA forecast feed + movie listing crawler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the downloaded forecast feed and rebuild the weather table
    Weather,
    /// Scrape the movie listing pages and export CSV
    Movies,
    /// Weather table view (dashboard read path)
    Overview {
        /// Show a single location instead of all
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Weather store counters
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Weather => {
            let cfg = WeatherConfig::from_env();
            let written = weather::run(&cfg)?;
            println!("Wrote {} rows to {}", written, cfg.db_path.display());
        }
        Commands::Movies => {
            let cfg = MovieConfig::from_env();
            let saved = movies::run(&cfg).await?;
            println!("Saved {} movies to {}", saved, cfg.csv_path.display());
        }
        Commands::Overview { location } => {
            let cfg = WeatherConfig::from_env();
            let conn = db::connect(&cfg.db_path)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_weather(&conn, location.as_deref())?;
            if rows.is_empty() {
                println!("No weather rows. Run 'weather' first.");
                return Ok(());
            }

            println!(
                "{:<10} | {:<12} | {:>6} | {:>6} | {}",
                "Date", "Location", "Min", "Max", "Weather"
            );
            println!("{}", "-".repeat(64));
            for r in &rows {
                println!(
                    "{:<10} | {:<12} | {:>6.1} | {:>6.1} | {}",
                    r.date,
                    truncate(&r.location, 12),
                    r.min_temp,
                    r.max_temp,
                    truncate(&r.description, 32),
                );
            }
            println!("\n{} rows", rows.len());
        }
        Commands::Stats => {
            let cfg = WeatherConfig::from_env();
            let conn = db::connect(&cfg.db_path)?;
            db::init_schema(&conn)?;
            let s = db::stats(&conn)?;
            println!("Rows:      {}", s.rows);
            println!("Locations: {}", s.locations);
            match (s.first_date, s.last_date) {
                (Some(first), Some(last)) => println!("Dates:     {} .. {}", first, last),
                _ => println!("Dates:     -"),
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
