use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use estab::{convert_file, es_to_table, CsvOptions, TableOptions};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "estab")]
#[command(about = "Flatten search-engine JSON responses into CSV")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Aggregation to flatten (defaults to the first in the response)
    #[arg(short, long)]
    aggregation: Option<String>,

    /// Column name for top-level filter buckets
    #[arg(long)]
    filter_column: Option<String>,
}

impl SelectArgs {
    fn table_options(self) -> TableOptions {
        TableOptions {
            aggregation_name: self.aggregation,
            filter_column_name: self.filter_column,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a JSON response file to CSV
    Convert {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        select: SelectArgs,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Suppress the header row
        #[arg(long)]
        no_headers: bool,

        /// Build the header from the union of all rows' columns
        #[arg(long)]
        union_headers: bool,
    },

    /// Print the column layout a response would produce
    Columns {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        select: SelectArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            select,
            delimiter,
            no_headers,
            union_headers,
        } => {
            let table_options = select.table_options();
            let csv_options = CsvOptions {
                delimiter,
                include_headers: !no_headers,
                union_headers,
            };
            let (table, csv) =
                convert_file(&input, output.as_deref(), &table_options, &csv_options)?;
            match output {
                Some(path) => {
                    tracing::info!("wrote {} rows to {}", table.len(), path.display())
                }
                None => print!("{csv}"),
            }
        }

        Commands::Columns { input, select } => {
            let raw = std::fs::read_to_string(&input)?;
            let response = serde_json::from_str(&raw)?;
            let table = es_to_table(&response, &select.table_options())?;
            match table.first() {
                Some(first) => {
                    for column in first.keys() {
                        println!("{column}");
                    }
                }
                None => tracing::warn!("response produced no rows"),
            }
        }
    }

    Ok(())
}
