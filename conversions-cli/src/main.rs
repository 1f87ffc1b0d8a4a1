//! Conversions CLI
//!
//! Command-line interface for the Currency Conversion API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use conversions_client::ConversionsClient;
use conversions_types::ConversionId;

#[derive(Parser)]
#[command(name = "conversions")]
#[command(author, version, about = "Currency Conversion API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Conversions API
    #[arg(
        long,
        env = "CONVERSIONS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Convert an amount and record the conversion
    Convert {
        /// Source currency (e.g. USD)
        #[arg(long)]
        from: String,
        /// Target currency (e.g. EUR)
        #[arg(long)]
        to: String,
        /// Amount in the source currency
        #[arg(long)]
        amount: Decimal,
        /// Department the conversion is booked against
        #[arg(long)]
        department: i64,
    },
    /// Get a conversion by ID
    Get {
        /// Conversion ID
        id: String,
    },
    /// List conversions for a department
    Department {
        /// Department ID
        id: i64,
    },
    /// List conversions into a target currency
    Currency {
        /// Target currency code
        code: String,
    },
    /// List all conversions
    List,
}

fn parse_conversion_id(s: &str) -> Result<ConversionId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid conversion ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ConversionsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Convert {
            from,
            to,
            amount,
            department,
        } => {
            let conversion = client.convert(&from, &to, amount, department).await?;
            println!("{}", serde_json::to_string_pretty(&conversion)?);
        }

        Commands::Get { id } => {
            let conversion_id = parse_conversion_id(&id)?;
            let conversion = client.get_conversion(conversion_id).await?;
            println!("{}", serde_json::to_string_pretty(&conversion)?);
        }

        Commands::Department { id } => {
            let conversions = client.by_department(id).await?;
            println!("{}", serde_json::to_string_pretty(&conversions)?);
        }

        Commands::Currency { code } => {
            let conversions = client.by_currency(&code).await?;
            println!("{}", serde_json::to_string_pretty(&conversions)?);
        }

        Commands::List => {
            let conversions = client.list_conversions().await?;
            println!("{}", serde_json::to_string_pretty(&conversions)?);
        }
    }

    Ok(())
}
