use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nordigen::{Client, HttpTransport, NewRequisition};
use serde::Serialize;
use std::error::Error;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "nordigen-cli", about = "CLI wrapper for the GoCardless Bank Account Data API")]
struct Cli {
    /// Access token; falls back to NORDIGEN_ACCESS_TOKEN env var
    #[arg(long, env = "NORDIGEN_ACCESS_TOKEN")]
    token: String,

    /// API base URL; falls back to NORDIGEN_BASE_URL env var
    #[arg(long, env = "NORDIGEN_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show account metadata
    Account { id: String },
    /// Show account balances
    Balances { id: String },
    /// Show account details
    Details { id: String },
    /// Show booked and pending transactions
    Transactions {
        id: String,
        /// Start date YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        /// End date YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// List institutions for a country code
    Institutions { country: String },
    /// Show a single institution
    Institution { id: String },
    /// Create a requisition and print its authorization link
    Link {
        #[arg(long)]
        institution: String,
        #[arg(long)]
        redirect: String,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        agreement: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Show a requisition
    Requisition { id: String },
    /// List requisitions page by page
    Requisitions {
        #[arg(long, default_value_t = 100)]
        limit: u64,
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut transport =
        HttpTransport::new(cli.token)?.with_timeout(Duration::from_secs(cli.timeout))?;
    if let Some(base_url) = cli.base_url {
        transport = transport.with_base_url(&base_url)?;
    }
    let client = Client::from_transport(transport);

    match cli.command {
        Commands::Account { id } => print_json(&client.get_account_metadata(&id).await?)?,
        Commands::Balances { id } => print_json(&client.get_account_balances(&id).await?)?,
        Commands::Details { id } => print_json(&client.get_account_details(&id).await?)?,
        Commands::Transactions { id, from, to } => {
            print_json(&client.get_account_transactions(&id, from, to).await?)?
        }
        Commands::Institutions { country } => {
            for institution in client.list_institutions(&country).await? {
                println!(
                    "{} | {} | {} days",
                    institution.id, institution.name, institution.transaction_total_days
                );
            }
        }
        Commands::Institution { id } => print_json(&client.get_institution(&id).await?)?,
        Commands::Link {
            institution,
            redirect,
            reference,
            agreement,
            language,
        } => {
            let mut new = NewRequisition::new(institution, redirect);
            if let Some(reference) = reference {
                new = new.reference(reference);
            }
            if let Some(agreement) = agreement {
                new = new.agreement(agreement);
            }
            if let Some(language) = language {
                new = new.user_language(language);
            }
            let requisition = client.create_requisition(&new).await?;
            println!("Created requisition {}", requisition.id);
            println!("Open {} to link the account", requisition.link);
        }
        Commands::Requisition { id } => print_json(&client.get_requisition(&id).await?)?,
        Commands::Requisitions { limit, offset } => {
            let page = client.list_requisitions(limit, offset).await?;
            println!("{} requisitions in total", page.count);
            for requisition in &page.results {
                println!(
                    "{} | {} | {} | {} accounts",
                    requisition.id,
                    requisition.status,
                    requisition.institution_id,
                    requisition.accounts.len()
                );
            }
            if let Some(next) = page.next {
                println!("next page: {next}");
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
