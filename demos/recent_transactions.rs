use chrono::Days;
use nordigen::{Client, HttpTransport};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let token = env::var("NORDIGEN_ACCESS_TOKEN")
        .map_err(|_| "Set NORDIGEN_ACCESS_TOKEN in your environment or .env file")?;
    let account_id = env::args()
        .nth(1)
        .ok_or("Usage: recent_transactions <ACCOUNT_ID>")?;

    let mut transport = HttpTransport::new(token)?;
    if let Ok(base_url) = env::var("NORDIGEN_BASE_URL") {
        transport = transport.with_base_url(&base_url)?;
    }
    let client = Client::from_transport(transport);

    // Booked and pending transactions for the last 30 days.
    let end = chrono::Utc::now().date_naive();
    let start = end
        .checked_sub_days(Days::new(29))
        .expect("valid start date window");

    let txns = client
        .get_account_transactions(&account_id, Some(start), Some(end))
        .await?;

    println!(
        "{} booked, {} pending transactions from {} to {}:",
        txns.booked().len(),
        txns.pending().len(),
        start,
        end
    );
    for txn in txns.booked() {
        println!(
            "{} | {} {} {} | {}",
            txn.booking_date,
            txn.transaction_amount.amount,
            txn.transaction_amount.currency,
            txn.transaction_id,
            txn.remittance_information_unstructured
        );
    }
    for txn in txns.pending() {
        println!(
            "{} | {} {} | pending | {}",
            txn.value_date,
            txn.transaction_amount.amount,
            txn.transaction_amount.currency,
            txn.remittance_information_unstructured
        );
    }

    Ok(())
}
