use nova_ledger::{
    advisor::{AdvisorGateway, ChatSession},
    auth,
    config::Settings,
    gemini::GeminiClient,
    history::DashboardSummary,
    ledger::LedgerStore,
    storage::FileStore,
    transfer::{self, TransferRequest},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load();

    info!("NovaBank ledger starting");
    info!(data_dir = %settings.data_dir.display(), model = %settings.gemini_model, "Settings loaded");

    // Composition root owns the ledger
    let storage = Box::new(FileStore::open(&settings.data_dir)?);
    let mut ledger = LedgerStore::open(storage)?;

    if ledger.user().is_none() {
        let profile = auth::authenticate(auth::DEMO_EMAIL, auth::DEMO_PASSWORD)?;
        ledger.set_user(Some(profile))?;
    }

    let request = TransferRequest::new("AC-882199", "45.00").with_note("Dinner split");
    match transfer::submit(&mut ledger, &request) {
        Ok(tx) => info!(tx_id = %tx.id, "Demo transfer recorded"),
        Err(e) => warn!("Demo transfer rejected: {}", e),
    }

    let summary = DashboardSummary::build(&ledger);
    println!("\n=== DASHBOARD ===");
    if let (Some(balance), Some(currency)) = (summary.balance, summary.currency.as_deref()) {
        println!("Balance: {:.2} {}", balance, currency);
    }
    println!("Income: {:.2}  Spending: {:.2}", summary.total_income, summary.total_spending);
    println!("\nRecent:");
    for tx in &summary.recent {
        println!("  {:>10}  {:<10} {}", tx.display_amount(), tx.category, tx.description);
    }

    if let Some(query) = settings.advisor_query.as_deref() {
        let client = GeminiClient::new(settings.gemini_api_key.clone(), &settings.gemini_model)?;
        let gateway = AdvisorGateway::new(Arc::new(client));
        let mut session = ChatSession::new(ledger.user().map(|u| u.display_name.as_str()));

        if let Some(reply) = session.send(&gateway, &ledger, query).await {
            println!("\n=== NOVA ===\n{}", reply.content);
        }
    }

    Ok(())
}
