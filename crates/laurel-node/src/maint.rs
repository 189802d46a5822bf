//! laurel-maint - ledger maintenance tool
//!
//! Applies the retention prune to the ledger and prints a per-day activity
//! summary. Run it from cron or by hand; the engine also prunes as it goes,
//! so this mainly matters for deployments that were offline for a while.
//!
//! Environment: same `LAUREL_*` variables as the engine.

use laurel_ledger::FileStore;
use laurel_node::NodeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laurel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NodeConfig::from_env();
    let store = FileStore::new(config.ledger_path());
    let mut ledger = store.load();

    if config.retention_days > 0 {
        let today = chrono::Local::now().date_naive();
        if let Some(cutoff) = today.checked_sub_days(chrono::Days::new(config.retention_days as u64))
        {
            let dropped = ledger.prune_before(cutoff);
            tracing::info!("Pruned {} day(s) older than {}", dropped, cutoff);
        }
    }

    for (day, members) in ledger.days() {
        let messages: u64 = members.values().map(|r| r.count).sum();
        tracing::info!(
            "{}: {} member(s), {} counted message(s)",
            day,
            members.len(),
            messages
        );
    }

    store.save(&ledger)?;
    tracing::info!("Ledger saved to {:?}", store.path());
    Ok(())
}
