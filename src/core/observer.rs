use crate::domain::ports::SearchObserver;
use crate::utils::error::SupplierError;
use std::time::Duration;

/// Default observer: forwards supplier outcomes to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_dispatch(&self, supplier: &str) {
        tracing::debug!(supplier, "Dispatching search to supplier");
    }

    fn on_completed(&self, supplier: &str, offers: usize, elapsed: Duration) {
        tracing::info!(
            supplier,
            offers,
            elapsed_ms = elapsed.as_millis() as u64,
            "✅ Supplier returned {} offers",
            offers
        );
    }

    fn on_failed(&self, supplier: &str, error: &SupplierError, elapsed: Duration) {
        tracing::warn!(
            supplier,
            cause = error.kind(),
            elapsed_ms = elapsed.as_millis() as u64,
            "⚠️ Supplier contributed no offers: {}",
            error
        );
    }

    fn on_merged(&self, total_offers: usize, suppliers: usize) {
        tracing::info!(
            total_offers,
            suppliers,
            "📦 Merged {} offers from {} suppliers",
            total_offers,
            suppliers
        );
    }
}
