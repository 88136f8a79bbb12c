use crate::domain::model::{CanonicalOffer, SearchCriteria};
use crate::utils::error::SupplierError;
use async_trait::async_trait;
use std::time::Duration;

/// One external flight source. Implementations own their transport settings.
#[async_trait]
pub trait FlightSupplier: Send + Sync {
    fn name(&self) -> &str;

    async fn query(
        &self,
        criteria: &SearchCriteria,
    ) -> std::result::Result<Vec<CanonicalOffer>, SupplierError>;
}

/// Receives per-supplier diagnostics from the search service.
pub trait SearchObserver: Send + Sync {
    fn on_dispatch(&self, _supplier: &str) {}

    fn on_completed(&self, supplier: &str, offers: usize, elapsed: Duration);

    fn on_failed(&self, supplier: &str, error: &SupplierError, elapsed: Duration);

    fn on_merged(&self, _total_offers: usize, _suppliers: usize) {}
}
