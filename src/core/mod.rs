pub mod observer;
pub mod search;

pub use crate::domain::model::{merge_offers, CanonicalOffer, SearchCriteria, SearchResponse};
pub use crate::domain::ports::{FlightSupplier, SearchObserver};
pub use crate::utils::error::{Result, SupplierError};
