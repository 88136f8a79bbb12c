pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CrazyAirSupplier, HttpTransport, ToughJetSupplier};
pub use config::SupplierConfig;
pub use core::{observer::TracingObserver, search::FlightSearchService};
pub use domain::model::{CanonicalOffer, SearchCriteria, SearchResponse};
pub use domain::ports::{FlightSupplier, SearchObserver};
pub use utils::error::{FlightSearchError, Result, SupplierError};
