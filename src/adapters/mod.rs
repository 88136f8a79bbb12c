// Adapters layer: concrete supplier implementations behind the FlightSupplier port.

pub mod crazy_air;
pub mod tough_jet;
pub mod transport;

pub use crazy_air::{CrazyAirSupplier, CRAZY_AIR_SUPPLIER};
pub use tough_jet::{ToughJetSupplier, TOUGH_JET_SUPPLIER};
pub use transport::HttpTransport;
