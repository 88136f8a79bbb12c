// Domain layer: canonical flight model and the ports the search service depends on.

pub mod model;
pub mod ports;
