// Domain layer: API models, aliased value types and ports (interfaces).

pub mod currency;
pub mod identification;
pub mod model;
pub mod ports;
pub mod values;
pub mod wallet;
