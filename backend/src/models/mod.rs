pub mod clinic;
pub mod coverage;
pub mod geo;
pub mod parameters;
pub mod patient;

pub use clinic::*;
pub use coverage::*;
pub use geo::*;
pub use parameters::*;
pub use patient::*;
