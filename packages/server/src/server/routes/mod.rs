// HTTP routes
pub mod evaluations;
pub mod health;

pub use evaluations::*;
pub use health::*;
