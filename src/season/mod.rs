pub mod boundaries;
pub mod classifier;
pub mod ephemeris;
pub mod error;
mod vsop87;
