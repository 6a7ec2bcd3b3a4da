pub mod bounds;
pub mod distance;
pub mod error;
pub mod geocoder;
pub mod postal_codes;
mod responses;
