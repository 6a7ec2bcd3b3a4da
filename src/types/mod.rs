pub mod any_timestamp;
pub mod geo_point;
pub mod season;
pub mod sensor;
pub mod station;
