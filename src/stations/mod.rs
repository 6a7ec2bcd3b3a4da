pub mod error;
pub mod fetcher;
pub mod locate_station;
pub mod station_table;
