pub mod daily_profiles;
pub mod error;
