pub mod exchange_rate_api;
pub mod open_er_api;

// Re-export the trait so providers and callers share one import path
pub use crate::rate_provider::RateProvider;
