pub mod apis;
pub mod arguments;
pub mod cache;
pub mod config;
pub mod display;
pub mod errors; // Structured error handling
pub mod logger;
pub mod market_data;
pub mod paths;
pub mod portfolio;
