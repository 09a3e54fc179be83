pub mod config;
pub mod export;
pub mod persistence;
