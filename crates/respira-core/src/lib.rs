//! Core respira library (breathing session engine, config).

pub mod config;
pub mod session;
