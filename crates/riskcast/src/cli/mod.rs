//! Command-line interface for the riskcast service

pub mod commands;
pub mod display;
