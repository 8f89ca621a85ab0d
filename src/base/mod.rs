//! Core components, types, and utilities for the homework-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Common types, result aliases, and the poll-cycle error taxonomy.

pub mod config;
pub mod types;
