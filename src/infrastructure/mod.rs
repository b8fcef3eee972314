//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite adapter for games, cards and meta counters
//! - HTTP: REST API routes
//! - Gemini: generative text backend
//! - Export: printable card sheets
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod export;
pub mod gemini;
pub mod http;
pub mod persistence;
pub mod state;
