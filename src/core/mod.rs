// src/core/mod.rs

// Root of the analysis engine. Nothing in here knows about the terminal.

/// Report entities, fetch outcome and the sentinel values analyzers fall back to.
pub mod models;

/// Errors that cross the engine boundary.
pub mod error;

/// Input validation for analysis targets.
pub mod target;

pub mod document;

/// The analyzers and the orchestrator that runs them.
pub mod scanner;

/// Registration lookups used by the domain analyzer.
pub mod whois;

/// Turns report fields into explained findings for display.
pub mod knowledge_base;
