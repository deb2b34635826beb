// src/ui/widgets/mod.rs

// Module declarations for all UI widgets.
pub mod analysis_view; // Report facets, finding list and finding details.
pub mod disclaimer_popup; // Modal shown once at startup.
pub mod footer; // Key hints for the current state.
pub mod input; // The target URL box.
pub mod summary; // Score gauge, checks and detected technologies.
