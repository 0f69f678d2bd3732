// Public API exports
pub mod config;
pub mod domain;
pub mod shared;

// Page markup and browser script
pub mod app;

// HTTP layer and external collaborators
pub mod infrastructure;
pub mod handlers;
