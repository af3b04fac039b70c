// Feature schemas and records
pub mod ml;

// Domain-specific error types
pub mod errors;
