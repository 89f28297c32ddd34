// API credentials
pub mod credentials;

// Metric record model
pub mod metric;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
