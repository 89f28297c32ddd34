// Response-to-metric extraction
pub mod encoder;

// Collection orchestrator
pub mod collector;
