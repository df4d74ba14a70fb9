// Core modules
pub mod aggregate;
pub mod data;
pub mod error;
pub mod models;
pub mod report;
pub mod simulation;
pub mod sweep;

// Re-export commonly used types
pub use error::DcaError;
pub use models::{DcaSchedule, Horizon, PriceRecord, PriceSeries, SimulationRequest, SimulationResult};

// Error handling
pub type Result<T> = std::result::Result<T, DcaError>;
