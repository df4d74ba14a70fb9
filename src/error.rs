use thiserror::Error;

/// Errors produced by the DCA sweep pipeline
#[derive(Debug, Error)]
pub enum DcaError {
    /// Non-positive daily amount or yearly growth factor
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// A simulation was requested over zero days
    #[error("invalid horizon: total_days must be positive")]
    InvalidHorizon,

    /// Requested id falls outside the loaded series.
    ///
    /// Signals either a data-loading defect or an off-by-one in the
    /// start-id range computation.
    #[error("missing price data for id {id} (series covers 1..={max_id})")]
    MissingPriceData { id: u32, max_id: u32 },

    /// Zero total invested, guarding the ROI division
    #[error("degenerate investment: total invested is zero")]
    DegenerateInvestment,

    /// Loaded price data violates the series invariants
    #[error("invalid price series: {0}")]
    InvalidSeries(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
