use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single point of the portfolio performance series.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,

    /// Portfolio value on this date, rounded to cents
    pub value: f64,
}
