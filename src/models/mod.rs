//! Data models for the monthly open pipeline
//!
//! Each stage hands the next one of these structs and nothing else.

pub mod price;
pub mod monthly;
pub mod chart;

pub use price::DailyPrice;
pub use monthly::{MonthlySummary, YearMonth};
pub use chart::{ChartPoint, ChartSeries, LabelAnchor, MonthlyChart, SeriesKind};
