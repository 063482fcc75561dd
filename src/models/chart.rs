//! Chart generation models

use chrono::NaiveDate;

/// Which side of the month a series plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    StartOfMonth,
    EndOfMonth,
}

impl SeriesKind {
    pub fn legend(&self) -> &'static str {
        match self {
            SeriesKind::StartOfMonth => "Start of Month",
            SeriesKind::EndOfMonth => "End of Month",
        }
    }
}

/// Placement of a point label relative to its point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Label sits left of and above the point
    AboveLeft,
    /// Label sits right of and below the point
    BelowRight,
}

/// A single annotated point on the monthly chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub month: NaiveDate,
    pub price: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: SeriesKind,
    pub anchor: LabelAnchor,
    pub points: Vec<ChartPoint>,
}

/// Everything a sink needs to draw the monthly chart
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub series: Vec<ChartSeries>,
}

impl MonthlyChart {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Smallest and largest plotted price across all series
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut prices = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.price));
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Earliest and latest plotted month across all series
    pub fn month_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut months = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.month));
        let first = months.next()?;
        Some(months.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
    }
}
