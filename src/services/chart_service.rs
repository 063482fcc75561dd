use std::path::PathBuf;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::debug;
use crate::models::{ChartPoint, ChartSeries, LabelAnchor, MonthlyChart, MonthlySummary, SeriesKind};
use crate::utils::ChartError;

const START_COLOR: RGBColor = RGBColor(31, 119, 180);
const END_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Format a price as a dollar amount with two decimals, e.g. `$1234.57`
pub fn format_usd(price: f64) -> String {
    format!("${:.2}", price)
}

/// Turn monthly summaries into the chart description handed to a sink
pub fn build_chart(summaries: &[MonthlySummary], subject: &str) -> MonthlyChart {
    let series_of = |kind: SeriesKind, anchor: LabelAnchor, pick: fn(&MonthlySummary) -> f64| {
        ChartSeries {
            kind,
            anchor,
            points: summaries
                .iter()
                .map(|s| ChartPoint {
                    month: s.month,
                    price: pick(s),
                    label: format_usd(pick(s)),
                })
                .collect(),
        }
    };

    MonthlyChart {
        title: format!("{} Prices - Start and End of Each Month", subject),
        x_desc: "Year-Month".to_string(),
        y_desc: "Opening Price (USD)".to_string(),
        series: vec![
            series_of(SeriesKind::StartOfMonth, LabelAnchor::AboveLeft, |s| s.start_open),
            series_of(SeriesKind::EndOfMonth, LabelAnchor::BelowRight, |s| s.end_open),
        ],
    }
}

/// Destination for a finished chart
pub trait ChartSink {
    fn render(&mut self, chart: &MonthlyChart) -> Result<(), ChartError>;
}

/// Draws the chart into a PNG file
pub struct PngChartSink {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngChartSink {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn series_color(kind: SeriesKind) -> RGBColor {
    match kind {
        SeriesKind::StartOfMonth => START_COLOR,
        SeriesKind::EndOfMonth => END_COLOR,
    }
}

fn label_pos(anchor: LabelAnchor) -> Pos {
    match anchor {
        LabelAnchor::AboveLeft => Pos::new(HPos::Right, VPos::Bottom),
        LabelAnchor::BelowRight => Pos::new(HPos::Left, VPos::Top),
    }
}

/// Price axis range with 10% padding on each side; follows the data below zero
fn y_range(min_price: f64, max_price: f64) -> (f64, f64) {
    let padding = (max_price - min_price).max(1e-8) * 0.1;
    (min_price - padding, max_price + padding)
}

fn to_datetime(month: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&month.and_time(NaiveTime::MIN))
}

impl ChartSink for PngChartSink {
    fn render(&mut self, chart: &MonthlyChart) -> Result<(), ChartError> {
        let root = BitMapBackend::new(&self.path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Draw(format!("Failed to fill canvas: {}", e)))?;

        let (Some((min_price, max_price)), Some((first_month, last_month))) =
            (chart.price_bounds(), chart.month_bounds())
        else {
            debug!("No monthly data, rendering empty chart to {}", self.path.display());
            root.titled(&chart.title, ("sans-serif", 30).into_font())
                .map_err(|e| ChartError::Draw(format!("Failed to draw title: {}", e)))?;
            root.present()
                .map_err(|e| ChartError::Draw(format!("Failed to render chart: {}", e)))?;
            return Ok(());
        };

        let (y_min, y_max) = y_range(min_price, max_price);

        // Half a month either side keeps edge points and a lone month visible
        let x_min = to_datetime(first_month) - Duration::days(15);
        let x_max = to_datetime(last_month) + Duration::days(15);

        let month_count = chart.series.first().map(|s| s.points.len()).unwrap_or(0);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 30).into_font())
            .margin(15)
            .x_label_area_size(80)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| ChartError::Draw(format!("Failed to build chart: {}", e)))?;

        ctx.configure_mesh()
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .x_labels(month_count.clamp(2, 24))
            .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m").to_string())
            .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
            .draw()
            .map_err(|e| ChartError::Draw(format!("Failed to draw mesh: {}", e)))?;

        for series in &chart.series {
            let color = series_color(series.kind);
            let coords: Vec<(DateTime<Utc>, f64)> = series
                .points
                .iter()
                .map(|p| (to_datetime(p.month), p.price))
                .collect();

            ctx.draw_series(LineSeries::new(coords.iter().copied(), color.stroke_width(2)))
                .map_err(|e| ChartError::Draw(format!("Failed to draw line: {}", e)))?
                .label(series.kind.legend())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            ctx.draw_series(coords.iter().map(|&c| Circle::new(c, 4, color.filled())))
                .map_err(|e| ChartError::Draw(format!("Failed to draw point: {}", e)))?;

            let label_style = TextStyle::from(("sans-serif", 12).into_font())
                .color(&color)
                .pos(label_pos(series.anchor));
            ctx.draw_series(
                series
                    .points
                    .iter()
                    .zip(coords.iter())
                    .map(|(p, &c)| Text::new(p.label.clone(), c, label_style.clone())),
            )
            .map_err(|e| ChartError::Draw(format!("Failed to draw label: {}", e)))?;
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| ChartError::Draw(format!("Failed to draw legend: {}", e)))?;

        root.present()
            .map_err(|e| ChartError::Draw(format!("Failed to render chart: {}", e)))?;

        debug!("Chart written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(y: i32, m: u32, start: f64, end: f64) -> MonthlySummary {
        MonthlySummary {
            month: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            start_open: start,
            end_open: end,
        }
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1234.567), "$1234.57");
        assert_eq!(format_usd(50.0), "$50.00");
        assert_eq!(format_usd(0.004), "$0.00");
    }

    #[test]
    fn test_build_chart_series() {
        let summaries = vec![summary(2016, 1, 430.72, 378.0), summary(2016, 2, 365.0, 437.7)];
        let chart = build_chart(&summaries, "Bitcoin");

        assert_eq!(chart.title, "Bitcoin Prices - Start and End of Each Month");
        assert_eq!(chart.x_desc, "Year-Month");
        assert_eq!(chart.y_desc, "Opening Price (USD)");
        assert_eq!(chart.series.len(), 2);

        let start = &chart.series[0];
        assert_eq!(start.kind, SeriesKind::StartOfMonth);
        assert_eq!(start.anchor, LabelAnchor::AboveLeft);
        let labels: Vec<&str> = start.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["$430.72", "$365.00"]);

        let end = &chart.series[1];
        assert_eq!(end.kind, SeriesKind::EndOfMonth);
        assert_eq!(end.anchor, LabelAnchor::BelowRight);
        assert_eq!(end.points[1].price, 437.7);
        assert_eq!(end.points[1].label, "$437.70");
        assert_eq!(end.points[1].month, NaiveDate::from_ymd_opt(2016, 2, 1).unwrap());
    }

    #[test]
    fn test_chart_bounds() {
        let chart = build_chart(&[summary(2020, 3, 10.0, 5.0), summary(2020, 5, 7.0, 12.0)], "X");
        assert_eq!(chart.price_bounds(), Some((5.0, 12.0)));
        assert_eq!(
            chart.month_bounds(),
            Some((
                NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 5, 1).unwrap()
            ))
        );
    }

    #[test]
    fn test_empty_chart() {
        let chart = build_chart(&[], "Bitcoin");
        assert!(chart.is_empty());
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.price_bounds(), None);
        assert_eq!(chart.month_bounds(), None);
    }

    #[test]
    fn test_y_range_keeps_negative_prices() {
        let chart = build_chart(&[summary(2020, 3, 20.0, 10.0), summary(2020, 4, 15.0, -37.6)], "Oil");
        let (lo, hi) = chart.price_bounds().unwrap();
        let (y_min, y_max) = y_range(lo, hi);

        assert!(y_min < -37.6);
        assert!(y_max > 20.0);
        assert_eq!(chart.series[1].points[1].label, "$-37.60");
    }

    #[test]
    fn test_y_range_flat_series() {
        let (y_min, y_max) = y_range(50.0, 50.0);
        assert!(y_min < 50.0 && y_max > 50.0);
    }

    fn temp_chart_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "monthly_open_{}_{}_{}.png",
            name,
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[test]
    fn test_png_sink_renders_two_months() {
        let path = temp_chart_path("full");
        let chart = build_chart(&[summary(2016, 1, 430.72, 378.0), summary(2016, 2, 365.0, 437.7)], "Bitcoin");

        let mut sink = PngChartSink::new(&path, 1200, 600);
        assert!(sink.render(&chart).is_ok());
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_png_sink_renders_single_month_and_negative_price() {
        let path = temp_chart_path("single");
        let chart = build_chart(&[summary(2020, 4, 15.0, -37.6)], "Oil");

        assert!(PngChartSink::new(&path, 800, 400).render(&chart).is_ok());
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_png_sink_renders_empty_chart() {
        let path = temp_chart_path("empty");
        let chart = build_chart(&[], "Bitcoin");

        assert!(PngChartSink::new(&path, 1200, 600).render(&chart).is_ok());
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_png_sink_unwritable_path() {
        let path = std::env::temp_dir()
            .join(format!("monthly_open_missing_dir_{}", std::process::id()))
            .join("chart.png");
        let chart = build_chart(&[summary(2016, 1, 430.72, 378.0)], "Bitcoin");

        let result = PngChartSink::new(&path, 1200, 600).render(&chart);
        assert!(matches!(result, Err(ChartError::Draw(_))));
        assert!(!path.exists());
    }
}
