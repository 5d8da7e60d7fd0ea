//! Price chart rendering

use crate::error::{AssistantError, Result};
use crate::market::PriceSeries;
use plotters::prelude::*;
use std::path::Path;

const CHART_WIDTH: u32 = 1024;
const CHART_HEIGHT: u32 = 576;

/// Render a one-year close-price line chart to a PNG file
///
/// Overwrites any existing file at `path`. An empty series is an error,
/// never a blank image.
pub fn render_price_chart(series: &PriceSeries, path: &Path) -> Result<()> {
    let (Some(first_date), Some(last_date)) = (series.first_date(), series.last_date()) else {
        return Err(AssistantError::Chart(format!(
            "no price data to plot for {}",
            series.symbol
        )));
    };

    let closes = series.closes();
    let min_close = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_close = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Pad the y range so the line does not hug the chart edges
    let pad = ((max_close - min_close) * 0.05).max(max_close.abs() * 0.01).max(1.0);
    let y_range = (min_close - pad)..(max_close + pad);

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(to_chart_error)?;

    let caption = format!("{} Stock Price over last year", series.symbol);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(first_date..last_date, y_range)
        .map_err(to_chart_error)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Stock Price")
        .draw()
        .map_err(to_chart_error)?;

    chart
        .draw_series(LineSeries::new(
            series.points.iter().map(|p| (p.date, p.close)),
            &BLUE,
        ))
        .map_err(to_chart_error)?;

    root.present().map_err(to_chart_error)?;

    Ok(())
}

/// Plotters errors are generic over the backend, so they are stringified
fn to_chart_error(err: impl std::fmt::Display) -> AssistantError {
    AssistantError::Chart(err.to_string())
}
