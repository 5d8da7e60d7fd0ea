//! The analysis functions offered to the model
//!
//! Function names are the model-facing contract and stay stable; each
//! function owns its parameter schema, fetches its own price series, and
//! formats its own result text.

mod momentum;
mod moving_average;
mod plot;
mod price;

pub use momentum::{MacdFunction, RsiFunction};
pub use moving_average::{EmaFunction, SmaFunction};
pub use plot::PlotFunction;
pub use price::PriceFunction;

use crate::catalog::FunctionCatalog;
use crate::market::MarketData;
use std::path::PathBuf;
use std::sync::Arc;

/// Build the full catalog of six analysis functions
pub fn build_catalog(market: Arc<dyn MarketData>, chart_path: PathBuf) -> FunctionCatalog {
    let mut catalog = FunctionCatalog::new();

    catalog.register(Arc::new(PriceFunction::new(market.clone())));
    catalog.register(Arc::new(SmaFunction::new(market.clone())));
    catalog.register(Arc::new(EmaFunction::new(market.clone())));
    catalog.register(Arc::new(RsiFunction::new(market.clone())));
    catalog.register(Arc::new(MacdFunction::new(market.clone())));
    catalog.register(Arc::new(PlotFunction::new(market, chart_path)));

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::StaticMarket;

    #[test]
    fn test_build_catalog_registers_all_six() {
        let market = Arc::new(StaticMarket::new());
        let catalog = build_catalog(market, PathBuf::from("stock.png"));

        assert_eq!(catalog.len(), 6);
        for name in [
            "get_stock_price",
            "calculate_SMA",
            "calculate_EMA",
            "calculate_RSI",
            "calculate_MACD",
            "plot_stock_price",
        ] {
            assert!(catalog.get(name).is_some(), "missing function {name}");
        }
    }
}
