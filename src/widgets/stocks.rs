//! Stocks widget: a watchlist of ticker symbols.
//!
//! Quotes are not fetched; each symbol shows its last known price if one
//! was supplied, `--` otherwise.

use super::{truncate, Widget, WidgetContext};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Registry name.
pub const NAME: &str = "Stocks";

const WATCHLIST: &[&str] = &["AAPL", "MSFT", "NVDA", "AMZN"];

/// One watchlist row.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    /// Exchange symbol.
    pub symbol: String,
    /// Last known price, if any.
    pub price: Option<f64>,
}

/// Watchlist of ticker symbols.
pub struct StocksWidget {
    tickers: Vec<Ticker>,
}

impl StocksWidget {
    /// Widget over the given watchlist.
    pub fn with_tickers(tickers: Vec<Ticker>) -> Self {
        Self { tickers }
    }
}

/// Factory function for the widget registry.
pub fn create() -> Box<dyn Widget> {
    Box::new(StocksWidget::with_tickers(
        WATCHLIST
            .iter()
            .map(|s| Ticker {
                symbol: s.to_string(),
                price: None,
            })
            .collect(),
    ))
}

impl Widget for StocksWidget {
    fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
        let w = width as usize;
        self.tickers
            .iter()
            .map(|t| {
                let price = t
                    .price
                    .map(|p| format!("{p:>10.2}"))
                    .unwrap_or_else(|| format!("{:>10}", "--"));
                let row = truncate(&format!("{:<6}{}", t.symbol, price), w);
                let split = row.char_indices().nth(6).map(|(i, _)| i).unwrap_or(row.len());
                let (symbol, rest) = row.split_at(split);
                Line::from(vec![
                    Span::styled(
                        symbol.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(rest.to_string(), Style::default().fg(Color::Green)),
                ])
            })
            .collect()
    }

    fn id(&self) -> &'static str {
        NAME
    }
}
