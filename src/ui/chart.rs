use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::model::quote::PriceDirection;

pub struct PriceChart<'a> {
    prices: &'a [f64],
    symbol: &'a str,
    direction: PriceDirection,
}

impl<'a> PriceChart<'a> {
    pub fn new(prices: &'a [f64], symbol: &'a str) -> Self {
        Self {
            prices,
            symbol,
            direction: PriceDirection::Up,
        }
    }

    pub fn direction(mut self, direction: PriceDirection) -> Self {
        self.direction = direction;
        self
    }
}

pub fn direction_color(direction: PriceDirection) -> Color {
    match direction {
        PriceDirection::Up => Color::Green,
        PriceDirection::Down => Color::Red,
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Price ({}) ", self.symbol))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.prices.is_empty() || inner.height < 2 || inner.width < 4 {
            return;
        }

        let chart_height = inner.height.saturating_sub(1) as usize; // leave 1 row for axis labels
        let chart_width = inner.width as usize;

        // Spread the window across the full width; each sample gets a column band.
        let visible: &[f64] = if self.prices.len() > chart_width {
            &self.prices[self.prices.len() - chart_width..]
        } else {
            self.prices
        };
        let step = (chart_width / visible.len()).max(1);

        let min_price = visible.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_price = visible.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max_price - min_price;
        let range = if range < 0.01 { 1.0 } else { range };
        let line_style = Style::default().fg(direction_color(self.direction));

        for (i, &price) in visible.iter().enumerate() {
            let x = inner.x + (i * step) as u16;
            if x >= inner.x + inner.width {
                break;
            }
            let normalized = (price - min_price) / range;
            let y_pos = chart_height
                - 1
                - ((normalized * (chart_height - 1) as f64) as usize).min(chart_height - 1);
            let y = inner.y + y_pos as u16;

            if y < inner.y + inner.height {
                buf.set_string(x, y, "●", line_style);
            }
        }

        // Axis labels
        let label_y = inner.y + inner.height - 1;
        buf.set_string(
            inner.x,
            inner.y,
            format!("{:.2}", max_price),
            Style::default().fg(Color::DarkGray),
        );
        buf.set_string(
            inner.x,
            label_y,
            format!("{:.2}", min_price),
            Style::default().fg(Color::DarkGray),
        );
    }
}
