use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::event::{LogLevel, LogRecord};
use crate::model::history::HistoryWindow;
use crate::model::quote::{PriceDirection, Quote};
use crate::notify::Notification;

use super::chart::direction_color;
use super::InputMode;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

pub struct PriceCard<'a> {
    quote: Option<&'a Quote>,
}

impl<'a> PriceCard<'a> {
    pub fn new(quote: Option<&'a Quote>) -> Self {
        Self { quote }
    }
}

impl Widget for PriceCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(quote) = self.quote else {
            Paragraph::new(Line::from(Span::styled(
                "Waiting for first quote...",
                Style::default().fg(Color::DarkGray),
            )))
            .block(panel(" Quote "))
            .render(area, buf);
            return;
        };

        let direction = quote.direction();
        let color = direction_color(direction);
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    quote.ticker.as_str(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("${:.2}", quote.price),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} {:.2}%", direction.arrow(), quote.percent_change),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High: ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:.2}", quote.high), Style::default().fg(Color::White)),
                Span::styled("  Low: ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:.2}", quote.low), Style::default().fg(Color::White)),
                Span::styled("  Chg: ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:+.2}", quote.change), Style::default().fg(color)),
            ]),
            Line::from(vec![
                Span::styled("Updated: ", Style::default().fg(Color::DarkGray)),
                Span::styled(quote.last_updated(), Style::default().fg(Color::White)),
            ]),
        ];

        Paragraph::new(lines).block(panel(" Quote ")).render(area, buf);
    }
}

pub struct ErrorPanel<'a> {
    message: &'a str,
    hint: Option<&'a str>,
}

impl<'a> ErrorPanel<'a> {
    pub fn new(message: &'a str, hint: Option<&'a str>) -> Self {
        Self { message, hint }
    }
}

impl Widget for ErrorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(Span::styled(
            self.message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))];
        if let Some(hint) = self.hint {
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::Yellow),
            )));
        }
        Paragraph::new(lines)
            .block(panel(" Error "))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

pub struct HistoryTable<'a> {
    history: &'a HistoryWindow,
    direction: PriceDirection,
}

impl<'a> HistoryTable<'a> {
    pub fn new(history: &'a HistoryWindow, direction: PriceDirection) -> Self {
        Self { history, direction }
    }
}

impl Widget for HistoryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let trend_style = Style::default().fg(direction_color(self.direction));
        let mut lines = vec![Line::from(Span::styled(
            format!("{:<9} {:<8} {:>10} {}", "Time", "Symbol", "Price", "St"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ))];
        lines.extend(self.history.recent_first().map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:<9} ", entry.time_label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<8} ", entry.symbol),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:>10} ", format!("${:.2}", entry.price)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(self.direction.arrow(), trend_style),
            ])
        }));

        Paragraph::new(lines)
            .block(panel(" Recent Activity "))
            .render(area, buf);
    }
}

pub struct AlertPanel<'a> {
    pub target: Option<&'a str>,
    pub editing: bool,
    pub last_notification: Option<&'a Notification>,
}

impl Widget for AlertPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let field_style = if self.editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if self.editing { "_" } else { "" };
        let mut first = vec![
            Span::styled("Alert price: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}{}", self.target.unwrap_or(""), cursor),
                field_style,
            ),
        ];
        match self.target {
            Some(target) => first.push(Span::styled(
                format!("   Alerting at ${}", target.trim()),
                Style::default().fg(Color::Yellow),
            )),
            None if !self.editing => first.push(Span::styled(
                "Set Alert Price...",
                Style::default().fg(Color::DarkGray),
            )),
            None => {}
        }

        let second = match self.last_notification {
            Some(n) => Line::from(vec![
                Span::styled(
                    format!("{} ", n.title),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(n.body.as_str(), Style::default().fg(Color::White)),
            ]),
            None => Line::from(""),
        };

        Paragraph::new(vec![Line::from(first), second])
            .block(panel(" Alert "))
            .render(area, buf);
    }
}

pub struct TickerInput<'a> {
    pub value: &'a str,
    pub editing: bool,
}

impl Widget for TickerInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if self.value.is_empty() && !self.editing {
            Line::from(Span::styled(
                "Search Ticker (e.g. AAPL)",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let style = if self.editing {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            let cursor = if self.editing { "_" } else { "" };
            Line::from(Span::styled(format!("{}{}", self.value, cursor), style))
        };
        Paragraph::new(line)
            .block(panel(" Ticker "))
            .render(area, buf);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [LogRecord],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [LogRecord]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(" Log ");
        let visible = block.inner(area).height as usize;
        let start = self.messages.len().saturating_sub(visible);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|record| {
                let color = match record.level {
                    LogLevel::Info => Color::DarkGray,
                    LogLevel::Warn => Color::Yellow,
                    LogLevel::Error => Color::Red,
                };
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", record.level.as_str()),
                        Style::default().fg(color),
                    ),
                    Span::styled(record.msg.as_str(), Style::default().fg(Color::White)),
                ])
            })
            .collect();
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct StatusBar<'a> {
    pub symbol: &'a str,
    pub status: &'a str,
    pub loading: bool,
    pub polling: bool,
    pub fetch_ok: u64,
    pub fetch_fail: u64,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = if !self.polling {
            Span::styled("IDLE", Style::default().fg(Color::DarkGray))
        } else if self.loading {
            Span::styled(self.status, Style::default().fg(Color::Yellow))
        } else {
            Span::styled(self.status, Style::default().fg(Color::Green))
        };

        let line = Line::from(vec![
            Span::styled(
                " StockPulse ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.symbol, Style::default().fg(Color::Cyan)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            status,
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("ok: {} fail: {}", self.fetch_ok, self.fetch_fail),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct KeybindBar {
    pub mode: InputMode,
}

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
        let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));
        let line = match self.mode {
            InputMode::Normal => Line::from(vec![
                key(" [Q]"),
                text("uit  "),
                key("[/]"),
                text(" ticker  "),
                key("[A]"),
                text("lert  "),
                key("[R]"),
                text("eset symbol  "),
            ]),
            InputMode::EditTicker => Line::from(vec![
                key(" [Enter]"),
                text(" track  "),
                key("[Esc]"),
                text(" cancel  "),
            ]),
            InputMode::EditAlert => Line::from(vec![
                key(" [Enter/Esc]"),
                text(" done  "),
                key("[Backspace]"),
                text(" edit  "),
            ]),
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
