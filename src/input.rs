use crossterm::event::KeyCode;

const MAX_TICKER_LEN: usize = 20;
const MAX_ALERT_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    EditTicker,
    EditAlert,
    ResetSymbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Ticker,
    Alert,
}

impl FieldKind {
    pub fn max_len(self) -> usize {
        match self {
            Self::Ticker => MAX_TICKER_LEN,
            Self::Alert => MAX_ALERT_LEN,
        }
    }

    /// Ticker accepts exchange-prefixed symbols like `BINANCE:BTCUSDT`.
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Ticker => c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '^'),
            Self::Alert => c.is_ascii_digit() || c == '.',
        }
    }
}

pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Char('/') => Some(UiCommand::EditTicker),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(UiCommand::Quit),
            't' => Some(UiCommand::EditTicker),
            'a' => Some(UiCommand::EditAlert),
            'r' => Some(UiCommand::ResetSymbol),
            _ => None,
        },
        _ => None,
    }
}

pub fn parse_edit_command(field: FieldKind, key_code: &KeyCode) -> Option<EditCommand> {
    match key_code {
        KeyCode::Enter => Some(EditCommand::Submit),
        KeyCode::Esc => Some(EditCommand::Cancel),
        KeyCode::Backspace => Some(EditCommand::Backspace),
        KeyCode::Char(c) if field.accepts(*c) => Some(EditCommand::Insert(*c)),
        _ => None,
    }
}

/// Apply an insert/backspace to `text`. Returns whether the text changed.
pub fn edit_text(field: FieldKind, text: &mut String, cmd: EditCommand) -> bool {
    match cmd {
        EditCommand::Insert(c) if text.chars().count() < field.max_len() => {
            let c = match field {
                FieldKind::Ticker => c.to_ascii_uppercase(),
                FieldKind::Alert => c,
            };
            text.push(c);
            true
        }
        EditCommand::Backspace => text.pop().is_some(),
        _ => false,
    }
}
