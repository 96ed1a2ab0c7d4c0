use crossterm::event::KeyCode;

use crate::input::{
    edit_text, parse_edit_command, parse_main_command, EditCommand, FieldKind, UiCommand,
};
use crate::ui::{AppState, InputMode};

/// What the main loop has to do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    None,
    Track(String),
    Quit,
}

pub fn handle_key(key_code: &KeyCode, app_state: &mut AppState) -> KeyOutcome {
    match app_state.input_mode {
        InputMode::Normal => handle_main_key(key_code, app_state),
        InputMode::EditTicker => handle_ticker_key(key_code, app_state),
        InputMode::EditAlert => {
            handle_alert_key(key_code, app_state);
            KeyOutcome::None
        }
    }
}

fn handle_main_key(key_code: &KeyCode, app_state: &mut AppState) -> KeyOutcome {
    match parse_main_command(key_code) {
        Some(UiCommand::Quit) => KeyOutcome::Quit,
        Some(UiCommand::EditTicker) => {
            app_state.ticker_input.clear();
            app_state.input_mode = InputMode::EditTicker;
            KeyOutcome::None
        }
        Some(UiCommand::EditAlert) => {
            app_state.input_mode = InputMode::EditAlert;
            KeyOutcome::None
        }
        Some(UiCommand::ResetSymbol) => match app_state.recover_from_not_found() {
            Some(symbol) => KeyOutcome::Track(symbol),
            None => KeyOutcome::None,
        },
        None => KeyOutcome::None,
    }
}

fn handle_ticker_key(key_code: &KeyCode, app_state: &mut AppState) -> KeyOutcome {
    let Some(cmd) = parse_edit_command(FieldKind::Ticker, key_code) else {
        return KeyOutcome::None;
    };
    match cmd {
        EditCommand::Submit => {
            app_state.input_mode = InputMode::Normal;
            let typed = std::mem::take(&mut app_state.ticker_input);
            match app_state.set_tracked_symbol(&typed) {
                Some(symbol) => {
                    tracing::info!(symbol = %symbol, "Tracked symbol changed");
                    KeyOutcome::Track(symbol)
                }
                None => KeyOutcome::None,
            }
        }
        EditCommand::Cancel => {
            app_state.ticker_input.clear();
            app_state.input_mode = InputMode::Normal;
            KeyOutcome::None
        }
        edit => {
            edit_text(FieldKind::Ticker, &mut app_state.ticker_input, edit);
            KeyOutcome::None
        }
    }
}

/// Every keystroke updates the target live; leaving the field keeps it.
fn handle_alert_key(key_code: &KeyCode, app_state: &mut AppState) {
    let Some(cmd) = parse_edit_command(FieldKind::Alert, key_code) else {
        return;
    };
    match cmd {
        EditCommand::Submit | EditCommand::Cancel => {
            app_state.input_mode = InputMode::Normal;
        }
        edit => {
            let mut text = app_state.alert_target.clone().unwrap_or_default();
            if edit_text(FieldKind::Alert, &mut text, edit) {
                app_state.set_alert_target(&text);
            }
        }
    }
}
