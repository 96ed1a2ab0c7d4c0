use crossterm::event::KeyCode;

use stock_pulse::input::{
    edit_text, parse_edit_command, parse_main_command, EditCommand, FieldKind, UiCommand,
};
use stock_pulse::ui::{AppState, InputMode};
use stock_pulse::ui_handlers::{handle_key, KeyOutcome};

fn type_str(state: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_key(&KeyCode::Char(c), state);
    }
}

#[test]
fn parse_main_command_maps_case_insensitive_char_keys() {
    assert_eq!(parse_main_command(&KeyCode::Char('q')), Some(UiCommand::Quit));
    assert_eq!(parse_main_command(&KeyCode::Char('Q')), Some(UiCommand::Quit));
    assert_eq!(
        parse_main_command(&KeyCode::Char('/')),
        Some(UiCommand::EditTicker)
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('T')),
        Some(UiCommand::EditTicker)
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('a')),
        Some(UiCommand::EditAlert)
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('R')),
        Some(UiCommand::ResetSymbol)
    );
    assert_eq!(parse_main_command(&KeyCode::Char('x')), None);
    assert_eq!(parse_main_command(&KeyCode::Enter), None);
}

#[test]
fn edit_commands_filter_characters_per_field() {
    assert_eq!(
        parse_edit_command(FieldKind::Ticker, &KeyCode::Char('b')),
        Some(EditCommand::Insert('b'))
    );
    assert_eq!(
        parse_edit_command(FieldKind::Ticker, &KeyCode::Char(':')),
        Some(EditCommand::Insert(':'))
    );
    assert_eq!(parse_edit_command(FieldKind::Ticker, &KeyCode::Char(' ')), None);
    assert_eq!(parse_edit_command(FieldKind::Alert, &KeyCode::Char('x')), None);
    assert_eq!(
        parse_edit_command(FieldKind::Alert, &KeyCode::Char('.')),
        Some(EditCommand::Insert('.'))
    );
    assert_eq!(
        parse_edit_command(FieldKind::Alert, &KeyCode::Enter),
        Some(EditCommand::Submit)
    );
    assert_eq!(
        parse_edit_command(FieldKind::Alert, &KeyCode::Esc),
        Some(EditCommand::Cancel)
    );
}

#[test]
fn edit_text_respects_max_len() {
    let mut text = String::new();
    for _ in 0..40 {
        edit_text(FieldKind::Alert, &mut text, EditCommand::Insert('9'));
    }
    assert_eq!(text.len(), FieldKind::Alert.max_len());
    assert!(edit_text(FieldKind::Alert, &mut text, EditCommand::Backspace));
    assert_eq!(text.len(), FieldKind::Alert.max_len() - 1);
}

/// Enter on the ticker field submits the uppercased symbol.
#[test]
fn ticker_field_submits_uppercase_symbol() {
    let mut state = AppState::new("DIS");
    assert_eq!(handle_key(&KeyCode::Char('/'), &mut state), KeyOutcome::None);
    assert_eq!(state.input_mode, InputMode::EditTicker);

    // 'q' is text while editing, not quit.
    type_str(&mut state, "aapq");
    handle_key(&KeyCode::Backspace, &mut state);
    type_str(&mut state, "l");
    assert_eq!(state.ticker_input, "AAPL");

    assert_eq!(
        handle_key(&KeyCode::Enter, &mut state),
        KeyOutcome::Track("AAPL".to_string())
    );
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.tracked_symbol, "AAPL");
    assert!(state.ticker_input.is_empty());
}

#[test]
fn ticker_field_escape_discards_input() {
    let mut state = AppState::new("DIS");
    handle_key(&KeyCode::Char('t'), &mut state);
    type_str(&mut state, "msft");
    assert_eq!(handle_key(&KeyCode::Esc, &mut state), KeyOutcome::None);
    assert_eq!(state.tracked_symbol, "DIS");
    assert!(state.ticker_input.is_empty());
}

#[test]
fn submitting_current_symbol_is_a_no_op() {
    let mut state = AppState::new("DIS");
    handle_key(&KeyCode::Char('/'), &mut state);
    type_str(&mut state, "dis");
    assert_eq!(handle_key(&KeyCode::Enter, &mut state), KeyOutcome::None);
}

#[test]
fn alert_field_updates_target_live() {
    let mut state = AppState::new("DIS");
    handle_key(&KeyCode::Char('a'), &mut state);
    assert_eq!(state.input_mode, InputMode::EditAlert);

    type_str(&mut state, "9");
    assert_eq!(state.alert_target.as_deref(), Some("9"));
    type_str(&mut state, "0.5");
    assert_eq!(state.alert_target.as_deref(), Some("90.5"));

    for _ in 0..4 {
        handle_key(&KeyCode::Backspace, &mut state);
    }
    assert_eq!(state.alert_target, None);

    type_str(&mut state, "95");
    handle_key(&KeyCode::Enter, &mut state);
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.alert_target.as_deref(), Some("95"));
}

#[test]
fn quit_only_from_normal_mode() {
    let mut state = AppState::new("DIS");
    assert_eq!(handle_key(&KeyCode::Char('q'), &mut state), KeyOutcome::Quit);
}

#[test]
fn reset_without_error_does_nothing() {
    let mut state = AppState::new("DIS");
    assert_eq!(handle_key(&KeyCode::Char('r'), &mut state), KeyOutcome::None);
}
