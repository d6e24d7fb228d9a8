use super::*;

fn table_with_b() -> TableMatcher {
    pinyin_table().with("b", ["不", "吧"])
}

#[test]
fn test_ascii_mode_commits_letters_raw() {
    let mut engine = make_engine(pinyin_table());

    engine.handle_key(&KeyEvent::AsciiModeSwitch);
    assert!(engine.is_ascii_mode());

    type_str(&mut engine, "ni");
    assert_eq!(engine.host().commits(), vec!["n", "i"]);
    assert_eq!(engine.matcher().queries(), 0);
    assert!(!engine.state().is_composing());

    engine.handle_key(&KeyEvent::AsciiModeSwitch);
    type_str(&mut engine, "n");
    assert_eq!(engine.committed_input(), "n");
    assert_eq!(engine.matcher().queries(), 1);
}

#[test]
fn test_ascii_toggle_keeps_composition() {
    let mut engine = make_engine(pinyin_table());

    type_str(&mut engine, "nix");
    engine.handle_key(&KeyEvent::AsciiModeSwitch);
    assert_eq!(engine.display_input(), "ni x");
    assert_eq!(candidate_texts(&engine), vec!["你", "泥"]);
}

#[test]
fn test_capital_is_one_shot() {
    let mut engine = make_engine(table_with_b());

    engine.handle_key(&KeyEvent::Shift);
    assert!(engine.is_capital_pending());

    type_str(&mut engine, "a");
    assert_eq!(engine.host().commits(), vec!["A"]);
    assert!(!engine.is_capital_pending());
    assert_eq!(engine.matcher().queries(), 0);

    type_str(&mut engine, "b");
    assert_eq!(engine.committed_input(), "b");
    assert_eq!(candidate_texts(&engine), vec!["不", "吧"]);
    assert_eq!(engine.host().commits(), vec!["A"]);
}

#[test]
fn test_shift_ignored_while_composing() {
    let mut engine = make_engine(pinyin_table());

    type_str(&mut engine, "n");
    engine.handle_key(&KeyEvent::Shift);
    assert!(!engine.is_capital_pending());

    type_str(&mut engine, "i");
    assert_eq!(engine.committed_input(), "ni");
    assert!(engine.host().events.is_empty());
}

#[test]
fn test_shift_with_only_pending_arms_capital() {
    let mut engine = make_engine(pinyin_table());

    type_str(&mut engine, "x");
    assert_eq!(engine.pending_buffer(), "x");

    engine.handle_key(&KeyEvent::Shift);
    assert!(engine.is_capital_pending());

    type_str(&mut engine, "y");
    assert_eq!(engine.host().commits(), vec!["Y"]);
    assert_eq!(engine.pending_buffer(), "x");
}

#[test]
fn test_capital_wins_over_ascii_mode() {
    let mut engine = make_engine(pinyin_table());

    engine.handle_key(&KeyEvent::AsciiModeSwitch);
    engine.handle_key(&KeyEvent::Shift);
    type_str(&mut engine, "ab");
    assert_eq!(engine.host().commits(), vec!["A", "b"]);
}

#[test]
fn test_layout_switches() {
    let mut engine = make_engine(pinyin_table());

    engine.handle_key(&KeyEvent::Symbols);
    assert_eq!(engine.keyboard_layout(), KeyboardLayout::Symbols);
    engine.handle_key(&KeyEvent::Emoji);
    assert_eq!(engine.keyboard_layout(), KeyboardLayout::Emoji);

    type_str(&mut engine, "ni");
    engine.handle_key(&KeyEvent::Enter);
    assert_eq!(engine.keyboard_layout(), KeyboardLayout::Emoji);

    engine.handle_key(&KeyEvent::Abc);
    assert_eq!(engine.keyboard_layout(), KeyboardLayout::Qwerty);
    assert_eq!(engine.host().commits(), vec!["ni"]);
}
