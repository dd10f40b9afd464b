use super::*;

#[test]
fn primary_covers_left_mouse_pen_tip_and_touch() {
    for (kind, id) in [
        (PointerKind::Mouse, button::LEFT_MOUSE),
        (PointerKind::Pen, button::PEN_CONTACT),
        (PointerKind::Touch, 7),
    ] {
        let mut state = PointerState::default();
        let changes = state.press(kind, id);
        assert!(changes.primary, "{kind:?}");
        assert!(state.primary_pressed());
        assert!(!state.auxiliary_pressed());
    }
}

#[test]
fn auxiliary_covers_right_mouse_barrel_and_eraser() {
    for (kind, id) in [
        (PointerKind::Mouse, button::RIGHT_MOUSE),
        (PointerKind::Pen, button::PEN_BARREL),
        (PointerKind::Pen, button::PEN_ERASER),
    ] {
        let mut state = PointerState::default();
        assert!(state.press(kind, id).auxiliary);
        assert!(state.auxiliary_pressed());
        assert!(!state.primary_pressed());
    }
}

#[test]
fn middle_is_mouse_only() {
    let mut state = PointerState::default();
    assert!(state.press(PointerKind::Mouse, button::MIDDLE_MOUSE).middle);
    assert!(state.middle_pressed());
    assert_eq!(state.press(PointerKind::Pen, 1), ButtonChanges::default());
}

#[test]
fn changes_report_only_normalized_transitions() {
    let mut state = PointerState::default();
    state.press(PointerKind::Mouse, button::LEFT_MOUSE);
    // Primary already held by the mouse; the pen tip does not change it.
    assert!(!state.press(PointerKind::Pen, button::PEN_CONTACT).primary);
    assert!(!state.release(PointerKind::Mouse, button::LEFT_MOUSE).primary);
    assert!(state.release(PointerKind::Pen, button::PEN_CONTACT).primary);
    assert!(!state.primary_pressed());
}

#[test]
fn reset_clears_everything() {
    let mut state = PointerState::default();
    state.press(PointerKind::Touch, 0);
    state.press(PointerKind::Mouse, button::RIGHT_MOUSE);
    state.reset();
    assert_eq!(state, PointerState::default());
}

#[test]
fn events_deserialize_with_default_button() {
    let ev: PointerEvent = serde_json::from_str(r#"{"kind":"pen","x":0.5,"y":0.25}"#).unwrap();
    assert_eq!(ev, PointerEvent::new(PointerKind::Pen, 0, 0.5, 0.25));
}
