use super::*;

fn red_bottom() -> LayerStack {
    LayerStack::new(ColorLayer::new(255.0, 0.0, 0.0, 1.0))
}

#[test]
fn fresh_stack_composites_to_its_bottom_layer() {
    let stack = red_bottom();
    assert_eq!(stack.layer_count(), 1);
    assert_eq!(stack.current_index(), 0);
    assert_eq!(stack.computed_color(), Rgba::new(255.0, 0.0, 0.0, 1.0));
}

#[test]
fn switch_layer_returns_previous_index_and_rejects_out_of_range() {
    let mut stack = red_bottom();
    stack.push_layer(true);
    assert_eq!(stack.switch_layer(0).unwrap(), 1);
    assert_eq!(stack.switch_layer(1).unwrap(), 0);

    let err = stack.switch_layer(2).unwrap_err();
    assert!(matches!(
        err,
        PixelGridError::IndexOutOfRange { index: 2, len: 2 }
    ));
    assert_eq!(stack.current_index(), 1);
}

#[test]
fn push_inserts_transparent_layer_after_cursor() {
    let mut stack = red_bottom();
    assert_eq!(stack.push_layer(true), 1);
    stack.set_color(Rgba::new(0.0, 0.0, 255.0, 1.0));
    stack.switch_layer(0).unwrap();

    assert_eq!(stack.push_layer(false), 1);
    assert_eq!(stack.current_index(), 0);
    assert_eq!(stack.layer(1).unwrap().color(), Rgba::TRANSPARENT);
    assert_eq!(stack.top_layer().color(), Rgba::new(0.0, 0.0, 255.0, 1.0));
}

#[test]
fn pop_never_removes_the_bottom_layer() {
    let mut stack = red_bottom();
    assert!(stack.pop_layer().is_none());
    assert_eq!(stack.layer_count(), 1);
}

#[test]
fn pop_of_last_layer_moves_cursor_down() {
    let mut stack = red_bottom();
    stack.push_layer(true);
    stack.push_layer(true);
    assert_eq!(stack.current_index(), 2);
    stack.pop_layer().unwrap();
    assert_eq!(stack.current_index(), 1);

    stack.push_layer(true);
    stack.switch_layer(1).unwrap();
    stack.pop_layer().unwrap();
    assert_eq!(stack.current_index(), 1);
    assert_eq!(stack.layer_count(), 2);
}

#[test]
fn clear_keeps_only_the_bottom_layer() {
    let mut stack = red_bottom();
    for i in 0..7 {
        let pushed = stack.push_layer(i % 2 == 0);
        stack
            .with_layer(pushed, |layer| {
                layer.set_rgba(Rgba::new(10.0 * i as f64, 0.0, 0.0, 0.5))
            })
            .unwrap();
        if i % 3 == 0 {
            stack.pop_layer();
        }
    }
    stack.clear_layers();
    assert_eq!(stack.layer_count(), 1);
    assert_eq!(stack.current_index(), 0);
    assert_eq!(stack.bottom_layer().color(), Rgba::new(255.0, 0.0, 0.0, 1.0));
    assert_eq!(stack.computed_color(), Rgba::new(255.0, 0.0, 0.0, 1.0));
}

#[test]
fn composite_uses_the_over_operator_and_is_idempotent() {
    let mut stack = LayerStack::new(ColorLayer::new(100.0, 100.0, 100.0, 1.0));
    stack.push_layer(true);
    stack.set_color(Rgba::new(0.0, 200.0, 50.0, 0.9));

    let first = stack.computed_color();
    assert!((first.g - (200.0 * 0.9 + 100.0 * 0.1)).abs() < 1e-9);
    stack.recompute_composite();
    let second = stack.computed_color();
    assert_eq!(first.r.to_bits(), second.r.to_bits());
    assert_eq!(first.g.to_bits(), second.g.to_bits());
    assert_eq!(first.b.to_bits(), second.b.to_bits());
    assert_eq!(first.a.to_bits(), second.a.to_bits());
}

#[test]
fn color_reads_current_layer_not_composite() {
    let mut stack = red_bottom();
    stack.push_layer(true);
    assert_eq!(stack.color(), Rgba::TRANSPARENT);
    assert_eq!(stack.computed_color(), Rgba::new(255.0, 0.0, 0.0, 1.0));
}

#[test]
fn with_layer_restores_cursor_and_refreshes_composite() {
    let mut stack = red_bottom();
    stack.push_layer(true);
    stack.push_layer(true);
    stack
        .with_layer(1, |layer| layer.set_rgba(Rgba::new(0.0, 0.0, 0.0, 1.0)))
        .unwrap();
    assert_eq!(stack.current_index(), 2);
    assert_eq!(stack.computed_color(), Rgba::new(0.0, 0.0, 0.0, 1.0));
    assert!(stack.with_layer(3, |_| ()).is_err());
}

#[test]
fn traverse_supports_both_orders_and_early_exit() {
    let mut stack = red_bottom();
    stack.push_layer(true);
    stack.push_layer(true);

    let mut seen = Vec::new();
    stack.traverse_layers(false, |i, _| {
        seen.push(i);
        ControlFlow::Continue(())
    });
    assert_eq!(seen, vec![0, 1, 2]);

    seen.clear();
    stack.traverse_layers(true, |i, _| {
        seen.push(i);
        if i == 1 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(seen, vec![2, 1]);
}

#[test]
fn copy_layers_grows_and_shrinks_to_match_source() {
    let mut source = LayerStack::new(ColorLayer::new(1.0, 2.0, 3.0, 1.0));
    source.push_layer(true);
    source.set_color(Rgba::new(9.0, 9.0, 9.0, 0.5));

    let mut small = LayerStack::default();
    small.copy_layers_from(&source);
    assert_eq!(small.layer_count(), 2);
    assert_eq!(small.computed_color(), source.computed_color());

    let mut big = LayerStack::default();
    for _ in 0..4 {
        big.push_layer(true);
    }
    big.copy_layers_from(&source);
    assert_eq!(big.layer_count(), 2);
    assert_eq!(big.current_index(), 1);
    assert_eq!(big.layer(1).unwrap().color(), Rgba::new(9.0, 9.0, 9.0, 0.5));
}
