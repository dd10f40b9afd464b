use super::*;

fn grid(rows: usize, columns: usize) -> Grid {
    let mut grid = Grid::new(rows, columns, ColorLayer::default()).unwrap();
    grid.init_role_layers(&LayerRoles::default()).unwrap();
    grid
}

fn layer(grid: &Grid, cell: CellCoord, index: usize) -> ColorLayer {
    *grid.cell_at(cell).unwrap().stack.layer(index).unwrap()
}

fn brush(grid: &Grid, cell: CellCoord) -> ColorLayer {
    layer(grid, cell, LayerRoles::default().brush)
}

fn highlight_alpha(grid: &Grid, cell: CellCoord) -> f64 {
    layer(grid, cell, LayerRoles::default().highlight).alpha()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn opacity_is_validated_and_quantized() {
    let mut settings = BrushSettings::default();
    settings.set_opacity(0.234).unwrap();
    assert_eq!(settings.opacity(), 0.23);
    assert!(settings.set_opacity(1.5).is_err());
    assert!(settings.set_opacity(f64::NAN).is_err());
    assert_eq!(settings.opacity(), 0.23);
    assert!(BrushSettings::new(Rgb::WHITE, -0.1).is_err());
}

#[test]
fn ten_black_steps_saturate_the_brush_layer() {
    let mut g = grid(32, 32);
    let engine = BrushEngine::default();
    let cell = CellCoord::new(5, 7);
    for _ in 0..10 {
        engine.paint_step(&mut g, cell).unwrap();
    }
    assert!((brush(&g, cell).alpha() - 1.0).abs() < 1e-9);
    let composite = g.cell_at(cell).unwrap().stack.computed_color();
    assert_eq!(composite.to_rgba8(), [0, 0, 0, 255]);
}

#[test]
fn different_color_is_merged_as_a_patch() {
    let mut g = grid(2, 2);
    let mut engine = BrushEngine::default();
    let cell = CellCoord::new(0, 0);
    engine.paint_step(&mut g, cell).unwrap();

    engine.settings_mut().set_color(Rgb::new(255, 0, 0));
    engine.settings_mut().set_opacity(0.5).unwrap();
    engine.paint_step(&mut g, cell).unwrap();

    let layer = brush(&g, cell);
    assert!((layer.alpha() - 0.55).abs() < 1e-9);
    assert!(layer.red() > 200.0);
    assert_eq!(layer.green(), 0.0);
}

#[test]
fn click_paints_once_on_release() {
    let mut g = grid(4, 4);
    let mut engine = BrushEngine::default();
    let cell = CellCoord::new(1, 2);
    engine.pointer_down(&mut g, cell).unwrap();
    assert!(engine.is_dragging());
    assert_eq!(brush(&g, cell).alpha(), 0.0);
    assert_eq!(highlight_alpha(&g, cell), 1.0);

    assert_eq!(engine.selected(), Some(cell));

    engine.pointer_up(&mut g, PointerKind::Mouse).unwrap();
    assert!(!engine.is_dragging());
    assert!((brush(&g, cell).alpha() - 0.1).abs() < 1e-9);
    assert_eq!(highlight_alpha(&g, cell), 1.0);
    assert_eq!(engine.selected(), None);
    assert_eq!(engine.hovered(), Some(cell));
}

#[test]
fn hover_moves_the_highlight_without_painting() {
    let mut g = grid(4, 4);
    let mut engine = BrushEngine::default();
    let a = CellCoord::new(0, 0);
    let b = CellCoord::new(0, 1);
    engine.pointer_enter(&mut g, a, PointerKind::Mouse, ms(0)).unwrap();
    engine.pointer_enter(&mut g, b, PointerKind::Mouse, ms(10)).unwrap();

    assert_eq!(highlight_alpha(&g, a), 0.0);
    assert_eq!(highlight_alpha(&g, b), 1.0);
    assert_eq!(brush(&g, a).alpha(), 0.0);
    assert_eq!(engine.pending_reverts(), 0);
}

#[test]
fn drag_paints_left_and_skipped_cells_and_delays_revert() {
    let mut g = grid(8, 8);
    let mut engine = BrushEngine::default();
    let start = CellCoord::new(0, 0);
    let end = CellCoord::new(0, 4);
    engine.pointer_down(&mut g, start).unwrap();
    engine.pointer_enter(&mut g, end, PointerKind::Mouse, ms(0)).unwrap();

    for col in 0..4 {
        assert!((brush(&g, CellCoord::new(0, col)).alpha() - 0.1).abs() < 1e-9);
    }
    assert_eq!(brush(&g, end).alpha(), 0.0);

    assert_eq!(highlight_alpha(&g, start), 1.0);
    assert_eq!(engine.poll(&mut g, ms(199)).unwrap(), 0);
    assert_eq!(engine.poll(&mut g, ms(200)).unwrap(), 1);
    assert_eq!(highlight_alpha(&g, start), 0.0);
    assert_eq!(highlight_alpha(&g, end), 1.0);
}

#[test]
fn reentering_a_cell_keeps_its_highlight() {
    let mut g = grid(4, 4);
    let mut engine = BrushEngine::default();
    let a = CellCoord::new(1, 1);
    let b = CellCoord::new(1, 2);
    engine.pointer_down(&mut g, a).unwrap();
    engine.pointer_enter(&mut g, b, PointerKind::Mouse, ms(0)).unwrap();
    engine.pointer_enter(&mut g, a, PointerKind::Mouse, ms(50)).unwrap();

    engine.poll(&mut g, ms(220)).unwrap();
    assert_eq!(highlight_alpha(&g, a), 1.0);
    assert_eq!(highlight_alpha(&g, b), 1.0);
    engine.poll(&mut g, ms(250)).unwrap();
    assert_eq!(highlight_alpha(&g, b), 0.0);
    assert_eq!(highlight_alpha(&g, a), 1.0);
}

#[test]
fn release_after_leaving_does_not_paint_late() {
    let mut g = grid(4, 4);
    let mut engine = BrushEngine::default();
    let a = CellCoord::new(0, 0);
    let b = CellCoord::new(1, 1);
    engine.pointer_down(&mut g, a).unwrap();
    engine.pointer_enter(&mut g, b, PointerKind::Mouse, ms(0)).unwrap();
    engine.pointer_up(&mut g, PointerKind::Mouse).unwrap();
    let painted = brush(&g, a).alpha();

    engine.poll(&mut g, ms(1000)).unwrap();
    assert_eq!(brush(&g, a).alpha(), painted);
}

#[test]
fn touch_reverts_immediately() {
    let mut g = grid(4, 4);
    let mut engine = BrushEngine::default();
    let a = CellCoord::new(0, 0);
    let b = CellCoord::new(0, 1);
    engine.pointer_down(&mut g, a).unwrap();
    engine.pointer_enter(&mut g, b, PointerKind::Touch, ms(0)).unwrap();
    assert_eq!(highlight_alpha(&g, a), 0.0);
    assert_eq!(engine.pending_reverts(), 0);

    engine.pointer_up(&mut g, PointerKind::Touch).unwrap();
    assert_eq!(highlight_alpha(&g, b), 0.0);
    assert_eq!(engine.selected(), None);
    assert!((brush(&g, b).alpha() - 0.1).abs() < 1e-9);
}

#[test]
fn leave_policy_decides_whether_the_stroke_is_finalized() {
    let cell = CellCoord::new(2, 2);

    let mut g = grid(4, 4);
    let mut engine = BrushEngine::default();
    engine.pointer_down(&mut g, cell).unwrap();
    engine.container_leave(&mut g, ms(0)).unwrap();
    assert!((brush(&g, cell).alpha() - 0.1).abs() < 1e-9);
    assert!(!engine.is_dragging());
    assert_eq!(engine.pending_reverts(), 1);

    let mut g = grid(4, 4);
    let mut engine = BrushEngine::new(
        BrushSettings::default(),
        LayerRoles::default(),
        ms(200),
        LeavePolicy::Discard,
    );
    engine.pointer_down(&mut g, cell).unwrap();
    engine.container_leave(&mut g, ms(0)).unwrap();
    assert_eq!(brush(&g, cell).alpha(), 0.0);
    assert_eq!(highlight_alpha(&g, cell), 0.0);
    assert_eq!(engine.selected(), None);
}

#[test]
fn out_of_bounds_cell_is_rejected() {
    let mut g = grid(4, 4);
    let mut engine = BrushEngine::default();
    let err = engine
        .pointer_enter(&mut g, CellCoord::new(4, 0), PointerKind::Mouse, ms(0))
        .unwrap_err();
    assert!(matches!(err, PixelGridError::OutOfBounds { .. }));
    assert_eq!(engine.selected(), None);
}

#[test]
fn leave_policy_uses_snake_case() {
    let policy: LeavePolicy = serde_json::from_str("\"discard\"").unwrap();
    assert_eq!(policy, LeavePolicy::Discard);
    assert_eq!(LeavePolicy::default(), LeavePolicy::Finalize);
}
