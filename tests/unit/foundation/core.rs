use super::*;

#[test]
fn neighbors_touch_and_gaps_do_not() {
    let c = CellCoord::new(3, 3);
    assert!(c.touches(c));
    assert!(c.touches(CellCoord::new(2, 4)));
    assert!(c.touches(CellCoord::new(4, 2)));
    assert!(!c.touches(CellCoord::new(5, 3)));
    assert!(!c.touches(CellCoord::new(3, 1)));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(32, 0).is_err());
}

#[test]
fn fps_period_matches_frame_duration() {
    let fps = Fps::new(32, 1).unwrap();
    assert_eq!(fps.frame_duration_secs(), 1.0 / 32.0);
    assert_eq!(fps.period(), Duration::from_micros(31_250));
}
