use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PixelGridError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PixelGridError::export("x")
            .to_string()
            .contains("export error:")
    );
}

#[test]
fn index_and_bounds_errors_name_their_limits() {
    let err = PixelGridError::IndexOutOfRange { index: 4, len: 3 };
    assert_eq!(
        err.to_string(),
        "layer index 4 out of range (stack has 3 layers)"
    );

    let err = PixelGridError::OutOfBounds {
        row: 16,
        col: 2,
        rows: 16,
        columns: 16,
    };
    assert!(err.to_string().contains("(16, 2)"));
    assert!(err.to_string().contains("16x16"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PixelGridError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
