use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BookstrokeError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        BookstrokeError::ingest("x")
            .to_string()
            .contains("ingest error:")
    );
    assert!(
        BookstrokeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        BookstrokeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BookstrokeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
