//! Tests for error construction, display and classification

#[cfg(test)]
mod tests {
    use std::error::Error;
    use tilecollapse::io::error::{contradiction, invalid_input, invalid_parameter};
    use tilecollapse::{AlgorithmError, TileId};

    // Tests only contradictions are recoverable
    // Verified by matching InvalidInput in is_contradiction
    #[test]
    fn test_is_contradiction() {
        assert!(contradiction(1, 2, "empty").is_contradiction());
        assert!(!invalid_input("zero area").is_contradiction());
        assert!(!invalid_parameter("rows", &0, &"must be positive").is_contradiction());
        assert!(!AlgorithmError::UnknownTile { id: TileId(1) }.is_contradiction());
    }

    // Tests messages carry the offending values
    // Verified by dropping the position from the contradiction message
    #[test]
    fn test_display() {
        let err = contradiction(3, 4, "no legal tile");
        assert_eq!(err.to_string(), "Contradiction at cell (3, 4): no legal tile");

        let err = invalid_parameter("unit_size", &0, &"too small");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'unit_size' = '0': too small"
        );

        let err = AlgorithmError::UnknownTile { id: TileId(0xff) };
        assert_eq!(err.to_string(), "Tile 000000ff is not in the catalog");
    }

    // Tests I/O errors convert and keep their source
    // Verified by returning None from source for FileSystem
    #[test]
    fn test_io_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AlgorithmError::from(io);
        assert!(matches!(err, AlgorithmError::FileSystem { .. }));
        assert!(err.source().is_some());
        assert!(invalid_input("x").source().is_none());
    }
}
