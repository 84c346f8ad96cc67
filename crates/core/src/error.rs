//! Error types for the metaballs core.

use thiserror::Error;

/// Errors produced by engine operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// Canvas width or height was zero or not finite.
    #[error("invalid canvas dimensions: width and height must be finite and positive")]
    InvalidDimensions,

    /// A grid resolution too small to form any cell.
    #[error("invalid grid resolution {0}: at least 2 nodes per axis are required")]
    InvalidResolution(usize),

    /// A node index outside the grid's node arena.
    #[error("node index {index} out of bounds for grid of {len} nodes")]
    NodeOutOfBounds { index: usize, len: usize },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = SimError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_resolution_includes_value() {
        let err = SimError::InvalidResolution(1);
        let msg = format!("{err}");
        assert!(msg.contains('1'), "missing resolution in: {msg}");
    }

    #[test]
    fn node_out_of_bounds_includes_index_and_len() {
        let err = SimError::NodeOutOfBounds { index: 99, len: 16 };
        let msg = format!("{err}");
        assert!(msg.contains("99"), "missing index in: {msg}");
        assert!(msg.contains("16"), "missing len in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = SimError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn sim_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimError>();
    }

    #[test]
    fn sim_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<SimError>();
    }
}
