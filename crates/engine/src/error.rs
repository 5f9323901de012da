//! Engine-level error type.
//!
//! Most failure conditions are recovered inside the engine and degrade to a
//! safe default (empty list, anonymous session, unchanged state) with a log
//! line. What remains is the typed `Result` surface below; nothing panics.

use thiserror::Error;

use greengrocer_core::ProductId;

use crate::catalog::GatewayError;

/// Errors surfaced by the engine command surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation referenced a product the engine does not know.
    #[error("unknown product: {0}")]
    NotFound(ProductId),

    /// A catalog service call failed; prior in-memory state is retained.
    #[error("catalog service error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Result type alias for `EngineError`.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = EngineError::NotFound(ProductId::new(9));
        assert_eq!(err.to_string(), "unknown product: 9");
    }
}
