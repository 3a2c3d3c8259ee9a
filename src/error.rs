// expo-index/src/error.rs

use thiserror::Error;

/// Reasons a value or scale can't be mapped.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum MappingError {
    /// Zero and negative values have no bucket index.
    #[error("value {0} is not positive")]
    NonPositive(f64),
    /// NaN or infinity.
    #[error("value {0} is not finite")]
    NonFinite(f64),
    #[error("scale {0} is outside the supported range")]
    ScaleOutOfRange(i32),
    /// The bucket's lower edge overflows, so there is nothing to scan from.
    #[error("boundary of index {index} at scale {scale} is not finite")]
    BoundaryNotFinite { index: i64, scale: i32 },
}
