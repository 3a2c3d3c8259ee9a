// expo-index/src/lib.rs

//! Bucket indices for exponential histograms.
//!
//! At scale `s`, bucket `i` owns `(2^(i / 2^s), 2^((i + 1) / 2^s)]`. The exact
//! mappers work from the bit pattern and never round; the scaled mappers use
//! logarithms and can land one bucket off near an edge. [`check`] measures by
//! how much.

pub mod boundary;
pub mod check;
pub mod error;
pub mod exact;
pub mod ieee754;
pub mod mapper;
pub mod scaled;
pub mod sweep;


pub use boundary::lower_boundary;
pub use check::{
    check_exponent_errors, check_exponent_errors_with, check_index_transition,
    check_index_transition_with, compare_profiles, ExponentError, ScanConfig, Transition,
};
pub use error::MappingError;
pub use exact::{map_exact, map_frexp};
pub use mapper::{IndexMapper, MapToIndex, MapperKind, MAX_SCALE, MIN_SCALE};
pub use scaled::ScaleFactors;
pub use sweep::{compare, sweep, ComparisonRow, SweepConfig, SweepPoint};
