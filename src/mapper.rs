// expo-index/src/mapper.rs

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::MappingError;
use crate::exact::{map_exact, map_frexp};
use crate::scaled::{self, ScaleFactors, MAX_TABLE_SCALE};

pub const MIN_SCALE: i32 = -10;
pub const MAX_SCALE: i32 = MAX_TABLE_SCALE;

/// Anything that assigns bucket indices to values.
pub trait MapToIndex {
    fn map_to_index(&self, value: f64, scale: i32) -> Result<i64, MappingError>;
}

/// Which formula an [`IndexMapper`] uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapperKind {
    /// Bit-pattern exponent. Only scales `<= 0`.
    Exact,
    /// `frexp` exponent. Only scales `<= 0`.
    Frexp,
    /// One natural logarithm times `2^scale / ln 2`.
    Logarithm,
    /// `frexp` fraction and exponent, base-2 logarithm of the fraction.
    Fraction,
    /// `frexp` fraction and exponent, natural logarithm times a table factor.
    FractionTable,
}

impl MapperKind {
    pub const ALL: [MapperKind; 5] = [
        MapperKind::Exact,
        MapperKind::Frexp,
        MapperKind::Logarithm,
        MapperKind::Fraction,
        MapperKind::FractionTable,
    ];

    pub fn max_scale(self) -> i32 {
        match self {
            MapperKind::Exact | MapperKind::Frexp => 0,
            MapperKind::Logarithm | MapperKind::Fraction | MapperKind::FractionTable => MAX_SCALE,
        }
    }

    pub fn supports_scale(self, scale: i32) -> bool {
        (MIN_SCALE..=self.max_scale()).contains(&scale)
    }
}

impl Display for MapperKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            MapperKind::Exact => "exact",
            MapperKind::Frexp => "frexp",
            MapperKind::Logarithm => "logarithm",
            MapperKind::Fraction => "fraction",
            MapperKind::FractionTable => "fraction-table",
        };
        f.write_str(name)
    }
}

/// A [`MapperKind`] together with the scale-factor table it may need.
#[derive(Clone, Debug)]
pub struct IndexMapper {
    kind: MapperKind,
    factors: ScaleFactors,
}

impl IndexMapper {
    pub fn new(kind: MapperKind) -> Self {
        Self {
            kind,
            factors: ScaleFactors::new(),
        }
    }

    pub fn kind(&self) -> MapperKind {
        self.kind
    }

    fn map_unchecked(&self, value: f64, scale: i32) -> Result<i64, MappingError> {
        if scale <= 0 {
            // Arithmetic shift floors, which keeps upper-inclusive buckets
            // intact when merging 2^-scale octaves into one.
            let index = match self.kind {
                MapperKind::Exact => map_exact(value),
                _ => map_frexp(value),
            };
            return Ok(index >> -scale);
        }

        match self.kind {
            MapperKind::Exact | MapperKind::Frexp => Err(MappingError::ScaleOutOfRange(scale)),
            MapperKind::Logarithm => Ok(scaled::map_logarithm(value, scale)),
            MapperKind::Fraction => Ok(scaled::map_fraction(value, scale)),
            MapperKind::FractionTable => scaled::map_fraction_table(value, scale, &self.factors)
                .ok_or(MappingError::ScaleOutOfRange(scale)),
        }
    }
}

impl MapToIndex for IndexMapper {
    fn map_to_index(&self, value: f64, scale: i32) -> Result<i64, MappingError> {
        check_value(value)?;
        if !self.kind.supports_scale(scale) {
            return Err(MappingError::ScaleOutOfRange(scale));
        }
        self.map_unchecked(value, scale)
    }
}

/// Rejects everything outside the positive, finite, non-zero domain.
pub fn check_value(value: f64) -> Result<(), MappingError> {
    if !value.is_finite() {
        Err(MappingError::NonFinite(value))
    } else if value <= 0.0 {
        Err(MappingError::NonPositive(value))
    } else {
        Ok(())
    }
}
