// expo-index/src/sweep.rs

//! Walks every representable value in a range and reports the index each
//! mapper assigns. Export and plotting are left to the caller.

use log::debug;

use crate::error::MappingError;
use crate::exact::{map_exact, map_frexp};
use crate::ieee754::next_up;
use crate::mapper::{check_value, IndexMapper, MapToIndex, MapperKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
    /// Inclusive.
    pub start: f64,
    /// Exclusive.
    pub stop: f64,
    pub scale: i32,
}

impl SweepConfig {
    /// Swaps `start` and `stop` if given in reverse.
    pub fn new(start: f64, stop: f64, scale: i32) -> Self {
        let (start, stop) = if start > stop {
            (stop, start)
        } else {
            (start, stop)
        };
        Self { start, stop, scale }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPoint {
    pub value: f64,
    pub scale: i32,
    pub index: i64,
}

/// Every mapper's index for one value, side by side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonRow {
    pub value: f64,
    pub scale: i32,
    /// Scale-0 index from the bit pattern, whatever `scale` is.
    pub exact: i64,
    /// Scale-0 index from `frexp`, whatever `scale` is.
    pub frexp: i64,
    pub logarithm: i64,
    pub fraction: i64,
    pub fraction_table: i64,
}

pub struct Sweep<'a, M> {
    next: f64,
    stop: f64,
    scale: i32,
    mapper: &'a M,
}

/// Every representable value in `[config.start, config.stop)`, mapped at
/// `config.scale`. Both ends are validated up front.
pub fn sweep<'a, M: MapToIndex>(
    config: &SweepConfig,
    mapper: &'a M,
) -> Result<Sweep<'a, M>, MappingError> {
    check_value(config.start)?;
    check_value(config.stop)?;
    debug!(
        "sweep [{:e}, {:e}) at scale {}",
        config.start, config.stop, config.scale
    );
    Ok(Sweep {
        next: config.start,
        stop: config.stop,
        scale: config.scale,
        mapper,
    })
}

impl<M: MapToIndex> Iterator for Sweep<'_, M> {
    type Item = Result<SweepPoint, MappingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.stop {
            return None;
        }
        let value = self.next;
        self.next = next_up(value);
        Some(
            self.mapper
                .map_to_index(value, self.scale)
                .map(|index| SweepPoint {
                    value,
                    scale: self.scale,
                    index,
                }),
        )
    }
}

/// Sweeps `config` once and maps each value with every scaled formula, next
/// to both scale-0 exact indices.
pub fn compare(config: &SweepConfig) -> Result<Vec<ComparisonRow>, MappingError> {
    let [logarithm, fraction, fraction_table] = [
        MapperKind::Logarithm,
        MapperKind::Fraction,
        MapperKind::FractionTable,
    ]
    .map(IndexMapper::new);
    debug!(
        "compare {}, {} and {} at scale {}",
        logarithm.kind(),
        fraction.kind(),
        fraction_table.kind(),
        config.scale
    );

    sweep(config, &logarithm)?
        .map(|point| {
            let point = point?;
            Ok(ComparisonRow {
                value: point.value,
                scale: point.scale,
                exact: map_exact(point.value),
                frexp: map_frexp(point.value),
                logarithm: point.index,
                fraction: fraction.map_to_index(point.value, point.scale)?,
                fraction_table: fraction_table.map_to_index(point.value, point.scale)?,
            })
        })
        .collect()
}
