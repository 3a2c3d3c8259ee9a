// expo-index/src/check.rs

//! Measures how far a mapper strays from the boundary invariant
//! `lower_boundary(i, s) < v <= lower_boundary(i + 1, s)`.
//!
//! Step counts are `Option<NonMaxU32>`: `None` means the search ran out of
//! budget without finding a crossing, which is distinct from a zero count.

use std::ops::RangeInclusive;

use log::{debug, trace};
use nonmax::NonMaxU32;

use crate::boundary::lower_boundary;
use crate::error::MappingError;
use crate::ieee754::{next_down, next_up};
use crate::mapper::MapToIndex;

/// Step budget for [`check_index_transition`].
pub const TRANSITION_BUDGET: u32 = 2000;

/// Default step budget for [`check_exponent_errors`]. Near the top of the
/// exponent range at scale 20 a logarithm-based mapper can be a few thousand
/// values off, more than [`TRANSITION_BUDGET`] allows.
pub const EXPONENT_SCAN_BUDGET: u32 = 1 << 16;

pub const MIN_SCAN_EXPONENT: i32 = -1022;
pub const MAX_SCAN_EXPONENT: i32 = 1022;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    pub exponents: RangeInclusive<i32>,
    pub budget: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exponents: MIN_SCAN_EXPONENT..=MAX_SCAN_EXPONENT,
            budget: EXPONENT_SCAN_BUDGET,
        }
    }
}

/// Result of scanning down from `2^exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExponentError {
    pub exponent: i32,
    /// Values, starting at `2^exponent` and stepping toward zero, that failed
    /// the invariant before one passed.
    pub steps: Option<NonMaxU32>,
}

impl ExponentError {
    pub fn is_saturated(&self) -> bool {
        self.steps.is_none()
    }
}

/// Whether `mapper` puts `value` in the bucket whose edges bracket it.
pub fn in_bounds<M: MapToIndex>(value: f64, scale: i32, mapper: &M) -> Result<bool, MappingError> {
    let index = mapper.map_to_index(value, scale)?;
    Ok(value > lower_boundary(index, scale) && value <= lower_boundary(index + 1, scale))
}

/// Scans every exponent in `-1022..=1022` with the default configuration.
pub fn check_exponent_errors<M: MapToIndex>(
    scale: i32,
    mapper: &M,
) -> Result<Vec<ExponentError>, MappingError> {
    check_exponent_errors_with(scale, mapper, &ScanConfig::default())
}

pub fn check_exponent_errors_with<M: MapToIndex>(
    scale: i32,
    mapper: &M,
    config: &ScanConfig,
) -> Result<Vec<ExponentError>, MappingError> {
    debug!(
        "check_exponent_errors(scale={}, exponents={:?}, budget={})",
        scale, config.exponents, config.budget
    );

    let errors = config
        .exponents
        .clone()
        .map(|exponent| {
            let steps = exponent_steps(exponent, scale, mapper, config.budget)?;
            if steps.is_none() {
                debug!("exponent {} saturated after {} steps", exponent, config.budget);
            }
            Ok(ExponentError { exponent, steps })
        })
        .collect::<Result<Vec<_>, MappingError>>()?;

    debug!(
        "check_exponent_errors: {} exponents, {} with error, {} saturated",
        errors.len(),
        errors
            .iter()
            .filter(|error| error.steps.map_or(false, |steps| steps.get() > 0))
            .count(),
        errors.iter().filter(|error| error.is_saturated()).count()
    );
    Ok(errors)
}

fn exponent_steps<M: MapToIndex>(
    exponent: i32,
    scale: i32,
    mapper: &M,
    budget: u32,
) -> Result<Option<NonMaxU32>, MappingError> {
    let mut value = libm::exp2(exponent as f64);
    for steps in 0..budget {
        if in_bounds(value, scale, mapper)? {
            trace!("exponent {}: in bounds after {} steps", exponent, steps);
            return Ok(NonMaxU32::new(steps));
        }
        value = next_down(value);
        if value == 0.0 {
            break;
        }
    }
    Ok(None)
}

/// Runs the exponent scan for two mappers over the same configuration and
/// pairs the results up by exponent.
pub fn compare_profiles<A: MapToIndex, B: MapToIndex>(
    scale: i32,
    current: &A,
    proposed: &B,
    config: &ScanConfig,
) -> Result<Vec<(ExponentError, ExponentError)>, MappingError> {
    let current = check_exponent_errors_with(scale, current, config)?;
    let proposed = check_exponent_errors_with(scale, proposed, config)?;
    Ok(current.into_iter().zip(proposed).collect())
}

/// Where a mapper moves into bucket `index`, relative to its lower edge `b`.
///
/// `b` itself belongs to `index - 1`, so the canonical outcome is `Up(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `b` and the `n - 1` values below it were mapped to `index` or higher.
    Down(NonMaxU32),
    /// The first `n` values above `b` were still mapped below `index`.
    Up(NonMaxU32),
    /// After `n` values mapped below `index`, the mapper jumped straight past
    /// it. Bucket `index` is never entered.
    Skipped(NonMaxU32),
}

impl Transition {
    /// Negative when the mapper switches too early, positive when too late.
    /// `None` for [`Transition::Skipped`], which has no crossing to measure.
    pub fn offset(self) -> Option<i64> {
        match self {
            Transition::Down(steps) => Some(-i64::from(steps.get())),
            Transition::Up(steps) => Some(i64::from(steps.get())),
            Transition::Skipped(_) => None,
        }
    }
}

/// Locates the mapper's transition into bucket `index`, searching at most
/// [`TRANSITION_BUDGET`] values each way. `Ok(None)` means no crossing was found
/// within the budget.
pub fn check_index_transition<M: MapToIndex>(
    index: i64,
    scale: i32,
    mapper: &M,
) -> Result<Option<Transition>, MappingError> {
    check_index_transition_with(index, scale, mapper, TRANSITION_BUDGET)
}

pub fn check_index_transition_with<M: MapToIndex>(
    index: i64,
    scale: i32,
    mapper: &M,
    budget: u32,
) -> Result<Option<Transition>, MappingError> {
    let boundary = lower_boundary(index, scale);
    if !boundary.is_finite() {
        return Err(MappingError::BoundaryNotFinite { index, scale });
    }

    // An underflowed boundary has nothing below it to scan.
    let transition = if boundary > 0.0 && mapper.map_to_index(boundary, scale)? >= index {
        transition_down(boundary, index, scale, mapper, budget)?
    } else {
        transition_up(boundary, index, scale, mapper, budget)?
    };

    match transition {
        None => debug!(
            "index {} at scale {}: no crossing within {} steps",
            index, scale, budget
        ),
        Some(Transition::Skipped(steps)) => debug!(
            "index {} at scale {}: skipped after {} steps",
            index, scale, steps
        ),
        Some(_) => {}
    }
    Ok(transition)
}

fn transition_down<M: MapToIndex>(
    boundary: f64,
    index: i64,
    scale: i32,
    mapper: &M,
    budget: u32,
) -> Result<Option<Transition>, MappingError> {
    let mut value = boundary;
    let mut steps = 0;
    while steps < budget {
        if value == 0.0 || mapper.map_to_index(value, scale)? < index {
            return Ok(NonMaxU32::new(steps).map(Transition::Down));
        }
        steps += 1;
        value = next_down(value);
    }
    Ok(None)
}

fn transition_up<M: MapToIndex>(
    boundary: f64,
    index: i64,
    scale: i32,
    mapper: &M,
    budget: u32,
) -> Result<Option<Transition>, MappingError> {
    let mut value = next_up(boundary);
    for steps in 0..budget {
        if !value.is_finite() {
            break;
        }
        let mapped = mapper.map_to_index(value, scale)?;
        if mapped == index {
            return Ok(NonMaxU32::new(steps).map(Transition::Up));
        }
        if mapped > index {
            return Ok(NonMaxU32::new(steps).map(Transition::Skipped));
        }
        value = next_up(value);
    }
    Ok(None)
}
