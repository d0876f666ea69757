#![forbid(unsafe_code)]

//! Layout containers and the 1D distribution solver.
//!
//! Three geometry-owning containers live here:
//!
//! - [`Flex`] - linear layout along a main axis with fixed and proportional
//!   entries
//! - [`Grid`] - fixed row/column grid with cell spanning
//! - [`Center`] - centers a single child at a fixed or fractional size
//!
//! They are pure geometry calculators over the component contract: whenever
//! a container's own rectangle or child list changes it recomputes and
//! pushes a rectangle to every child through `set_rect`. None of them know
//! about focus or events.

pub mod center;
pub mod flex;
pub mod grid;

pub use center::Center;
pub use flex::{Direction, Flex};
pub use grid::{Grid, GridError};

/// How a [`Flex`] entry is sized along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    /// An exact extent in cells.
    Fixed(u16),
    /// A weighted share of the space left after fixed entries.
    Proportional(u16),
}

/// Solve one axis: fixed entries take their extent, proportional entries
/// split what remains by weight.
///
/// Proportional shares are floored; the lost remainder is handed back one
/// cell at a time to positive-weight entries in declaration order, so the
/// proportional extents always sum to exactly the remaining space. A weight
/// of zero yields exactly zero cells, and a zero weight sum distributes
/// nothing (no division by zero).
pub(crate) fn distribute(total: u16, modes: &[SizeMode]) -> Vec<u16> {
    let fixed_sum: u32 = modes
        .iter()
        .map(|mode| match mode {
            SizeMode::Fixed(extent) => *extent as u32,
            SizeMode::Proportional(_) => 0,
        })
        .sum();
    let remaining = (total as u32).saturating_sub(fixed_sum) as u64;
    let weight_sum: u64 = modes
        .iter()
        .map(|mode| match mode {
            SizeMode::Proportional(weight) => *weight as u64,
            SizeMode::Fixed(_) => 0,
        })
        .sum();

    let mut extents = Vec::with_capacity(modes.len());
    let mut assigned: u64 = 0;
    for mode in modes {
        match mode {
            SizeMode::Fixed(extent) => extents.push(*extent),
            SizeMode::Proportional(weight) => {
                let share = if weight_sum == 0 {
                    0
                } else {
                    remaining * (*weight as u64) / weight_sum
                };
                assigned += share;
                extents.push(share as u16);
            }
        }
    }

    if weight_sum > 0 {
        let mut leftover = remaining - assigned;
        for (extent, mode) in extents.iter_mut().zip(modes) {
            if leftover == 0 {
                break;
            }
            if matches!(mode, SizeMode::Proportional(weight) if *weight > 0) {
                *extent += 1;
                leftover -= 1;
            }
        }
    }

    extents
}
