use crate::{Axis, CellIndex};

/// Errors reported by list metrics and variable-size accessors.
///
/// Degraded conditions (an empty viewport, an empty dataset, out-of-range scroll targets) are
/// not errors: they produce empty windows or clamped positions instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("grid size along the {axis:?} axis is zero")]
    ZeroGridSize { axis: Axis },

    #[error("min-fit item size must be non-zero (min_width={min_width}, min_height={min_height})")]
    ZeroMinItemSize { min_width: u32, min_height: u32 },

    #[error("item size accessor returned {size} for cell {index}")]
    InvalidItemSize { index: CellIndex, size: u32 },

    #[error("two-dimensional lists need a variable item size")]
    ExpectedVariableSize,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
