use core::fmt;

/// The scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Which axis of a two-dimensional list carries the variable item sizes.
///
/// `Row` lays rows out vertically (fixed row height) with variable-width cells inside each
/// row. `Col` is the transposed layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableAxis {
    #[default]
    Row,
    Col,
}

impl VariableAxis {
    /// The scroll axis along which rows (or columns) are windowed.
    pub fn primary_direction(self) -> Direction {
        match self {
            Self::Row => Direction::Vertical,
            Self::Col => Direction::Horizontal,
        }
    }
}

/// Direction of travel of a scroll position update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Backward,
    #[default]
    Still,
    Forward,
}

impl ScrollDirection {
    /// Direction of travel from `prev` to `next`.
    pub fn between(prev: u64, next: u64) -> Self {
        match next.cmp(&prev) {
            core::cmp::Ordering::Greater => Self::Forward,
            core::cmp::Ordering::Less => Self::Backward,
            core::cmp::Ordering::Equal => Self::Still,
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            Self::Backward => -1,
            Self::Still => 0,
            Self::Forward => 1,
        }
    }
}

/// Horizontal writing direction of the host UI. `Rtl` mirrors x offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingDirection {
    #[default]
    Ltr,
    Rtl,
}

impl WritingDirection {
    pub(crate) fn apply(self, x: i64) -> i64 {
        match self {
            Self::Ltr => x,
            Self::Rtl => -x,
        }
    }
}

/// Used in errors to name the offending axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Primary,
    Secondary,
}

/// Viewport (client) size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `(primary, secondary)` extents for the given scroll axis.
    pub fn split(&self, direction: Direction) -> (u32, u32) {
        match direction {
            Direction::Vertical => (self.height, self.width),
            Direction::Horizontal => (self.width, self.height),
        }
    }
}

/// A scroll position (`x` = scroll left, `y` = scroll top).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u64,
    pub y: u64,
}

impl Point {
    pub const fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }

    /// Builds a point from `(primary, secondary)` coordinates.
    pub fn from_axes(direction: Direction, primary: u64, secondary: u64) -> Self {
        match direction {
            Direction::Vertical => Self::new(secondary, primary),
            Direction::Horizontal => Self::new(primary, secondary),
        }
    }

    /// Returns `(primary, secondary)` coordinates.
    pub fn split(&self, direction: Direction) -> (u64, u64) {
        match direction {
            Direction::Vertical => (self.y, self.x),
            Direction::Horizontal => (self.x, self.y),
        }
    }
}

/// Index of a cell in a two-dimensional list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellIndex {
    pub primary: usize,
    pub secondary: usize,
}

impl CellIndex {
    pub const fn new(primary: usize, secondary: usize) -> Self {
        Self { primary, secondary }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.primary, self.secondary)
    }
}

/// The contiguous set of dataset indexes currently materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub first_index: usize,
    pub num_of_items: usize,
}

impl VisibleWindow {
    pub fn is_empty(&self) -> bool {
        self.num_of_items == 0
    }

    /// One past the last index of the window, before clamping to the dataset size.
    pub fn end_index(&self) -> usize {
        self.first_index.saturating_add(self.num_of_items)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first_index && index < self.end_index()
    }
}

/// Indexes of the first and last items that intersect the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoreInfo {
    pub first_visible_index: Option<usize>,
    pub last_visible_index: Option<usize>,
}

/// Lifecycle of a list between viewport, scroll and render updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No usable viewport has been observed yet.
    #[default]
    Uninitialized,
    /// Metrics and bounds are computed; no window was resolved since.
    MetricsReady,
    /// A scroll position was resolved into a window.
    WindowResolved,
    /// Items were positioned for the current window.
    Positioned,
}
