use alloc::sync::Arc;

use crate::{CellIndex, Direction, Error, Result, VariableAxis, WritingDirection};

/// Returns the secondary-axis size of a cell in a two-dimensional list.
///
/// The accessor must return a positive size. Zero is reported as
/// [`crate::Error::InvalidItemSize`] rather than substituted, since every later offset on the
/// row depends on it.
pub type SizeAccessor = Arc<dyn Fn(CellIndex) -> u32 + Send + Sync>;

/// Returns the number of cells along the secondary axis of a given row (or column).
pub type CountAccessor = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// Number of spare grid lines rendered beyond the viewport.
pub const DEFAULT_OVERHANG: usize = 3;

/// How item sizes are determined.
#[derive(Clone)]
pub enum ItemSizeSpec {
    /// A single primary-axis size; items span the whole secondary axis.
    Fixed(u32),
    /// Auto-fit grid: as many columns as fit `min_width`/`min_height`, scaled to fill the
    /// secondary axis while keeping the aspect ratio.
    MinFit { min_width: u32, min_height: u32 },
    /// Fixed primary-axis size, per-cell secondary-axis size.
    Variable { primary: u32, secondary: SizeAccessor },
}

impl ItemSizeSpec {
    pub fn variable(primary: u32, secondary: impl Fn(CellIndex) -> u32 + Send + Sync + 'static) -> Self {
        Self::Variable {
            primary,
            secondary: Arc::new(secondary),
        }
    }

    /// Whether two specs produce the same metrics. Accessors compare by identity.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (
                Self::MinFit {
                    min_width: aw,
                    min_height: ah,
                },
                Self::MinFit {
                    min_width: bw,
                    min_height: bh,
                },
            ) => aw == bw && ah == bh,
            (
                Self::Variable {
                    primary: ap,
                    secondary: a,
                },
                Self::Variable {
                    primary: bp,
                    secondary: b,
                },
            ) => ap == bp && Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl core::fmt::Debug for ItemSizeSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::MinFit {
                min_width,
                min_height,
            } => f
                .debug_struct("MinFit")
                .field("min_width", min_width)
                .field("min_height", min_height)
                .finish(),
            Self::Variable { primary, .. } => f
                .debug_struct("Variable")
                .field("primary", primary)
                .finish_non_exhaustive(),
        }
    }
}

/// Configuration for [`crate::VirtualList`] (plain lists and auto-fit grids).
#[derive(Clone, Debug)]
pub struct ListOptions {
    pub data_size: usize,
    pub item_size: ItemSizeSpec,
    /// Space between items, applied on both axes.
    pub spacing: u32,
    pub direction: Direction,
    pub overhang: usize,
    pub writing_direction: WritingDirection,
}

impl ListOptions {
    pub fn new(data_size: usize, item_size: ItemSizeSpec) -> Self {
        Self {
            data_size,
            item_size,
            spacing: 0,
            direction: Direction::Vertical,
            overhang: DEFAULT_OVERHANG,
            writing_direction: WritingDirection::Ltr,
        }
    }

    /// A list of `data_size` items, each `item_size` pixels along the scroll axis.
    pub fn fixed(data_size: usize, item_size: u32) -> Self {
        Self::new(data_size, ItemSizeSpec::Fixed(item_size))
    }

    /// An auto-fit grid of `data_size` items.
    pub fn grid(data_size: usize, min_width: u32, min_height: u32) -> Self {
        Self::new(
            data_size,
            ItemSizeSpec::MinFit {
                min_width,
                min_height,
            },
        )
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_overhang(mut self, overhang: usize) -> Self {
        self.overhang = overhang;
        self
    }

    pub fn with_writing_direction(mut self, writing_direction: WritingDirection) -> Self {
        self.writing_direction = writing_direction;
        self
    }

    pub(crate) fn metrics_differ(&self, other: &Self) -> bool {
        !self.item_size.same_as(&other.item_size)
            || self.spacing != other.spacing
            || self.direction != other.direction
            || self.overhang != other.overhang
    }
}

/// Configuration for [`crate::VirtualVariableList`].
#[derive(Clone)]
pub struct VariableListOptions {
    /// Number of rows (or columns, for [`VariableAxis::Col`]).
    pub primary_count: usize,
    /// Number of cells in a given row.
    pub secondary_count: CountAccessor,
    /// Must be [`ItemSizeSpec::Variable`].
    pub item_size: ItemSizeSpec,
    pub variable_axis: VariableAxis,
    /// Scroll extent of the variable axis. Rows are not measured end to end, so the host
    /// supplies the longest row's extent.
    pub max_variable_scroll_size: u64,
    pub overhang: usize,
    /// Shrinks cells cut by the viewport edges along the variable axis.
    pub clip_item: bool,
    pub writing_direction: WritingDirection,
}

impl VariableListOptions {
    pub fn new(
        primary_count: usize,
        secondary_count: impl Fn(usize) -> usize + Send + Sync + 'static,
        primary_size: u32,
        secondary_size: impl Fn(CellIndex) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            primary_count,
            secondary_count: Arc::new(secondary_count),
            item_size: ItemSizeSpec::variable(primary_size, secondary_size),
            variable_axis: VariableAxis::Row,
            max_variable_scroll_size: 0,
            overhang: DEFAULT_OVERHANG,
            clip_item: false,
            writing_direction: WritingDirection::Ltr,
        }
    }

    pub fn with_secondary_count(
        mut self,
        secondary_count: impl Fn(usize) -> usize + Send + Sync + 'static,
    ) -> Self {
        self.secondary_count = Arc::new(secondary_count);
        self
    }

    pub fn with_variable_axis(mut self, variable_axis: VariableAxis) -> Self {
        self.variable_axis = variable_axis;
        self
    }

    pub fn with_max_variable_scroll_size(mut self, size: u64) -> Self {
        self.max_variable_scroll_size = size;
        self
    }

    pub fn with_overhang(mut self, overhang: usize) -> Self {
        self.overhang = overhang;
        self
    }

    pub fn with_clip_item(mut self, clip_item: bool) -> Self {
        self.clip_item = clip_item;
        self
    }

    pub fn with_writing_direction(mut self, writing_direction: WritingDirection) -> Self {
        self.writing_direction = writing_direction;
        self
    }

    pub(crate) fn size_accessor(&self) -> Result<&SizeAccessor> {
        match &self.item_size {
            ItemSizeSpec::Variable { secondary, .. } => Ok(secondary),
            _ => Err(Error::ExpectedVariableSize),
        }
    }

    pub(crate) fn metrics_differ(&self, other: &Self) -> bool {
        !self.item_size.same_as(&other.item_size)
            || self.variable_axis != other.variable_axis
            || self.overhang != other.overhang
    }

    pub(crate) fn data_differ(&self, other: &Self) -> bool {
        self.primary_count != other.primary_count
            || !Arc::ptr_eq(&self.secondary_count, &other.secondary_count)
            || self.max_variable_scroll_size != other.max_variable_scroll_size
    }
}

impl core::fmt::Debug for VariableListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VariableListOptions")
            .field("primary_count", &self.primary_count)
            .field("item_size", &self.item_size)
            .field("variable_axis", &self.variable_axis)
            .field("max_variable_scroll_size", &self.max_variable_scroll_size)
            .field("overhang", &self.overhang)
            .field("clip_item", &self.clip_item)
            .field("writing_direction", &self.writing_direction)
            .finish_non_exhaustive()
    }
}
