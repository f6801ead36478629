use core::ops::Range;

use crate::{Axis, Direction, Error, ItemSizeSpec, MoreInfo, Result, Size};

/// Sizing along one axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisInfo {
    /// Viewport extent along the axis.
    pub client_size: u32,
    /// Resolved item size. Zero on the secondary axis of variable lists.
    pub item_size: u32,
    pub min_item_size: Option<u32>,
    /// `item_size + spacing`.
    pub grid_size: u32,
    /// Item count along the axis.
    pub data_size: usize,
    pub scroll_position: u64,
}

/// Per-axis sizing derived from the viewport and the item size spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub direction: Direction,
    pub primary: AxisInfo,
    pub secondary: AxisInfo,
    /// Items per grid line (columns of a vertical grid, rows of a horizontal one).
    pub columns: usize,
    /// Whether items get an explicit width/height (auto-fit grids and variable lists).
    pub is_item_sized: bool,
    pub spacing: u32,
}

impl Metrics {
    /// Width of the hysteresis window: two grid lines.
    pub fn threshold_base(&self) -> u64 {
        self.primary.grid_size as u64 * 2
    }

    /// Number of items kept mounted for a dataset of `data_size` items.
    pub fn num_of_items(&self, data_size: usize, overhang: usize) -> usize {
        let grid = self.primary.grid_size.max(1);
        let lines = (self.primary.client_size.div_ceil(grid) as usize).saturating_add(overhang);
        data_size.min(self.columns.saturating_mul(lines))
    }

    /// Offsets of `index` along the primary and secondary axes, from the list origin.
    pub fn grid_position(&self, index: usize) -> (u64, u64) {
        let line = (index / self.columns) as u64;
        let column = (index % self.columns) as u64;
        (
            line * self.primary.grid_size as u64,
            column * self.secondary.grid_size as u64,
        )
    }

    /// First and last indexes of `range` that intersect the viewport at `scroll_position`.
    pub fn visible_indexes(&self, scroll_position: u64, range: Range<usize>) -> MoreInfo {
        let mut more_info = MoreInfo::default();
        let client = self.primary.client_size as i64;
        let item = self.primary.item_size as i64;
        for i in range {
            let (line_pos, _) = self.grid_position(i);
            let pos = line_pos as i64 - scroll_position as i64;
            if pos >= client {
                break;
            }
            if more_info.first_visible_index.is_none() && pos + item > 0 {
                more_info.first_visible_index = Some(i);
            }
            more_info.last_visible_index = Some(i);
        }
        more_info
    }

    /// Scrollable extent along the primary axis for `data_size` items.
    pub fn primary_extent(&self, data_size: usize) -> u64 {
        let lines = data_size.div_ceil(self.columns) as u64;
        (lines * self.primary.grid_size as u64).saturating_sub(self.spacing as u64)
    }
}

/// Derives per-axis sizing.
///
/// Returns `Ok(None)` for an empty viewport: metrics are skipped until a usable size is
/// observed.
pub fn calculate_metrics(
    viewport: Size,
    item_size: &ItemSizeSpec,
    spacing: u32,
    direction: Direction,
) -> Result<Option<Metrics>> {
    if viewport.is_empty() {
        ldebug!(
            width = viewport.width,
            height = viewport.height,
            "calculate_metrics: empty viewport, skipping"
        );
        return Ok(None);
    }

    let (primary_client, secondary_client) = viewport.split(direction);
    let mut primary = AxisInfo {
        client_size: primary_client,
        ..AxisInfo::default()
    };
    let mut secondary = AxisInfo {
        client_size: secondary_client,
        ..AxisInfo::default()
    };
    let mut columns = 1usize;
    let is_item_sized;

    match item_size {
        ItemSizeSpec::Fixed(size) => {
            primary.item_size = *size;
            secondary.item_size = secondary_client;
            is_item_sized = false;
        }
        ItemSizeSpec::MinFit {
            min_width,
            min_height,
        } => {
            if *min_width == 0 || *min_height == 0 {
                return Err(Error::ZeroMinItemSize {
                    min_width: *min_width,
                    min_height: *min_height,
                });
            }
            let (min_primary, min_secondary) = match direction {
                Direction::Vertical => (*min_height, *min_width),
                Direction::Horizontal => (*min_width, *min_height),
            };
            primary.min_item_size = Some(min_primary);
            secondary.min_item_size = Some(min_secondary);

            let spacing = spacing as u64;
            let fit = (secondary_client as u64 + spacing) / (min_secondary as u64 + spacing);
            columns = fit.max(1) as usize;

            let gaps = spacing * (columns as u64 - 1);
            let secondary_item = (secondary_client as u64).saturating_sub(gaps) / columns as u64;
            let primary_item = min_primary as u64 * secondary_item / min_secondary as u64;
            secondary.item_size = secondary_item as u32;
            primary.item_size = u32::try_from(primary_item).unwrap_or(u32::MAX);
            is_item_sized = true;
        }
        ItemSizeSpec::Variable { primary: size, .. } => {
            primary.item_size = *size;
            is_item_sized = true;
        }
    }

    primary.grid_size = primary.item_size.saturating_add(spacing);
    if primary.grid_size == 0 {
        return Err(Error::ZeroGridSize {
            axis: Axis::Primary,
        });
    }
    if secondary.item_size > 0 {
        secondary.grid_size = secondary.item_size.saturating_add(spacing);
    }

    ldebug!(
        columns,
        primary_item = primary.item_size,
        secondary_item = secondary.item_size,
        grid = primary.grid_size,
        "calculate_metrics"
    );

    Ok(Some(Metrics {
        direction,
        primary,
        secondary,
        columns,
        is_item_sized,
        spacing,
    }))
}
