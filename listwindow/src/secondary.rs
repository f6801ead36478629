use alloc::vec::Vec;

use crate::{CellIndex, Error, Result, ScrollDirection};

/// The visible sub-range of one row of a two-dimensional list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowWindow {
    /// Start offset of each cell up to (and including) the last visible one.
    pub position_offsets: Vec<u64>,
    pub first_index: usize,
    /// Exclusive.
    pub end_index: usize,
    /// The row stays valid while the secondary position is at or after `min`...
    pub threshold_min: u64,
    /// ...and the viewport's trailing edge is at or before `max`.
    pub threshold_max: u64,
}

impl RowWindow {
    pub fn is_empty(&self) -> bool {
        self.first_index >= self.end_index
    }

    pub fn range(&self) -> core::ops::Range<usize> {
        self.first_index..self.end_index
    }

    pub fn offset_of(&self, secondary: usize) -> Option<u64> {
        self.position_offsets.get(secondary).copied()
    }
}

/// Lazily built per-row windows along the variable (secondary) axis.
#[derive(Clone, Debug, Default)]
pub struct SecondaryScrollInfo {
    rows: Vec<Option<RowWindow>>,
    client_size: u32,
    max_variable_scroll_size: u64,
    scroll_position: u64,
}

impl SecondaryScrollInfo {
    pub fn new(primary_data_size: usize, client_size: u32, max_variable_scroll_size: u64) -> Self {
        let mut rows = Vec::new();
        rows.resize_with(primary_data_size, || None);
        Self {
            rows,
            client_size,
            max_variable_scroll_size,
            scroll_position: 0,
        }
    }

    pub fn row(&self, primary: usize) -> Option<&RowWindow> {
        self.rows.get(primary).and_then(Option::as_ref)
    }

    pub fn scroll_position(&self) -> u64 {
        self.scroll_position
    }

    pub fn client_size(&self) -> u32 {
        self.client_size
    }

    /// Number of rows that currently hold a built window.
    pub fn built_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    /// Rebuilds the window of row `primary` for secondary position `pos`.
    ///
    /// `count` is the number of cells in the row; `size_of(j)` the size of cell `j`.
    pub fn update_row(
        &mut self,
        primary: usize,
        pos: u64,
        count: usize,
        mut size_of: impl FnMut(usize) -> u32,
    ) -> Result<()> {
        let Some(slot) = self.rows.get_mut(primary) else {
            return Ok(());
        };

        let view_end = pos.saturating_add(self.client_size as u64);
        let mut row = RowWindow {
            position_offsets: Vec::new(),
            first_index: count,
            end_index: count,
            threshold_min: 0,
            threshold_max: self.max_variable_scroll_size,
        };
        let mut accumulated = 0u64;
        let mut closed = false;

        for j in 0..count {
            let size = size_of(j);
            if size == 0 {
                lwarn!(primary, secondary = j, "item size accessor returned 0");
                return Err(Error::InvalidItemSize {
                    index: CellIndex::new(primary, j),
                    size,
                });
            }
            let end = accumulated.saturating_add(size as u64);
            row.position_offsets.push(accumulated);
            if accumulated <= pos && pos < end {
                row.first_index = j;
                row.threshold_min = accumulated;
            }
            if end > view_end {
                row.end_index = j + 1;
                row.threshold_max = end;
                closed = true;
                break;
            }
            accumulated = end;
        }

        if !closed {
            row.end_index = count;
            row.threshold_max = self.max_variable_scroll_size;
        }
        if row.first_index == count {
            // The row ends before `pos`: revisit it once the position moves back over it.
            row.threshold_min = accumulated;
        }

        *slot = Some(row);
        Ok(())
    }

    /// Whether row `primary` must be rebuilt for secondary position `pos` reached by moving in
    /// `direction`.
    pub fn needs_update(&self, primary: usize, pos: u64, direction: ScrollDirection) -> bool {
        let Some(row) = self.row(primary) else {
            return true;
        };
        match direction {
            ScrollDirection::Forward => {
                pos.saturating_add(self.client_size as u64) > row.threshold_max
            }
            ScrollDirection::Backward => pos < row.threshold_min,
            ScrollDirection::Still => false,
        }
    }

    pub(crate) fn set_scroll_position(&mut self, pos: u64) {
        self.scroll_position = pos;
    }
}
