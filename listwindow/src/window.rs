use crate::{ScrollDirection, Threshold, VisibleWindow};

/// Maps primary scroll positions to the window of mounted items.
///
/// Resolution is amortized O(1): the window only moves when the position leaves the
/// [`Threshold`], and then by whole grid lines.
#[derive(Clone, Debug, Default)]
pub struct WindowResolver {
    window: VisibleWindow,
    max_first_index: usize,
    data_size: usize,
    threshold: Threshold,
    columns: usize,
    grid_size: u64,
    max_pos: u64,
}

impl WindowResolver {
    pub fn new(columns: usize, grid_size: u32) -> Self {
        let grid_size = grid_size as u64;
        Self {
            window: VisibleWindow::default(),
            max_first_index: 0,
            data_size: 0,
            threshold: Threshold::new(grid_size * 2),
            columns: columns.max(1),
            grid_size,
            max_pos: 0,
        }
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn max_first_index(&self) -> usize {
        self.max_first_index
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Index range to render, clamped to the dataset.
    pub fn range(&self) -> core::ops::Range<usize> {
        let start = self.window.first_index.min(self.data_size);
        let end = self.window.end_index().min(self.data_size);
        start..end
    }

    /// Applies a new dataset size and window size. Returns whether the window was pinned.
    ///
    /// A window pinned to the end of the dataset (the viewport showed the last items) stays
    /// pinned; otherwise the first index is clamped to the new `max_first_index`. Callers
    /// follow up with [`Self::reanchor`] once the scroll position for the new bounds is known.
    pub fn update_data(
        &mut self,
        data_size: usize,
        num_of_items: usize,
        first_visible_index: Option<usize>,
    ) -> bool {
        let was_first_index_max = first_visible_index.is_some_and(|first_visible| {
            self.max_first_index < first_visible.saturating_sub(self.columns)
                && self.window.first_index == self.max_first_index
        });

        self.max_first_index = data_size.saturating_sub(num_of_items);
        self.data_size = data_size;

        let first_index = if was_first_index_max {
            self.max_first_index
        } else {
            self.window.first_index.min(self.max_first_index)
        };
        ltrace!(
            data_size,
            num_of_items,
            first_index,
            was_first_index_max,
            "WindowResolver::update_data"
        );
        self.window = VisibleWindow {
            first_index,
            num_of_items,
        };
        was_first_index_max
    }

    /// Rebuilds the threshold and the first index around `pos`, as if the list had scrolled
    /// there line by line from the top.
    ///
    /// Afterwards `pos` lies inside the threshold and the window covers the viewport.
    pub fn reanchor(&mut self, pos: u64) -> VisibleWindow {
        let base = self.threshold.base;
        let lines = match self.grid_size {
            0 => 0,
            grid => pos.saturating_sub(base).div_ceil(grid),
        };
        self.threshold.min = lines * self.grid_size;
        self.threshold.max = self.threshold.min + base;
        self.threshold.sync(self.max_pos);
        self.window.first_index = (lines as usize)
            .saturating_mul(self.columns)
            .min(self.max_first_index);
        ltrace!(
            pos,
            first_index = self.window.first_index,
            min = self.threshold.min,
            max = self.threshold.max,
            "WindowResolver::reanchor"
        );
        self.window
    }

    /// Records the new maximum scroll offset and pulls the threshold back inside it.
    pub fn sync_threshold(&mut self, max_pos: u64) {
        self.max_pos = max_pos;
        self.threshold.sync(max_pos);
    }

    /// Resolves the window for a primary scroll position reached by moving in `direction`.
    pub fn resolve(&mut self, pos: u64, direction: ScrollDirection) -> VisibleWindow {
        if direction == ScrollDirection::Still || self.threshold.contains(pos) {
            return self.window;
        }

        let mut first_index = self.window.first_index;
        match direction {
            ScrollDirection::Forward => {
                let lines = self.threshold.advance(pos, self.grid_size, self.max_pos);
                first_index = first_index
                    .saturating_add(lines.saturating_mul(self.columns))
                    .min(self.max_first_index);
            }
            ScrollDirection::Backward => {
                let lines = self.threshold.retreat(pos, self.grid_size);
                first_index = first_index.saturating_sub(lines.saturating_mul(self.columns));
                if self.threshold.min == 0 {
                    first_index = 0;
                }
            }
            ScrollDirection::Still => {}
        }
        self.threshold.sync(self.max_pos);

        ltrace!(
            pos,
            first_index,
            min = self.threshold.min,
            max = self.threshold.max,
            "WindowResolver::resolve"
        );
        self.window.first_index = first_index;
        self.window
    }
}
