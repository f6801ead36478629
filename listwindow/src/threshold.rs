/// Hysteresis window over the primary scroll position.
///
/// The visible window is only recomputed when the scroll position leaves `[min, max]`, so
/// scrolling inside a grid line costs nothing. Positions are non-negative, so `min == 0`
/// stands for an unbounded lower edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    pub min: u64,
    pub max: u64,
    /// Two grid lines.
    pub base: u64,
}

impl Threshold {
    pub fn new(base: u64) -> Self {
        Self {
            min: 0,
            max: base,
            base,
        }
    }

    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.min && pos <= self.max
    }

    /// Pulls a stale window back inside `[0, max_pos]` after the scroll extent shrank.
    pub fn sync(&mut self, max_pos: u64) {
        if self.max <= max_pos {
            return;
        }
        if max_pos < self.base {
            self.max = self.base;
            self.min = 0;
        } else {
            self.max = max_pos;
            self.min = max_pos - self.base;
        }
    }

    /// Moves the window forward past `pos`. Returns the number of grid lines crossed.
    pub fn advance(&mut self, pos: u64, grid_size: u64, max_pos: u64) -> usize {
        if pos <= self.max || grid_size == 0 {
            return 0;
        }
        let lines = (pos - self.max).div_ceil(grid_size);
        let cap = max_pos.max(self.max);
        self.max = self.max.saturating_add(lines * grid_size).min(cap);
        self.min = self
            .max
            .saturating_sub(self.base)
            .min(max_pos.saturating_sub(self.base));
        lines as usize
    }

    /// Moves the window backward past `pos`. Returns the number of grid lines crossed.
    pub fn retreat(&mut self, pos: u64, grid_size: u64) -> usize {
        if pos >= self.min || grid_size == 0 {
            return 0;
        }
        let lines = (self.min - pos).div_ceil(grid_size);
        self.max = self.max.saturating_sub(lines * grid_size).max(self.base);
        self.min = self.max.saturating_sub(self.base);
        lines as usize
    }
}
