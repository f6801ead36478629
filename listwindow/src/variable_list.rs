use crate::{
    CellIndex, Direction, FrameState, ItemIndex, ItemRenderer, Metrics, MoreInfo, Phase, Point,
    Positioner, Result, ScrollBounds, ScrollDirection, ScrollState, SecondaryScrollInfo, Size,
    SlotKey, SlotPool, VariableListOptions, ViewportState, VisibleWindow, WindowResolver,
    calculate_metrics,
};

/// A two-dimensional list: rows of fixed primary size whose cells vary along the secondary
/// axis.
///
/// Rows are windowed like a [`crate::VirtualList`]. Inside each mounted row only the cells that
/// intersect the viewport are kept, tracked per row by [`SecondaryScrollInfo`].
#[derive(Clone, Debug)]
pub struct VirtualVariableList<N> {
    options: VariableListOptions,
    viewport: Size,
    metrics: Option<Metrics>,
    bounds: ScrollBounds,
    resolver: WindowResolver,
    secondary: SecondaryScrollInfo,
    positioner: Positioner<N>,
    position: Point,
    scroll_request: Option<Point>,
    phase: Phase,
}

impl<N> VirtualVariableList<N> {
    /// Fails with [`crate::Error::ExpectedVariableSize`] unless the item size is
    /// [`crate::ItemSizeSpec::Variable`].
    pub fn new(options: VariableListOptions) -> Result<Self> {
        options.size_accessor()?;
        ldebug!(
            primary_count = options.primary_count,
            overhang = options.overhang,
            "VirtualVariableList::new"
        );
        Ok(Self {
            positioner: Positioner::new(options.writing_direction),
            options,
            viewport: Size::default(),
            metrics: None,
            bounds: ScrollBounds::default(),
            resolver: WindowResolver::default(),
            secondary: SecondaryScrollInfo::default(),
            position: Point::default(),
            scroll_request: None,
            phase: Phase::Uninitialized,
        })
    }

    pub fn options(&self) -> &VariableListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: VariableListOptions) -> Result<()> {
        options.size_accessor()?;
        let metrics_changed = self.options.metrics_differ(&options);
        let data_changed = self.options.data_differ(&options);
        self.positioner
            .set_writing_direction(options.writing_direction);
        self.options = options;
        ltrace!(
            metrics_changed,
            data_changed,
            "VirtualVariableList::set_options"
        );

        if metrics_changed {
            self.calculate_metrics()?;
            self.update_states_and_bounds()?;
        } else if data_changed {
            self.update_states_and_bounds()?;
        }
        Ok(())
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Reports the viewport size. Metrics are recomputed only when the size actually changed;
    /// an empty size is ignored.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<()> {
        if size.is_empty() || (self.metrics.is_some() && self.viewport == size) {
            return Ok(());
        }
        self.viewport = size;
        self.calculate_metrics()?;
        self.update_states_and_bounds()
    }

    fn direction(&self) -> Direction {
        self.options.variable_axis.primary_direction()
    }

    fn calculate_metrics(&mut self) -> Result<()> {
        let Some(metrics) =
            calculate_metrics(self.viewport, &self.options.item_size, 0, self.direction())?
        else {
            return Ok(());
        };
        self.resolver = WindowResolver::new(1, metrics.primary.grid_size);
        self.metrics = Some(metrics);
        self.position = Point::default();
        self.positioner.reset();
        self.phase = Phase::MetricsReady;
        Ok(())
    }

    fn update_states_and_bounds(&mut self) -> Result<()> {
        let first_visible = self.more_info().first_visible_index;
        let Some(metrics) = self.metrics.as_mut() else {
            return Ok(());
        };
        let direction = metrics.direction;
        let primary_count = self.options.primary_count;
        let num_of_items = metrics.num_of_items(primary_count, self.options.overhang);
        metrics.primary.data_size = primary_count;

        let pinned = self
            .resolver
            .update_data(primary_count, num_of_items, first_visible);

        let primary_extent = metrics.primary_extent(primary_count);
        let secondary_extent = self.options.max_variable_scroll_size;
        self.bounds = match direction {
            Direction::Vertical => {
                ScrollBounds::new(self.viewport, secondary_extent, primary_extent)
            }
            Direction::Horizontal => {
                ScrollBounds::new(self.viewport, primary_extent, secondary_extent)
            }
        };
        let max_pos = self.bounds.max_pos(direction);
        self.resolver.sync_threshold(max_pos);

        self.secondary = SecondaryScrollInfo::new(
            primary_count,
            metrics.secondary.client_size,
            self.options.max_variable_scroll_size,
        );
        self.positioner.reset();

        let (primary_pos, secondary_pos) = self.position.split(direction);
        let primary_pos = if pinned { max_pos } else { primary_pos };
        let position = self
            .bounds
            .clamp(Point::from_axes(direction, primary_pos, secondary_pos));
        if position != self.position {
            ldebug!(
                x = position.x,
                y = position.y,
                pinned,
                "VirtualVariableList: moving scroll position into the new bounds"
            );
            self.scroll_request = Some(position);
            self.position = position;
        }
        let (primary_pos, secondary_pos) = position.split(direction);
        self.resolver.reanchor(primary_pos);
        self.secondary.set_scroll_position(secondary_pos);
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.primary.scroll_position = primary_pos;
            metrics.secondary.scroll_position = secondary_pos;
        }
        for i in self.resolver.range() {
            self.update_row(i, secondary_pos)?;
        }
        Ok(())
    }

    /// Returns (and clears) the position the list moved itself to after its bounds changed.
    ///
    /// Hosts that own the real scroll offsets should move them there.
    pub fn take_scroll_request(&mut self) -> Option<Point> {
        self.scroll_request.take()
    }

    fn update_row(&mut self, primary: usize, pos: u64) -> Result<()> {
        let count = (self.options.secondary_count)(primary);
        let accessor = self.options.size_accessor()?;
        self.secondary
            .update_row(primary, pos, count, |j| accessor(CellIndex::new(primary, j)))
    }

    fn resolve_primary(&mut self, pos: u64, direction: ScrollDirection) -> VisibleWindow {
        let window = self.resolver.resolve(pos, direction);
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.primary.scroll_position = pos;
            metrics.secondary.scroll_position = self.secondary.scroll_position();
        }
        window
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn bounds(&self) -> ScrollBounds {
        self.bounds
    }

    pub fn window(&self) -> VisibleWindow {
        self.resolver.window()
    }

    pub fn range(&self) -> core::ops::Range<usize> {
        self.resolver.range()
    }

    pub fn secondary_info(&self) -> &SecondaryScrollInfo {
        &self.secondary
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scroll_position(&self) -> Point {
        self.position
    }

    /// Largest scroll position on both axes. The variable axis is capped by
    /// `max_variable_scroll_size`.
    pub fn max_scroll_position(&self) -> Point {
        self.bounds.max_point()
    }

    /// Moves to `position` (clamped to the bounds) and resolves the row window and the
    /// per-row cell windows.
    pub fn set_scroll_position(&mut self, position: Point) -> Result<VisibleWindow> {
        if self.metrics.is_none() {
            return Ok(VisibleWindow::default());
        }
        let direction = self.direction();
        let position = self.bounds.clamp(position);
        let (prev_primary, prev_secondary) = self.position.split(direction);
        let (primary_pos, secondary_pos) = position.split(direction);
        let primary_dir = ScrollDirection::between(prev_primary, primary_pos);
        let secondary_dir = ScrollDirection::between(prev_secondary, secondary_pos);

        let previous = self.resolver.range();
        let window = self.resolve_primary(primary_pos, primary_dir);

        for i in self.resolver.range() {
            if !previous.contains(&i)
                || self.secondary.needs_update(i, secondary_pos, secondary_dir)
            {
                self.update_row(i, secondary_pos)?;
            }
        }
        self.secondary.set_scroll_position(secondary_pos);
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.secondary.scroll_position = secondary_pos;
        }
        ltrace!(
            primary = primary_pos,
            secondary = secondary_pos,
            "VirtualVariableList::set_scroll_position"
        );

        self.position = position;
        self.phase = Phase::WindowResolved;
        Ok(window)
    }

    /// Positions the visible cells of the mounted rows through `renderer`.
    pub fn position_items<R: ItemRenderer<Node = N>>(
        &mut self,
        renderer: &mut R,
    ) -> Result<MoreInfo> {
        let Some(metrics) = self.metrics else {
            return Ok(MoreInfo::default());
        };
        let accessor = self.options.size_accessor()?.clone();
        let more_info = self.positioner.position_cells(
            &metrics,
            &self.secondary,
            self.resolver.range(),
            self.options.clip_item,
            |index| accessor(index),
            renderer,
        )?;
        self.phase = Phase::Positioned;
        Ok(more_info)
    }

    /// Visible rows for the current position, without rendering.
    pub fn more_info(&self) -> MoreInfo {
        match &self.metrics {
            Some(metrics) => metrics.visible_indexes(metrics.primary.scroll_position, self.range()),
            None => MoreInfo::default(),
        }
    }

    /// Position that shows `cell` at the leading edge of both axes, clamped to the bounds.
    ///
    /// Out-of-range rows are clamped to the last row; the secondary offset sums the sizes of
    /// the cells before `cell.secondary` in that row.
    pub fn scroll_to_cell_offset(&self, cell: CellIndex) -> Result<Point> {
        let Some(metrics) = &self.metrics else {
            return Ok(Point::default());
        };
        if self.options.primary_count == 0 {
            return Ok(Point::default());
        }
        let primary = cell.primary.min(self.options.primary_count - 1);
        let count = (self.options.secondary_count)(primary);
        let accessor = self.options.size_accessor()?;
        let mut secondary_pos = 0u64;
        for j in 0..cell.secondary.min(count) {
            secondary_pos = secondary_pos.saturating_add(accessor(CellIndex::new(primary, j)) as u64);
        }
        let (primary_pos, _) = metrics.grid_position(primary);
        Ok(self
            .bounds
            .clamp(Point::from_axes(metrics.direction, primary_pos, secondary_pos)))
    }

    pub fn pool(&self) -> &SlotPool<N> {
        self.positioner.pool()
    }

    pub fn pool_mut(&mut self) -> &mut SlotPool<N> {
        self.positioner.pool_mut()
    }

    pub fn last_focused_cell(&self) -> Option<CellIndex> {
        match self.positioner.last_focused() {
            Some(ItemIndex::Cell(cell)) => Some(cell),
            _ => None,
        }
    }

    pub fn set_last_focused_cell(&mut self, cell: Option<CellIndex>) {
        self.positioner.set_last_focused(cell.map(ItemIndex::Cell));
    }

    /// Requests a blur of the node showing `cell` before it is reused for another item.
    pub fn mark_blur_pending(&mut self, cell: CellIndex) {
        self.positioner.mark_blur_pending(SlotKey::Cell(cell));
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: ViewportState {
                size: self.viewport,
            },
            scroll: ScrollState {
                position: self.position,
                is_scrolling: false,
            },
        }
    }

    pub fn restore_frame_state(&mut self, frame: FrameState) -> Result<()> {
        self.set_viewport_size(frame.viewport.size)?;
        self.set_scroll_position(frame.scroll.position)?;
        Ok(())
    }
}
