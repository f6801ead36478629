use crate::{
    FrameState, ItemIndex, ItemRenderer, ItemSizeSpec, ListOptions, Metrics, MoreInfo, Phase,
    Point, Positioner, Result, ScrollBounds, ScrollDirection, ScrollState, Size, SlotKey, SlotPool,
    Threshold, ViewportState, VisibleWindow, WindowResolver, calculate_metrics,
};

/// A windowed list or auto-fit grid.
///
/// This type is UI-agnostic:
/// - The host reports the viewport size and scroll position.
/// - The list resolves which items to keep mounted and where to place them.
/// - Rendering goes through an [`ItemRenderer`] that creates and patches pooled nodes.
///
/// Every pass runs metrics → bounds → window → positioning. For animated scrolling and scroll
/// events, see the `listwindow-adapter` crate.
#[derive(Clone, Debug)]
pub struct VirtualList<N> {
    options: ListOptions,
    viewport: Size,
    metrics: Option<Metrics>,
    bounds: ScrollBounds,
    resolver: WindowResolver,
    positioner: Positioner<N>,
    scroll_position: u64,
    scroll_request: Option<u64>,
    phase: Phase,
}

impl<N> VirtualList<N> {
    /// Creates a list. Nothing is computed until a non-empty viewport is set.
    pub fn new(options: ListOptions) -> Self {
        ldebug!(
            data_size = options.data_size,
            overhang = options.overhang,
            "VirtualList::new"
        );
        Self {
            positioner: Positioner::new(options.writing_direction),
            options,
            viewport: Size::default(),
            metrics: None,
            bounds: ScrollBounds::default(),
            resolver: WindowResolver::default(),
            scroll_position: 0,
            scroll_request: None,
            phase: Phase::Uninitialized,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Applies new options, recomputing only what they affect.
    pub fn set_options(&mut self, options: ListOptions) -> Result<()> {
        let metrics_changed = self.options.metrics_differ(&options);
        let data_changed = self.options.data_size != options.data_size;
        self.positioner
            .set_writing_direction(options.writing_direction);
        self.options = options;
        ltrace!(metrics_changed, data_changed, "VirtualList::set_options");

        if metrics_changed {
            self.calculate_metrics()?;
            self.update_states_and_bounds();
        } else if data_changed {
            self.update_states_and_bounds();
        }
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) -> Result<()> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn data_size(&self) -> usize {
        self.options.data_size
    }

    pub fn set_data_size(&mut self, data_size: usize) {
        if self.options.data_size == data_size {
            return;
        }
        self.options.data_size = data_size;
        self.update_states_and_bounds();
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Reports the viewport size. Metrics are recomputed only when the size actually changed;
    /// an empty size is ignored.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<()> {
        if size.is_empty() {
            ldebug!(
                width = size.width,
                height = size.height,
                "VirtualList::set_viewport_size: empty viewport"
            );
            return Ok(());
        }
        if self.metrics.is_some() && self.viewport == size {
            return Ok(());
        }
        self.viewport = size;
        self.calculate_metrics()?;
        self.update_states_and_bounds();
        Ok(())
    }

    fn calculate_metrics(&mut self) -> Result<()> {
        let spec = match &self.options.item_size {
            ItemSizeSpec::Variable { primary, .. } => ItemSizeSpec::Fixed(*primary),
            spec => spec.clone(),
        };
        let Some(metrics) = calculate_metrics(
            self.viewport,
            &spec,
            self.options.spacing,
            self.options.direction,
        )?
        else {
            return Ok(());
        };

        self.resolver = WindowResolver::new(metrics.columns, metrics.primary.grid_size);
        self.metrics = Some(metrics);
        self.scroll_position = 0;
        self.positioner.reset();
        self.phase = Phase::MetricsReady;
        Ok(())
    }

    fn update_states_and_bounds(&mut self) {
        let first_visible = self.more_info().first_visible_index;
        let Some(metrics) = self.metrics.as_mut() else {
            return;
        };
        let data_size = self.options.data_size;
        let num_of_items = metrics.num_of_items(data_size, self.options.overhang);
        metrics.primary.data_size = data_size.div_ceil(metrics.columns);
        metrics.secondary.data_size = metrics.columns.min(data_size);

        let pinned = self
            .resolver
            .update_data(data_size, num_of_items, first_visible);
        self.positioner.reset();
        self.calculate_scroll_bounds(pinned);
    }

    /// Recomputes the bounds and moves the position inside them: to the new end when the
    /// window was pinned there, otherwise clamped. The window is then rebuilt around it.
    fn calculate_scroll_bounds(&mut self, pinned: bool) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let direction = metrics.direction;
        let extent = metrics.primary_extent(self.options.data_size);
        self.bounds = ScrollBounds::for_primary_extent(self.viewport, direction, extent);

        let max_pos = self.bounds.max_pos(direction);
        self.resolver.sync_threshold(max_pos);

        let pos = if pinned {
            max_pos
        } else {
            self.scroll_position.min(max_pos)
        };
        if pos != self.scroll_position {
            ldebug!(
                scroll_position = self.scroll_position,
                pos,
                pinned,
                "VirtualList: moving scroll position into the new bounds"
            );
            self.scroll_request = Some(pos);
            self.scroll_position = pos;
        }
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.primary.scroll_position = pos;
        }
        self.resolver.reanchor(pos);
    }

    /// Returns (and clears) the position the list moved itself to after its bounds changed:
    /// clamped after a shrink, or the new end when the list was pinned to its last items.
    ///
    /// Hosts that own the real scroll offset should move it there.
    pub fn take_scroll_request(&mut self) -> Option<u64> {
        self.scroll_request.take()
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

    pub fn threshold(&self) -> Threshold {
        self.resolver.threshold()
    }

    pub fn max_first_index(&self) -> usize {
        self.resolver.max_first_index()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Primary-axis scroll position.
    pub fn scroll_position(&self) -> u64 {
        self.scroll_position
    }

    pub fn max_scroll_position(&self) -> u64 {
        self.bounds.max_pos(self.options.direction)
    }

    /// The scroll position as a point (the secondary axis never scrolls).
    pub fn scroll_point(&self) -> Point {
        Point::from_axes(self.options.direction, self.scroll_position, 0)
    }

    /// Index range to mount for the current window.
    pub fn range(&self) -> core::ops::Range<usize> {
        self.resolver.range()
    }

    /// Moves to `pos` (clamped to the scroll bounds) and resolves the window.
    pub fn set_scroll_position(&mut self, pos: u64) -> VisibleWindow {
        let pos = pos.min(self.max_scroll_position());
        let direction = ScrollDirection::between(self.scroll_position, pos);
        self.resolve_window(pos, direction)
    }

    /// Resolves the window for a primary position reached by moving in `direction`.
    pub fn resolve_window(&mut self, pos: u64, direction: ScrollDirection) -> VisibleWindow {
        let Some(metrics) = self.metrics.as_mut() else {
            return VisibleWindow::default();
        };
        let window = self.resolver.resolve(pos, direction);
        metrics.primary.scroll_position = pos;
        self.scroll_position = pos;
        self.phase = Phase::WindowResolved;
        window
    }

    /// Positions the items of the current window through `renderer`.
    pub fn position_items<R: ItemRenderer<Node = N>>(&mut self, renderer: &mut R) -> MoreInfo {
        let Some(metrics) = self.metrics else {
            return MoreInfo::default();
        };
        let window = self.resolver.window();
        let more_info = self.positioner.position_items(
            &metrics,
            self.scroll_position,
            self.resolver.range(),
            window.num_of_items,
            renderer,
        );
        self.phase = Phase::Positioned;
        more_info
    }

    /// Visible indexes for the current position, without rendering.
    pub fn more_info(&self) -> MoreInfo {
        match &self.metrics {
            Some(metrics) => metrics.visible_indexes(self.scroll_position, self.resolver.range()),
            None => MoreInfo::default(),
        }
    }

    /// Primary position that shows `index` at the leading edge, clamped to the bounds.
    ///
    /// Out-of-range indexes are clamped to the last item.
    pub fn scroll_to_index_offset(&self, index: usize) -> u64 {
        let Some(metrics) = &self.metrics else {
            return 0;
        };
        if self.options.data_size == 0 {
            return 0;
        }
        let index = index.min(self.options.data_size - 1);
        let (line_pos, _) = metrics.grid_position(index);
        line_pos.min(self.max_scroll_position())
    }

    /// Scrolls so `index` sits at the leading edge. Returns the applied position.
    pub fn scroll_to_index(&mut self, index: usize) -> u64 {
        let pos = self.scroll_to_index_offset(index);
        self.set_scroll_position(pos);
        pos
    }

    pub fn pool(&self) -> &SlotPool<N> {
        self.positioner.pool()
    }

    pub fn pool_mut(&mut self) -> &mut SlotPool<N> {
        self.positioner.pool_mut()
    }

    /// Slot that holds `index` while it is mounted.
    pub fn slot_of(&self, index: usize) -> Option<SlotKey> {
        let window = self.resolver.window();
        (window.num_of_items > 0 && self.resolver.range().contains(&index))
            .then(|| SlotKey::Slot(index % window.num_of_items))
    }

    pub fn last_focused_index(&self) -> Option<usize> {
        match self.positioner.last_focused() {
            Some(ItemIndex::Flat(i)) => Some(i),
            _ => None,
        }
    }

    pub fn set_last_focused_index(&mut self, index: Option<usize>) {
        self.positioner.set_last_focused(index.map(ItemIndex::Flat));
    }

    /// Requests a blur of the node showing `index` once its slot is recycled.
    pub fn mark_blur_pending(&mut self, index: usize) {
        if let Some(key) = self.slot_of(index) {
            self.positioner.mark_blur_pending(key);
        }
    }

    /// Returns a lightweight snapshot of the viewport.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            size: self.viewport,
        }
    }

    /// Returns a lightweight snapshot of the scroll position.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            position: self.scroll_point(),
            is_scrolling: false,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport and scroll position from a snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState) -> Result<()> {
        self.set_viewport_size(frame.viewport.size)?;
        let (primary, _) = frame.scroll.position.split(self.options.direction);
        self.set_scroll_position(primary);
        Ok(())
    }
}
