use alloc::sync::Arc;
use core::fmt;

use listwindow::{
    CellIndex, Point, Result, ScrollEvent, ScrollEventKind, Size, VirtualFlexList,
    VirtualVariableList,
};

use crate::{
    AnimationHandle, AnimationRequest, DEFAULT_SCROLL_DURATION_MS, Easing, ScrollAnimator,
    ScrollListener, position_on_focus_cell,
};

/// A two-dimensional list a [`VariableController`] can drive.
///
/// Scrolling and bounds queries go through the cell grid returned by [`CellList::cells`];
/// the mutating operations let wrappers such as [`VirtualFlexList`] keep their other parts in
/// step.
pub trait CellList {
    type Node;

    fn cells(&self) -> &VirtualVariableList<Self::Node>;

    fn cells_mut(&mut self) -> &mut VirtualVariableList<Self::Node>;

    fn set_viewport_size(&mut self, size: Size) -> Result<()>;

    /// Moves to `position` (clamped to the bounds). Returns the applied position.
    fn set_scroll_position(&mut self, position: Point) -> Result<Point>;

    fn take_scroll_request(&mut self) -> Option<Point>;
}

impl<N> CellList for VirtualVariableList<N> {
    type Node = N;

    fn cells(&self) -> &VirtualVariableList<N> {
        self
    }

    fn cells_mut(&mut self) -> &mut VirtualVariableList<N> {
        self
    }

    fn set_viewport_size(&mut self, size: Size) -> Result<()> {
        VirtualVariableList::set_viewport_size(self, size)
    }

    fn set_scroll_position(&mut self, position: Point) -> Result<Point> {
        VirtualVariableList::set_scroll_position(self, position)?;
        Ok(self.scroll_position())
    }

    fn take_scroll_request(&mut self) -> Option<Point> {
        VirtualVariableList::take_scroll_request(self)
    }
}

impl<N> CellList for VirtualFlexList<N> {
    type Node = N;

    fn cells(&self) -> &VirtualVariableList<N> {
        self.body()
    }

    fn cells_mut(&mut self) -> &mut VirtualVariableList<N> {
        self.body_mut()
    }

    fn set_viewport_size(&mut self, size: Size) -> Result<()> {
        VirtualFlexList::set_viewport_size(self, size)
    }

    fn set_scroll_position(&mut self, position: Point) -> Result<Point> {
        VirtualFlexList::set_scroll_position(self, position)
    }

    fn take_scroll_request(&mut self) -> Option<Point> {
        VirtualFlexList::take_scroll_request(self)
    }
}

/// Destination of [`VariableController::scroll_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellScrollTarget {
    /// Shows the cell at the leading edge of both axes. Out-of-range rows are clamped to the
    /// last row.
    Cell(CellIndex),
    Position(Point),
}

/// The two-dimensional counterpart of [`crate::Controller`]: both axes scroll and animate.
///
/// Adapters drive it by calling `on_viewport_size` / `on_scroll` / `on_wheel` when UI events
/// occur and `tick(now_ms)` each frame while [`VariableController::is_animating`]. Rendering
/// goes through [`VariableController::list_mut`], since a flex list needs one renderer per
/// region.
#[derive(Clone)]
pub struct VariableController<L> {
    list: L,
    animator: ScrollAnimator,
    animation: Option<AnimationHandle>,
    on_scroll: Option<ScrollListener>,
    duration_ms: u64,
    is_scrolling: bool,
}

impl<L: CellList> VariableController<L> {
    pub fn new(list: L) -> Self {
        Self {
            list,
            animator: ScrollAnimator::default(),
            animation: None,
            on_scroll: None,
            duration_ms: DEFAULT_SCROLL_DURATION_MS,
            is_scrolling: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.animator.set_easing(easing);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_on_scroll(mut self, f: impl Fn(&ScrollEvent) + Send + Sync + 'static) -> Self {
        self.on_scroll = Some(Arc::new(f));
        self
    }

    pub fn set_on_scroll(&mut self, on_scroll: Option<ScrollListener>) {
        self.on_scroll = on_scroll;
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    /// Direct access for rendering and queries. Position changes made through it are not
    /// reported.
    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    pub fn into_list(self) -> L {
        self.list
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_position(&self) -> Point {
        self.list.cells().scroll_position()
    }

    /// Reports the viewport size, keeping the scroll position where the new bounds allow it.
    pub fn on_viewport_size(&mut self, size: Size) -> Result<()> {
        let prev = self.scroll_position();
        self.list.set_viewport_size(size)?;
        self.list.take_scroll_request();
        let pos = self.list.set_scroll_position(prev)?;
        if pos != prev {
            adebug!(
                x = pos.x,
                y = pos.y,
                "VariableController: viewport change moved the scroll position"
            );
            self.report_moved();
        }
        Ok(())
    }

    /// Applies `f` to the list (typically an options change) and reports a position the list
    /// had to move to as a scroll.
    pub fn update_list(&mut self, f: impl FnOnce(&mut L) -> Result<()>) -> Result<()> {
        f(&mut self.list)?;
        if self.list.take_scroll_request().is_some() {
            adebug!(
                x = self.scroll_position().x,
                y = self.scroll_position().y,
                "VariableController: forwarding scroll request"
            );
            self.report_moved();
        }
        Ok(())
    }

    /// Call this when the UI reports a scroll position change. Cancels any running animation.
    pub fn on_scroll(&mut self, position: Point) -> Result<Point> {
        self.cancel_animation();
        self.begin();
        let pos = self.list.set_scroll_position(position)?;
        self.emit(ScrollEventKind::Scroll);
        Ok(pos)
    }

    pub fn on_scroll_stop(&mut self) {
        self.end();
    }

    /// Pages vertically by one viewport height in the direction of `delta`, clamped to the
    /// bounds. The horizontal position is kept.
    pub fn on_wheel(&mut self, delta: i64) -> Result<Point> {
        let current = self.scroll_position();
        let cells = self.list.cells();
        let page = cells.bounds().client_size().height as u64;
        let max_top = cells.max_scroll_position().y;
        let top = match delta {
            0 => return Ok(current),
            d if d > 0 => current.y.saturating_add(page).min(max_top),
            _ => current.y.saturating_sub(page),
        };
        atrace!(delta, top, "VariableController::on_wheel");
        self.jump_to(Point::new(current.x, top))
    }

    /// Scrolls to `left`/`top`, each clamped to its axis. A `None` coordinate keeps the
    /// current one.
    pub fn scroll(
        &mut self,
        left: Option<u64>,
        top: Option<u64>,
        animate: bool,
        now_ms: u64,
    ) -> Result<Point> {
        let current = self.scroll_position();
        let target = Point::new(left.unwrap_or(current.x), top.unwrap_or(current.y));
        let target = self.list.cells().bounds().clamp(target);
        self.go_to(target, animate, now_ms)
    }

    pub fn scroll_to(
        &mut self,
        target: CellScrollTarget,
        animate: bool,
        now_ms: u64,
    ) -> Result<Point> {
        let cells = self.list.cells();
        let pos = match target {
            CellScrollTarget::Cell(cell) => cells.scroll_to_cell_offset(cell)?,
            CellScrollTarget::Position(point) => cells.bounds().clamp(point),
        };
        self.go_to(pos, animate, now_ms)
    }

    /// Starts a fling released with the given velocities (pixels per ms). Returns the clamped
    /// resting position.
    pub fn fling(&mut self, velocity_x: f64, velocity_y: f64, now_ms: u64) -> Point {
        let fling = ScrollAnimator::simulate(self.scroll_position(), velocity_x, velocity_y);
        let target = self.list.cells().bounds().clamp(fling.target);
        self.animate_to(target, fling.duration_ms, now_ms)
    }

    /// Scrolls just enough to show `cell` entirely on both axes and records it as focused.
    ///
    /// Returns the new position, or `None` when no scroll was needed.
    pub fn focus(&mut self, cell: CellIndex, animate: bool, now_ms: u64) -> Result<Option<Point>> {
        let cells = self.list.cells_mut();
        if let Some(prev) = cells.last_focused_cell() {
            if prev != cell {
                cells.mark_blur_pending(prev);
            }
        }
        cells.set_last_focused_cell(Some(cell));
        let Some(pos) = position_on_focus_cell(self.list.cells(), cell) else {
            return Ok(None);
        };
        if pos == self.scroll_position() {
            return Ok(None);
        }
        self.go_to(pos, animate, now_ms).map(Some)
    }

    /// Advances the running animation on both axes.
    ///
    /// Returns the applied position, or `None` when nothing is animating.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<Point>> {
        if self.animation.is_none() {
            return Ok(None);
        }
        let Some(frame) = self.animator.tick(now_ms) else {
            return Ok(None);
        };
        let pos = self.list.set_scroll_position(frame.position)?;
        self.emit(ScrollEventKind::Scroll);
        if frame.done {
            self.animation = None;
            self.end();
        }
        Ok(Some(pos))
    }

    /// Stops the running animation where it is.
    pub fn stop(&mut self) {
        self.cancel_animation();
        self.end();
    }

    fn go_to(&mut self, pos: Point, animate: bool, now_ms: u64) -> Result<Point> {
        if animate {
            Ok(self.animate_to(pos, self.duration_ms, now_ms))
        } else {
            self.jump_to(pos)
        }
    }

    fn animate_to(&mut self, pos: Point, duration_ms: u64, now_ms: u64) -> Point {
        let request = AnimationRequest::new(self.scroll_position(), pos, now_ms, duration_ms);
        self.animation = Some(self.animator.start(request));
        self.begin();
        pos
    }

    fn jump_to(&mut self, pos: Point) -> Result<Point> {
        self.cancel_animation();
        if pos == self.scroll_position() && !self.is_scrolling {
            return Ok(pos);
        }
        self.begin();
        let applied = self.list.set_scroll_position(pos)?;
        self.emit(ScrollEventKind::Scroll);
        self.end();
        Ok(applied)
    }

    fn report_moved(&mut self) {
        self.cancel_animation();
        self.begin();
        self.emit(ScrollEventKind::Scroll);
        self.end();
    }

    fn cancel_animation(&mut self) {
        if let Some(handle) = self.animation.take() {
            self.animator.stop(handle);
        }
    }

    fn begin(&mut self) {
        if !self.is_scrolling {
            self.is_scrolling = true;
            self.emit(ScrollEventKind::Start);
        }
    }

    fn end(&mut self) {
        if self.is_scrolling {
            self.is_scrolling = false;
            self.emit(ScrollEventKind::Stop);
        }
    }

    fn emit(&self, kind: ScrollEventKind) {
        if let Some(on_scroll) = &self.on_scroll {
            let cells = self.list.cells();
            let event = ScrollEvent::new(kind, cells.scroll_position(), cells.more_info());
            on_scroll(&event);
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for VariableController<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableController")
            .field("list", &self.list)
            .field("animator", &self.animator)
            .field("animation", &self.animation)
            .field("duration_ms", &self.duration_ms)
            .field("is_scrolling", &self.is_scrolling)
            .finish_non_exhaustive()
    }
}
