use alloc::sync::Arc;
use core::fmt;

use listwindow::{
    FrameState, ItemRenderer, ListOptions, MoreInfo, Point, Result, ScrollEvent, ScrollEventKind,
    Size, VirtualList,
};

use crate::{AnimationHandle, AnimationRequest, Easing, ScrollAnimator, position_on_focus};

/// Duration of animated `scroll_to` calls unless configured otherwise.
pub const DEFAULT_SCROLL_DURATION_MS: u64 = 500;

/// Callback receiving scroll notifications.
pub type ScrollListener = Arc<dyn Fn(&ScrollEvent) + Send + Sync>;

/// Destination of [`Controller::scroll_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTarget {
    /// Shows the item at the leading edge. Out-of-range indexes are clamped to the last item.
    Index(usize),
    /// Scroll position; only its primary coordinate is used.
    Position(Point),
}

/// A framework-neutral controller that wraps a [`VirtualList`] and a [`ScrollAnimator`] and
/// owns the scroll position.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` / `on_wheel` when UI events occur
/// - `tick(now_ms)` each frame while [`Controller::is_animating`]
///
/// Every position change is reported through the `on_scroll` listener as a
/// [`ScrollEventKind::Start`], one or more [`ScrollEventKind::Scroll`] and a final
/// [`ScrollEventKind::Stop`].
#[derive(Clone)]
pub struct Controller<N> {
    list: VirtualList<N>,
    animator: ScrollAnimator,
    animation: Option<AnimationHandle>,
    on_scroll: Option<ScrollListener>,
    duration_ms: u64,
    is_scrolling: bool,
}

impl<N> Controller<N> {
    pub fn new(options: ListOptions) -> Self {
        Self::from_list(VirtualList::new(options))
    }

    pub fn from_list(list: VirtualList<N>) -> Self {
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

    pub fn list(&self) -> &VirtualList<N> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList<N> {
        &mut self.list
    }

    pub fn into_list(self) -> VirtualList<N> {
        self.list
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether a scroll started and has not been reported as stopped yet.
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_position(&self) -> u64 {
        self.list.scroll_position()
    }

    /// Reports the viewport size. The scroll position is kept where the new bounds allow it;
    /// a position that had to move is reported as a scroll.
    pub fn on_viewport_size(&mut self, size: Size) -> Result<()> {
        let prev = self.list.scroll_position();
        self.list.set_viewport_size(size)?;
        self.list.take_scroll_request();
        self.list.set_scroll_position(prev);
        if self.list.scroll_position() != prev {
            adebug!(
                prev,
                pos = self.list.scroll_position(),
                "Controller: viewport change moved the scroll position"
            );
            self.report_moved();
        }
        Ok(())
    }

    /// Changes the dataset size. A position left beyond the shrunk bounds, or pinned to the
    /// end of a growing list, is reported as a scroll.
    pub fn set_data_size(&mut self, data_size: usize) {
        self.list.set_data_size(data_size);
        self.forward_scroll_request();
    }

    fn forward_scroll_request(&mut self) {
        if self.list.take_scroll_request().is_some() {
            adebug!(
                pos = self.list.scroll_position(),
                "Controller: forwarding scroll request"
            );
            self.report_moved();
        }
    }

    fn report_moved(&mut self) {
        self.cancel_animation();
        self.begin();
        self.emit(ScrollEventKind::Scroll);
        self.end();
    }

    /// Call this when the UI reports a scroll position change (e.g. user drag).
    ///
    /// This cancels any running animation. Report the end of the gesture with
    /// [`Controller::on_scroll_stop`].
    pub fn on_scroll(&mut self, pos: u64) -> u64 {
        self.cancel_animation();
        self.begin();
        self.list.set_scroll_position(pos);
        self.emit(ScrollEventKind::Scroll);
        self.list.scroll_position()
    }

    pub fn on_scroll_stop(&mut self) {
        self.end();
    }

    /// Pages by one viewport extent in the direction of `delta`, clamped to the bounds.
    ///
    /// Returns the applied position.
    pub fn on_wheel(&mut self, delta: i64) -> u64 {
        let current = self.list.scroll_position();
        let (client, _) = self
            .list
            .bounds()
            .client_size()
            .split(self.list.options().direction);
        let pos = match delta {
            0 => return current,
            d if d > 0 => current.saturating_add(client as u64),
            _ => current.saturating_sub(client as u64),
        };
        atrace!(delta, pos, "Controller::on_wheel");
        self.jump_to(pos.min(self.list.max_scroll_position()))
    }

    /// Scrolls to `target`, either immediately or through an animation started at `now_ms`.
    ///
    /// Returns the clamped target position.
    pub fn scroll_to(&mut self, target: ScrollTarget, animate: bool, now_ms: u64) -> u64 {
        let pos = match target {
            ScrollTarget::Index(index) => self.list.scroll_to_index_offset(index),
            ScrollTarget::Position(point) => {
                let (primary, _) = point.split(self.list.options().direction);
                primary.min(self.list.max_scroll_position())
            }
        };
        if animate {
            self.animate_to(pos, self.duration_ms, now_ms)
        } else {
            self.jump_to(pos)
        }
    }

    /// Starts a fling released with the given velocities (pixels per ms).
    ///
    /// Returns the clamped resting position.
    pub fn fling(&mut self, velocity_x: f64, velocity_y: f64, now_ms: u64) -> u64 {
        let fling = ScrollAnimator::simulate(self.list.scroll_point(), velocity_x, velocity_y);
        let (target, _) = fling.target.split(self.list.options().direction);
        let target = target.min(self.list.max_scroll_position());
        self.animate_to(target, fling.duration_ms, now_ms)
    }

    /// Scrolls just enough to show `index` entirely and records it as the focused item.
    ///
    /// The previously focused item is marked for a blur once its node is recycled. Returns the
    /// new position, or `None` when no scroll was needed.
    pub fn focus(&mut self, index: usize, animate: bool, now_ms: u64) -> Option<u64> {
        if let Some(prev) = self.list.last_focused_index() {
            if prev != index {
                self.list.mark_blur_pending(prev);
            }
        }
        self.list.set_last_focused_index(Some(index));
        let pos = position_on_focus(&self.list, index)?;
        if pos == self.list.scroll_position() {
            return None;
        }
        Some(if animate {
            self.animate_to(pos, self.duration_ms, now_ms)
        } else {
            self.jump_to(pos)
        })
    }

    /// Advances the running animation.
    ///
    /// Returns the applied position, or `None` when nothing is animating.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        if self.animation.is_none() {
            return None;
        }
        let frame = self.animator.tick(now_ms)?;
        let (pos, _) = frame.position.split(self.list.options().direction);
        self.list.set_scroll_position(pos);
        self.emit(ScrollEventKind::Scroll);
        if frame.done {
            self.animation = None;
            self.end();
        }
        Some(self.list.scroll_position())
    }

    /// Stops the running animation where it is.
    pub fn stop(&mut self) {
        self.cancel_animation();
        self.end();
    }

    /// Positions the items of the current window through `renderer`.
    pub fn position_items<R: ItemRenderer<Node = N>>(&mut self, renderer: &mut R) -> MoreInfo {
        self.list.position_items(renderer)
    }

    pub fn frame_state(&self) -> FrameState {
        let mut frame = self.list.frame_state();
        frame.scroll.is_scrolling = self.is_scrolling;
        frame
    }

    /// Restores viewport and scroll position from a snapshot, without scroll events.
    pub fn restore_frame_state(&mut self, frame: FrameState) -> Result<()> {
        self.cancel_animation();
        self.is_scrolling = false;
        self.list.restore_frame_state(frame)
    }

    fn animate_to(&mut self, pos: u64, duration_ms: u64, now_ms: u64) -> u64 {
        let direction = self.list.options().direction;
        let request = AnimationRequest::new(
            self.list.scroll_point(),
            Point::from_axes(direction, pos, 0),
            now_ms,
            duration_ms,
        );
        self.animation = Some(self.animator.start(request));
        self.begin();
        pos
    }

    fn jump_to(&mut self, pos: u64) -> u64 {
        self.cancel_animation();
        if pos == self.list.scroll_position() && !self.is_scrolling {
            return pos;
        }
        self.begin();
        self.list.set_scroll_position(pos);
        self.emit(ScrollEventKind::Scroll);
        self.end();
        self.list.scroll_position()
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
            let event = ScrollEvent::new(kind, self.list.scroll_point(), self.list.more_info());
            on_scroll(&event);
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for Controller<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("list", &self.list)
            .field("animator", &self.animator)
            .field("animation", &self.animation)
            .field("duration_ms", &self.duration_ms)
            .field("is_scrolling", &self.is_scrolling)
            .finish_non_exhaustive()
    }
}
