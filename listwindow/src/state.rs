use crate::{MoreInfo, Point, Size};

/// A lightweight, serializable snapshot of the viewport.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub size: Size,
}

/// A lightweight, serializable snapshot of the scroll position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub position: Point,
    pub is_scrolling: bool,
}

/// A combined snapshot of viewport + scroll state.
///
/// Restoring it recomputes metrics for the viewport and then moves to the saved position, so a
/// list can be torn down and rebuilt without losing its place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollEventKind {
    Start,
    Scroll,
    Stop,
}

/// Notification delivered to `on_scroll` listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub kind: ScrollEventKind,
    pub scroll_left: u64,
    pub scroll_top: u64,
    pub more_info: MoreInfo,
}

impl ScrollEvent {
    pub fn new(kind: ScrollEventKind, position: Point, more_info: MoreInfo) -> Self {
        Self {
            kind,
            scroll_left: position.x,
            scroll_top: position.y,
            more_info,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.scroll_left, self.scroll_top)
    }
}
