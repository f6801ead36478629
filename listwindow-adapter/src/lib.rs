//! Animated scrolling and host-facing workflows for the `listwindow` crate.
//!
//! The `listwindow` crate is UI-agnostic and only resolves windows and placements for a given
//! scroll position. This crate provides the pieces that move that position over time:
//!
//! - [`ScrollAnimator`]: eased interpolation between two positions plus fling simulation
//! - [`Controller`]: owns a [`listwindow::VirtualList`] and its scroll position, emits scroll
//!   events and handles scroll-to, wheel paging and focus-driven scrolling
//! - [`VariableController`]: the same workflows on both axes for a
//!   [`listwindow::VirtualVariableList`] or [`listwindow::VirtualFlexList`]
//!
//! Time is supplied by the host as monotonic milliseconds (`now_ms`); nothing here reads a
//! clock. This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animator;
mod controller;
mod easing;
mod focus;
mod variable_controller;

#[cfg(test)]
mod tests;

pub use animator::{
    Animation, AnimationFrame, AnimationHandle, AnimationRequest, FRAME_MS, FRICTION, Fling,
    MAX_STEP, STOP_THRESHOLD, ScrollAnimator,
};
pub use controller::{Controller, DEFAULT_SCROLL_DURATION_MS, ScrollListener, ScrollTarget};
pub use easing::Easing;
pub use focus::{position_on_focus, position_on_focus_cell};
pub use variable_controller::{CellList, CellScrollTarget, VariableController};
