//! A headless windowing and scroll engine for virtualized lists.
//!
//! For animated scrolling, scroll events and focus-driven scrolling, see the
//! `listwindow-adapter` crate.
//!
//! This crate renders huge datasets inside a fixed viewport by keeping only a bounded window
//! of items mounted on a pool of reusable nodes:
//! - metrics: item, grid and column sizes derived from the viewport
//! - bounds: scrollable extents and a hysteresis threshold over the scroll position
//! - window: the range of items to mount, moved by whole grid lines
//! - positioning: placements written through an [`ItemRenderer`], reusing nodes per slot
//!
//! Lists come in three shapes: [`VirtualList`] (plain lists and auto-fit grids),
//! [`VirtualVariableList`] (rows of variably sized cells) and [`VirtualFlexList`] (a variable
//! list framed by row and column headers).
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size (width/height)
//! - scroll position
//! - an [`ItemRenderer`] that creates and patches its own node type
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bounds;
mod error;
mod flex_list;
mod list;
mod metrics;
mod options;
mod positioner;
mod secondary;
mod state;
mod threshold;
mod types;
mod variable_list;
mod window;


pub use bounds::ScrollBounds;
pub use error::{Error, Result};
pub use flex_list::{FlexListOptions, VirtualFlexList};
pub use list::VirtualList;
pub use metrics::{AxisInfo, Metrics, calculate_metrics};
pub use options::{
    CountAccessor, DEFAULT_OVERHANG, ItemSizeSpec, ListOptions, SizeAccessor, VariableListOptions,
};
pub use positioner::{ItemIndex, ItemProps, ItemRenderer, ItemStyle, Positioner, SlotKey, SlotPool};
pub use secondary::{RowWindow, SecondaryScrollInfo};
pub use state::{FrameState, ScrollEvent, ScrollEventKind, ScrollState, ViewportState};
pub use threshold::Threshold;
pub use types::{
    Axis, CellIndex, Direction, MoreInfo, Phase, Point, ScrollDirection, Size, VariableAxis,
    VisibleWindow, WritingDirection,
};
pub use variable_list::VirtualVariableList;
pub use window::WindowResolver;
