#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
use core::fmt;
use core::ops::Range;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{
    CellIndex, Direction, Error, Metrics, MoreInfo, Result, SecondaryScrollInfo, WritingDirection,
};

#[cfg(feature = "std")]
type SlotMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
type SlotMap<K, V> = BTreeMap<K, V>;

/// Dataset index of a mounted item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemIndex {
    Flat(usize),
    Cell(CellIndex),
}

/// Written as the `data-index` marker used by focus restoration.
impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(i) => write!(f, "{i}"),
            Self::Cell(c) => write!(f, "{c}"),
        }
    }
}

/// Identity of a pool slot.
///
/// Flat lists recycle `index % num_of_items` slots; two-dimensional lists key cells by
/// `"primary-secondary"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotKey {
    Slot(usize),
    Cell(CellIndex),
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(i) => write!(f, "{i}"),
            Self::Cell(c) => write!(f, "{c}"),
        }
    }
}

/// Screen-space placement of an item relative to the viewport origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStyle {
    pub x: i64,
    pub y: i64,
    /// Set for sized items (grids and variable lists).
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Arguments handed to an [`ItemRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemProps {
    pub index: ItemIndex,
    pub key: SlotKey,
    pub style: ItemStyle,
}

impl ItemProps {
    /// The marker a rendered item must carry so focus can be restored to it.
    pub fn data_index(&self) -> ItemIndex {
        self.index
    }
}

/// Host-side rendering of pool slots.
pub trait ItemRenderer {
    type Node;

    /// Materializes an item for a slot that is new or was recycled to another index.
    fn render(&mut self, props: &ItemProps) -> Self::Node;

    /// Patches the placement of a node that keeps showing the same item.
    fn update(&mut self, node: &mut Self::Node, props: &ItemProps);

    /// Drops input focus from a node that is about to be recycled.
    fn blur(&mut self, node: &mut Self::Node) {
        let _ = node;
    }
}

#[derive(Clone, Debug)]
struct Mounted<N> {
    index: ItemIndex,
    node: N,
    pass: u64,
}

/// Reusable rendered nodes, keyed by slot.
#[derive(Clone, Debug)]
pub struct SlotPool<N> {
    slots: SlotMap<SlotKey, Mounted<N>>,
}

impl<N> Default for SlotPool<N> {
    fn default() -> Self {
        Self {
            slots: SlotMap::new(),
        }
    }
}

impl<N> SlotPool<N> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The dataset index currently bound to `key`.
    pub fn index_at(&self, key: SlotKey) -> Option<ItemIndex> {
        self.slots.get(&key).map(|m| m.index)
    }

    pub fn node(&self, key: SlotKey) -> Option<&N> {
        self.slots.get(&key).map(|m| &m.node)
    }

    pub fn node_mut(&mut self, key: SlotKey) -> Option<&mut N> {
        self.slots.get_mut(&key).map(|m| &mut m.node)
    }

    /// Iterates `(slot, index, node)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, ItemIndex, &N)> {
        self.slots.iter().map(|(k, m)| (*k, m.index, &m.node))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Writes placements for the mounted window and decides reuse vs. re-render per slot.
#[derive(Clone, Debug)]
pub struct Positioner<N> {
    pool: SlotPool<N>,
    previous: Option<Range<usize>>,
    pending_blur: Option<SlotKey>,
    last_focused: Option<ItemIndex>,
    writing_direction: WritingDirection,
    pass: u64,
}

impl<N> Default for Positioner<N> {
    fn default() -> Self {
        Self::new(WritingDirection::Ltr)
    }
}

impl<N> Positioner<N> {
    pub fn new(writing_direction: WritingDirection) -> Self {
        Self {
            pool: SlotPool::default(),
            previous: None,
            pending_blur: None,
            last_focused: None,
            writing_direction,
            pass: 0,
        }
    }

    pub fn pool(&self) -> &SlotPool<N> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut SlotPool<N> {
        &mut self.pool
    }

    /// Forgets every mounted node; the next pass renders all items anew.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.previous = None;
        self.pending_blur = None;
    }

    pub fn writing_direction(&self) -> WritingDirection {
        self.writing_direction
    }

    pub fn set_writing_direction(&mut self, writing_direction: WritingDirection) {
        self.writing_direction = writing_direction;
    }

    pub fn last_focused(&self) -> Option<ItemIndex> {
        self.last_focused
    }

    pub fn set_last_focused(&mut self, index: Option<ItemIndex>) {
        self.last_focused = index;
    }

    /// Asks for the node in `key` to be blurred when it is next recycled to an item other
    /// than the focused one.
    pub fn mark_blur_pending(&mut self, key: SlotKey) {
        self.pending_blur = Some(key);
    }

    pub fn pending_blur(&self) -> Option<SlotKey> {
        self.pending_blur
    }

    fn xy(&self, direction: Direction, primary: i64, secondary: i64) -> (i64, i64) {
        let rtl = self.writing_direction;
        match direction {
            Direction::Vertical => (rtl.apply(secondary), primary),
            Direction::Horizontal => (rtl.apply(primary), secondary),
        }
    }

    fn place<R: ItemRenderer<Node = N>>(
        &mut self,
        props: ItemProps,
        reusable: bool,
        renderer: &mut R,
    ) {
        let pass = self.pass;
        if let Some(mounted) = self.pool.slots.get_mut(&props.key) {
            if self.pending_blur == Some(props.key)
                && mounted.index != props.index
                && self.last_focused != Some(props.index)
            {
                renderer.blur(&mut mounted.node);
                self.pending_blur = None;
            }
            mounted.pass = pass;
            if reusable && mounted.index == props.index {
                renderer.update(&mut mounted.node, &props);
            } else {
                mounted.node = renderer.render(&props);
                mounted.index = props.index;
            }
            return;
        }
        let node = renderer.render(&props);
        self.pool.slots.insert(
            props.key,
            Mounted {
                index: props.index,
                node,
                pass,
            },
        );
    }

    /// Positions the items of a flat list or grid in `range`.
    ///
    /// `num_of_items` is the pool size; item `i` lives in slot `i % num_of_items`.
    pub fn position_items<R: ItemRenderer<Node = N>>(
        &mut self,
        metrics: &Metrics,
        scroll_position: u64,
        range: Range<usize>,
        num_of_items: usize,
        renderer: &mut R,
    ) -> MoreInfo {
        if range.is_empty() || num_of_items == 0 {
            self.previous = Some(range);
            return MoreInfo::default();
        }
        self.pass = self.pass.wrapping_add(1);

        let Metrics {
            direction,
            primary,
            secondary,
            columns,
            is_item_sized,
            ..
        } = *metrics;
        let (width, height) = if !is_item_sized {
            (None, None)
        } else if direction.is_vertical() {
            (Some(secondary.item_size), Some(primary.item_size))
        } else {
            (Some(primary.item_size), Some(secondary.item_size))
        };

        let (p0, s0) = metrics.grid_position(range.start);
        let mut primary_pos = p0 as i64 - scroll_position as i64;
        let mut secondary_pos = s0 as i64;
        let mut column = range.start % columns;
        let previous = self.previous.clone();
        let more_info = metrics.visible_indexes(scroll_position, range.clone());

        for i in range.clone() {
            let (x, y) = self.xy(direction, primary_pos, secondary_pos);
            let props = ItemProps {
                index: ItemIndex::Flat(i),
                key: SlotKey::Slot(i % num_of_items),
                style: ItemStyle {
                    x,
                    y,
                    width,
                    height,
                },
            };
            let reusable = previous.as_ref().is_some_and(|p| p.contains(&i));
            self.place(props, reusable, renderer);

            column += 1;
            if column == columns {
                column = 0;
                secondary_pos = 0;
                primary_pos += primary.grid_size as i64;
            } else {
                secondary_pos += secondary.grid_size as i64;
            }
        }

        ltrace!(
            start = range.start,
            end = range.end,
            pooled = self.pool.len(),
            "Positioner::position_items"
        );
        self.previous = Some(range);
        more_info
    }

    /// Positions the visible cells of a two-dimensional list for primary rows in `range`.
    ///
    /// Cells that were mounted in an earlier pass and are no longer visible leave the pool.
    pub fn position_cells<R: ItemRenderer<Node = N>>(
        &mut self,
        metrics: &Metrics,
        secondary: &SecondaryScrollInfo,
        range: Range<usize>,
        clip_item: bool,
        mut size_of: impl FnMut(CellIndex) -> u32,
        renderer: &mut R,
    ) -> Result<MoreInfo> {
        self.pass = self.pass.wrapping_add(1);
        let pass = self.pass;
        let more_info = metrics.visible_indexes(metrics.primary.scroll_position, range.clone());

        let direction = metrics.direction;
        let primary = metrics.primary;
        let secondary_scroll = secondary.scroll_position() as i64;
        let client = secondary.client_size() as i64;
        let mut primary_pos =
            (range.start as u64 * primary.grid_size as u64) as i64 - primary.scroll_position as i64;

        for i in range.clone() {
            if let Some(row) = secondary.row(i) {
                for j in row.range() {
                    let index = CellIndex::new(i, j);
                    let size = size_of(index);
                    if size == 0 {
                        return Err(Error::InvalidItemSize { index, size });
                    }
                    let offset = row.offset_of(j).unwrap_or_default() as i64;
                    let mut position = offset - secondary_scroll;
                    let mut size = size as i64;
                    if clip_item {
                        if position < 0 {
                            size += position;
                            position = 0;
                        }
                        if position + size > client {
                            size = client - position;
                        }
                    }
                    let size = size.max(0) as u32;
                    let (width, height) = if direction.is_vertical() {
                        (size, primary.item_size)
                    } else {
                        (primary.item_size, size)
                    };
                    let (x, y) = self.xy(direction, primary_pos, position);
                    let props = ItemProps {
                        index: ItemIndex::Cell(index),
                        key: SlotKey::Cell(index),
                        style: ItemStyle {
                            x,
                            y,
                            width: Some(width),
                            height: Some(height),
                        },
                    };
                    self.place(props, true, renderer);
                }
            }

            primary_pos += primary.grid_size as i64;
        }

        self.release_pending_blur(pass, renderer);
        self.pool.slots.retain(|_, m| m.pass == pass);
        self.previous = Some(range);
        Ok(more_info)
    }

    /// Blurs the pending node if this pass unmounts it. The request is dropped once its node
    /// is gone.
    fn release_pending_blur<R: ItemRenderer<Node = N>>(&mut self, pass: u64, renderer: &mut R) {
        let Some(key) = self.pending_blur else {
            return;
        };
        match self.pool.slots.get_mut(&key) {
            Some(mounted) if mounted.pass == pass => {}
            Some(mounted) => {
                renderer.blur(&mut mounted.node);
                self.pending_blur = None;
            }
            None => self.pending_blur = None,
        }
    }
}
