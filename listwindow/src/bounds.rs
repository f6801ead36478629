use crate::{Direction, Point, Size};

/// Scrollable extents of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollBounds {
    pub client_width: u32,
    pub client_height: u32,
    pub scroll_width: u64,
    pub scroll_height: u64,
    pub max_left: u64,
    pub max_top: u64,
}

impl ScrollBounds {
    /// Builds bounds from a client size and the scroll extent along each axis.
    pub fn new(client: Size, scroll_width: u64, scroll_height: u64) -> Self {
        Self {
            client_width: client.width,
            client_height: client.height,
            scroll_width,
            scroll_height,
            max_left: scroll_width.saturating_sub(client.width as u64),
            max_top: scroll_height.saturating_sub(client.height as u64),
        }
    }

    /// Bounds of a list whose primary axis scrolls over `primary_extent` pixels while the
    /// secondary axis never overflows.
    pub fn for_primary_extent(client: Size, direction: Direction, primary_extent: u64) -> Self {
        match direction {
            Direction::Vertical => Self::new(client, client.width as u64, primary_extent),
            Direction::Horizontal => Self::new(client, primary_extent, client.height as u64),
        }
    }

    pub fn client_size(&self) -> Size {
        Size::new(self.client_width, self.client_height)
    }

    /// Largest scroll offset along the given axis.
    pub fn max_pos(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Vertical => self.max_top,
            Direction::Horizontal => self.max_left,
        }
    }

    pub fn max_point(&self) -> Point {
        Point::new(self.max_left, self.max_top)
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.min(self.max_left), point.y.min(self.max_top))
    }
}
