use crate::{
    Direction, ItemRenderer, ItemSizeSpec, ListOptions, MoreInfo, Point, Result, Size,
    VariableAxis, VariableListOptions, VirtualList, VirtualVariableList,
};

/// Configuration for [`VirtualFlexList`].
///
/// The row headers form a vertical list beside the body; the column headers a horizontal list
/// above it. Header rows share the body's row height, and the corner left free above the row
/// headers is `row_header_width` by one row.
#[derive(Clone, Debug)]
pub struct FlexListOptions {
    /// The body. Its variable axis is always [`VariableAxis::Row`].
    pub body: VariableListOptions,
    pub row_header_count: usize,
    pub row_header_width: u32,
    pub col_header_count: usize,
    pub col_header_width: u32,
}

impl FlexListOptions {
    pub fn new(body: VariableListOptions, row_header_width: u32, col_header_width: u32) -> Self {
        Self {
            row_header_count: body.primary_count,
            col_header_count: 0,
            body: body.with_variable_axis(VariableAxis::Row),
            row_header_width,
            col_header_width,
        }
    }

    pub fn with_row_header_count(mut self, count: usize) -> Self {
        self.row_header_count = count;
        self
    }

    pub fn with_col_header_count(mut self, count: usize) -> Self {
        self.col_header_count = count;
        self
    }

    fn row_height(&self) -> u32 {
        match &self.body.item_size {
            ItemSizeSpec::Variable { primary, .. } => *primary,
            ItemSizeSpec::Fixed(size) => *size,
            ItemSizeSpec::MinFit { min_height, .. } => *min_height,
        }
    }

    fn row_header_options(&self) -> ListOptions {
        ListOptions::fixed(self.row_header_count, self.row_height())
            .with_direction(Direction::Vertical)
            .with_overhang(self.body.overhang)
            .with_writing_direction(self.body.writing_direction)
    }

    fn col_header_options(&self) -> ListOptions {
        ListOptions::fixed(self.col_header_count, self.col_header_width)
            .with_direction(Direction::Horizontal)
            .with_overhang(self.body.overhang)
            .with_writing_direction(self.body.writing_direction)
    }
}

/// A [`VirtualVariableList`] framed by a row-header list and a column-header list.
///
/// The headers follow the body: row headers track its vertical position, column headers its
/// horizontal one.
#[derive(Clone, Debug)]
pub struct VirtualFlexList<N> {
    options: FlexListOptions,
    viewport: Size,
    row_headers: VirtualList<N>,
    col_headers: VirtualList<N>,
    body: VirtualVariableList<N>,
}

impl<N> VirtualFlexList<N> {
    pub fn new(mut options: FlexListOptions) -> Result<Self> {
        options.body.variable_axis = VariableAxis::Row;
        Ok(Self {
            row_headers: VirtualList::new(options.row_header_options()),
            col_headers: VirtualList::new(options.col_header_options()),
            body: VirtualVariableList::new(options.body.clone())?,
            viewport: Size::default(),
            options,
        })
    }

    pub fn options(&self) -> &FlexListOptions {
        &self.options
    }

    pub fn set_options(&mut self, mut options: FlexListOptions) -> Result<()> {
        options.body.variable_axis = VariableAxis::Row;
        self.row_headers.set_options(options.row_header_options())?;
        self.col_headers.set_options(options.col_header_options())?;
        self.body.set_options(options.body.clone())?;
        let layout_changed = options.row_header_width != self.options.row_header_width
            || options.row_height() != self.options.row_height();
        self.options = options;
        if layout_changed {
            let viewport = self.viewport;
            self.viewport = Size::default();
            self.set_viewport_size(viewport)?;
        }
        self.follow_body();
        Ok(())
    }

    /// Keeps the header lists at the body's position.
    fn follow_body(&mut self) {
        let position = self.body.scroll_position();
        self.row_headers.set_scroll_position(position.y);
        self.col_headers.set_scroll_position(position.x);
    }

    /// Returns (and clears) the position the body moved itself to after its bounds changed.
    /// The headers have already followed it.
    pub fn take_scroll_request(&mut self) -> Option<Point> {
        self.row_headers.take_scroll_request();
        self.col_headers.take_scroll_request();
        self.body.take_scroll_request()
    }

    /// Size of the corner between the two header lists.
    pub fn corner_size(&self) -> Size {
        Size::new(self.options.row_header_width, self.options.row_height())
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Splits `size` between the headers and the body.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<()> {
        if size == self.viewport {
            return Ok(());
        }
        self.viewport = size;
        let corner = self.corner_size();
        let body_width = size.width.saturating_sub(corner.width);
        let body_height = size.height.saturating_sub(corner.height);
        ldebug!(body_width, body_height, "VirtualFlexList::set_viewport_size");

        self.row_headers
            .set_viewport_size(Size::new(corner.width, body_height))?;
        self.col_headers
            .set_viewport_size(Size::new(body_width, corner.height))?;
        self.body
            .set_viewport_size(Size::new(body_width, body_height))?;
        self.follow_body();
        Ok(())
    }

    /// Scrolls the body and lets both header lists follow. Returns the applied body position.
    pub fn set_scroll_position(&mut self, position: Point) -> Result<Point> {
        self.body.set_scroll_position(position)?;
        self.follow_body();
        Ok(self.body.scroll_position())
    }

    pub fn scroll_position(&self) -> Point {
        self.body.scroll_position()
    }

    pub fn row_headers(&self) -> &VirtualList<N> {
        &self.row_headers
    }

    pub fn col_headers(&self) -> &VirtualList<N> {
        &self.col_headers
    }

    pub fn body(&self) -> &VirtualVariableList<N> {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut VirtualVariableList<N> {
        &mut self.body
    }

    /// Positions all three regions. Returns the body's visible rows.
    pub fn position_items<R: ItemRenderer<Node = N>>(
        &mut self,
        row_headers: &mut R,
        col_headers: &mut R,
        body: &mut R,
    ) -> Result<MoreInfo> {
        self.row_headers.position_items(row_headers);
        self.col_headers.position_items(col_headers);
        self.body.position_items(body)
    }
}
