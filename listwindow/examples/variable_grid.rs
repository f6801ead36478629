// Example: a program guide, with channel rows of shows of variable width and both headers.
use listwindow::{
    CellIndex, FlexListOptions, ItemIndex, ItemProps, ItemRenderer, Point, Size,
    VariableListOptions, VirtualFlexList,
};

#[derive(Default)]
struct Counter {
    rendered: usize,
    updated: usize,
}

impl ItemRenderer for Counter {
    type Node = ItemIndex;

    fn render(&mut self, props: &ItemProps) -> ItemIndex {
        self.rendered += 1;
        props.data_index()
    }

    fn update(&mut self, _node: &mut ItemIndex, _props: &ItemProps) {
        self.updated += 1;
    }
}

fn show_width(cell: CellIndex) -> u32 {
    30 * (1 + ((cell.primary * 7 + cell.secondary * 3) % 6) as u32)
}

fn main() -> listwindow::Result<()> {
    let body = VariableListOptions::new(200, |_| 48, 60, show_width)
        .with_max_variable_scroll_size(48 * 180)
        .with_clip_item(true);
    let options = FlexListOptions::new(body, 160, 120).with_col_header_count(72);
    let mut guide = VirtualFlexList::new(options)?;
    guide.set_viewport_size(Size::new(1280, 720))?;
    println!("corner={:?}", guide.corner_size());

    let mut rows = Counter::default();
    let mut cols = Counter::default();
    let mut shows = Counter::default();
    guide.position_items(&mut rows, &mut cols, &mut shows)?;

    for step in 1..=5u64 {
        let applied = guide.set_scroll_position(Point::new(step * 250, step * 130))?;
        let info = guide.position_items(&mut rows, &mut cols, &mut shows)?;
        println!(
            "at {applied:?}: rows {:?}, mounted shows={}",
            info,
            guide.body().pool().len()
        );
    }
    println!(
        "renders: rows={} cols={} shows={} (updates {})",
        rows.rendered, cols.rendered, shows.rendered, shows.updated
    );
    Ok(())
}
