// Example: a vertical list of 1000 rows of 70px in a 550px viewport.
use listwindow::{ItemIndex, ItemProps, ItemRenderer, ListOptions, Size, VirtualList};

struct Rows;

impl ItemRenderer for Rows {
    type Node = ItemIndex;

    fn render(&mut self, props: &ItemProps) -> ItemIndex {
        println!("render {} at y={}", props.index, props.style.y);
        props.data_index()
    }

    fn update(&mut self, _node: &mut ItemIndex, props: &ItemProps) {
        println!("move   {} to y={}", props.index, props.style.y);
    }
}

fn main() -> listwindow::Result<()> {
    let mut list = VirtualList::new(ListOptions::fixed(1000, 70));
    list.set_viewport_size(Size::new(300, 550))?;
    println!("window={:?}", list.window());
    println!("max_scroll={}", list.max_scroll_position());

    list.position_items(&mut Rows);

    let window = list.set_scroll_position(700);
    println!("after scroll: window={window:?} threshold={:?}", list.threshold());
    let info = list.position_items(&mut Rows);
    println!("visible={info:?} mounted={}", list.pool().len());
    Ok(())
}
