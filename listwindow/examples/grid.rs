// Example: an auto-fit grid, scrolled to an index, in both writing directions.
use listwindow::{ItemProps, ItemRenderer, ListOptions, Size, VirtualList, WritingDirection};

struct Cells;

impl ItemRenderer for Cells {
    type Node = ItemProps;

    fn render(&mut self, props: &ItemProps) -> ItemProps {
        *props
    }

    fn update(&mut self, node: &mut ItemProps, props: &ItemProps) {
        *node = *props;
    }
}

fn main() -> listwindow::Result<()> {
    for writing_direction in [WritingDirection::Ltr, WritingDirection::Rtl] {
        let mut list = VirtualList::new(
            ListOptions::grid(100, 240, 120)
                .with_spacing(5)
                .with_writing_direction(writing_direction),
        );
        list.set_viewport_size(Size::new(1000, 600))?;
        if let Some(metrics) = list.metrics() {
            println!(
                "{writing_direction:?}: columns={} item={}x{}",
                metrics.columns, metrics.secondary.item_size, metrics.primary.item_size
            );
        }

        let pos = list.scroll_to_index(42);
        list.position_items(&mut Cells);
        println!("scrolled to {pos}, range={:?}", list.range());
        for (key, index, props) in list.pool().iter().take(4) {
            println!("  {key} {index} x={} y={}", props.style.x, props.style.y);
        }
    }
    Ok(())
}
