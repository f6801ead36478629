use listwindow::{CellIndex, ItemSizeSpec, Point, VirtualList, VirtualVariableList};

/// Primary position that brings `index` fully into view, or `None` when it already is (or the
/// list has no metrics or no such item).
///
/// An item above the viewport is aligned to the leading edge, one below it to the trailing
/// edge. The result is clamped to the scroll bounds.
pub fn position_on_focus<N>(list: &VirtualList<N>, index: usize) -> Option<u64> {
    let metrics = list.metrics()?;
    if index >= list.data_size() {
        return None;
    }
    let (start, _) = metrics.grid_position(index);
    let end = start + metrics.primary.item_size as u64;
    let pos = list.scroll_position();
    let client = metrics.primary.client_size as u64;
    let target = bring_into_view(start, end, pos, client)?;
    Some(target.min(list.max_scroll_position()))
}

/// Scroll position that brings `cell` fully into view on both axes, or `None` when it already
/// is.
pub fn position_on_focus_cell<N>(
    list: &VirtualVariableList<N>,
    cell: CellIndex,
) -> Option<Point> {
    let metrics = list.metrics()?;
    let options = list.options();
    let ItemSizeSpec::Variable { secondary, .. } = &options.item_size else {
        return None;
    };
    if cell.primary >= options.primary_count
        || cell.secondary >= (options.secondary_count)(cell.primary)
    {
        return None;
    }

    let (primary_start, _) = metrics.grid_position(cell.primary);
    let primary_end = primary_start + metrics.primary.item_size as u64;
    let mut secondary_start = 0u64;
    for j in 0..cell.secondary {
        let size = secondary(CellIndex::new(cell.primary, j));
        secondary_start = secondary_start.saturating_add(size as u64);
    }
    let secondary_end = secondary_start + secondary(cell) as u64;

    let (primary_pos, secondary_pos) = list.scroll_position().split(metrics.direction);
    let primary = bring_into_view(
        primary_start,
        primary_end,
        primary_pos,
        metrics.primary.client_size as u64,
    );
    let secondary = bring_into_view(
        secondary_start,
        secondary_end,
        secondary_pos,
        metrics.secondary.client_size as u64,
    );
    if primary.is_none() && secondary.is_none() {
        return None;
    }
    let target = Point::from_axes(
        metrics.direction,
        primary.unwrap_or(primary_pos),
        secondary.unwrap_or(secondary_pos),
    );
    Some(list.bounds().clamp(target))
}

fn bring_into_view(start: u64, end: u64, pos: u64, client: u64) -> Option<u64> {
    if start < pos {
        Some(start)
    } else if end > pos + client {
        Some(end.saturating_sub(client))
    } else {
        None
    }
}
