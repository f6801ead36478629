use listwindow::{ListOptions, Size};
use listwindow_adapter::{Controller, Easing, ScrollTarget};

fn main() -> listwindow::Result<()> {
    // Example: a controller driving an animated scroll-to without holding any UI objects.
    //
    // An adapter would:
    // - start the scroll (e.g. in response to a "scroll to index" command)
    // - call tick(now_ms) in a frame loop / timer
    // - apply the returned position to the real scroll container (if any)
    // - render using the list state
    let mut c = Controller::<()>::new(ListOptions::fixed(10_000, 70))
        .with_easing(Easing::EaseInOut)
        .with_duration_ms(240)
        .with_on_scroll(|e| {
            if e.kind != listwindow::ScrollEventKind::Scroll {
                println!("{:?} at {}", e.kind, e.scroll_top);
            }
        });
    c.on_viewport_size(Size::new(400, 550))?;

    let target = c.scroll_to(ScrollTarget::Index(2_000), true, 0);
    println!("target={target}");

    let mut now_ms = 0u64;
    while let Some(pos) = c.tick(now_ms) {
        if now_ms % 80 == 0 {
            println!("t={now_ms} pos={pos} more_info={:?}", c.list().more_info());
        }
        now_ms += 16;
    }

    println!("wheel down -> {}", c.on_wheel(1));
    println!("focus 1990 -> {:?}", c.focus(1990, false, now_ms));
    println!("done: pos={} range={:?}", c.scroll_position(), c.list().range());
    Ok(())
}
