// Example: where flings at different velocities come to rest.
use listwindow::Point;
use listwindow_adapter::{Easing, ScrollAnimator};

fn main() {
    for velocity in [0.5, 2.0, 8.0, 40.0] {
        let fling = ScrollAnimator::simulate(Point::new(0, 5_000), 0.0, velocity);
        println!(
            "v={velocity:>4} px/ms -> rest at {} after {}ms",
            fling.target.y, fling.duration_ms
        );
    }

    let fling = ScrollAnimator::simulate(Point::new(0, 5_000), 0.0, -3.0);
    let mut animator = ScrollAnimator::new(Easing::EaseOut);
    animator.start(listwindow_adapter::AnimationRequest::new(
        Point::new(0, 5_000),
        fling.target,
        0,
        fling.duration_ms,
    ));
    let mut now_ms = 0;
    while let Some(frame) = animator.tick(now_ms) {
        println!("t={now_ms} y={}", frame.position.y);
        now_ms += 64;
    }
}
