use crate::*;

use std::sync::{Arc, Mutex};
use std::vec::Vec;

use listwindow::{
    CellIndex, FlexListOptions, ItemProps, ItemRenderer, ListOptions, Point, ScrollEvent,
    ScrollEventKind, Size, VariableListOptions, VirtualFlexList, VirtualList, VirtualVariableList,
};

struct Indexes;

impl ItemRenderer for Indexes {
    type Node = listwindow::ItemIndex;

    fn render(&mut self, props: &ItemProps) -> Self::Node {
        props.data_index()
    }

    fn update(&mut self, node: &mut Self::Node, props: &ItemProps) {
        *node = props.data_index();
    }
}

type Events = Arc<Mutex<Vec<ScrollEvent>>>;

fn controller() -> (Controller<listwindow::ItemIndex>, Events) {
    let events: Events = Arc::default();
    let sink = events.clone();
    let mut c = Controller::new(ListOptions::fixed(1000, 70))
        .with_easing(Easing::Linear)
        .with_on_scroll(move |e| sink.lock().unwrap().push(*e));
    c.on_viewport_size(Size::new(300, 550)).unwrap();
    (c, events)
}

fn kinds(events: &Events) -> Vec<ScrollEventKind> {
    events.lock().unwrap().iter().map(|e| e.kind).collect()
}

#[test]
fn easing_curves_hit_both_ends() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FlexibleEaseOut,
    ] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
        assert_eq!(easing.sample(2.0), 1.0);
    }
    assert_eq!(Easing::Linear.sample(0.5), 0.5);
    assert_eq!(Easing::EaseIn.sample(0.5), 0.0625);
    assert_eq!(Easing::EaseOut.sample(0.5), 0.96875);
    assert_eq!(Easing::EaseInOut.sample(0.5), 0.5);
    assert_eq!(Easing::default(), Easing::EaseOut);
}

#[test]
fn easing_zero_duration_covers_the_whole_distance() {
    assert_eq!(Easing::EaseIn.displacement(-300.0, 0, 0), -300.0);
    assert_eq!(Easing::Linear.displacement(400.0, 200, 50), 100.0);
}

#[test]
fn flexible_ease_out_steps_a_pixel_per_frame_first() {
    let easing = Easing::FlexibleEaseOut;
    assert_eq!(easing.displacement(1000.0, 500, 0), 0.0);
    assert_eq!(easing.displacement(1000.0, 500, 40), 3.0);
    assert_eq!(easing.displacement(-1000.0, 500, 80), -5.0);
    assert_eq!(easing.displacement(2.0, 500, 80), 2.0);
    assert_eq!(easing.displacement(1000.0, 500, 250), 968.75);
    assert_eq!(easing.displacement(1000.0, 500, 500), 1000.0);

    let mut a = ScrollAnimator::new(easing);
    a.start(AnimationRequest::new(
        Point::new(0, 0),
        Point::new(0, 1000),
        0,
        500,
    ));
    assert_eq!(a.tick(16).unwrap().position, Point::new(0, 1));
    assert_eq!(a.tick(500).unwrap().position, Point::new(0, 1000));
}

#[test]
fn linear_animation_reaches_midpoint_and_target() {
    let mut a = ScrollAnimator::new(Easing::Linear);
    let h = a.start(AnimationRequest::new(
        Point::new(0, 0),
        Point::new(0, 1000),
        0,
        500,
    ));
    assert!(a.is_animating());

    let frame = a.tick(250).unwrap();
    assert_eq!(frame.position, Point::new(0, 500));
    assert!(!frame.done);
    assert_eq!(a.current_position(h), Some(Point::new(0, 500)));

    let frame = a.tick(500).unwrap();
    assert_eq!(frame.position, Point::new(0, 1000));
    assert!(frame.done);
    assert!(!a.is_animating());
    assert_eq!(a.tick(600), None);
}

#[test]
fn animation_backwards_never_goes_below_zero() {
    let mut a = ScrollAnimator::new(Easing::EaseInOut);
    a.start(AnimationRequest::new(
        Point::new(800, 0),
        Point::new(0, 0),
        100,
        400,
    ));
    let mut last = 800;
    for now in (100..=500).step_by(20) {
        let frame = a.tick(now).unwrap();
        assert!(frame.position.x <= last);
        last = frame.position.x;
    }
    assert_eq!(last, 0);
    assert!(!a.is_animating());
}

#[test]
fn new_animation_cancels_the_previous_one() {
    let mut a = ScrollAnimator::default();
    let first = a.start(AnimationRequest::new(
        Point::default(),
        Point::new(0, 100),
        0,
        100,
    ));
    let second = a.start(AnimationRequest::new(
        Point::default(),
        Point::new(0, 900),
        0,
        100,
    ));
    assert_ne!(first, second);
    assert_eq!(a.current_position(first), None);

    // A stale handle cannot stop the running animation.
    assert!(!a.stop(first));
    assert!(a.is_animating());

    assert!(a.stop(second));
    assert!(!a.is_animating());
    assert!(!a.stop(second));
}

#[test]
fn silent_animation_jumps_to_the_target() {
    let mut a = ScrollAnimator::default();
    let h = a.start(
        AnimationRequest::new(Point::default(), Point::new(40, 700), 0, 500).with_silent(true),
    );
    assert_eq!(a.current_position(h), Some(Point::new(40, 700)));
    let frame = a.tick(1).unwrap();
    assert_eq!(frame.position, Point::new(40, 700));
    assert!(frame.done);
    assert!(!a.is_animating());
}

#[test]
fn fling_decays_to_rest() {
    let fling = ScrollAnimator::simulate(Point::default(), 0.0, 80.0);
    // The step starts capped at 100 and decays below 0.2 after 122 frames.
    assert_eq!(fling.duration_ms, 122 * FRAME_MS);
    assert_eq!(fling.target.x, 0);
    assert!((1890..1900).contains(&fling.target.y));

    let back = ScrollAnimator::simulate(Point::new(0, 500), 0.0, -80.0);
    assert_eq!(back.target.y, 0);

    let still = ScrollAnimator::simulate(Point::new(30, 30), 0.0, 0.0);
    assert_eq!(still.target, Point::new(30, 30));
    assert_eq!(still.duration_ms, FRAME_MS);
}

#[test]
fn fling_terminates_for_any_velocity() {
    let mut seed = 0x2545_f491u64;
    for _ in 0..200 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let vx = ((seed >> 33) % 2001) as f64 / 10.0 - 100.0;
        let vy = ((seed >> 13) % 2001) as f64 / 10.0 - 100.0;
        let fling = ScrollAnimator::simulate(Point::new(5000, 5000), vx, vy);
        assert!(fling.duration_ms >= FRAME_MS);
        assert!(fling.duration_ms <= 130 * FRAME_MS);
    }
    let nan = ScrollAnimator::simulate(Point::default(), f64::NAN, f64::INFINITY);
    assert_eq!(nan.target, Point::default());
    assert_eq!(nan.duration_ms, FRAME_MS);
}

#[test]
fn animated_scroll_to_emits_start_scroll_stop() {
    let (mut c, events) = controller();
    let target = c.scroll_to(ScrollTarget::Index(100), true, 0);
    assert_eq!(target, 7000);
    assert!(c.is_animating());
    assert!(c.is_scrolling());

    assert_eq!(c.tick(0), Some(0));
    assert_eq!(c.tick(250), Some(3500));
    assert_eq!(c.tick(500), Some(7000));
    assert_eq!(c.tick(516), None);
    assert!(!c.is_animating());
    assert!(!c.is_scrolling());

    assert_eq!(
        kinds(&events),
        [
            ScrollEventKind::Start,
            ScrollEventKind::Scroll,
            ScrollEventKind::Scroll,
            ScrollEventKind::Scroll,
            ScrollEventKind::Stop,
        ]
    );
    let last = *events.lock().unwrap().last().unwrap();
    assert_eq!(last.scroll_top, 7000);
    assert_eq!(last.more_info.first_visible_index, Some(100));
}

#[test]
fn scroll_to_clamps_out_of_range_targets() {
    let (mut c, events) = controller();
    assert_eq!(c.scroll_to(ScrollTarget::Index(5000), false, 0), 69_450);
    assert_eq!(c.scroll_position(), 69_450);
    assert_eq!(
        kinds(&events),
        [
            ScrollEventKind::Start,
            ScrollEventKind::Scroll,
            ScrollEventKind::Stop,
        ]
    );

    assert_eq!(
        c.scroll_to(ScrollTarget::Position(Point::new(0, 1_000_000)), false, 0),
        69_450
    );
    // Already there: nothing is reported.
    assert_eq!(events.lock().unwrap().len(), 3);
}

#[test]
fn wheel_pages_by_one_viewport() {
    let (mut c, events) = controller();
    assert_eq!(c.on_wheel(3), 550);
    assert_eq!(c.on_wheel(1), 1100);
    assert_eq!(c.on_wheel(-1), 550);
    assert_eq!(c.on_wheel(0), 550);
    assert_eq!(events.lock().unwrap().len(), 9);

    c.scroll_to(ScrollTarget::Position(Point::new(0, 69_000)), false, 0);
    assert_eq!(c.on_wheel(1), 69_450);
    assert_eq!(c.on_wheel(1), 69_450);
    assert_eq!(events.lock().unwrap().len(), 15);
}

#[test]
fn user_scroll_cancels_animation() {
    let (mut c, events) = controller();
    c.scroll_to(ScrollTarget::Index(500), true, 0);
    assert_eq!(c.on_scroll(1234), 1234);
    assert!(!c.is_animating());
    assert!(c.is_scrolling());
    assert_eq!(c.tick(100), None);

    c.on_scroll_stop();
    assert_eq!(
        kinds(&events),
        [
            ScrollEventKind::Start,
            ScrollEventKind::Scroll,
            ScrollEventKind::Stop,
        ]
    );
    assert_eq!(c.scroll_position(), 1234);
}

#[test]
fn stop_leaves_the_list_where_it_was() {
    let (mut c, events) = controller();
    c.scroll_to(ScrollTarget::Index(100), true, 0);
    c.tick(100);
    c.stop();
    assert!(!c.is_animating());
    assert_eq!(c.scroll_position(), 1400);
    assert_eq!(kinds(&events).last(), Some(&ScrollEventKind::Stop));
    // Nothing to stop anymore.
    c.stop();
    assert_eq!(events.lock().unwrap().len(), 3);
}

#[test]
fn fling_animates_to_its_resting_position() {
    let (mut c, _) = controller();
    let target = c.fling(0.0, 80.0, 1000);
    assert!((1890..1900).contains(&target));
    let mut now = 1000;
    while c.is_animating() {
        now += 16;
        c.tick(now);
    }
    assert_eq!(now, 2952);
    assert_eq!(c.scroll_position(), target);
}

#[test]
fn focus_scrolls_just_enough() {
    let (mut c, _) = controller();
    assert_eq!(position_on_focus(c.list(), 3), None);
    assert_eq!(position_on_focus(c.list(), 1000), None);

    // Item 20 spans 1400..1470; showing its trailing edge needs 1470 - 550.
    assert_eq!(c.focus(20, false, 0), Some(920));
    assert_eq!(c.list().last_focused_index(), Some(20));
    assert_eq!(c.focus(20, false, 0), None);

    assert_eq!(c.focus(5, false, 0), Some(350));
    assert_eq!(c.list().last_focused_index(), Some(5));
}

#[test]
fn shrinking_data_forwards_the_scroll_request() {
    let (mut c, events) = controller();
    c.scroll_to(ScrollTarget::Index(999), false, 0);
    events.lock().unwrap().clear();

    c.set_data_size(100);
    assert_eq!(c.scroll_position(), 6450);
    assert_eq!(
        kinds(&events),
        [
            ScrollEventKind::Start,
            ScrollEventKind::Scroll,
            ScrollEventKind::Stop,
        ]
    );
    assert_eq!(events.lock().unwrap()[1].scroll_top, 6450);
}

#[test]
fn controller_positions_items_and_restores_frames() {
    let (mut c, _) = controller();
    let info = c.position_items(&mut Indexes);
    assert_eq!(info.first_visible_index, Some(0));
    assert_eq!(info.last_visible_index, Some(7));
    assert_eq!(c.list().pool().len(), 11);

    c.scroll_to(ScrollTarget::Position(Point::new(0, 700)), false, 0);
    let frame = c.frame_state();
    assert_eq!(frame.scroll.position, Point::new(0, 700));
    assert!(!frame.scroll.is_scrolling);

    let mut restored = Controller::<listwindow::ItemIndex>::new(ListOptions::fixed(1000, 70));
    restored.restore_frame_state(frame).unwrap();
    assert_eq!(restored.scroll_position(), 700);
    assert_eq!(restored.list().viewport(), Size::new(300, 550));
}

#[test]
fn focus_cell_in_variable_list() {
    let mut list = VirtualVariableList::<()>::new(
        VariableListOptions::new(10, |_| 10, 60, |cell: CellIndex| {
            if cell.secondary % 2 == 0 { 100 } else { 200 }
        })
        .with_max_variable_scroll_size(1500),
    )
    .unwrap();
    list.set_viewport_size(Size::new(500, 300)).unwrap();

    assert_eq!(position_on_focus_cell(&list, CellIndex::new(1, 1)), None);
    // Cell (6, 3) spans 400..600 across and 360..420 down.
    assert_eq!(
        position_on_focus_cell(&list, CellIndex::new(6, 3)),
        Some(Point::new(100, 120))
    );
    assert_eq!(position_on_focus_cell(&list, CellIndex::new(6, 10)), None);
    assert_eq!(position_on_focus_cell(&list, CellIndex::new(10, 0)), None);
}

#[test]
fn from_list_keeps_existing_state() {
    let mut list = VirtualList::<()>::new(ListOptions::fixed(50, 20));
    list.set_viewport_size(Size::new(100, 100)).unwrap();
    list.set_scroll_position(300);
    let c = Controller::from_list(list);
    assert_eq!(c.scroll_position(), 300);
    assert!(!c.is_scrolling());
    assert_eq!(c.into_list().max_scroll_position(), 900);
}

#[test]
fn growing_data_keeps_a_list_pinned_to_its_end() {
    let (mut c, events) = controller();
    c.scroll_to(ScrollTarget::Index(999), false, 0);
    events.lock().unwrap().clear();

    c.set_data_size(2000);
    assert_eq!(c.scroll_position(), 139_450);
    assert_eq!(kinds(&events).len(), 3);
    assert_eq!(events.lock().unwrap()[1].scroll_top, 139_450);
    assert!(c.list().range().contains(&1999));
}

#[test]
fn resizing_keeps_the_scroll_position() {
    let (mut c, events) = controller();
    c.scroll_to(ScrollTarget::Position(Point::new(0, 7000)), false, 0);
    events.lock().unwrap().clear();

    c.on_viewport_size(Size::new(300, 600)).unwrap();
    assert_eq!(c.scroll_position(), 7000);
    assert!(events.lock().unwrap().is_empty());
    let range = c.list().range();
    assert!(range.contains(&100) && range.contains(&108));
}

#[test]
fn resizing_clamps_a_position_past_the_new_end() {
    let (mut c, events) = controller();
    c.scroll_to(ScrollTarget::Index(999), false, 0);
    events.lock().unwrap().clear();

    c.on_viewport_size(Size::new(300, 700)).unwrap();
    assert_eq!(c.scroll_position(), 69_300);
    assert_eq!(
        kinds(&events),
        [
            ScrollEventKind::Start,
            ScrollEventKind::Scroll,
            ScrollEventKind::Stop,
        ]
    );
    assert_eq!(events.lock().unwrap()[1].scroll_top, 69_300);
}

fn cell_options() -> VariableListOptions {
    VariableListOptions::new(
        50,
        |row| if row == 1 { 2 } else { 20 },
        60,
        |cell: CellIndex| if cell.secondary % 2 == 0 { 100 } else { 200 },
    )
    .with_max_variable_scroll_size(3000)
}

fn variable_controller() -> (
    VariableController<VirtualVariableList<listwindow::ItemIndex>>,
    Events,
) {
    let events: Events = Arc::default();
    let sink = events.clone();
    let list = VirtualVariableList::new(cell_options()).unwrap();
    let mut c = VariableController::new(list)
        .with_easing(Easing::Linear)
        .with_on_scroll(move |e| sink.lock().unwrap().push(*e));
    c.on_viewport_size(Size::new(500, 300)).unwrap();
    (c, events)
}

#[test]
fn variable_wheel_pages_vertically_and_keeps_left() {
    let (mut c, events) = variable_controller();
    assert_eq!(
        c.scroll(Some(350), None, false, 0).unwrap(),
        Point::new(350, 0)
    );
    assert_eq!(c.on_wheel(1).unwrap(), Point::new(350, 300));
    assert_eq!(c.on_wheel(-2).unwrap(), Point::new(350, 0));
    assert_eq!(c.on_wheel(0).unwrap(), Point::new(350, 0));
    assert_eq!(events.lock().unwrap().len(), 9);

    c.scroll(None, Some(2600), false, 0).unwrap();
    assert_eq!(c.on_wheel(1).unwrap(), Point::new(350, 2700));
    assert_eq!(c.on_wheel(1).unwrap(), Point::new(350, 2700));
    assert_eq!(events.lock().unwrap().len(), 15);
}

#[test]
fn variable_scroll_clamps_each_axis() {
    let (mut c, events) = variable_controller();
    assert_eq!(
        c.scroll(Some(9000), Some(9000), false, 0).unwrap(),
        Point::new(2500, 2700)
    );
    let last = *events.lock().unwrap().last().unwrap();
    assert_eq!(last.kind, ScrollEventKind::Stop);
    assert_eq!(last.position(), Point::new(2500, 2700));
    assert_eq!(last.more_info.first_visible_index, Some(45));

    assert_eq!(
        c.scroll_to(CellScrollTarget::Cell(CellIndex::new(4, 3)), false, 0)
            .unwrap(),
        Point::new(400, 240)
    );
}

#[test]
fn variable_animation_moves_both_axes() {
    let (mut c, events) = variable_controller();
    let target = c
        .scroll_to(
            CellScrollTarget::Position(Point::new(1000, 2000)),
            true,
            0,
        )
        .unwrap();
    assert_eq!(target, Point::new(1000, 2000));
    assert!(c.is_animating());

    assert_eq!(c.tick(250).unwrap(), Some(Point::new(500, 1000)));
    assert_eq!(c.tick(500).unwrap(), Some(Point::new(1000, 2000)));
    assert_eq!(c.tick(516).unwrap(), None);
    assert!(!c.is_scrolling());
    assert_eq!(
        kinds(&events),
        [
            ScrollEventKind::Start,
            ScrollEventKind::Scroll,
            ScrollEventKind::Scroll,
            ScrollEventKind::Stop,
        ]
    );
    // Row 35 was rebuilt around x = 1000, where cell 7 starts.
    let row = c.list().secondary_info().row(35).unwrap();
    assert_eq!(row.range(), 7..11);
}

#[test]
fn variable_user_scroll_cancels_animation() {
    let (mut c, _) = variable_controller();
    c.scroll(Some(2000), Some(2000), true, 0).unwrap();
    assert_eq!(
        c.on_scroll(Point::new(10, 20)).unwrap(),
        Point::new(10, 20)
    );
    assert!(!c.is_animating());
    assert_eq!(c.tick(100).unwrap(), None);
    c.on_scroll_stop();
    assert!(!c.is_scrolling());
}

#[test]
fn variable_fling_rests_on_both_axes() {
    let (mut c, _) = variable_controller();
    let target = c.fling(80.0, 80.0, 0);
    assert_eq!(target.x, target.y);
    assert!(target.x > 1800 && target.x <= 2500);
    let mut now = 0;
    while c.is_animating() {
        now += 16;
        c.tick(now).unwrap();
    }
    assert_eq!(c.scroll_position(), target);
}

#[test]
fn variable_focus_scrolls_both_axes_just_enough() {
    let (mut c, _) = variable_controller();
    assert_eq!(
        c.focus(CellIndex::new(6, 3), false, 0).unwrap(),
        Some(Point::new(100, 120))
    );
    assert_eq!(c.focus(CellIndex::new(6, 3), false, 0).unwrap(), None);
    assert_eq!(
        c.list().last_focused_cell(),
        Some(CellIndex::new(6, 3))
    );

    assert_eq!(
        c.focus(CellIndex::new(0, 0), false, 0).unwrap(),
        Some(Point::new(0, 0))
    );
    assert_eq!(
        c.list().last_focused_cell(),
        Some(CellIndex::new(0, 0))
    );
}

#[test]
fn variable_resize_keeps_or_clamps_the_position() {
    let (mut c, events) = variable_controller();
    c.scroll(Some(350), Some(1200), false, 0).unwrap();
    events.lock().unwrap().clear();

    c.on_viewport_size(Size::new(600, 400)).unwrap();
    assert_eq!(c.scroll_position(), Point::new(350, 1200));
    assert!(events.lock().unwrap().is_empty());
    assert!(c.list().range().contains(&20));

    c.scroll(Some(2400), Some(2600), false, 0).unwrap();
    c.on_viewport_size(Size::new(500, 300)).unwrap();
    c.scroll(Some(2500), Some(2700), false, 0).unwrap();
    events.lock().unwrap().clear();

    c.on_viewport_size(Size::new(600, 400)).unwrap();
    assert_eq!(c.scroll_position(), Point::new(2400, 2600));
    assert_eq!(kinds(&events).len(), 3);
}

#[test]
fn variable_rows_growing_under_a_pinned_list_are_reported() {
    let (mut c, events) = variable_controller();
    c.scroll(None, Some(2700), false, 0).unwrap();
    events.lock().unwrap().clear();

    c.update_list(|list| {
        let mut options = list.options().clone();
        options.primary_count = 100;
        list.set_options(options)
    })
    .unwrap();
    assert_eq!(c.scroll_position(), Point::new(0, 5700));
    assert_eq!(kinds(&events).len(), 3);
    assert_eq!(events.lock().unwrap()[1].scroll_top, 5700);
}

#[test]
fn flex_controller_moves_headers_with_the_body() {
    let options = FlexListOptions::new(cell_options(), 120, 100).with_col_header_count(20);
    let list = VirtualFlexList::<listwindow::ItemIndex>::new(options).unwrap();
    let mut c = VariableController::new(list).with_easing(Easing::Linear);
    c.on_viewport_size(Size::new(620, 360)).unwrap();

    c.scroll(Some(350), Some(120), false, 0).unwrap();
    assert_eq!(c.list().row_headers().scroll_position(), 120);
    assert_eq!(c.list().col_headers().scroll_position(), 350);

    c.scroll_to(
        CellScrollTarget::Position(Point::new(700, 600)),
        true,
        1000,
    )
    .unwrap();
    assert_eq!(c.tick(1500).unwrap(), Some(Point::new(700, 600)));
    assert_eq!(c.list().col_headers().scroll_position(), 700);
    assert_eq!(c.list().row_headers().scroll_position(), 600);

    let mut rows = Indexes;
    let mut cols = Indexes;
    let mut body = Indexes;
    let info = c
        .list_mut()
        .position_items(&mut rows, &mut cols, &mut body)
        .unwrap();
    assert_eq!(info.first_visible_index, Some(10));
}
