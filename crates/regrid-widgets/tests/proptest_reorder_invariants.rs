//! Property tests for reordering: the single-move rule, preview order, and
//! the widget's behaviour under arbitrary pointer streams.

use std::time::Duration;

use proptest::prelude::*;
use regrid_core::event::PointerEvent;
use regrid_core::geometry::{Point, Rect, Vector};
use regrid_layout::{GridConfig, GridGeometry, ItemBoundsSnapshot, SlotUpdate};
use regrid_widgets::{
    DragContext, DragStateMachine, GridModel, ReorderShift, ReorderableGrid, visual_order,
};
use web_time::Instant;

const CONTAINER: Rect = Rect::new(0.0, 0.0, 320.0, 640.0);

fn config() -> GridConfig {
    GridConfig::builder()
        .columns(3)
        .gaps(10.0, 10.0)
        .build()
        .expect("valid config")
}

fn ids(n: usize) -> Vec<u32> {
    (0..n as u32).collect()
}

fn from_to() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..24).prop_flat_map(|n| (Just(n), 0..n, 0..n))
}

#[derive(Debug, Clone)]
enum Step {
    Down(f32, f32),
    Move(f32, f32),
    Up(f32, f32),
    Cancel,
    Wait(u64),
    Resize(f32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0.0f32..320.0, 0.0f32..430.0).prop_map(|(x, y)| Step::Down(x, y)),
        (-50.0f32..370.0, -50.0f32..480.0).prop_map(|(x, y)| Step::Move(x, y)),
        (-50.0f32..370.0, -50.0f32..480.0).prop_map(|(x, y)| Step::Up(x, y)),
        Just(Step::Cancel),
        (0u64..800).prop_map(Step::Wait),
        (200.0f32..700.0).prop_map(Step::Resize),
    ]
}

proptest! {
    #[test]
    fn move_changes_exactly_one_position((n, from, to) in from_to()) {
        let original = ids(n);
        let mut model = GridModel::new(original.clone()).expect("unique ids");
        model.move_item(from, to);

        let moved = original[from];
        prop_assert_eq!(model.items()[to], moved);

        let before: Vec<u32> = original.iter().copied().filter(|id| *id != moved).collect();
        let after: Vec<u32> = model.items().iter().copied().filter(|id| *id != moved).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn preview_matches_committed_order((n, source, destination) in from_to()) {
        let shift = ReorderShift::new(source, destination);
        let visual = visual_order(n, Some(shift));

        let mut model = GridModel::new(ids(n)).expect("unique ids");
        model.move_item(source, destination);

        for (actual, id) in ids(n).into_iter().enumerate() {
            let expected = model.index_of(&id).expect("member");
            if actual == source {
                prop_assert_eq!(expected, destination);
            } else {
                prop_assert_eq!(visual[actual], expected);
            }
        }
    }

    #[test]
    fn noop_drop_is_idempotent(n in 1usize..24, pick in any::<prop::sample::Index>()) {
        let geometry = GridGeometry::new(&config());
        let slots = geometry.candidate_slots(n, 320.0, None);
        let mut bounds = ItemBoundsSnapshot::new();
        for (index, id) in ids(n).into_iter().enumerate() {
            bounds.record(id, slots[index]);
        }
        let mut model = GridModel::new(ids(n)).expect("unique ids");
        let source = pick.index(n);
        let id = model.items()[source];

        let mut machine = DragStateMachine::new();
        prop_assert!(machine.press(id, source, true));
        let ctx = DragContext { slots: &slots, bounds: &bounds, item_count: n };
        let release = machine
            .release(Vector::new(3.0, -2.0), ctx, &mut model)
            .expect("active drag");
        prop_assert_eq!(release.commit.map(|r| (r.from, r.to)), Some((source, source)));
        let expected = ids(n);
        prop_assert_eq!(model.items(), expected.as_slice());
    }

    #[test]
    fn cancel_never_touches_the_model(
        (n, source, _) in from_to(),
        samples in prop::collection::vec((-400.0f32..400.0, -400.0f32..400.0), 0..12),
    ) {
        let geometry = GridGeometry::new(&config());
        let slots = geometry.candidate_slots(n, 320.0, None);
        let bounds = ItemBoundsSnapshot::new();
        let model = GridModel::new(ids(n)).expect("unique ids");

        let mut machine = DragStateMachine::new();
        machine.press(model.items()[source], source, true);
        for (dx, dy) in samples {
            let ctx = DragContext { slots: &slots, bounds: &bounds, item_count: n };
            machine.sample(Vector::new(dx, dy), ctx);
            let destination = machine.state().active().map(|d| d.destination());
            prop_assert!(destination.is_some_and(|d| d < n));
        }
        prop_assert!(machine.cancel());
        let expected = ids(n);
        prop_assert_eq!(model.items(), expected.as_slice());
    }

    #[test]
    fn pointer_streams_keep_the_grid_consistent(
        n in 1usize..12,
        steps in prop::collection::vec(step(), 1..60),
    ) {
        let mut grid = ReorderableGrid::new(ids(n), config()).expect("unique ids");
        grid.on_container_measured(CONTAINER);
        let mut now = Instant::now();

        for step in steps {
            let slots_before = grid.slots().to_vec();
            let was_frozen = grid.is_dragging() || grid.is_settling();
            let event = match step {
                Step::Down(x, y) => Some(PointerEvent::Down(Point::new(x, y))),
                Step::Move(x, y) => Some(PointerEvent::Move(Point::new(x, y))),
                Step::Up(x, y) => Some(PointerEvent::Up(Point::new(x, y))),
                Step::Cancel => Some(PointerEvent::Cancel),
                Step::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    grid.poll(now);
                    grid.tick(Duration::from_millis(ms));
                    None
                }
                Step::Resize(width) => {
                    let update = grid.on_container_measured(Rect::new(0.0, 0.0, width, 640.0));
                    if was_frozen {
                        prop_assert_ne!(update, SlotUpdate::Recomputed);
                        prop_assert_eq!(grid.slots(), slots_before.as_slice());
                    }
                    None
                }
            };
            if let Some(event) = event {
                let is_up = matches!(event, PointerEvent::Up(_));
                if let Some(reorder) = grid.handle_pointer(&event, now) {
                    prop_assert!(is_up);
                    prop_assert!(reorder.from < n && reorder.to < n);
                }
            }

            let mut sorted = grid.items().to_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, ids(n));
            if let Some(drag) = grid.drag_state().active() {
                prop_assert!(drag.destination() < n);
            }
        }
    }
}
