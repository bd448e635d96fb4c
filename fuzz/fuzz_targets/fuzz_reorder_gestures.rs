#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use regrid_core::event::PointerEvent;
use regrid_core::geometry::{Point, Rect};
use regrid_layout::GridConfig;
use regrid_widgets::ReorderableGrid;
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Op {
    Down(i16, i16),
    Move(i16, i16),
    Up(i16, i16),
    Cancel,
    Wait(u16),
    Resize(u16, u16),
    MeasureItem(u8, i16, i16),
    Toggle(bool),
}

#[derive(Debug, Arbitrary)]
struct Input {
    columns: u8,
    items: u8,
    ops: Vec<Op>,
}

fn pt(x: i16, y: i16) -> Point {
    Point::new(f32::from(x), f32::from(y))
}

fuzz_target!(|input: Input| {
    let columns = u16::from(input.columns % 8) + 1;
    let count = u32::from(input.items % 40);
    let Ok(config) = GridConfig::new(columns) else {
        return;
    };
    let ids: Vec<u32> = (0..count).collect();
    let Ok(mut grid) = ReorderableGrid::new(ids.clone(), config) else {
        return;
    };
    grid.on_container_measured(Rect::new(0.0, 0.0, 400.0, 800.0));
    let mut now = Instant::now();

    for op in input.ops.into_iter().take(512) {
        let slots_before = grid.slots().to_vec();
        let frozen = grid.is_dragging() || grid.is_settling();
        match op {
            Op::Down(x, y) => {
                grid.handle_pointer(&PointerEvent::Down(pt(x, y)), now);
            }
            Op::Move(x, y) => {
                grid.handle_pointer(&PointerEvent::Move(pt(x, y)), now);
            }
            Op::Up(x, y) => {
                if let Some(reorder) = grid.handle_pointer(&PointerEvent::Up(pt(x, y)), now) {
                    assert!(reorder.from < ids.len() && reorder.to < ids.len());
                }
            }
            Op::Cancel => {
                grid.handle_pointer(&PointerEvent::Cancel, now);
            }
            Op::Wait(ms) => {
                let dt = Duration::from_millis(u64::from(ms % 1000));
                now += dt;
                grid.poll(now);
                grid.tick(dt);
            }
            Op::Resize(w, h) => {
                grid.on_container_measured(Rect::new(0.0, 0.0, f32::from(w), f32::from(h)));
                if frozen {
                    assert_eq!(grid.slots(), slots_before.as_slice(), "slots moved mid-drag");
                }
            }
            Op::MeasureItem(id, x, y) => {
                let size = grid.cell_size();
                grid.on_item_measured(u32::from(id), Rect::from_origin_size(pt(x, y), size));
            }
            Op::Toggle(enabled) => grid.set_drag_enabled(enabled),
        }

        // The committed order is always a permutation of the input.
        let mut sorted = grid.items().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, ids);
        if let Some(drag) = grid.drag_state().active() {
            assert!(drag.destination() < ids.len());
        }
        let cells = grid.render(|id, _, _| *id);
        assert_eq!(cells.len(), ids.len());
    }
});
