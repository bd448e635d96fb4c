#![forbid(unsafe_code)]

//! The reorderable grid widget.
//!
//! [`ReorderableGrid`] wires the pieces together: pointer events go through
//! the [`PressDragRecognizer`], recognized gestures drive the
//! [`DragStateMachine`], measurements feed the [`SlotTable`] and the
//! [`ItemBoundsSnapshot`], and [`render`](ReorderableGrid::render) asks the
//! host for one view per item, placed at its visual slot.
//!
//! After a drop the item glides from where it was released into its new slot
//! (a spring on the residual offset). The slot table stays frozen until that
//! settle has finished as well.

use std::fmt;
use std::time::Duration;

use ahash::AHashSet;
use regrid_core::animation::Animation;
use regrid_core::animation::spring::{Spring, presets};
use regrid_core::event::PointerEvent;
use regrid_core::geometry::{Point, Rect, Size, Vector};
use regrid_core::gesture::{GestureEvent, PressDragRecognizer};
use regrid_layout::{GridConfig, GridGeometry, ItemBoundsSnapshot, SlotTable, SlotUpdate};
use web_time::Instant;

use crate::drag::{DragContext, DragState, DragStateMachine, Reorder};
use crate::feedback::{NoFeedback, TactileFeedback};
use crate::model::{GridItem, GridModel, GridModelError};

/// One item's placement for a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCell<V> {
    /// Whatever the host's view callback returned.
    pub view: V,
    /// Committed index.
    pub index: usize,
    /// Slot the item is shown in.
    pub visual_index: usize,
    /// Where to draw it.
    pub frame: Rect,
    /// Drawn above the other cells (dragged or settling).
    pub lifted: bool,
}

#[derive(Debug, Clone)]
struct Settle<Id> {
    id: Id,
    residual: Vector,
    spring: Spring,
}

impl<Id> Settle<Id> {
    fn offset(&self) -> Vector {
        self.residual.scale(self.spring.value())
    }
}

type ReorderCallback = Box<dyn FnMut(usize, usize)>;

/// A fixed-column grid whose items can be long-pressed and dragged to a new
/// position.
pub struct ReorderableGrid<T: GridItem, F: TactileFeedback = NoFeedback> {
    config: GridConfig,
    model: GridModel<T>,
    slots: SlotTable,
    bounds: ItemBoundsSnapshot<T::Id>,
    recognizer: PressDragRecognizer,
    machine: DragStateMachine<T::Id>,
    /// Item under the pointer-down, waiting for the press to be recognized.
    pressed: Option<T::Id>,
    settle: Option<Settle<T::Id>>,
    feedback: F,
    on_reorder: Option<ReorderCallback>,
}

impl<T: GridItem> ReorderableGrid<T> {
    /// A grid over `items`. Fails if two items share an id.
    pub fn new(items: Vec<T>, config: GridConfig) -> Result<Self, GridModelError> {
        let model = GridModel::new(items)?;
        let slots = SlotTable::new(GridGeometry::new(&config), model.len());
        Ok(Self {
            config,
            model,
            slots,
            bounds: ItemBoundsSnapshot::new(),
            recognizer: PressDragRecognizer::new(config.press_config()),
            machine: DragStateMachine::new(),
            pressed: None,
            settle: None,
            feedback: NoFeedback,
            on_reorder: None,
        })
    }
}

impl<T: GridItem, F: TactileFeedback> ReorderableGrid<T, F> {
    /// Replace the tactile feedback.
    #[must_use]
    pub fn with_feedback<G: TactileFeedback>(self, feedback: G) -> ReorderableGrid<T, G> {
        ReorderableGrid {
            config: self.config,
            model: self.model,
            slots: self.slots,
            bounds: self.bounds,
            recognizer: self.recognizer,
            machine: self.machine,
            pressed: self.pressed,
            settle: self.settle,
            feedback,
            on_reorder: self.on_reorder,
        }
    }

    /// Call `callback(from, to)` after every committed drop.
    #[must_use]
    pub fn on_reorder(mut self, callback: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_reorder = Some(Box::new(callback));
        self
    }

    // --- Accessors ---

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The committed order.
    #[inline]
    #[must_use]
    pub fn model(&self) -> &GridModel<T> {
        &self.model
    }

    /// Items in committed order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.model.items()
    }

    /// Current drag state.
    #[inline]
    #[must_use]
    pub fn drag_state(&self) -> &DragState<T::Id> {
        self.machine.state()
    }

    /// Whether an item is being dragged.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.machine.is_active()
    }

    /// Whether a dropped item is still gliding into its slot.
    #[inline]
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Current candidate slots.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Rect] {
        self.slots.slots()
    }

    /// Cell size for the last applied container bounds.
    #[must_use]
    pub fn cell_size(&self) -> Size {
        self.slots.cell_size()
    }

    /// Height the committed items need at the current width.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        let width = self.slots.container().map_or(0.0, |bounds| bounds.width);
        self.slots
            .geometry()
            .content_height(self.model.len(), width)
    }

    // --- Input ---

    /// Feed a pointer event.
    ///
    /// Returns the committed reorder if this event completed a drop.
    /// Ignored entirely while dragging is disabled.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) -> Option<Reorder> {
        if !self.config.drag_enabled() {
            return None;
        }
        if let PointerEvent::Down(pos) = *event {
            let hit = self.hit_test(pos);
            if hit.is_none() {
                if self.machine.cancel() {
                    self.end_interaction();
                }
                self.recognizer.reset();
                self.pressed = None;
                return None;
            }
            self.pressed = hit;
        }

        let mut committed = None;
        for gesture in self.recognizer.process(event, now) {
            if let Some(reorder) = self.dispatch(gesture) {
                committed = Some(reorder);
            }
        }
        if matches!(event, PointerEvent::Up(_) | PointerEvent::Cancel) {
            self.pressed = None;
        }
        committed
    }

    /// Advance the press timer. Call every frame while a pointer is down.
    pub fn poll(&mut self, now: Instant) {
        if !self.config.drag_enabled() {
            return;
        }
        if let Some(gesture) = self.recognizer.check_press(now) {
            self.dispatch(gesture);
        }
    }

    /// Advance the settle animation.
    pub fn tick(&mut self, dt: Duration) {
        let Some(settle) = self.settle.as_mut() else {
            return;
        };
        settle.spring.tick(dt);
        if settle.spring.is_complete() {
            self.settle = None;
            self.end_interaction();
        }
    }

    /// The container was laid out at `bounds`.
    pub fn on_container_measured(&mut self, bounds: Rect) -> SlotUpdate {
        let update = self.slots.on_container_measured(bounds, self.is_frozen());
        self.log_slot_update(update);
        update
    }

    /// An item was laid out at `rect`.
    pub fn on_item_measured(&mut self, id: T::Id, rect: Rect) {
        self.bounds.record(id, rect);
    }

    /// Turn dragging on or off. Turning it off abandons any drag in progress.
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.config = self.config.with_drag_enabled(enabled);
        if enabled {
            return;
        }
        self.recognizer.reset();
        self.pressed = None;
        if self.machine.cancel() {
            self.end_interaction();
        }
    }

    /// Replace the items. Any drag or settle in progress is dropped.
    pub fn set_items(&mut self, items: Vec<T>) -> Result<(), GridModelError> {
        let model = GridModel::new(items)?;
        self.recognizer.reset();
        self.pressed = None;
        self.machine.cancel();
        self.settle = None;
        self.model = model;

        let live: AHashSet<T::Id> = self.model.ids().collect();
        self.bounds.retain(|id| live.contains(id));

        let deferred = self.slots.apply_deferred();
        self.log_slot_update(deferred);
        let update = self.slots.set_item_count(self.model.len(), false);
        self.log_slot_update(update);
        Ok(())
    }

    // --- Output ---

    /// Build one cell per item.
    ///
    /// `view(item, visual_index, cell_size)` is called once per item, in
    /// committed order. Lifted cells come last in the returned list so a
    /// host drawing front to back puts them on top.
    pub fn render<V>(&self, mut view: impl FnMut(&T, usize, Size) -> V) -> Vec<RenderedCell<V>> {
        let cell = self.slots.cell_size();
        let active = self.machine.state().active();
        let mut cells: Vec<RenderedCell<V>> = self
            .model
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let id = item.grid_id();
                let visual_index = self.machine.visual_index(index);
                let slot = self
                    .slots
                    .slot(visual_index)
                    .unwrap_or_else(|| Rect::from_origin_size(Point::ZERO, cell));
                let offset = match (active, &self.settle) {
                    (Some(drag), _) if drag.id == id => Some(drag.translation),
                    (_, Some(settle)) if settle.id == id => Some(settle.offset()),
                    _ => None,
                };
                RenderedCell {
                    view: view(item, visual_index, cell),
                    index,
                    visual_index,
                    frame: offset.map_or(slot, |offset| slot.offset(offset)),
                    lifted: offset.is_some(),
                }
            })
            .collect();
        cells.sort_by_key(|cell| cell.lifted);
        cells
    }

    // --- Internals ---

    fn is_frozen(&self) -> bool {
        self.machine.is_active() || self.settle.is_some()
    }

    fn hit_test(&self, pos: Point) -> Option<T::Id> {
        self.model.items().iter().enumerate().find_map(|(index, item)| {
            let id = item.grid_id();
            let rect = self.bounds.get(&id).or_else(|| self.slots.slot(index))?;
            rect.contains(pos).then_some(id)
        })
    }

    fn dispatch(&mut self, gesture: GestureEvent) -> Option<Reorder> {
        match gesture {
            GestureEvent::PressRecognized { .. } => {
                let id = self.pressed.take()?;
                let source = self.model.index_of(&id)?;
                if self
                    .machine
                    .press(id, source, self.config.drag_enabled())
                {
                    self.settle = None;
                    self.feedback.drag_started();
                }
                None
            }
            GestureEvent::DragSample { translation } => {
                let ctx = DragContext {
                    slots: self.slots.slots(),
                    bounds: &self.bounds,
                    item_count: self.model.len(),
                };
                self.machine.sample(translation, ctx);
                None
            }
            GestureEvent::DragEnded { translation } => {
                let ctx = DragContext {
                    slots: self.slots.slots(),
                    bounds: &self.bounds,
                    item_count: self.model.len(),
                };
                let release = self.machine.release(translation, ctx, &mut self.model)?;
                if !release.residual.is_zero() {
                    self.settle = Some(Settle {
                        id: release.id,
                        residual: release.residual,
                        spring: presets::settle(),
                    });
                }
                if let Some(reorder) = release.commit {
                    self.forget_shifted_bounds(reorder);
                    if let Some(callback) = self.on_reorder.as_mut() {
                        callback(reorder.from, reorder.to);
                    }
                }
                self.end_interaction();
                release.commit
            }
            GestureEvent::DragCancelled => {
                if self.machine.cancel() {
                    self.end_interaction();
                }
                None
            }
        }
    }

    /// Every item between `from` and `to` changed slot; their measured
    /// frames are stale until the host reports them again.
    fn forget_shifted_bounds(&mut self, reorder: Reorder) {
        let lo = reorder.from.min(reorder.to);
        let hi = reorder.from.max(reorder.to);
        for item in self.model.items().get(lo..=hi).unwrap_or_default() {
            self.bounds.remove(&item.grid_id());
        }
    }

    /// Apply slot changes held back while the grid was frozen.
    fn end_interaction(&mut self) {
        if self.is_frozen() {
            return;
        }
        let update = self.slots.apply_deferred();
        self.log_slot_update(update);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn log_slot_update(&self, update: SlotUpdate) {
        #[cfg(feature = "tracing")]
        match update {
            SlotUpdate::Recomputed => tracing::debug!(
                slots = self.slots.slots().len(),
                cell_width = f64::from(self.slots.cell_size().width),
                "grid.slots.recompute"
            ),
            SlotUpdate::Deferred => tracing::debug!("grid.slots.deferred"),
            SlotUpdate::Unchanged => {}
        };
    }
}

impl<T, F> fmt::Debug for ReorderableGrid<T, F>
where
    T: GridItem + fmt::Debug,
    F: TactileFeedback,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderableGrid")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("slots", &self.slots)
            .field("drag", self.machine.state())
            .field("settling", &self.settle.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    #[cfg(feature = "tracing")]
    use std::sync::{Arc, Mutex};
    #[cfg(feature = "tracing")]
    use tracing::Subscriber;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::Layer;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::layer::{Context, SubscriberExt};

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 320.0, 430.0);
    const HOLD: Duration = Duration::from_millis(600);
    const FRAME: Duration = Duration::from_millis(16);

    fn config() -> GridConfig {
        GridConfig::builder()
            .columns(3)
            .gaps(10.0, 10.0)
            .build()
            .expect("valid config")
    }

    /// A measured grid: slot k at (110*(k%3), 110*(k/3)), 100x100.
    fn grid(ids: &[u32]) -> ReorderableGrid<u32> {
        let mut grid = ReorderableGrid::new(ids.to_vec(), config()).expect("unique ids");
        grid.on_container_measured(CONTAINER);
        let slots = grid.slots().to_vec();
        for (index, id) in ids.iter().enumerate() {
            grid.on_item_measured(*id, slots[index]);
        }
        grid
    }

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Press at `at` and hold until the drag is recognized.
    fn start_drag<F: TactileFeedback>(grid: &mut ReorderableGrid<u32, F>, at: Point, t0: Instant) {
        grid.handle_pointer(&PointerEvent::Down(at), t0);
        grid.poll(t0 + HOLD);
    }

    fn settle<F: TactileFeedback>(grid: &mut ReorderableGrid<u32, F>) {
        for _ in 0..500 {
            if !grid.is_settling() {
                return;
            }
            grid.tick(FRAME);
        }
        panic!("settle never finished");
    }

    #[test]
    fn long_press_drag_and_drop_commits_once() {
        let t0 = Instant::now();
        let commits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&commits);
        let mut g = grid(&[1, 2, 3, 4, 5]).on_reorder(move |from, to| {
            sink.borrow_mut().push((from, to));
        });

        start_drag(&mut g, p(50.0, 50.0), t0);
        assert!(g.is_dragging());
        g.handle_pointer(&PointerEvent::Move(p(160.0, 160.0)), t0 + HOLD);
        let reorder = g.handle_pointer(&PointerEvent::Up(p(160.0, 160.0)), t0 + HOLD);

        assert_eq!(reorder, Some(Reorder { from: 0, to: 4 }));
        assert_eq!(g.items(), &[2, 3, 4, 5, 1]);
        assert_eq!(commits.borrow().as_slice(), &[(0, 4)]);
        assert!(!g.is_dragging());
        assert!(!g.is_settling());
    }

    #[test]
    fn feedback_fires_once_per_drag() {
        let t0 = Instant::now();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut g = grid(&[1, 2, 3]).with_feedback(move || counter.set(counter.get() + 1));

        start_drag(&mut g, p(50.0, 50.0), t0);
        g.poll(t0 + HOLD + HOLD);
        g.handle_pointer(&PointerEvent::Move(p(60.0, 50.0)), t0 + HOLD);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn quick_tap_never_drags() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3]);
        g.handle_pointer(&PointerEvent::Down(p(50.0, 50.0)), t0);
        let reorder = g.handle_pointer(
            &PointerEvent::Up(p(50.0, 50.0)),
            t0 + Duration::from_millis(100),
        );
        assert_eq!(reorder, None);
        g.poll(t0 + HOLD);
        assert!(!g.is_dragging());
    }

    #[test]
    fn moving_before_press_fails_the_gesture() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3]);
        g.handle_pointer(&PointerEvent::Down(p(50.0, 50.0)), t0);
        g.handle_pointer(
            &PointerEvent::Move(p(200.0, 50.0)),
            t0 + Duration::from_millis(50),
        );
        g.poll(t0 + HOLD);
        assert!(!g.is_dragging());
        assert_eq!(g.handle_pointer(&PointerEvent::Up(p(200.0, 50.0)), t0 + HOLD), None);
        assert_eq!(g.items(), &[1, 2, 3]);
    }

    #[test]
    fn press_outside_items_is_ignored() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2]);
        start_drag(&mut g, p(250.0, 50.0), t0);
        assert!(!g.is_dragging());
    }

    #[test]
    fn cancel_keeps_order() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3, 4]);
        start_drag(&mut g, p(50.0, 50.0), t0);
        g.handle_pointer(&PointerEvent::Move(p(270.0, 160.0)), t0 + HOLD);
        assert_eq!(g.handle_pointer(&PointerEvent::Cancel, t0 + HOLD), None);
        assert_eq!(g.items(), &[1, 2, 3, 4]);
        assert_eq!(g.drag_state(), &DragState::Inactive);
    }

    #[test]
    fn disabled_grid_ignores_pointer() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3]);
        g.set_drag_enabled(false);
        start_drag(&mut g, p(50.0, 50.0), t0);
        g.handle_pointer(&PointerEvent::Move(p(270.0, 50.0)), t0 + HOLD);
        assert_eq!(g.handle_pointer(&PointerEvent::Up(p(270.0, 50.0)), t0 + HOLD), None);
        assert_eq!(g.drag_state(), &DragState::Inactive);
        assert_eq!(g.items(), &[1, 2, 3]);
    }

    #[test]
    fn disabling_mid_drag_cancels() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3]);
        start_drag(&mut g, p(50.0, 50.0), t0);
        assert!(g.is_dragging());
        g.set_drag_enabled(false);
        assert!(!g.is_dragging());
        assert_eq!(g.items(), &[1, 2, 3]);
    }

    #[test]
    fn render_shifts_others_and_lifts_dragged() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3, 4]);
        start_drag(&mut g, p(50.0, 50.0), t0);
        g.handle_pointer(&PointerEvent::Move(p(270.0, 50.0)), t0 + HOLD);

        let mut calls = 0;
        let cells = g.render(|item, _, size| {
            calls += 1;
            assert_eq!(size, Size::new(100.0, 100.0));
            *item
        });
        assert_eq!(calls, 4);
        let views: Vec<(u32, usize)> = cells.iter().map(|c| (c.view, c.visual_index)).collect();
        assert_eq!(views, vec![(2, 0), (3, 1), (4, 3), (1, 0)]);

        let dragged = cells.last().expect("cells");
        assert!(dragged.lifted);
        assert_eq!(dragged.frame, Rect::new(220.0, 0.0, 100.0, 100.0));
        assert!(cells[..3].iter().all(|c| !c.lifted));
    }

    #[test]
    fn press_after_drop_picks_item_now_in_that_slot() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3, 4, 5]);
        start_drag(&mut g, p(50.0, 50.0), t0);
        g.handle_pointer(&PointerEvent::Move(p(160.0, 160.0)), t0 + HOLD);
        g.handle_pointer(&PointerEvent::Up(p(160.0, 160.0)), t0 + HOLD);
        settle(&mut g);
        assert_eq!(g.items(), &[2, 3, 4, 5, 1]);

        let cells = g.render(|item, _, _| *item);
        let at_first_slot = cells.iter().find(|c| c.visual_index == 0).map(|c| c.view);
        assert_eq!(at_first_slot, Some(2));

        // No fresh measurements yet: the press still lands on what is drawn.
        let t1 = t0 + HOLD + HOLD;
        start_drag(&mut g, p(50.0, 50.0), t1);
        let dragged = g.drag_state().active().map(|d| d.id);
        assert_eq!(dragged, Some(2));

        g.handle_pointer(&PointerEvent::Move(p(160.0, 50.0)), t1 + HOLD);
        let drag = g.drag_state().active().expect("active");
        assert_eq!(drag.rect, Rect::new(110.0, 0.0, 100.0, 100.0));
        assert_eq!(drag.destination(), 1);
    }

    #[test]
    fn geometry_frozen_during_drag_then_applied() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3, 4]);
        let before = g.slots().to_vec();

        start_drag(&mut g, p(50.0, 50.0), t0);
        let wider = Rect::new(0.0, 0.0, 620.0, 430.0);
        assert_eq!(g.on_container_measured(wider), SlotUpdate::Deferred);
        g.handle_pointer(&PointerEvent::Move(p(65.0, 45.0)), t0 + HOLD);
        assert_eq!(g.slots(), before.as_slice());

        // Dropped slightly off its slot: settles before the resize lands.
        g.handle_pointer(&PointerEvent::Up(p(65.0, 45.0)), t0 + HOLD);
        assert!(g.is_settling());
        assert_eq!(g.slots(), before.as_slice());

        settle(&mut g);
        assert_eq!(g.cell_size(), Size::new(200.0, 200.0));
        assert_eq!(g.slots()[1], Rect::new(210.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn settling_item_starts_at_drop_point() {
        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3]);
        start_drag(&mut g, p(50.0, 50.0), t0);
        g.handle_pointer(&PointerEvent::Move(p(275.0, 40.0)), t0 + HOLD);
        g.handle_pointer(&PointerEvent::Up(p(275.0, 40.0)), t0 + HOLD);
        assert_eq!(g.items(), &[2, 3, 1]);

        let cells = g.render(|item, _, _| *item);
        let settling = cells.last().expect("cells");
        assert_eq!(settling.view, 1);
        assert!(settling.lifted);
        assert_eq!(settling.frame, Rect::new(225.0, -10.0, 100.0, 100.0));

        settle(&mut g);
        let cells = g.render(|item, _, _| *item);
        assert!(cells.iter().all(|c| !c.lifted));
        assert_eq!(cells[2].frame, Rect::new(220.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn set_items_prunes_bounds_and_resizes_slots() {
        let mut g = grid(&[1, 2, 3]);
        g.set_items(vec![3, 1, 2, 4, 5, 6]).expect("unique ids");
        assert_eq!(g.slots().len(), 9);
        assert_eq!(g.items(), &[3, 1, 2, 4, 5, 6]);
        assert!(g.set_items(vec![1, 1]).is_err());
        assert_eq!(g.items(), &[3, 1, 2, 4, 5, 6]);
    }

    #[test]
    fn content_height_tracks_container() {
        let g = grid(&[1, 2, 3, 4]);
        assert_eq!(g.content_height(), 210.0);
    }

    #[cfg(feature = "tracing")]
    #[derive(Default)]
    struct TraceState {
        saw_start: bool,
        saw_commit: bool,
    }

    #[cfg(feature = "tracing")]
    struct TraceCapture {
        state: Arc<Mutex<TraceState>>,
    }

    #[cfg(feature = "tracing")]
    impl<S> Layer<S> for TraceCapture
    where
        S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            struct Msg {
                message: Option<String>,
            }
            impl tracing::field::Visit for Msg {
                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    if field.name() == "message" {
                        self.message = Some(value.to_string());
                    }
                }

                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "message" {
                        self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                    }
                }
            }
            let mut msg = Msg { message: None };
            event.record(&mut msg);
            let mut state = self.state.lock().expect("trace lock");
            match msg.message.as_deref() {
                Some("grid.drag.start") => state.saw_start = true,
                Some("grid.drag.commit") => state.saw_commit = true,
                _ => {}
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn drag_events_are_traced() {
        let state = Arc::new(Mutex::new(TraceState::default()));
        let subscriber = tracing_subscriber::registry().with(TraceCapture {
            state: Arc::clone(&state),
        });
        let _guard = tracing::subscriber::set_default(subscriber);

        let t0 = Instant::now();
        let mut g = grid(&[1, 2, 3]);
        start_drag(&mut g, p(50.0, 50.0), t0);
        g.handle_pointer(&PointerEvent::Move(p(160.0, 50.0)), t0 + HOLD);
        g.handle_pointer(&PointerEvent::Up(p(160.0, 50.0)), t0 + HOLD);

        let snapshot = state.lock().expect("trace lock");
        assert!(snapshot.saw_start, "expected grid.drag.start event");
        assert!(snapshot.saw_commit, "expected grid.drag.commit event");
    }
}
