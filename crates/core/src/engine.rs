//! Engine module - the game state machine
//!
//! The engine owns the settled grid, the current falling object and the
//! speed curve, and drives them from ticks delivered by a [`Scheduler`].
//!
//! # Lifecycle
//!
//! `not running -> running -> (game over) -> not running`, re-entered through
//! [`Engine::start_game`]. While running, every tick tries to move the current
//! object down one row. When it cannot fall:
//!
//! - if it never fell at all, the game is over and the tick is unscheduled;
//! - otherwise its blocks are merged into the settled grid, complete lines are
//!   removed and the next object spawns.
//!
//! # Speed
//!
//! The tick interval starts at 1250ms. Every fourth cleared line takes 100ms
//! off it, down to 20ms. A drop temporarily ticks every 10ms until the object
//! lands.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::catalogue::Catalogue;
use crate::falling::{FallOutcome, FallingObject};
use crate::grid::Grid;
use crate::render::Renderer;
use crate::rng::SimpleRng;
use crate::scheduler::{Scheduler, TickClock};
use crate::types::{
    GameAction, SkinId, DEFAULT_TICK_MS, DROP_TICK_MS, LINES_PER_SPEEDUP, MIN_TICK_MS,
    SCENE_HEIGHT, TICK_STEP_MS,
};

/// Events kept before the oldest is discarded.
pub const EVENT_LOG_CAPACITY: usize = 64;

/// Rows removed by one line check, top to bottom.
pub type ClearedRows = ArrayVec<i32, { SCENE_HEIGHT as usize }>;

/// Something observable that happened inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    GameStarted { seed: u32 },
    Spawned { kind: usize, skin: SkinId },
    Landed,
    LineCleared { row: i32, total: u32 },
    SpeedUp { interval_ms: u32 },
    GameOver { completed_lines: u32 },
}

#[derive(Debug, Clone)]
pub struct Engine<'c, S = TickClock> {
    catalogue: &'c Catalogue,
    scheduler: S,
    rng: SimpleRng,
    seed: u32,
    settled: Grid,
    current: Option<FallingObject>,
    is_running: bool,
    is_dropping: bool,
    tick_interval_ms: u32,
    completed_lines: u32,
    events: Vec<EngineEvent>,
}

impl<'c, S: Scheduler> Engine<'c, S> {
    pub fn new(catalogue: &'c Catalogue, scheduler: S, seed: u32) -> Self {
        Self {
            catalogue,
            scheduler,
            rng: SimpleRng::new(seed),
            seed,
            settled: Grid::new(),
            current: None,
            is_running: false,
            is_dropping: false,
            tick_interval_ms: DEFAULT_TICK_MS,
            completed_lines: 0,
            events: Vec::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_dropping(&self) -> bool {
        self.is_dropping
    }

    pub fn completed_lines(&self) -> u32 {
        self.completed_lines
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms))
    }

    pub fn settled(&self) -> &Grid {
        &self.settled
    }

    pub fn current(&self) -> Option<&FallingObject> {
        self.current.as_ref()
    }

    pub fn catalogue(&self) -> &'c Catalogue {
        self.catalogue
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Drain the events recorded since the last call, oldest first. At most
    /// [`EVENT_LOG_CAPACITY`] of the most recent events are kept.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset the field and counters and spawn the first object.
    pub fn start_game(&mut self) {
        self.settled.clear();
        self.is_running = true;
        self.is_dropping = false;
        self.tick_interval_ms = DEFAULT_TICK_MS;
        self.completed_lines = 0;
        self.record(EngineEvent::GameStarted {
            seed: self.rng.state(),
        });
        self.new_falling_object();
    }

    /// One scheduled step: fall one row, or land.
    pub fn tick(&mut self) {
        if !self.is_running {
            return;
        }
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if current.move_down(&self.settled) == FallOutcome::CannotFall {
            self.handle_fall_failure();
        }
    }

    pub fn move_left(&mut self) {
        if !self.accepts_input() {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.move_left(&self.settled);
        }
    }

    pub fn move_right(&mut self) {
        if !self.accepts_input() {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.move_right(&self.settled);
        }
    }

    pub fn rotate(&mut self) {
        if !self.accepts_input() {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.rotate(&self.settled);
        }
    }

    /// Let the current object fall at drop speed until it lands.
    pub fn drop(&mut self) {
        if !self.is_running {
            return;
        }
        self.is_dropping = true;
        self.scheduler.unschedule();
        self.scheduler.schedule_interval(DROP_TICK_MS);
    }

    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::Start => self.start_game(),
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::Drop => self.drop(),
        }
    }

    /// Remove every complete row, scanning from the top.
    ///
    /// A removal shifts the rows above it down, so rows are checked in order
    /// and each removal is counted on its own.
    pub fn check_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for row in 0..SCENE_HEIGHT {
            if !self.settled.is_line_complete(row) {
                continue;
            }
            self.settled.remove_line(row);
            cleared.push(row);
            self.completed_lines += 1;
            self.record(EngineEvent::LineCleared {
                row,
                total: self.completed_lines,
            });

            if self.completed_lines % LINES_PER_SPEEDUP == 0 {
                self.tick_interval_ms = self
                    .tick_interval_ms
                    .saturating_sub(TICK_STEP_MS)
                    .max(MIN_TICK_MS);
                self.record(EngineEvent::SpeedUp {
                    interval_ms: self.tick_interval_ms,
                });
            }
        }
        cleared
    }

    /// Report every visible block to `renderer`: settled first, then the
    /// falling object. Nothing is drawn while the game is not running.
    pub fn draw(&self, renderer: &mut impl Renderer) {
        if !self.is_running {
            return;
        }
        for block in self.settled.iter().map(|(_, block)| block) {
            renderer.draw_block(block.skin(), block.pixel_pos());
        }
        if let Some(current) = &self.current {
            current.draw(renderer);
        }
    }

    fn record(&mut self, event: EngineEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Steering is ignored when idle and while a drop is in progress.
    fn accepts_input(&self) -> bool {
        self.is_running && !self.is_dropping
    }

    fn handle_fall_failure(&mut self) {
        self.is_dropping = false;
        self.scheduler.unschedule();

        let Some(current) = self.current.take() else {
            return;
        };

        if !current.fallen() {
            self.is_running = false;
            // Keep the stuck object around so it can still be inspected.
            self.current = Some(current);
            self.record(EngineEvent::GameOver {
                completed_lines: self.completed_lines,
            });
            return;
        }

        self.settled.merge(current.into_blocks());
        self.record(EngineEvent::Landed);
        self.check_lines();
        self.new_falling_object();
    }

    fn new_falling_object(&mut self) {
        let next = FallingObject::spawn(self.catalogue, &mut self.rng);
        self.record(EngineEvent::Spawned {
            kind: next.kind(),
            skin: next.skin(),
        });
        self.current = Some(next);
        self.scheduler.schedule_interval(self.tick_interval_ms);
    }

    #[cfg(test)]
    pub(crate) fn settled_mut(&mut self) -> &mut Grid {
        &mut self.settled
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, current: FallingObject) {
        self.current = Some(current);
    }
}

impl<'c> Engine<'c, TickClock> {
    /// Feed elapsed wall time and run every tick that came due.
    ///
    /// The clock is re-read after each tick since landing re-arms it.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.scheduler.advance(elapsed_ms);
        while self.scheduler.fire() {
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::types::{GridPos, Offset, SCENE_WIDTH};

    fn square_catalogue() -> Catalogue {
        let square = vec![
            Offset::new(0, 1),
            Offset::new(1, 1),
            Offset::new(0, 0),
            Offset::new(1, 0),
        ];
        Catalogue::new(vec![square], Catalogue::pastel_skins()).unwrap()
    }

    fn fill_row(grid: &mut Grid, row: i32) {
        for x in 0..SCENE_WIDTH {
            grid.insert(Block::at(SkinId(0), GridPos::new(x, row)));
        }
    }

    #[test]
    fn test_new_engine_is_idle() {
        let catalogue = square_catalogue();
        let engine = Engine::new(&catalogue, TickClock::new(), 1);

        assert!(!engine.is_running());
        assert!(!engine.is_dropping());
        assert!(engine.current().is_none());
        assert_eq!(engine.tick_interval_ms(), DEFAULT_TICK_MS);
        assert_eq!(engine.scheduler().interval_ms(), None);
    }

    #[test]
    fn test_start_game_arms_tick() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);
        engine.start_game();

        assert!(engine.is_running());
        assert!(engine.current().is_some());
        assert_eq!(engine.scheduler().interval_ms(), Some(DEFAULT_TICK_MS));
        assert_eq!(engine.tick_interval(), Duration::from_millis(1250));

        let events = engine.take_events();
        assert!(matches!(events[0], EngineEvent::GameStarted { .. }));
        assert!(matches!(events[1], EngineEvent::Spawned { kind: 0, .. }));
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_speed_up_every_fourth_line() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);

        for i in 1..=8 {
            fill_row(engine.settled_mut(), SCENE_HEIGHT - 1);
            let cleared = engine.check_lines();
            assert_eq!(cleared.as_slice(), &[SCENE_HEIGHT - 1]);
            assert_eq!(engine.completed_lines(), i);
        }
        assert_eq!(engine.tick_interval_ms(), DEFAULT_TICK_MS - 2 * TICK_STEP_MS);
    }

    #[test]
    fn test_speed_is_floored() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);

        for _ in 0..(LINES_PER_SPEEDUP * 20) {
            fill_row(engine.settled_mut(), 5);
            engine.check_lines();
        }
        assert_eq!(engine.tick_interval_ms(), MIN_TICK_MS);
    }

    #[test]
    fn test_landing_spawns_next_object() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);
        engine.start_game();

        // A square spawns on rows 1..=2 and can fall 22 rows.
        for _ in 0..22 {
            engine.tick();
        }
        assert!(engine.settled().is_empty());

        engine.tick();
        assert!(engine.is_running());
        assert_eq!(engine.settled().len(), 4);
        assert!(engine.settled().is_occupied(GridPos::new(6, SCENE_HEIGHT - 1)));
        assert!(!engine.current().unwrap().fallen());
    }

    #[test]
    fn test_set_current_is_used_by_tick() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);
        engine.start_game();

        let obj = FallingObject::from_template(0, &catalogue.templates()[0], SkinId(4));
        engine.set_current(obj);
        engine.tick();
        assert!(engine.current().unwrap().fallen());
        assert_eq!(engine.current().unwrap().skin(), SkinId(4));
    }

    #[test]
    fn test_several_rows_cleared_in_one_pass() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);
        for row in 22..SCENE_HEIGHT {
            fill_row(engine.settled_mut(), row);
        }
        engine
            .settled_mut()
            .insert(Block::at(SkinId(5), GridPos::new(3, 21)));

        let cleared = engine.check_lines();

        assert_eq!(cleared.as_slice(), &[22, 23, 24]);
        assert_eq!(engine.completed_lines(), 3);
        assert_eq!(engine.settled().len(), 1);
        assert_eq!(
            engine.settled().get(GridPos::new(3, 24)).map(Block::skin),
            Some(SkinId(5))
        );
    }

    #[test]
    fn test_clear_across_a_gap_row() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);
        fill_row(engine.settled_mut(), 22);
        fill_row(engine.settled_mut(), 24);
        engine
            .settled_mut()
            .insert(Block::at(SkinId(5), GridPos::new(3, 23)));

        let cleared = engine.check_lines();

        // Removing 24 pulls the partial row 23 down onto row 24, which is not
        // checked again.
        assert_eq!(cleared.as_slice(), &[22, 24]);
        assert_eq!(engine.completed_lines(), 2);
        assert_eq!(engine.settled().len(), 1);
        assert!(engine.settled().is_occupied(GridPos::new(3, 24)));
        assert!(!engine.settled().is_line_complete(24));
    }

    #[test]
    fn test_event_log_is_bounded() {
        let catalogue = square_catalogue();
        let mut engine = Engine::new(&catalogue, TickClock::new(), 1);

        for _ in 0..EVENT_LOG_CAPACITY {
            engine.start_game();
        }
        let events = engine.take_events();
        assert_eq!(events.len(), EVENT_LOG_CAPACITY);
        assert!(matches!(events.last(), Some(EngineEvent::Spawned { .. })));
        assert!(matches!(events[0], EngineEvent::GameStarted { .. }));
        assert!(engine.take_events().is_empty());
    }
}
