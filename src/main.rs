//! Figgy terminal runner (default binary).
//!
//! Crossterm input, the framebuffer renderer from `figgy-term` and an
//! engine driven by a fixed-timestep [`TickClock`](figgy::core::TickClock).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use figgy::config::Config;
use figgy::core::{Engine, EngineEvent, TickClock};
use figgy::input::{handle_key_event, should_quit};
use figgy::term::{GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = Config::from_env();
    let catalogue = config.catalogue()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut engine = Engine::new(&catalogue, TickClock::new(), config.seed);
    let result = run(&mut term, &mut engine, config.frame_ms);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine<'_>, frame_ms: u32) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(u64::from(frame_ms));
    let mut last_event: Option<EngineEvent> = None;
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(engine, last_event, Viewport::new(w, h));
        term.draw(&fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.apply_action(action);
                    }
                }
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            engine.advance(elapsed_ms);
        }

        if let Some(event) = engine.take_events().pop() {
            last_event = Some(event);
        }
    }
}
