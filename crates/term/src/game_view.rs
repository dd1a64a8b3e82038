//! GameView: maps an `Engine` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Blocks arrive through the core
//! [`Renderer`] interface as skin + pixel position and are painted as
//! `cell_w` x `cell_h` terminal cells.

use crate::core::{Catalogue, Engine, EngineEvent, Renderer, Scheduler};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PixelPos, SkinId, SCENE_HEIGHT, SCENE_WIDTH};

const FIELD_BG: Rgb = Rgb::new(255, 255, 255);
const PANEL_MIN_WIDTH: u16 = 14;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal view of the playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered field in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            SCENE_WIDTH as u16 * self.cell_w + 2,
            SCENE_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into<S: Scheduler>(
        &self,
        engine: &Engine<'_, S>,
        last_event: Option<EngineEvent>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let field = CellStyle::new(FIELD_BG, FIELD_BG);
        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', field);
        draw_border(fb, start_x, start_y, frame_w, frame_h);

        engine.draw(&mut FieldPainter {
            view: self,
            fb: &mut *fb,
            catalogue: engine.catalogue(),
            origin: (start_x + 1, start_y + 1),
        });

        self.draw_side_panel(fb, engine, last_event, viewport, start_x + frame_w + 2, start_y);

        if !engine.is_running() {
            let text = if engine.current().is_some() {
                "GAME OVER"
            } else {
                "PRESS N"
            };
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<S: Scheduler>(
        &self,
        engine: &Engine<'_, S>,
        last_event: Option<EngineEvent>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(engine, last_event, viewport, &mut fb);
        fb
    }

    fn draw_side_panel<S: Scheduler>(
        &self,
        fb: &mut FrameBuffer,
        engine: &Engine<'_, S>,
        last_event: Option<EngineEvent>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(PANEL_MIN_WIDTH) > viewport.width {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::default();

        let mut y = start_y;
        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, engine.completed_lines(), value);
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, engine.tick_interval_ms(), value);
        let digits = (engine.tick_interval_ms().checked_ilog10().unwrap_or(0) + 1) as u16;
        fb.put_str(panel_x + digits, y + 1, "ms", value);
        y += 3;

        if let Some(event) = last_event {
            fb.put_str(panel_x, y, "LAST", label);
            fb.put_str(panel_x, y + 1, describe(event), CellStyle { dim: true, ..value });
        }
    }
}

/// Paints blocks reported by the engine onto the field area.
struct FieldPainter<'a> {
    view: &'a GameView,
    fb: &'a mut FrameBuffer,
    catalogue: &'a Catalogue,
    origin: (u16, u16),
}

impl Renderer for FieldPainter<'_> {
    fn draw_block(&mut self, skin: SkinId, pos: PixelPos) {
        let cell = pos.to_grid();
        if !cell.in_bounds() {
            return;
        }
        let fg = self
            .catalogue
            .skin(skin)
            .map(|s| Rgb::from(s.rgb))
            .unwrap_or(Rgb::new(128, 128, 128));
        let style = CellStyle::new(fg, FIELD_BG);
        let x = self.origin.0 + cell.x as u16 * self.view.cell_w;
        let y = self.origin.1 + cell.y as u16 * self.view.cell_h;
        self.fb
            .fill_rect(x, y, self.view.cell_w, self.view.cell_h, '█', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = CellStyle::default();
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let style = CellStyle {
        bold: true,
        ..CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
    };
    fb.put_str(
        x + w.saturating_sub(text_w) / 2,
        y + h / 2,
        text,
        style,
    );
}

fn describe(event: EngineEvent) -> &'static str {
    match event {
        EngineEvent::GameStarted { .. } => "started",
        EngineEvent::Spawned { .. } => "spawned",
        EngineEvent::Landed => "landed",
        EngineEvent::LineCleared { .. } => "line!",
        EngineEvent::SpeedUp { .. } => "faster!",
        EngineEvent::GameOver { .. } => "game over",
    }
}
