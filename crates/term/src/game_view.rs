//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Grid row 0 is the floor, so it lands on the *last* framebuffer row of the
//! play area.

use crate::core::shapes::shape_for_color;
use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, ColorId};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const UNKNOWN_FG: Rgb = Rgb::new(160, 160, 160);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the play area for one frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    grid_height: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).cell(' '));

        let board_px_w = snap.width.saturating_mul(self.cell_w);
        let board_px_h = snap.height.saturating_mul(self.cell_h);
        let w = board_px_w.saturating_add(2);
        let h = board_px_h.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
            grid_height: snap.height,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for row in 0..snap.height as i16 {
            for col in 0..snap.width as i16 {
                let cell = Cell::new(col, row);
                match snap.occupant(col, row) {
                    Some(color) => self.draw_block(fb, frame, cell, color),
                    None => self.fill_cell(fb, frame, cell, '·', empty),
                }
            }
        }

        if self.show_ghost {
            if let Some(ghost) = snap.ghost_cells() {
                let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                for cell in ghost {
                    self.fill_cell(fb, frame, cell, '░', style);
                }
            }
        }

        if let Some(active) = &snap.active {
            for &cell in active.cells.iter() {
                self.draw_block(fb, frame, cell, active.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over() {
            draw_overlay(fb, frame, &["GAME OVER", "r: restart"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left character of grid `cell`, if it is
    /// inside the play area.
    fn cell_origin(&self, frame: Frame, cell: Cell) -> Option<(u16, u16)> {
        if cell.col < 0 || cell.row < 0 || cell.row as u16 >= frame.grid_height {
            return None;
        }
        let screen_row = frame.grid_height - 1 - cell.row as u16;
        let x = frame.x + 1 + cell.col as u16 * self.cell_w;
        let y = frame.y + 1 + screen_row * self.cell_h;
        if x + self.cell_w > frame.x + frame.w - 1 {
            return None;
        }
        Some((x, y))
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, cell: Cell, ch: char, style: CellStyle) {
        if let Some((x, y)) = self.cell_origin(frame, cell) {
            fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, cell: Cell, color: ColorId) {
        let fg = shape_for_color(color)
            .map(|shape| Rgb::from(shape.color))
            .unwrap_or(UNKNOWN_FG);
        self.fill_cell(fb, frame, cell, '█', CellStyle::new(fg, PLAY_BG).bold());
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let next = get_shape(snap.next);
        let next_style = CellStyle::new(Rgb::from(next.color), SCREEN_BG).bold();
        let (min_dx, min_dy, _, box_h) = next.bounds();
        // Preview rows top-down, 2 columns per block like the grid.
        for &(dx, dy) in next.offsets {
            let px = panel_x + ((dx - min_dx) as u16) * 2;
            let py = y + (box_h - 1 - (dy - min_dy)) as u16;
            fb.fill_rect(px, py, 2, 1, '█', next_style);
        }
        y = y.saturating_add(box_h as u16 + 1);

        fb.put_str(panel_x, y, "SPEED", label);
        let end = fb.put_u32(panel_x, y.saturating_add(1), snap.fall_interval_ms, value);
        fb.put_str(end, y.saturating_add(1), "ms", value.dim());
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h, .. } = frame;
    if w < 2 || h < 2 {
        return;
    }

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

fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let top = frame
        .y
        .saturating_add(frame.h / 2)
        .saturating_sub(lines.len() as u16 / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, top + i as u16, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Game, GameConfig};
    use crate::types::{Command, ShapeId};

    fn game(script: &[ShapeId]) -> Game {
        let config = GameConfig {
            script: script.to_vec(),
            ..GameConfig::default()
        };
        Game::new(config).unwrap()
    }

    #[test]
    fn test_floor_row_is_drawn_at_bottom_of_play_area() {
        let mut g = game(&[ShapeId::I]);
        g.apply(Command::HardDrop);
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&g.snapshot(), Viewport::new(22, 22));

        // Frame 22x22: border at y=0 and y=21, grid row 0 at y=20.
        let bottom = fb.row_text(20);
        assert!(bottom.starts_with('│'));
        assert!(bottom.contains("████████"));
        assert!(!fb.row_text(1).contains('█'));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut grid = crate::core::Grid::new(10, 20);
        grid.set(Cell::new(5, 19), Some(ColorId(0)));
        let config = GameConfig {
            script: vec![ShapeId::T],
            ..GameConfig::default()
        };
        let mut g = Game::with_grid(config, grid).unwrap();
        g.tick();
        assert!(g.is_game_over());

        let fb = GameView::default().render(&g.snapshot(), Viewport::new(40, 24));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("GAME OVER"));
    }

    #[test]
    fn test_side_panel_shows_score_and_next() {
        let mut g = game(&[ShapeId::O, ShapeId::L]);
        g.apply(Command::HardDrop);
        let fb = GameView::default().render(&g.snapshot(), Viewport::new(60, 24));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("SCORE"));
        assert!(text.contains("NEXT"));
        assert!(text.contains(&g.score().to_string()));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let g = game(&[ShapeId::T]);
        let fb = GameView::default().render(&g.snapshot(), Viewport::new(3, 2));
        assert_eq!((fb.width(), fb.height()), (3, 2));
    }
}
