//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{Color, GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

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

/// Board layout in terminal cells.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Board frame rectangle inside the viewport, border included.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2 + PANEL_W) / 2,
            y: viewport.height.saturating_sub(board_h + 2) / 2,
            w: board_w + 2,
            h: board_h + 2,
        };

        let well = GlyphStyle::default().on(WELL_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', well);
        let border = GlyphStyle::fg(Rgb::new(200, 200, 200));
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, frame, x as i8, y as i8, *color),
                    None => self.fill_cell(
                        fb,
                        frame,
                        x as i8,
                        y as i8,
                        '·',
                        GlyphStyle {
                            dim: true,
                            ..GlyphStyle::fg(Rgb::new(90, 90, 100)).on(WELL_BG)
                        },
                    ),
                }
            }
        }

        if snap.phase != GamePhase::Menu {
            let ghost_style = GlyphStyle::fg(Rgb::from(snap.active.color).shade()).on(WELL_BG);
            for (x, y) in snap.ghost_cells() {
                self.fill_cell(fb, frame, x, y, '░', ghost_style);
            }
            for (x, y) in snap.active.cells() {
                self.draw_block(fb, frame, x, y, snap.active.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            GamePhase::Menu => self.draw_overlay(fb, frame, "BLOCKFALL", "ENTER to start"),
            GamePhase::Paused => self.draw_overlay(fb, frame, "PAUSED", "P resume  Q menu"),
            GamePhase::GameOver => self.draw_overlay(fb, frame, "GAME OVER", "ENTER to restart"),
            GamePhase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, color: Color) {
        let style = GlyphStyle::fg(Rgb::from(color)).on(WELL_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    /// Cells outside the board (spawn buffer, walls) are not drawn.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        ch: char,
        style: GlyphStyle,
    ) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(PANEL_W / 2) > viewport.width {
            return;
        }

        let label = GlyphStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = GlyphStyle::fg(Rgb::new(200, 200, 200));
        let mut y = frame.y;

        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                let style = if snap.can_hold {
                    piece_style(kind)
                } else {
                    GlyphStyle { dim: true, ..piece_style(kind) }
                };
                fb.put_str(panel_x, y, kind.as_str(), style);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for kind in snap.next_queue {
            fb.put_str(panel_x, y, kind.as_str(), piece_style(kind));
            y += 1;
        }
        y += 1;

        for (name, n) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LINES", snap.lines),
            ("PIECES", snap.piece_count),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 7, y, n, value);
            y += 1;
        }

        if snap.active.spin {
            y += 1;
            fb.put_str(panel_x, y, "SPIN!", GlyphStyle::fg(Rgb::from(Color::PURPLE)).bold());
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, title: &str, hint: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let centered = |text: &str| {
            let text_w = text.chars().count() as u16;
            frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2)
        };
        let title_style = GlyphStyle::fg(Rgb::new(255, 255, 255)).bold();
        let hint_style = GlyphStyle::fg(Rgb::new(170, 170, 170));
        fb.put_str(centered(title), mid_y.saturating_sub(1), title, title_style);
        fb.put_str(centered(hint), mid_y.saturating_add(1), hint, hint_style);
    }
}

/// Columns reserved to the right of the board frame.
const PANEL_W: u16 = 16;

fn piece_style(kind: PieceKind) -> GlyphStyle {
    GlyphStyle::fg(Rgb::from(kind.color())).bold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GameConfig;
    use crate::core::{Bag, GameState};

    fn viewport() -> Viewport {
        Viewport::new(60, 26)
    }

    fn playing(upcoming: &[PieceKind]) -> GameState {
        let mut state = GameState::with_bag(GameConfig::default(), Bag::with_upcoming(2, upcoming));
        state.start();
        state
    }

    fn count_char(fb: &FrameBuffer, ch: char) -> usize {
        (0..fb.height())
            .map(|y| fb.row_text(y).chars().filter(|c| *c == ch).count())
            .sum()
    }

    #[test]
    fn menu_overlay_hides_active_piece() {
        let state = GameState::new(GameConfig::default(), 4);
        let fb = GameView::default().render(&state.snapshot(), viewport());
        assert!(fb.contains_text("BLOCKFALL"));
        assert!(fb.contains_text("ENTER to start"));
        assert_eq!(count_char(&fb, '█'), 0);
    }

    #[test]
    fn playing_draws_piece_and_ghost() {
        let state = playing(&[PieceKind::O]);
        let fb = GameView::default().render(&state.snapshot(), viewport());
        // Four minos, two columns each.
        assert_eq!(count_char(&fb, '█'), 8);
        assert_eq!(count_char(&fb, '░'), 8);
        assert!(fb.contains_text("HOLD"));
        assert!(fb.contains_text("NEXT"));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("HIGH"));
    }

    #[test]
    fn locked_cells_keep_piece_color() {
        let mut state = playing(&[PieceKind::L, PieceKind::O]);
        state.apply_hard_drop();
        state.tick(1);
        let fb = GameView::default().render(&state.snapshot(), viewport());
        let orange = Rgb::from(Color::ORANGE);
        let found = (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter_map(|(x, y)| fb.get(x, y))
            .any(|g| g.ch == '█' && g.style.fg == orange);
        assert!(found);
    }

    #[test]
    fn pause_and_game_over_overlays() {
        let mut state = playing(&[PieceKind::T]);
        state.toggle_pause();
        let fb = GameView::default().render(&state.snapshot(), viewport());
        assert!(fb.contains_text("PAUSED"));

        let mut snap = state.snapshot();
        snap.phase = GamePhase::GameOver;
        let fb = GameView::default().render(&snap, viewport());
        assert!(fb.contains_text("GAME OVER"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let state = playing(&[PieceKind::I]);
        let fb = GameView::default().render(&state.snapshot(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
