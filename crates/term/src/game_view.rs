//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure, no I/O. The layout is a bordered well on the left and a status panel
//! (score, level, lines, next-piece preview) on the right, with a centered
//! overlay line for the idle, paused and game-over states.

use crate::core::{ActiveSnapshot, GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const PREVIEW_CELLS: u16 = 4;

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

/// Where the well sits vertically inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corner of the well frame and the cell scale, resolved per frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let layout = self.layout(viewport);
        let border = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            Style::new(WELL_BG, WELL_BG),
        );
        draw_border(fb, layout.x, layout.y, layout.frame_w, layout.frame_h, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, &layout, x as u16, y as u16, *color),
                    None => self.draw_empty(fb, &layout, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = snap.active.as_ref() {
            self.draw_active(fb, &layout, active);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.paused() {
            self.draw_overlay(fb, &layout, 0, "PAUSED");
        } else if snap.game_over() {
            self.draw_game_over(fb, &layout, snap);
        } else if snap.run_state == RunState::Idle {
            self.draw_overlay(fb, &layout, 0, "PRESS ENTER");
        }
    }

    /// Allocates a fresh framebuffer; prefer [`GameView::render_into`] in a loop.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let panel_w = PREVIEW_CELLS * self.cell_w + 2;
        let x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            x,
            y,
            frame_w,
            frame_h,
        }
    }

    fn cell_origin(&self, layout: &Layout, x: u16, y: u16) -> (u16, u16) {
        (
            layout.x + 1 + x * self.cell_w,
            layout.y + 1 + y * self.cell_h,
        )
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16, color: PieceKind) {
        let (px, py) = self.cell_origin(layout, x, y);
        let style = Style::new(piece_color(color), WELL_BG).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16) {
        let (px, py) = self.cell_origin(layout, x, y);
        let style = Style::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '·', style);
    }

    fn draw_active(&self, fb: &mut FrameBuffer, layout: &Layout, active: &ActiveSnapshot) {
        for (x, y) in active.cells() {
            // Cells above the top edge stay hidden until the piece falls into view.
            if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                continue;
            }
            self.draw_block(fb, layout, x as u16, y as u16, active.color);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, &snap.next.shape, snap.next.color);
    }

    /// Next piece in a fixed 4x4 box, aligned to its top-left corner.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape, color: PieceKind) {
        let empty = Style::new(PANEL_BG, PANEL_BG);
        fb.fill_rect(
            x,
            y,
            PREVIEW_CELLS * self.cell_w,
            PREVIEW_CELLS * self.cell_h,
            ' ',
            empty,
        );
        let style = Style::new(piece_color(color), PANEL_BG).bold();
        for (row, col) in shape.occupied() {
            fb.fill_rect(
                x + col as u16 * self.cell_w,
                y + row as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        self.draw_overlay(fb, layout, 0, "GAME OVER");
        self.draw_overlay_stat(fb, layout, 1, "SCORE ", snap.score);
        self.draw_overlay_stat(fb, layout, 2, "LEVEL ", snap.level);
    }

    /// Overlay row `line`, counted from the vertical middle of the well.
    fn overlay_origin(&self, layout: &Layout, line: u16, text_w: u16) -> (u16, u16) {
        let x = layout
            .x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let y = layout
            .y
            .saturating_add(layout.frame_h / 2)
            .saturating_add(line);
        (x, y)
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, line: u16, text: &str) {
        let (x, y) = self.overlay_origin(layout, line, text.chars().count() as u16);
        fb.put_str(x, y, text, overlay_style());
    }

    /// `label` immediately followed by `value`, centered as one string.
    fn draw_overlay_stat(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        line: u16,
        label: &str,
        value: u32,
    ) {
        let label_w = label.chars().count() as u16;
        let (x, y) = self.overlay_origin(layout, line, label_w + decimal_width(value));
        fb.put_str(x, y, label, overlay_style());
        fb.put_u32(x.saturating_add(label_w), y, value, overlay_style());
    }
}

fn overlay_style() -> Style {
    Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold()
}

fn decimal_width(mut value: u32) -> u16 {
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }
    width
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x + 1..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y + 1..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

/// Display color for a color tag.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
