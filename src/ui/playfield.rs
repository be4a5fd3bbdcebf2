//! The playing field drawn onto terminal cells.
//!
//! Logical field coordinates are scaled onto the cell grid of the play area.
//! A cell is painted for a shape when the cell's center lies inside the
//! shape. [`TerminalSurface`] reports the painted cells back as bounding
//! boxes, so collisions match exactly what is on screen.

use crate::core::config::FieldSize;
use crate::core::geometry::Rect;
use crate::core::obstacle::Obstacle;
use crate::core::player::Player;
use crate::core::ports::Surface;
use crate::core::session::Session;
use ratatui::{
    layout,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const PLAYER_COLOR: Color = Color::Rgb(0xFF, 0x6B, 0x6B);
pub const WALL_COLOR: Color = Color::Rgb(0x4E, 0xCD, 0xC4);
pub const BACKGROUND_COLOR: Color = Color::Rgb(0x29, 0x2F, 0x36);

/// Inclusive cell range `(first, last)` covered by a shape on one axis.
pub type CellSpan = (u16, u16);

/// Presentation adapter for a terminal play area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSurface {
    pub field: FieldSize,
    pub cells: layout::Rect,
}

impl TerminalSurface {
    pub fn new(field: FieldSize, cells: layout::Rect) -> Self {
        Self { field, cells }
    }

    fn has_cells(&self) -> bool {
        self.cells.width > 0 && self.cells.height > 0
    }

    fn cell_width(&self) -> f64 {
        self.field.width / self.cells.width as f64
    }

    fn cell_height(&self) -> f64 {
        self.field.height / self.cells.height as f64
    }

    /// Columns whose centers fall in `[left, right)`.
    fn col_span(&self, left: f64, right: f64) -> Option<CellSpan> {
        cell_span(left, right, self.cell_width(), self.cells.width)
    }

    /// Rows whose centers fall in `[top, bottom)`.
    fn row_span(&self, top: f64, bottom: f64) -> Option<CellSpan> {
        cell_span(top, bottom, self.cell_height(), self.cells.height)
    }

    /// Cells painted for the player. Never empty: a player smaller than a
    /// cell still shows up in the cell holding its center.
    pub fn player_cells(&self, player: &Player) -> Option<(CellSpan, CellSpan)> {
        if !self.has_cells() {
            return None;
        }
        let r = player.bounds();
        let cols = self
            .col_span(r.left, r.right)
            .unwrap_or_else(|| center_cell((r.left + r.right) / 2.0, self.cell_width(), self.cells.width));
        let rows = self
            .row_span(r.top, r.bottom)
            .unwrap_or_else(|| center_cell((r.top + r.bottom) / 2.0, self.cell_height(), self.cells.height));
        Some((cols, rows))
    }

    /// Cells painted for a wall. A wall narrower than a cell takes the
    /// column holding its center, so it cannot vanish between columns.
    /// `None` when the wall's center is off the field or it has no height.
    pub fn obstacle_cells(&self, obstacle: &Obstacle) -> Option<(CellSpan, CellSpan)> {
        if !self.has_cells() {
            return None;
        }
        let cols = match self.col_span(obstacle.x, obstacle.right()) {
            Some(cols) => cols,
            None => {
                let center = obstacle.x + obstacle.width / 2.0;
                if !(0.0..self.field.width).contains(&center) {
                    return None;
                }
                center_cell(center, self.cell_width(), self.cells.width)
            }
        };
        let rows = self.row_span(obstacle.top, obstacle.bottom())?;
        Some((cols, rows))
    }

    /// Logical rectangle covered by a block of cells.
    fn cells_to_rect(&self, (cols, rows): (CellSpan, CellSpan)) -> Rect {
        let cw = self.cell_width();
        let ch = self.cell_height();
        Rect::new(
            cols.0 as f64 * cw,
            rows.0 as f64 * ch,
            (cols.1 as f64 + 1.0) * cw,
            (rows.1 as f64 + 1.0) * ch,
        )
    }
}

impl Surface for TerminalSurface {
    fn field_size(&self) -> FieldSize {
        self.field
    }

    fn player_bounds(&self, player: &Player) -> Rect {
        match self.player_cells(player) {
            Some(cells) => self.cells_to_rect(cells),
            None => player.bounds(),
        }
    }

    fn obstacle_bounds(&self, obstacle: &Obstacle) -> Rect {
        if !self.has_cells() {
            return obstacle.bounds();
        }
        match self.obstacle_cells(obstacle) {
            Some(cells) => self.cells_to_rect(cells),
            // Nothing drawn, nothing to hit
            None => Rect::new(obstacle.x, obstacle.top, obstacle.x, obstacle.top),
        }
    }
}

fn cell_span(lo: f64, hi: f64, cell: f64, count: u16) -> Option<CellSpan> {
    if count == 0 || cell <= 0.0 {
        return None;
    }
    let first = (lo / cell - 0.5).ceil().max(0.0);
    let last = ((hi / cell - 0.5).ceil() - 1.0).min(count as f64 - 1.0);
    if last < first {
        return None;
    }
    Some((first as u16, last as u16))
}

fn center_cell(center: f64, cell: f64, count: u16) -> CellSpan {
    let idx = (center / cell).floor().clamp(0.0, count.saturating_sub(1) as f64) as u16;
    (idx, idx)
}

fn contains(span: &(CellSpan, CellSpan), col: u16, row: u16) -> bool {
    let ((c0, c1), (r0, r1)) = *span;
    col >= c0 && col <= c1 && row >= r0 && row <= r1
}

/// Render the player and walls into the surface's play area. While idle the
/// player stays where the last round left it.
pub fn render_playfield(frame: &mut Frame, surface: &TerminalSurface, session: &Session) {
    let area = surface.cells;
    if area.width == 0 || area.height == 0 {
        return;
    }

    let player = surface.player_cells(&session.player);
    let walls: Vec<_> = session
        .obstacles
        .iter()
        .filter_map(|o| surface.obstacle_cells(o))
        .collect();

    let background = Style::default().bg(BACKGROUND_COLOR);
    let mut lines = Vec::with_capacity(area.height as usize);

    for row in 0..area.height {
        let mut spans = Vec::with_capacity(area.width as usize);
        for col in 0..area.width {
            if player.as_ref().is_some_and(|p| contains(p, col, row)) {
                spans.push(Span::styled("█", background.fg(PLAYER_COLOR)));
            } else if walls.iter().any(|w| contains(w, col, row)) {
                spans.push(Span::styled("█", background.fg(WALL_COLOR)));
            } else {
                spans.push(Span::styled(" ", background));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
