use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::Palette;
use crate::food::Food;
use crate::game::Renderer;
use crate::grid::{Cell, GridSize};
use crate::snake::Snake;

/// One grid cell is two terminal columns wide so it reads as a square.
const CELL_COLUMNS: u16 = 2;
const GLYPH_CELL: &str = "██";

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Something the renderer can place on the board.
pub trait Drawable {
    fn position(&self) -> Cell;
    fn color(&self, palette: &Palette) -> Color;
}

impl Drawable for Food {
    fn position(&self) -> Cell {
        Food::position(self)
    }

    fn color(&self, palette: &Palette) -> Color {
        palette.food
    }
}

/// A single body cell, tagged with whether it is the head.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub cell: Cell,
    pub is_head: bool,
}

impl Drawable for Segment {
    fn position(&self) -> Cell {
        self.cell
    }

    fn color(&self, palette: &Palette) -> Color {
        if self.is_head {
            palette.snake_head
        } else {
            palette.snake_body
        }
    }
}

/// Renders the board, food and snake from immutable state.
pub fn render(
    frame: &mut Frame<'_>,
    snake: &Snake,
    food: &Food,
    bounds: GridSize,
    palette: &Palette,
) {
    let area = frame.area();
    let Some(board) = board_area(area, bounds) else {
        render_too_small(frame, area, bounds);
        return;
    };

    let background = Style::new().bg(palette.background);
    let inner = if board.framed {
        let block = Block::bordered()
            .title(" snake ")
            .border_style(Style::new().fg(palette.border))
            .style(background);
        let inner = block.inner(board.outer);
        frame.render_widget(block, board.outer);
        inner
    } else {
        frame.render_widget(Block::new().style(background), board.outer);
        board.outer
    };

    draw(frame, inner, food, palette);

    // Tail first so the head stays visible when it shares a cell.
    let body = snake.body();
    for (index, cell) in body.iter().enumerate().rev() {
        let segment = Segment {
            cell: *cell,
            is_head: index == 0,
        };
        draw(frame, inner, &segment, palette);
    }
}

fn draw<D: Drawable + ?Sized>(frame: &mut Frame<'_>, inner: Rect, item: &D, palette: &Palette) {
    let Some((x, y)) = cell_to_terminal(inner, item.position()) else {
        return;
    };

    let style = Style::new().fg(item.color(palette)).bg(palette.background);
    frame.buffer_mut().set_string(x, y, GLYPH_CELL, style);
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, bounds: GridSize) {
    let (width, height) = board_size(bounds, false);
    let message = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {width}x{height}, have {}x{}", area.width, area.height)),
    ];

    frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), area);
}

/// Returns true when `area` can show the whole board, with or without a frame.
#[must_use]
pub fn board_fits(area: Rect, bounds: GridSize) -> bool {
    board_area(area, bounds).is_some()
}

/// Where the board goes and whether it has room for its frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Board {
    outer: Rect,
    framed: bool,
}

/// Terminal columns and rows the board needs.
fn board_size(bounds: GridSize, framed: bool) -> (u32, u32) {
    let frame = if framed { 2 } else { 0 };
    (
        u32::from(bounds.width) * u32::from(CELL_COLUMNS) + frame,
        u32::from(bounds.height) + frame,
    )
}

/// Prefers a framed board; drops the frame when only the cells fit.
fn board_area(area: Rect, bounds: GridSize) -> Option<Board> {
    [true, false].into_iter().find_map(|framed| {
        let (width, height) = board_size(bounds, framed);
        let width = u16::try_from(width).ok()?;
        let height = u16::try_from(height).ok()?;
        if width > area.width || height > area.height {
            return None;
        }

        Some(Board {
            outer: Rect {
                x: area.x + (area.width - width) / 2,
                y: area.y + (area.height - height) / 2,
                width,
                height,
            },
            framed,
        })
    })
}

fn cell_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

/// Draws into the real terminal and owns its raw-mode session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalRenderer {
    terminal: AppTerminal,
    bounds: GridSize,
    palette: Palette,
}

impl TerminalRenderer {
    /// Enters raw mode, switches to the alternate screen and creates a ratatui terminal.
    pub fn enter(bounds: GridSize, palette: Palette) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                bounds,
                palette,
            }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, snake: &Snake, food: &Food) -> io::Result<()> {
        let bounds = self.bounds;
        let palette = self.palette;
        self.terminal
            .draw(|frame| render(frame, snake, food, bounds, &palette))?;
        Ok(())
    }

    fn board_visible(&mut self) -> io::Result<bool> {
        let size = self.terminal.size()?;
        Ok(board_fits(Rect::new(0, 0, size.width, size.height), self.bounds))
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
