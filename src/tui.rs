use crate::audio::{Audio, Sound};
use crate::consts::BACKGROUND_COLOR;
use crate::grid::{GridLayout, Pixel, Position};
use crate::heading::Heading;
use crate::input::TapEvent;
use crate::render::{Canvas, FrameOutcome, Renderer, Rgb, Sprite, TextSize, TextStyle};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::warn;
use ratatui::prelude::*;
use std::io::{self, Stdout, Write};

// A column is one pixel across, a row two pixels down
pub const PIXELS_PER_ROW: i32 = 2;

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

pub fn screen_pixels(cols: u16, rows: u16) -> (i32, i32) {
    (cols as i32, rows as i32 * PIXELS_PER_ROW)
}

pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    layout: GridLayout,
}

impl TerminalRenderer {
    pub fn new(layout: GridLayout) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(TerminalRenderer { terminal, layout })
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, draw: &mut dyn FnMut(&mut dyn Canvas)) -> io::Result<FrameOutcome> {
        let size = self.terminal.size()?;
        if size.width == 0 || size.height == 0 {
            return Ok(FrameOutcome::Skipped);
        }

        let layout = self.layout;
        // Terminal::draw flushes the frame once the closure returns
        self.terminal.draw(|frame| {
            let area = frame.area();
            let mut canvas = BufferCanvas {
                buf: frame.buffer_mut(),
                area,
                layout,
            };
            draw(&mut canvas);
        })?;
        Ok(FrameOutcome::Presented)
    }
}

pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    layout: GridLayout,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, layout: GridLayout) -> Self {
        let area = buf.area;
        BufferCanvas { buf, area, layout }
    }

    fn cell_at(&mut self, col: i32, row: i32) -> Option<&mut ratatui::buffer::Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (u16::try_from(col).ok()?, u16::try_from(row).ok()?);
        if col >= self.area.width || row >= self.area.height {
            return None;
        }
        self.buf.cell_mut((self.area.x + col, self.area.y + row))
    }
}

fn head_symbol(heading: Heading) -> &'static str {
    match heading {
        Heading::Up => "^",
        Heading::Right => ">",
        Heading::Down => "v",
        Heading::Left => "<",
    }
}

impl Canvas for BufferCanvas<'_> {
    fn draw_background(&mut self) {
        self.buf
            .set_style(self.area, Style::default().bg(Color::from(BACKGROUND_COLOR)));
    }

    fn draw_sprite(&mut self, sprite: Sprite, cell: Position) {
        let (symbol, style) = match sprite {
            Sprite::Head(heading) => (
                head_symbol(heading),
                Style::default().fg(Color::Black).bg(Color::LightGreen),
            ),
            Sprite::Body => (" ", Style::default().bg(Color::Green)),
            Sprite::Food => (" ", Style::default().bg(Color::LightRed)),
        };

        let top_left = self.layout.to_pixel(cell);
        let cs = self.layout.cell_size;
        let first_row = top_left.y.div_euclid(PIXELS_PER_ROW);
        let last_row = ((top_left.y + cs).div_euclid(PIXELS_PER_ROW)).max(first_row + 1);

        for row in first_row..last_row {
            for col in top_left.x..top_left.x + cs {
                if let Some(c) = self.cell_at(col, row) {
                    c.set_symbol(symbol).set_style(style);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, at: Pixel, style: TextStyle) {
        let width = text.chars().count() as i32;
        let row = at.y.div_euclid(PIXELS_PER_ROW);
        let start = if style.centered { at.x - width / 2 } else { at.x };

        let mut text_style = Style::default().fg(Color::from(style.color));
        if style.size == TextSize::Large {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }

        for (i, ch) in text.chars().enumerate() {
            if let Some(c) = self.cell_at(start + i as i32, row) {
                c.set_char(ch).set_style(text_style);
            }
        }
    }
}

pub struct TerminalBell {
    out: Stdout,
}

impl TerminalBell {
    pub fn new() -> Self {
        TerminalBell { out: io::stdout() }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio for TerminalBell {
    fn play(&mut self, sound: Sound) {
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            warn!("Could not play {:?}: {}", sound, e);
        }
    }
}

// Restore runs however far setup got; the first error wins
pub fn with_terminal<T>(
    setup: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> Result<T, crate::Error>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T, crate::Error> {
    let result = setup().map_err(crate::Error::from).and_then(|_| body());
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAction {
    Tap(TapEvent),
    ToggleLoop,
    Quit,
}

pub fn host_action(event: &Event, layout: &GridLayout, paused: bool) -> Option<HostAction> {
    match event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            ..
        }) => Some(HostAction::Tap(TapEvent { x: *column as i32 })),
        Event::Key(key) if key.kind == KeyEventKind::Press => key_action(key, layout, paused),
        _ => None,
    }
}

fn key_action(key: &KeyEvent, layout: &GridLayout, paused: bool) -> Option<HostAction> {
    let left = TapEvent { x: 0 };
    let right = TapEvent {
        x: layout.pixel_width() - 1,
    };

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HostAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(HostAction::Quit),
        KeyCode::Char('p') => Some(HostAction::ToggleLoop),
        KeyCode::Left | KeyCode::Char('a') => Some(HostAction::Tap(left)),
        KeyCode::Right | KeyCode::Char('d') => Some(HostAction::Tap(right)),
        // Any tap starts a game, but while playing a blind tap would steer
        KeyCode::Char(' ') | KeyCode::Enter if paused => Some(HostAction::Tap(left)),
        _ => None,
    }
}
