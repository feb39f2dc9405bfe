//! Crossterm terminal driver for maze-ui.
//!
//! Provides a [`CrosstermDriver`] that implements [`maze_ui::Driver`],
//! putting the terminal in raw mode on an alternate screen and drawing
//! frame diffs cell by cell.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use maze_ui::{AttrMask, Color, Context, Driver, Frame, Key, ModMask, Msg, Style};

/// Maps a [`maze_ui::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate a terminal event into a message. Key releases and repeats are
/// dropped so that each physical press is seen once.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => to_key(code).map(|key| Msg::KeyDown {
            key,
            modifiers: to_mod_mask(modifiers),
            time: Instant::now(),
        }),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time: Instant::now(),
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    poll_interval: Duration,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(16),
        }
    }

    /// How long each poll waits for input before the loop ticks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::debug!("crossterm: terminal initialised");
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(self.poll_interval)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();
        let mut current: Option<Style> = None;

        for fc in &frame.cells {
            let p = fc.pos;
            let st = fc.cell.style;
            queue!(stdout, cursor::MoveTo(p.x as u16, p.y as u16))?;

            if current != Some(st) {
                queue!(
                    stdout,
                    style::SetAttribute(Attribute::Reset),
                    SetForegroundColor(to_ct_color(st.fg)),
                    SetBackgroundColor(to_ct_color(st.bg))
                )?;
                if st.attrs.contains(AttrMask::BOLD) {
                    queue!(stdout, style::SetAttribute(Attribute::Bold))?;
                }
                if st.attrs.contains(AttrMask::DIM) {
                    queue!(stdout, style::SetAttribute(Attribute::Dim))?;
                }
                if st.attrs.contains(AttrMask::REVERSE) {
                    queue!(stdout, style::SetAttribute(Attribute::Reverse))?;
                }
                current = Some(st);
            }

            write!(stdout, "{}", fc.cell.ch)?;
        }

        queue!(stdout, style::SetAttribute(Attribute::Reset))?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("crossterm: terminal restored");
    }
}
