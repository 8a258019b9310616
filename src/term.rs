use crate::{Cell, Coords, TermInt};
use crate::render::{Canvas, Paint};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result, bail};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};

/// Terminal columns per board cell.
const CELL_COLUMNS: TermInt = 2;

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    frame: Coords,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    /// Checks that a bordered board of `board` cells plus a status line fits
    /// in the terminal.
    pub fn new(board: Coords) -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading size")?;
        let frame = (board.0 * CELL_COLUMNS + 2, board.1 + 2);

        if width < frame.0 || height < frame.1 + 1 {
            bail!(
                "terminal is {}x{}, the board needs at least {}x{}",
                width, height, frame.0, frame.1 + 1
            );
        }

        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, frame, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading key")? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO).context("Error polling events")? {
            if let Event::Key(ev) = read().context("Error reading key")? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = self.frame;
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    /// Writes `text` on the line below the board, blanking the rest of it.
    pub fn print_status(&mut self, text: &str) -> Result<()> {
        let y = self.frame.1;
        let mut chars = text.chars();

        for x in 0..self.frame.0 {
            self.print_at((x, y), chars.next().unwrap_or(' '))?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.frame.0 / 2, self.frame.1 / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore what was under the box from the screen buffer
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            for x in msg.top_left.0..msg.top_left.0 + msg.width {
                let ch = self.screen[self.index((x, y))];
                self.print_at_no_save((x, y), ch)?;
            }
        }

        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        self.print_at_no_save(pos, ch)?;
        let idx = self.index(pos);
        self.screen[idx] = ch;
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Message boxes bypass the screen buffer so hiding them can restore it
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).context("Error printing")?;
        Ok(())
    }

    fn index(&self, pos: Coords) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }
}

/// Terminal position of the left column of `cell`, inside the border.
pub fn cell_origin(cell: Cell) -> Coords {
    (1 + cell.0 * CELL_COLUMNS, 1 + cell.1)
}

impl Canvas for TermManager {
    fn paint(&mut self, cell: Cell, paint: Paint) -> Result<()> {
        let (x, y) = cell_origin(cell);
        let glyph = paint.glyph();

        self.print_at((x, y), glyph[0])?;
        self.print_at((x + 1, y), glyph[1])
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}
