//! Terminal rendering of the core's markdown output.
//!
//! Rich mode styles inline markdown with termimad and colors headings by
//! level; plain mode prints the text unchanged.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Magenta);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::AnsiValue(236));
        skin.inline_code.set_fg(Color::Green);

        Self { rich_enabled, skin }
    }

    fn heading_color(line: &str) -> Option<u8> {
        match line.chars().take_while(|c| *c == '#').count() {
            0 => None,
            1 => Some(35),
            2 => Some(34),
            _ => Some(36),
        }
    }

    /// Render markdown text to the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if !self.rich_enabled {
            write!(out, "{markdown}")?;
            return Ok(out.flush()?);
        }

        for line in markdown.lines() {
            match Self::heading_color(line) {
                Some(code) => writeln!(out, "\x1b[1;{code}m{line}\x1b[0m")?,
                None => writeln!(out, "{}", self.skin.inline(line))?,
            }
        }
        Ok(out.flush()?)
    }

    /// Clear the screen before a refresh. A no-op in plain mode, so piped
    /// output stays free of control sequences.
    pub fn clear(&self) -> Result<()> {
        if self.rich_enabled {
            let mut out = io::stdout().lock();
            write!(out, "{CLEAR_SCREEN}")?;
            out.flush()?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
