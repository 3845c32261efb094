//! Terminal backend abstraction and crossterm implementation.

use std::env;
use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color as CrosstermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{size, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use sortvis_core::{Color, Error, Result};

/// Terminal operations needed to present a canvas.
///
/// Lets the presenter run against crossterm in production and against a
/// recording backend in tests.
pub trait TerminalBackend {
    /// Hides the terminal cursor.
    fn hide_cursor(&mut self) -> Result<()>;

    /// Shows the terminal cursor.
    fn show_cursor(&mut self) -> Result<()>;

    /// Moves the cursor to the specified position (0-based).
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    /// Gets the current terminal size (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;

    /// Enters the alternate screen buffer.
    fn enter_alternate_screen(&mut self) -> Result<()>;

    /// Leaves the alternate screen buffer.
    fn leave_alternate_screen(&mut self) -> Result<()>;

    /// Clears the entire screen.
    fn clear(&mut self) -> Result<()>;

    /// Flushes any buffered output to the terminal.
    fn flush(&mut self) -> Result<()>;

    /// Sets the foreground color.
    fn set_foreground(&mut self, color: Color) -> Result<()>;

    /// Sets the background color.
    fn set_background(&mut self, color: Color) -> Result<()>;

    /// Resets all colors to default.
    fn reset_style(&mut self) -> Result<()>;

    /// Writes a string at the current cursor position.
    fn write_str(&mut self, s: &str) -> Result<()>;

    /// Begins synchronized output (prevents screen tearing).
    fn begin_sync_update(&mut self) -> Result<()>;

    /// Ends synchronized output.
    fn end_sync_update(&mut self) -> Result<()>;
}

/// Crossterm-based terminal backend writing to stdout.
pub struct CrosstermBackend {
    stdout: Stdout,
    sync_output: bool,
    in_alternate_screen: bool,
    cursor_hidden: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    /// Creates a new crossterm backend.
    ///
    /// Synchronized output is enabled when the terminal is known to
    /// support it.
    pub fn new() -> Self {
        Self::with_sync_output(detect_sync_output())
    }

    /// Creates a backend with synchronized output forced on or off.
    pub fn with_sync_output(sync_output: bool) -> Self {
        Self {
            stdout: io::stdout(),
            sync_output,
            in_alternate_screen: false,
            cursor_hidden: false,
        }
    }

    /// Returns whether synchronized output sequences are emitted.
    #[inline]
    pub fn sync_output(&self) -> bool {
        self.sync_output
    }

    /// Converts a Color to crossterm's Color type.
    #[inline]
    fn to_crossterm_color(color: Color) -> CrosstermColor {
        let (r, g, b) = color.to_rgb_u8();
        CrosstermColor::Rgb { r, g, b }
    }
}

/// Detects DEC synchronized output (mode 2026) support from the environment.
fn detect_sync_output() -> bool {
    if env::var("WT_SESSION").is_ok()
        || env::var("KITTY_WINDOW_ID").is_ok()
        || env::var("ALACRITTY_SOCKET").is_ok()
        || env::var("WEZTERM_EXECUTABLE").is_ok()
    {
        return true;
    }
    match env::var("TERM_PROGRAM") {
        Ok(program) => matches!(
            program.to_lowercase().as_str(),
            "iterm.app" | "wezterm" | "mintty" | "ghostty" | "vscode"
        ),
        Err(_) => false,
    }
}

impl TerminalBackend for CrosstermBackend {
    fn hide_cursor(&mut self) -> Result<()> {
        if !self.cursor_hidden {
            execute!(self.stdout, Hide).map_err(Error::Io)?;
            self.cursor_hidden = true;
        }
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        if self.cursor_hidden {
            execute!(self.stdout, Show).map_err(Error::Io)?;
            self.cursor_hidden = false;
        }
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.stdout, MoveTo(x, y)).map_err(Error::Io)
    }

    fn size(&self) -> Result<(u16, u16)> {
        size().map_err(Error::Io)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        if !self.in_alternate_screen {
            execute!(self.stdout, EnterAlternateScreen).map_err(Error::Io)?;
            self.in_alternate_screen = true;
        }
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        if self.in_alternate_screen {
            execute!(self.stdout, LeaveAlternateScreen).map_err(Error::Io)?;
            self.in_alternate_screen = false;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, Clear(ClearType::All)).map_err(Error::Io)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().map_err(Error::Io)
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        queue!(
            self.stdout,
            SetForegroundColor(Self::to_crossterm_color(color))
        )
        .map_err(Error::Io)
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        queue!(
            self.stdout,
            SetBackgroundColor(Self::to_crossterm_color(color))
        )
        .map_err(Error::Io)
    }

    fn reset_style(&mut self) -> Result<()> {
        queue!(self.stdout, ResetColor).map_err(Error::Io)
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.stdout, Print(s)).map_err(Error::Io)
    }

    fn begin_sync_update(&mut self) -> Result<()> {
        if self.sync_output {
            // DEC Synchronized Output mode (mode 2026)
            self.stdout.write_all(b"\x1b[?2026h").map_err(Error::Io)?;
        }
        Ok(())
    }

    fn end_sync_update(&mut self) -> Result<()> {
        if self.sync_output {
            self.stdout.write_all(b"\x1b[?2026l").map_err(Error::Io)?;
        }
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        // Best-effort cleanup on drop
        let _ = self.show_cursor();
        let _ = self.leave_alternate_screen();
    }
}
