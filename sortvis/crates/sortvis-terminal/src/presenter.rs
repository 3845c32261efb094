//! Presenting a shared canvas in the terminal with frame pacing.

use std::time::{Duration, Instant};

use sortvis_canvas::{PixelBuffer, SharedCanvas};
use sortvis_core::{Color, Error, Result};
use tracing::{debug, trace};

use crate::backend::{CrosstermBackend, TerminalBackend};

/// Glyph drawn in every cell: the foreground paints the upper pixel and the
/// background the lower one.
pub const UPPER_HALF_BLOCK: &str = "\u{2580}";

const COLOR_EPSILON: f32 = 0.00001;

/// Frame rate pacer for the presentation loop.
///
/// Caps how often the terminal is redrawn, independently of how fast the
/// worker presents frames to the canvas.
#[derive(Debug)]
pub struct FramePacer {
    target_fps: u32,
    target_frame_time: Duration,
    last_frame: Instant,
    frame_count: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(30)
    }
}

impl FramePacer {
    /// Creates a new frame pacer. `target_fps` is clamped to at least 1.
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            target_frame_time: Duration::from_secs_f64(1.0 / target_fps as f64),
            last_frame: Instant::now(),
            frame_count: 0,
        }
    }

    /// Returns the target FPS.
    #[inline]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Returns the number of frames ticked so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the time to wait before the next frame.
    pub fn frame_delay(&self, frame_duration: Duration) -> Duration {
        self.target_frame_time.saturating_sub(frame_duration)
    }

    /// Advances to the next frame and returns delta time.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
        delta
    }

    /// Waits for the appropriate frame time.
    pub fn wait(&self, frame_duration: Duration) {
        let delay = self.frame_delay(frame_duration);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// One terminal cell: two vertically stacked pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HalfBlock {
    /// Drawn as the glyph foreground.
    upper: Color,
    /// Drawn as the cell background.
    lower: Color,
}

impl HalfBlock {
    fn approx_eq(&self, other: &Self) -> bool {
        self.upper.approx_eq(&other.upper, COLOR_EPSILON)
            && self.lower.approx_eq(&other.lower, COLOR_EPSILON)
    }
}

/// A pixel buffer resampled onto a grid of [`HalfBlock`] cells.
///
/// The image keeps its aspect ratio and is scaled with nearest-neighbor
/// sampling to the largest size that fits the terminal.
#[derive(Debug)]
struct HalfBlockFrame {
    columns: u16,
    rows: u16,
    cells: Vec<HalfBlock>,
}

impl HalfBlockFrame {
    /// Samples `frame` into at most `max_columns` x `max_rows` cells.
    fn sample(frame: &PixelBuffer, max_columns: u16, max_rows: u16) -> Self {
        let size = frame.size();
        if size.is_empty() || max_columns == 0 || max_rows == 0 {
            return Self {
                columns: 0,
                rows: 0,
                cells: Vec::new(),
            };
        }

        let factor = (max_columns as f64 / size.width as f64)
            .min(max_rows as f64 * 2.0 / size.height as f64);
        let columns = ((size.width as f64 * factor) as u16).clamp(1, max_columns);
        let rows = ((size.height as f64 * factor / 2.0) as u16).clamp(1, max_rows);
        let pixel_rows = u64::from(rows) * 2;

        let source_x = |cx: u16| (u64::from(cx) * u64::from(size.width) / u64::from(columns)) as u32;
        let source_y = |py: u64| (py * u64::from(size.height) / pixel_rows) as u32;
        let pixel = |x: u32, y: u32| frame.get(x, y).unwrap_or(Color::BLACK);

        let mut cells = Vec::with_capacity(columns as usize * rows as usize);
        for cy in 0..rows {
            let upper_y = source_y(u64::from(cy) * 2);
            let lower_y = source_y(u64::from(cy) * 2 + 1);
            for cx in 0..columns {
                let x = source_x(cx);
                cells.push(HalfBlock {
                    upper: pixel(x, upper_y),
                    lower: pixel(x, lower_y),
                });
            }
        }

        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Returns one row of cells.
    fn row(&self, y: u16) -> Option<&[HalfBlock]> {
        if y < self.rows {
            let start = y as usize * self.columns as usize;
            Some(&self.cells[start..start + self.columns as usize])
        } else {
            None
        }
    }
}

/// Draws a [`SharedCanvas`] in the terminal whenever a new frame has been
/// presented to it.
///
/// The presenter only reads the canvas front buffer, so it can run on its
/// own thread while a sort draws and pauses on another.
///
/// # Example
///
/// ```no_run
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use sortvis_canvas::SharedCanvas;
/// use sortvis_core::Color;
/// use sortvis_terminal::TerminalPresenter;
///
/// fn main() -> sortvis_core::Result<()> {
///     let canvas = SharedCanvas::new(64, 64, Color::WHITE);
///     let done = AtomicBool::new(false);
///
///     let mut presenter = TerminalPresenter::stdout();
///     presenter.run(&canvas, || !done.load(Ordering::Relaxed))?;
///     Ok(())
/// }
/// ```
pub struct TerminalPresenter<B: TerminalBackend = CrosstermBackend> {
    backend: B,
    frame_pacer: FramePacer,
    last_frame: Option<u64>,
    last_size: Option<(u16, u16)>,
    rendered: u64,
}

impl TerminalPresenter<CrosstermBackend> {
    /// Creates a presenter writing to stdout.
    pub fn stdout() -> Self {
        Self::new(CrosstermBackend::new())
    }
}

impl<B: TerminalBackend> TerminalPresenter<B> {
    /// Creates a presenter with the default frame pacing.
    pub fn new(backend: B) -> Self {
        Self::with_frame_pacer(backend, FramePacer::default())
    }

    /// Creates a presenter with custom frame pacing.
    pub fn with_frame_pacer(backend: B, frame_pacer: FramePacer) -> Self {
        Self {
            backend,
            frame_pacer,
            last_frame: None,
            last_size: None,
            rendered: 0,
        }
    }

    /// Returns a reference to the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of canvas frames drawn to the terminal.
    #[inline]
    pub fn rendered_frames(&self) -> u64 {
        self.rendered
    }

    /// Prepares the terminal for rendering.
    pub fn setup(&mut self) -> Result<()> {
        self.backend.enter_alternate_screen()?;
        self.backend.hide_cursor()?;
        self.backend.clear()?;
        self.last_frame = None;
        self.last_size = None;
        debug!("terminal presenter set up");
        Ok(())
    }

    /// Restores the terminal to its original state.
    pub fn teardown(&mut self) -> Result<()> {
        self.backend.reset_style()?;
        self.backend.show_cursor()?;
        self.backend.leave_alternate_screen()?;
        self.backend.flush()?;
        debug!(rendered = self.rendered, "terminal presenter torn down");
        Ok(())
    }

    /// Draws the canvas front buffer if a frame was presented or the terminal
    /// was resized since the last call. Returns whether anything was drawn.
    ///
    /// The front buffer is sampled into terminal cells under the canvas lock.
    /// Terminal output happens after the lock is released.
    pub fn present_if_changed(&mut self, canvas: &SharedCanvas) -> Result<bool> {
        let (columns, rows) = self.backend.size()?;
        if columns == 0 || rows == 0 {
            return Err(Error::Terminal(format!(
                "terminal reports an empty {columns}x{rows} screen"
            )));
        }

        let resized = self.last_size != Some((columns, rows));
        let last_frame = self.last_frame;
        let pending = canvas.with_frame(|count, front| {
            (resized || last_frame != Some(count))
                .then(|| (count, HalfBlockFrame::sample(front, columns, rows)))
        });
        let Some((count, cells)) = pending else {
            return Ok(false);
        };

        if resized {
            self.backend.clear()?;
            self.last_size = Some((columns, rows));
        }
        self.draw(&cells)?;
        self.last_frame = Some(count);
        self.rendered += 1;
        trace!(frame = count, resized, "canvas frame rendered");
        Ok(true)
    }

    /// Writes `cells` to the terminal using synchronized output.
    fn draw(&mut self, cells: &HalfBlockFrame) -> Result<()> {
        self.backend.begin_sync_update()?;

        // Track current colors to minimize escape sequences
        let mut current: Option<HalfBlock> = None;
        for y in 0..cells.rows {
            self.backend.move_cursor(0, y)?;
            for cell in cells.row(y).unwrap_or_default() {
                if !current.is_some_and(|c| c.approx_eq(cell)) {
                    self.backend.set_foreground(cell.upper)?;
                    self.backend.set_background(cell.lower)?;
                    current = Some(*cell);
                }
                self.backend.write_str(UPPER_HALF_BLOCK)?;
            }
        }

        self.backend.reset_style()?;
        self.backend.end_sync_update()?;
        self.backend.flush()
    }

    /// Sets up the terminal, presents `canvas` until `keep_running` returns
    /// false, then restores the terminal.
    ///
    /// The last presented frame is drawn before returning. Returns the
    /// number of frames rendered.
    pub fn run<F>(&mut self, canvas: &SharedCanvas, keep_running: F) -> Result<u64>
    where
        F: FnMut() -> bool,
    {
        self.setup()?;
        let result = self.present_loop(canvas, keep_running);
        let restored = self.teardown();
        result?;
        restored?;
        Ok(self.rendered)
    }

    fn present_loop<F>(&mut self, canvas: &SharedCanvas, mut keep_running: F) -> Result<()>
    where
        F: FnMut() -> bool,
    {
        while keep_running() {
            let frame_start = Instant::now();
            self.present_if_changed(canvas)?;
            self.frame_pacer.tick();
            self.frame_pacer.wait(frame_start.elapsed());
        }
        self.present_if_changed(canvas)?;
        Ok(())
    }
}
