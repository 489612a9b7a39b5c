//! Progress spinner ("throb").
//!
//! [`throb`] runs a unit of work on the calling thread while a second thread
//! animates a braille spinner in a fixed terminal column. The animation thread
//! listens on a channel used only for "stop now". Stopping, joining and the
//! cursor-restoring redraw all happen in [`Throbber`]'s `Drop`, so they run on
//! normal return, on an error result and on unwinding alike.
//!
//! The caller's own output must not write to the spinner column while the
//! animation runs; nothing enforces that.

use crate::terminal;
use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::style::Print;
use crossterm::{queue, Command};
use rand::Rng;
use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Delay between two animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Frame sets the spinner picks from.
pub const FRAME_SETS: [&[&str]; 7] = [
    &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    &["⠋", "⠙", "⠚", "⠞", "⠖", "⠦", "⠴", "⠲", "⠳", "⠓"],
    &["⠄", "⠆", "⠇", "⠋", "⠙", "⠸", "⠰", "⠠", "⠰", "⠸", "⠙", "⠋", "⠇", "⠆"],
    &[
        "⠋", "⠙", "⠚", "⠒", "⠂", "⠂", "⠒", "⠲", "⠴", "⠦", "⠖", "⠒", "⠐", "⠐", "⠒", "⠓", "⠋",
    ],
    &[
        "⠁", "⠉", "⠙", "⠚", "⠒", "⠂", "⠂", "⠒", "⠲", "⠴", "⠤", "⠄", "⠄", "⠤", "⠴", "⠲", "⠒",
        "⠂", "⠂", "⠒", "⠚", "⠙", "⠉", "⠁",
    ],
    &[
        "⠈", "⠉", "⠋", "⠓", "⠒", "⠐", "⠐", "⠒", "⠖", "⠦", "⠤", "⠠", "⠠", "⠤", "⠦", "⠖", "⠒",
        "⠐", "⠐", "⠒", "⠓", "⠋", "⠉", "⠈",
    ],
    &[
        "⠁", "⠁", "⠉", "⠙", "⠚", "⠒", "⠂", "⠂", "⠒", "⠲", "⠴", "⠤", "⠄", "⠄", "⠤", "⠠", "⠠",
        "⠤", "⠦", "⠖", "⠒", "⠐", "⠐", "⠒", "⠓", "⠋", "⠉", "⠈", "⠈", "⠉",
    ],
];

/// Where the spinner draws and what it prints when it is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrobOptions {
    /// Zero-based terminal column of the spinner glyph.
    pub column: u16,
    /// Printed at `column` once the work is done. Defaults to moving the
    /// cursor up one line, so the next output reuses the spinner's line.
    pub redraw: String,
}

impl Default for ThrobOptions {
    fn default() -> Self {
        Self {
            column: 0,
            redraw: ansi(MoveUp(1)),
        }
    }
}

fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = command.write_ansi(&mut out);
    out
}

/// A cyclic frame sequence and the position in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frames {
    glyphs: Vec<&'static str>,
    index: usize,
}

impl Frames {
    /// Random frame set, reversed half of the time, starting at a random frame.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut glyphs = FRAME_SETS[rng.gen_range(0..FRAME_SETS.len())].to_vec();
        if rng.gen_bool(0.5) {
            glyphs.reverse();
        }
        let index = rng.gen_range(0..glyphs.len());
        Self { glyphs, index }
    }

    /// Current glyph; advances to the next one, wrapping around.
    pub fn advance(&mut self) -> &'static str {
        let glyph = self.glyphs[self.index];
        self.index = (self.index + 1) % self.glyphs.len();
        glyph
    }
}

/// Run `work` on stdout's spinner with default options.
pub fn throb<T>(work: impl FnOnce() -> T) -> T {
    throb_with(ThrobOptions::default(), work)
}

/// Run `work` with a spinner on stdout, animating only when stdout is an
/// interactive terminal.
pub fn throb_with<T>(options: ThrobOptions, work: impl FnOnce() -> T) -> T {
    throb_to(io::stdout(), terminal::is_interactive(), options, work)
}

/// Run `work` while animating a spinner on `out`.
///
/// When `interactive` is false nothing is written and `work` simply runs.
/// Whatever `work` returns is returned unchanged, errors included, after the
/// spinner has been stopped and the cursor shown again.
pub fn throb_to<W, T>(
    out: W,
    interactive: bool,
    options: ThrobOptions,
    work: impl FnOnce() -> T,
) -> T
where
    W: Write + Send + 'static,
{
    if !interactive {
        return work();
    }

    let throbber = Throbber::start(out, options, Frames::random(&mut rand::thread_rng()));
    let result = work();
    drop(throbber);
    result
}

/// A running spinner. Dropping it stops the animation thread and restores
/// the cursor exactly once.
pub struct Throbber<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
    options: ThrobOptions,
    stop: Option<Sender<()>>,
    animation: Option<JoinHandle<()>>,
}

impl<W: Write + Send + 'static> Throbber<W> {
    pub fn start(out: W, options: ThrobOptions, mut frames: Frames) -> Self {
        let out = Arc::new(Mutex::new(out));
        let (stop, stopped) = mpsc::channel::<()>();

        let writer = Arc::clone(&out);
        let column = options.column;
        let animation = thread::spawn(move || loop {
            {
                let mut out = writer.lock().unwrap_or_else(PoisonError::into_inner);
                if let Err(e) = draw_frame(&mut *out, column, frames.advance()) {
                    tracing::debug!("spinner frame not written: {e}");
                }
            }
            match stopped.recv_timeout(FRAME_INTERVAL) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        tracing::debug!(column, "spinner started");

        Self {
            out,
            options,
            stop: Some(stop),
            animation: Some(animation),
        }
    }

    fn finish(&mut self) {
        let Some(animation) = self.animation.take() else {
            return;
        };
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if animation.join().is_err() {
            tracing::debug!("spinner thread panicked");
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = restore(&mut *out, &self.options) {
            tracing::debug!("spinner cleanup not written: {e}");
        }
        tracing::debug!("spinner stopped");
    }
}

impl<W: Write + Send + 'static> Drop for Throbber<W> {
    fn drop(&mut self) {
        self.finish();
    }
}

fn draw_frame(out: &mut impl Write, column: u16, glyph: &str) -> io::Result<()> {
    queue!(out, Print('\r'), MoveToColumn(column), Print(glyph), Hide)?;
    out.flush()
}

fn restore(out: &mut impl Write, options: &ThrobOptions) -> io::Result<()> {
    queue!(
        out,
        Print('\r'),
        MoveToColumn(options.column),
        Print(&options.redraw),
        Show,
        Print('\n')
    )?;
    out.flush()
}
