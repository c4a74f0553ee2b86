//! Fixed-width progress indicator.
//!
//! The only user-visible output the engine produces besides fatal
//! errors: a bar on the diagnostic stream, updated as tasks complete,
//! active only when verbosity is enabled.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Bar width in characters.
const BAR_WIDTH: usize = 50;

/// Thread-safe progress meter over a fixed task count.
pub struct ProgressMeter {
    total: usize,
    done: AtomicUsize,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ProgressMeter {
    /// Creates a meter writing to stderr.
    pub fn new(total: usize) -> Self {
        Self::with_writer(total, Box::new(io::stderr()))
    }

    /// Creates a meter writing to the given stream.
    pub fn with_writer(total: usize, out: Box<dyn Write + Send>) -> Self {
        ProgressMeter {
            total,
            done: AtomicUsize::new(0),
            out: Mutex::new(out),
        }
    }

    /// Marks one task complete and redraws the bar. Write errors on the
    /// diagnostic stream are ignored.
    pub fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        let filled = if self.total == 0 {
            BAR_WIDTH
        } else {
            (done * BAR_WIDTH / self.total).min(BAR_WIDTH)
        };
        let mut out = self.out.lock().expect("progress stream lock");
        let _ = write!(
            out,
            "\r[{}{}] {}/{}",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            done,
            self.total
        );
        let _ = out.flush();
    }

    /// Terminates the bar with a newline.
    pub fn finish(&self) {
        let mut out = self.out.lock().expect("progress stream lock");
        let _ = writeln!(out);
    }

    /// Number of completed tasks.
    pub fn completed(&self) -> usize {
        self.done.load(Ordering::SeqCst)
    }
}
