//! The host seam: output, input and sleeping.
//!
//! The engine never touches stdio or the clock directly. Tests and the
//! browser bridge run against [`BufferedHost`]; the CLI uses [`StdHost`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// What a running program may ask of its environment.
pub trait Host {
    /// Emit one line of program output.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Read one line of input without its terminator. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Block for `duration`. Called by `DEL`.
    fn sleep(&mut self, duration: Duration);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }

    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Process stdio and a real sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdHost;

impl Host for StdHost {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// In-memory host: captures output, serves scripted input and records
/// sleeps instead of blocking.
#[derive(Debug, Default, Clone)]
pub struct BufferedHost {
    pub output: Vec<String>,
    pub input: VecDeque<String>,
    pub sleeps: Vec<Duration>,
}

impl BufferedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose input is `lines`, served in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Captured output joined with newlines.
    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }
}

impl Host for BufferedHost {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}
