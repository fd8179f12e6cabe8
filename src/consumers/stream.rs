//! # StreamTarget - payload writer
//!
//! A consumer that writes the `Display` form of each payload to an [`io::Write`],
//! optionally followed by a newline. Useful for demos, CLIs and tests.
//!
//! ## Example output (`append_newline = true`)
//! ```text
//! foo
//! bar
//! ```

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::consumers::{Consume, Outcome};
use crate::error::ConsumerError;
use crate::messages::Message;

/// Writes message payloads to an output stream.
///
/// The newline flag can be flipped at any time, also after the target was subscribed.
pub struct StreamTarget<W> {
    writer: Mutex<W>,
    append_newline: AtomicBool,
}

impl<W: Write> StreamTarget<W> {
    /// Construct a new [`StreamTarget`] without trailing newlines.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            append_newline: AtomicBool::new(false),
        }
    }

    /// Builder-style variant of [`set_append_newline`](Self::set_append_newline).
    #[must_use]
    pub fn with_newline(self, append: bool) -> Self {
        self.set_append_newline(append);
        self
    }

    pub fn set_append_newline(&self, append: bool) {
        self.append_newline.store(append, Ordering::Relaxed);
    }

    pub fn appends_newline(&self) -> bool {
        self.append_newline.load(Ordering::Relaxed)
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_payload(&self, payload: &dyn Display) -> io::Result<()> {
        let mut w = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        write!(w, "{payload}")?;
        if self.appends_newline() {
            w.write_all(b"\n")?;
        }
        w.flush()
    }
}

impl<T, W> Consume<T> for StreamTarget<W>
where
    T: Display + 'static,
    W: Write + Send + 'static,
{
    fn accept(&self, message: &Message<T>) -> Result<Outcome, ConsumerError> {
        self.write_payload(message.payload())?;
        Ok(Outcome::Consumed)
    }

    fn name(&self) -> &str {
        "StreamTarget"
    }
}
