//! The anchoring root logger.
//!
//! [`TerminalLogger`] owns its sink through a dedicated processing thread.
//! Callers render their line on their own thread, then hand it over a
//! rendezvous channel: the hand-off blocks until the processing loop takes
//! the message, which puts every print, anchor addition and anchor removal
//! from every thread into a single total order.
//!
//! The processing loop is the only code that touches the anchored lines or
//! writes to the sink, so neither needs a lock.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use anchorlog::{Field, Logger, TerminalLogger, TextPrinter, add_anchor, remove_anchor};
//!
//! let root = Arc::new(TerminalLogger::new(std::io::stdout(), TextPrinter::new())?);
//! let log: Arc<dyn Logger> = root.clone();
//!
//! let bar = add_anchor(&log);
//! for pct in 0..=100u8 {
//!     bar.transient("downloading", &[Field::uint("percent", pct)]);
//! }
//! remove_anchor(&bar);
//! log.info("done", &[]);
//! root.close()?;
//! # Ok::<(), anchorlog::LogError>(())
//! ```

mod lines;

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::thread::{self, JoinHandle};

use anchorlog_core::{
    AnchorAdder, AtomicLevel, Field, Level, LogError, Logger, MergeContext, Printer, PrinterOption,
    RootLogger,
};

use crate::decorators::{AnchoredLogger, NoAnchorLogger};
use crate::targets;

use self::lines::AnchorList;

/// Name of the processing thread.
pub const ENGINE_THREAD_NAME: &str = "anchorlog-engine";

/// A unit of work for the processing loop.
#[derive(Debug)]
enum Message {
    Print { line: u32, level: Level, text: String },
    AddLine(u32),
    RemoveLine(u32),
    Shutdown,
}

/// How the processing loop ended, kept so every `close` reports the same.
#[derive(Debug, Clone)]
enum Exit {
    Clean,
    Failed(io::ErrorKind, String),
    Panicked,
}

/// Root logger that keeps anchored lines pinned below scrolling output.
pub struct TerminalLogger {
    min_level: AtomicLevel,
    printer: Box<dyn Printer>,
    tx: SyncSender<Message>,
    worker: Mutex<Option<JoinHandle<io::Result<()>>>>,
    exit: OnceLock<Exit>,
    closing: AtomicBool,
    next_line: AtomicU32,
    live_anchors: Arc<AtomicUsize>,
}

impl TerminalLogger {
    /// Starts the processing loop writing to `sink`.
    ///
    /// The minimum level starts at [`Level::Info`].
    pub fn new<W, P>(sink: W, printer: P) -> Result<Self, LogError>
    where
        W: Write + Send + 'static,
        P: Printer + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(0);
        let worker = thread::Builder::new()
            .name(ENGINE_THREAD_NAME.to_string())
            .spawn(move || process(&rx, AnchorList::new(sink)))?;

        Ok(Self {
            min_level: AtomicLevel::new(Level::Info),
            printer: Box::new(printer),
            tx,
            worker: Mutex::new(Some(worker)),
            exit: OnceLock::new(),
            closing: AtomicBool::new(false),
            next_line: AtomicU32::new(0),
            live_anchors: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Number of anchored lines handed out and not yet released.
    #[must_use]
    pub fn live_anchors(&self) -> usize {
        self.live_anchors.load(Ordering::SeqCst)
    }

    /// Whether `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closing.load(Ordering::SeqCst)
    }

    /// Hands `msg` to the processing loop, blocking until it is taken.
    ///
    /// Returns `false` once the loop has stopped. If it stopped on its own
    /// because of a panic, the panic is re-raised on the calling thread.
    fn send(&self, msg: Message) -> bool {
        if self.tx.send(msg).is_ok() {
            return true;
        }
        if !self.closing.load(Ordering::SeqCst) {
            self.join();
        }
        false
    }

    /// Waits for the processing loop to exit and records how it ended.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the processing thread. Callers arriving after
    /// it was re-raised panic as well.
    fn join(&self) -> &Exit {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = worker.take() {
            let exit = match handle.join() {
                Ok(Ok(())) => Exit::Clean,
                Ok(Err(e)) => Exit::Failed(e.kind(), e.to_string()),
                Err(panic) => {
                    let _ = self.exit.set(Exit::Panicked);
                    drop(worker);
                    std::panic::resume_unwind(panic);
                }
            };
            let _ = self.exit.set(exit);
        }
        drop(worker);

        match self.exit.get() {
            Some(Exit::Panicked) => panic!("anchorlog processing loop panicked"),
            Some(exit) => exit,
            None => &Exit::Clean,
        }
    }

    /// Stops the processing loop after it drains, and waits for it.
    ///
    /// Only the first caller signals shutdown; every caller returns once the
    /// loop has exited, with the same result. A panic on the processing
    /// thread is re-raised here.
    pub fn close(&self) -> Result<(), LogError> {
        if !self.closing.swap(true, Ordering::SeqCst) {
            log::trace!(target: targets::ENGINE, "closing terminal logger");
            self.send(Message::Shutdown);
        }

        match self.join() {
            Exit::Clean | Exit::Panicked => Ok(()),
            Exit::Failed(kind, msg) => Err(LogError::Io(io::Error::new(*kind, msg.clone()))),
        }
    }
}

fn process<W: Write>(rx: &Receiver<Message>, mut lines: AnchorList<W>) -> io::Result<()> {
    // Never log through the `log` facade from here: this thread may be the
    // sink of the global logger and would wait on itself.
    for msg in rx {
        match msg {
            Message::Print { line, level, text } => lines.print(line, level, &text)?,
            Message::AddLine(line) => lines.add(line)?,
            Message::RemoveLine(line) => lines.remove(line)?,
            Message::Shutdown => break,
        }
    }
    lines.flush()
}

impl Logger for TerminalLogger {
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        mut ctx: MergeContext,
    ) {
        ctx.merge_min_level(self.min_level.get());
        if !ctx.keeps(level) {
            return;
        }

        let text = if ctx.fields.is_empty() {
            self.printer.render(level, opts, msg, fields)
        } else {
            let mut all = std::mem::take(&mut ctx.fields);
            all.extend_from_slice(fields);
            self.printer.render(level, opts, msg, &all)
        };

        self.send(Message::Print {
            line: ctx.anchored_line,
            level,
            text,
        });

        if level == Level::Fatal {
            if let Err(e) = self.close() {
                eprintln!("anchorlog: final flush before exit failed: {e}");
            }
        }
    }

    fn min_level(&self) -> Level {
        self.min_level.get()
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }

    fn anchor_adder(&self) -> Option<&dyn AnchorAdder> {
        Some(self)
    }
}

impl AnchorAdder for TerminalLogger {
    fn add_anchor(&self, parent: Arc<dyn Logger>) -> Arc<dyn Logger> {
        let line = self.next_line.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.send(Message::AddLine(line)) {
            return Arc::new(NoAnchorLogger::new(parent));
        }
        self.live_anchors.fetch_add(1, Ordering::SeqCst);

        let tx = self.tx.clone();
        let live = Arc::clone(&self.live_anchors);
        let release = move || {
            live.fetch_sub(1, Ordering::SeqCst);
            let _ = tx.send(Message::RemoveLine(line));
        };
        Arc::new(AnchoredLogger::new(parent, line, Box::new(release)))
    }
}

impl RootLogger for TerminalLogger {
    fn close(&self) -> Result<(), LogError> {
        TerminalLogger::close(self)
    }

    fn into_logger(self: Arc<Self>) -> Arc<dyn Logger> {
        self
    }
}

impl Drop for TerminalLogger {
    fn drop(&mut self) {
        // A loop panic already re-raised on a caller is not raised again.
        if !thread::panicking() && !matches!(self.exit.get(), Some(Exit::Panicked)) {
            let _ = self.close();
        }
    }
}

impl std::fmt::Debug for TerminalLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalLogger")
            .field("min_level", &self.min_level.get())
            .field("live_anchors", &self.live_anchors())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
