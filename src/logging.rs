use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Entries kept before the oldest are dropped
const CAPACITY: usize = 500;

/// One captured log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            at: Local::now(),
            level,
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level <= Level::WARN
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: {}",
            self.at.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Recent log lines kept in memory so the front end can show load and
/// export notices after the fact. Cloning shares the same storage.
#[derive(Clone, Default)]
pub struct LogRingBuffer {
    inner: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogRingBuffer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(CAPACITY))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.lock();
        while entries.len() >= CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Entries at WARN or ERROR
    pub fn warnings(&self) -> Vec<LogEntry> {
        self.lock().iter().filter(|e| e.is_warning()).cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `MakeWriter` that turns formatted compact lines back into entries
#[derive(Clone)]
pub struct RingBufferWriter {
    buffer: LogRingBuffer,
}

impl RingBufferWriter {
    pub fn new(buffer: LogRingBuffer) -> Self {
        Self { buffer }
    }
}

/// Split a compact-format line ("LEVEL target: message") into its parts
fn parse_compact_line(line: &str) -> (Level, &str, &str) {
    let (level, rest) = [
        (Level::TRACE, "TRACE "),
        (Level::DEBUG, "DEBUG "),
        (Level::INFO, "INFO "),
        (Level::WARN, "WARN "),
        (Level::ERROR, "ERROR "),
    ]
    .into_iter()
    .find_map(|(level, prefix)| line.strip_prefix(prefix).map(|rest| (level, rest.trim_start())))
    .unwrap_or((Level::INFO, line));

    match rest.split_once(": ") {
        Some((target, msg)) if !target.contains(' ') => (level, target, msg.trim()),
        _ => (level, "general", rest),
    }
}

impl std::io::Write for RingBufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        let line = line.trim();
        if !line.is_empty() {
            let (level, target, message) = parse_compact_line(line);
            self.buffer.push(LogEntry::new(level, target, message));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RingBufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

static LOG_BUFFER: OnceLock<LogRingBuffer> = OnceLock::new();

/// Initialize tracing: compact output on stderr plus the in-memory ring
/// buffer. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) -> LogRingBuffer {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let buffer = LOG_BUFFER.get_or_init(LogRingBuffer::new).clone();

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::LocalTime::rfc_3339())
        .with_target(verbose)
        .compact();

    let buffer_layer = fmt::layer()
        .with_writer(RingBufferWriter::new(buffer.clone()))
        .with_ansi(false)
        .without_time()
        .compact();

    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(buffer_layer)
        .try_init();

    tracing::debug!(target: "roster_view::logging", "Tracing initialized");
    buffer
}
