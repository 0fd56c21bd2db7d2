use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

/// Destination for the arranger's line-oriented log output.
pub trait LogSink {
    fn log(&self, level: LogLevel, message: &str);

    fn println(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Keeps every line in memory. Clones share the same buffer, so a clone can
/// be handed to an `Arranger` and read back afterwards.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<(LogLevel, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|(_, l)| l.clone()).collect()
    }

    pub fn lines_at(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(lvl, _)| *lvl == level)
            .map(|(_, l)| l.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, l)| l.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}
