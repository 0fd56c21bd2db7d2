pub mod output;
pub mod sink;

pub use output::{OutputFormatter, OutputMode};
pub use sink::{LogLevel, LogSink, MemorySink, NullSink};
