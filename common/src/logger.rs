use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
}

pub struct Logger {
    prefix: Option<String>,
    quiet: bool,
}

impl Logger {
    fn new(prefix: Option<String>, quiet: bool) -> Self {
        Self { prefix, quiet }
    }

    fn format_line(&self, severity: Severity, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let tag = match severity {
            Severity::Info => "",
            Severity::Warn => "[WARN]",
        };
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}]{}[{}:{}] {}", timestamp, prefix, tag, file_name, line, message),
            None => format!("[{}]{}[{}:{}] {}", timestamp, tag, file_name, line, message),
        }
    }

    pub fn log(&self, severity: Severity, file: &str, line: u32, message: &str) {
        match severity {
            Severity::Info if self.quiet => {}
            Severity::Info => println!("{}", self.format_line(severity, file, line, message)),
            Severity::Warn => eprintln!("{}", self.format_line(severity, file, line, message)),
        }
    }
}

pub fn init_logger(prefix: Option<String>, quiet: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, quiet));
}

/// Lines logged before `init_logger` are dropped so library code and tests
/// can log freely without a configured sink.
pub fn log(severity: Severity, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(severity, file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Severity::Info, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Severity::Warn, file!(), line!(), &format!($($arg)*))
    };
}
