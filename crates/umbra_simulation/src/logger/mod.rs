//! Глобальный logger симуляции.
//!
//! Один sink на процесс: headless console, presentation слой или recorder в тестах.
//! Пока sink не подключён, сообщения отбрасываются (init_logger - как можно раньше).

use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Уровень сообщения. Порядок вариантов = порядок важности.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Куда уходят отформатированные строки (с timestamp)
pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

struct Sink {
    printer: Option<Box<dyn LogPrinter>>,
    min_level: LogLevel,
}

static SINK: Lazy<Mutex<Sink>> = Lazy::new(|| {
    Mutex::new(Sink {
        printer: None,
        min_level: LogLevel::Debug,
    })
});

// Паника в printer'е не должна отключать логи до конца процесса
fn sink() -> MutexGuard<'static, Sink> {
    SINK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Подменяет текущий printer
pub fn set_logger(logger: Box<dyn LogPrinter>) {
    sink().printer = Some(logger);
}

/// Подключает printer только если ещё никто не подключён
pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut sink = sink();
    if sink.printer.is_none() {
        sink.printer = Some(logger);
    }
}

/// Сообщения ниже `level` отбрасываются
pub fn set_log_level(level: LogLevel) {
    sink().min_level = level;
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    let sink = sink();
    if level < sink.min_level {
        return;
    }
    let Some(printer) = sink.printer.as_ref() else {
        return;
    };

    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    printer.log(level, &format!("[{}] {}", timestamp, message));
}

/// stdout для Debug/Info, stderr для Warning/Error
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level >= LogLevel::Warning {
            eprintln!("[{}] {}", level.as_str(), message);
        } else {
            println!("[{}] {}", level.as_str(), message);
        }
    }
}

/// ConsoleLogger, если printer ещё не подключён (повторный вызов безопасен)
pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    }
}
