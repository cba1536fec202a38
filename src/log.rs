//! Leveled log output.
//!
//! A small trait so the pipeline does not care whether messages go to the
//! terminal or to a plain text file; which one is built is decided by the
//! merged default section (`LogType`, `LogOutput`, `Verbosity`).

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::str::FromStr;

use crate::config::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Err,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Err => "ERR",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERR" => Ok(LogLevel::Err),
            _ => Err(()),
        }
    }
}

/// Sink for leveled messages.
pub trait LogPrinter {
    fn log(&mut self, level: LogLevel, message: &str);

    fn debug(&mut self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn warn(&mut self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn err(&mut self, message: &str) {
        self.log(LogLevel::Err, message);
    }
}

/// Prints colored messages to stderr, filtered by a minimum level.
pub struct ConsolePrinter {
    min_level: LogLevel,
}

impl ConsolePrinter {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl LogPrinter for ConsolePrinter {
    fn log(&mut self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        let tag = format!("[{}]", level);
        let tag = match level {
            LogLevel::Debug => tag.dimmed(),
            LogLevel::Info => tag.normal(),
            LogLevel::Warn => tag.yellow(),
            LogLevel::Err => tag.red().bold(),
        };
        eprintln!("{} {}", tag, message);
    }
}

/// Appends plain `[LEVEL] message` lines to a log file (`LogType = TXT`).
pub struct FilePrinter {
    file: File,
    min_level: LogLevel,
}

impl FilePrinter {
    pub fn new(path: &str, min_level: LogLevel) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        Ok(Self { file, min_level })
    }
}

impl LogPrinter for FilePrinter {
    fn log(&mut self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        // A failing log write must not abort the run.
        let _ = writeln!(self.file, "[{}] {}", level, message);
    }
}

/// Build the printer the merged default section asks for.
///
/// Unknown or absent `Verbosity` falls back to WARN; absent `LogType`
/// falls back to the console; `LogType = TXT` appends to the first
/// `LogOutput` path (or `scour.log`).
pub fn from_section(section: &Section<'_>) -> Result<Box<dyn LogPrinter>> {
    let min_level = section
        .get("Verbosity")
        .and_then(|s| s.value.as_list().first().cloned())
        .and_then(|raw| raw.parse::<LogLevel>().ok())
        .unwrap_or(LogLevel::Warn);

    let log_type = section
        .get("LogType")
        .and_then(|s| s.value.as_list().first().cloned())
        .unwrap_or_else(|| "CONSOLE".to_string());

    if log_type == "TXT" {
        let output = section
            .get("LogOutput")
            .and_then(|s| s.value.as_list().first().cloned())
            .unwrap_or_else(|| format!("{}.log", crate::constants::APP_NAME));
        return Ok(Box::new(FilePrinter::new(&output, min_level)?));
    }
    Ok(Box::new(ConsolePrinter::new(min_level)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::conf::parse_str;
    use crate::config::Origin;

    #[test]
    fn levels_parse_and_order() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("err".parse::<LogLevel>(), Ok(LogLevel::Err));
        assert!("SOMETHING".parse::<LogLevel>().is_err());
        assert!(LogLevel::Debug < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Err);
    }

    #[test]
    fn txt_log_type_writes_to_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("out.log");
        let text = format!(
            "logtype = TXT\nlogoutput = {}\nverbosity = DEBUG\n",
            log_path.display()
        );
        let sections = parse_str(&text, Origin::ConfFile);
        let mut printer = from_section(&sections["default"]).unwrap();
        printer.warn("something odd");
        printer.debug("details");
        drop(printer);

        let written = std::fs::read_to_string(&log_path).unwrap();
        assert!(written.contains("[WARN] something odd"));
        assert!(written.contains("[DEBUG] details"));
    }

    #[test]
    fn verbosity_filters_low_levels() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("out.log");
        let text = format!("logtype = TXT\nlogoutput = {}\n", log_path.display());
        let sections = parse_str(&text, Origin::ConfFile);
        // Default verbosity is WARN.
        let mut printer = from_section(&sections["default"]).unwrap();
        printer.debug("hidden");
        printer.err("loud");
        drop(printer);

        let written = std::fs::read_to_string(&log_path).unwrap();
        assert!(!written.contains("hidden"));
        assert!(written.contains("[ERR] loud"));
    }
}
