//! Logger setup for the terminal client.
//!
//! Rendered views go to stdout, so by default log lines go to a file next to
//! the credential store instead of interleaving with the screen.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILE_NAME: &str = "docqa.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    File,
    /// Warnings and errors on stderr, the rest on stdout.
    Terminal,
    Both,
}

impl FromStr for LogDestination {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(LogDestination::File),
            "terminal" => Ok(LogDestination::Terminal),
            "both" => Ok(LogDestination::Both),
            other => Err(format!("'{other}' is not one of file, terminal, both")),
        }
    }
}

/// Where and how verbosely to log. Parsed from `destination[:level]`,
/// e.g. `both:debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            level: LevelFilter::Info,
        }
    }
}

impl FromStr for LogSettings {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (destination, level) = match raw.split_once(':') {
            Some((destination, level)) => (
                destination,
                level
                    .trim()
                    .parse::<LevelFilter>()
                    .map_err(|_| format!("'{}' is not a log level", level.trim()))?,
            ),
            None => (raw, LevelFilter::Info),
        };
        Ok(Self {
            destination: destination.parse()?,
            level,
        })
    }
}

/// Installs the global logger. The log file lives in `log_dir`; if it cannot
/// be created, file output is skipped with a note on stderr.
pub fn initialize(settings: LogSettings, log_dir: &Path) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if settings.destination != LogDestination::File {
        loggers.push(TermLogger::new(
            settings.level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if settings.destination != LogDestination::Terminal {
        if let Some(file_logger) = file_logger(settings.level, config.clone(), log_dir) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn file_logger(level: LevelFilter, config: Config, log_dir: &Path) -> Option<Box<dyn SharedLogger>> {
    let path: PathBuf = log_dir.join(LOG_FILE_NAME);
    match File::create(&path) {
        Ok(file) => {
            let logger: Box<dyn SharedLogger> = WriteLogger::new(level, config, file);
            Some(logger)
        }
        Err(err) => {
            eprintln!("Warning: could not create log file {}: {}", path.display(), err);
            None
        }
    }
}
