use log::{Level, LevelFilter, SetLoggerError};
use serde::{Deserialize, Serialize};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, ThreadLogMode};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: LevelFilter,
    pub threads: bool,
    pub color: bool,
    pub timestamp: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Info,
            threads: false,
            color: true,
            timestamp: true,
        }
    }
}

/// Installs the terminal logger. Does nothing when logging is disabled.
pub fn init_logger(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    if !config.enabled {
        return Ok(());
    }

    let mut builder = ConfigBuilder::new();
    if config.timestamp {
        builder.set_time_format_rfc3339();
    } else {
        builder.set_time_level(LevelFilter::Off);
    }

    if config.threads {
        builder.set_thread_level(LevelFilter::Info);
        builder.set_thread_mode(ThreadLogMode::Both);
    } else {
        builder.set_thread_level(LevelFilter::Off);
    }

    let color_choice = if config.color {
        ColorChoice::Auto
    } else {
        for level in [
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ] {
            builder.set_level_color(level, None);
        }
        ColorChoice::Never
    };

    TermLogger::init(
        config.level,
        builder.build(),
        TerminalMode::Mixed,
        color_choice,
    )
}

#[cfg(test)]
mod test {
    use log::LevelFilter;

    use super::{init_logger, LoggingConfig};

    // The logger is process wide, so every case shares one test.
    #[test]
    fn logger_installs_once() {
        let disabled = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert!(init_logger(&disabled).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Off);

        let plain = LoggingConfig {
            level: LevelFilter::Debug,
            threads: true,
            color: false,
            timestamp: false,
            ..LoggingConfig::default()
        };
        assert!(init_logger(&plain).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Debug);

        assert!(init_logger(&LoggingConfig::default()).is_err());
    }
}
