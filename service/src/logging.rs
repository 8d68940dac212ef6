use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// HTTP stack crates whose records are hidden below TRACE.
const HTTP_STACK_MODULES: &[&str] = &["reqwest", "hyper", "hyper_util", "h2", "rustls"];

pub struct Logger {}

impl Logger {
    /// Install the global terminal logger.
    ///
    /// Records go to stderr so that command output on stdout stays clean, e.g. for `--json`.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let level = config.log_level_filter;

        TermLogger::init(
            level,
            Self::build_log_config(Self::ignored_modules(level)),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
    }

    /// Modules to silence at `level`; TRACE shows everything.
    fn ignored_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            HTTP_STACK_MODULES
        }
    }

    fn build_log_config(ignored: &[&'static str]) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        for &module in ignored {
            builder.add_filter_ignore_str(module);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_stack_is_hidden_below_trace() {
        for level in [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
        ] {
            let ignored = Logger::ignored_modules(level);
            assert!(ignored.contains(&"reqwest"), "{level} should hide reqwest");
            assert!(ignored.contains(&"hyper"), "{level} should hide hyper");
        }
    }

    #[test]
    fn test_trace_shows_everything() {
        assert!(Logger::ignored_modules(LevelFilter::Trace).is_empty());
    }

    #[test]
    fn test_own_crates_are_never_hidden() {
        for module in ["todo_auth", "domain", "todo_client", "service"] {
            assert!(!HTTP_STACK_MODULES.contains(&module));
        }
    }

    #[test]
    fn test_build_log_config_with_and_without_filters() {
        let _filtered = Logger::build_log_config(HTTP_STACK_MODULES);
        let _unfiltered = Logger::build_log_config(&[]);
    }
}
