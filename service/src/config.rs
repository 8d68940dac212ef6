use clap::builder::TypedValueParser as _;
use clap::{Args, Parser};
use dotenvy::dotenv;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

/// Default todo REST API base URL used when `API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Identity provider group whose members get premium features.
pub const DEFAULT_PREMIUM_GROUP: &str = "Premium-user";

const SESSION_DIR: &str = ".todo_client";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Clone, Debug, Args)]
pub struct Config {
    /// The base URL of the todo REST API, e.g. https://api.example.com/prod
    #[arg(long, env, default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Path of the file the session tokens are kept in between runs.
    /// Defaults to ~/.todo_client/session.json
    #[arg(long, env)]
    session_file: Option<PathBuf>,

    /// Timeout in seconds for a single HTTP request
    #[arg(long, env, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Maximum number of retries for transient HTTP failures
    #[arg(long, env, default_value_t = 3)]
    pub max_retries: u32,

    /// Identity provider group granting premium features such as tags
    #[arg(long, env, default_value = DEFAULT_PREMIUM_GROUP)]
    premium_group: String,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Warn,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

/// Lets `Config` be parsed on its own, outside of the CLI it is normally flattened into.
#[derive(Parser)]
struct Standalone {
    #[command(flatten)]
    config: Config,
}

impl Default for Config {
    fn default() -> Self {
        Standalone::parse_from(["todo"]).config
    }
}

impl Config {
    /// Load a `.env` file into the process environment, if one exists.
    /// Call before parsing so that `env` fallbacks can see its values.
    pub fn load_env_file() {
        dotenv().ok();
    }

    pub fn set_api_base_url(mut self, api_base_url: String) -> Self {
        self.api_base_url = api_base_url;
        self
    }

    /// The API base URL without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn set_session_file(mut self, session_file: PathBuf) -> Self {
        self.session_file = Some(session_file);
        self
    }

    /// The configured session file, else `~/.todo_client/session.json`,
    /// else `.todo_client/session.json` in the working directory.
    pub fn session_file(&self) -> PathBuf {
        if let Some(path) = &self.session_file {
            return path.clone();
        }

        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .unwrap_or_default()
            .join(SESSION_DIR)
            .join(SESSION_FILE_NAME)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn premium_group(&self) -> &str {
        &self.premium_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_defaults() {
        env::remove_var("API_BASE_URL");
        env::remove_var("PREMIUM_GROUP");
        env::remove_var("LOG_LEVEL_FILTER");

        let config = Config::default();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.premium_group(), DEFAULT_PREMIUM_GROUP);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.log_level_filter, LevelFilter::Warn);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var("API_BASE_URL", "https://api.example.com/prod/");
        env::set_var("PREMIUM_GROUP", "Gold");

        let config = Config::default();
        assert_eq!(config.api_base_url(), "https://api.example.com/prod");
        assert_eq!(config.premium_group(), "Gold");

        env::remove_var("API_BASE_URL");
        env::remove_var("PREMIUM_GROUP");
    }

    #[test]
    #[serial]
    fn test_session_file_defaults_under_home() {
        let saved_home = env::var_os("HOME");
        env::remove_var("SESSION_FILE");
        env::set_var("HOME", "/home/tester");

        let config = Config::default();
        assert_eq!(
            config.session_file(),
            PathBuf::from("/home/tester/.todo_client/session.json")
        );

        match saved_home {
            Some(home) => env::set_var("HOME", home),
            None => env::remove_var("HOME"),
        }

        let config = config.set_session_file(PathBuf::from("/tmp/s.json"));
        assert_eq!(config.session_file(), PathBuf::from("/tmp/s.json"));
    }
}
