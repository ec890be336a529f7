use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Deployment environment; selects the log format and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    /// Human-readable logs at debug level.
    #[default]
    Local,
    /// JSON logs at debug level.
    Dev,
    /// JSON logs at info level.
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env = match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        };
        f.write_str(env)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Input requests CSV file. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Deployment environment.
    #[arg(long, value_enum, env = "ATM_ENV", default_value_t = Environment::Local)]
    pub env: Environment,

    /// Give up waiting for an account or ledger lock after this many milliseconds.
    #[arg(long, env = "ATM_LOCK_TIMEOUT_MS")]
    pub lock_timeout_ms: Option<u64>,
}

impl Config {
    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout_ms.map(Duration::from_millis)
    }
}
