//! Process configuration, read from the environment (SPEC_FULL.md §2.6).

use std::env;
use std::net::SocketAddr;

use crate::query::LARGE;
use crate::tokenizer::MAX_WORD_LEN;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    /// Posting-list fetch cap for intersection (`TYPEAHEAD_LARGE`; see
    /// [`crate::query::LARGE`] for the default).
    pub large: usize,
    /// Longest word considered for prefix expansion
    /// (`TYPEAHEAD_MAX_WORD_LEN`; see [`crate::tokenizer::MAX_WORD_LEN`]
    /// for the default).
    pub max_word_len: usize,
}

/// Parse an environment variable's string value as a `usize`, falling
/// back to `default` when absent or unparseable. Pulled out of
/// [`Config::from_env`] so the fallback logic is testable without
/// mutating real process environment variables.
fn parse_usize_var(raw: Option<String>, default: usize) -> usize {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    /// Read configuration from environment variables, loading a local
    /// `.env` file first if present. CLI flags (see [`crate::cli::Cli`])
    /// take precedence over environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("TYPEAHEAD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("TYPEAHEAD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let bind = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000)));

        let large = parse_usize_var(env::var("TYPEAHEAD_LARGE").ok(), LARGE);
        let max_word_len = parse_usize_var(env::var("TYPEAHEAD_MAX_WORD_LEN").ok(), MAX_WORD_LEN);

        Self {
            bind,
            large,
            max_word_len,
        }
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.bind.set_port(port);
        }
        self
    }

    pub fn with_host(mut self, host: Option<String>) -> Self {
        if let Some(host) = host {
            if let Ok(ip) = host.parse() {
                self.bind.set_ip(ip);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_and_max_word_len_fall_back_to_the_query_and_tokenizer_defaults() {
        assert_eq!(parse_usize_var(None, LARGE), LARGE);
        assert_eq!(parse_usize_var(Some("not a number".into()), LARGE), LARGE);
    }

    #[test]
    fn large_and_max_word_len_are_read_from_their_environment_variable() {
        assert_eq!(parse_usize_var(Some("42".into()), LARGE), 42);
        assert_eq!(parse_usize_var(Some("7".into()), MAX_WORD_LEN), 7);
    }
}
