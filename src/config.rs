use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::scanner::DEFAULT_RESULT_CAP;
use crate::snippet::DEFAULT_CONTEXT;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    let mut invalid = Vec::new();
    Config {
        port: get_env_parsed("SERVER_PORT", 3000, &mut invalid),
        sites_dir: get_env_or_default("SITES_DIR", "./config/root").into(),
        links_file: get_env_or_default("LINKS_FILE", "./config/links.json").into(),
        sites_file: get_env_or_default("SITES_FILE", "./config/websites.txt").into(),
        search_context: get_env_parsed("SEARCH_CONTEXT", DEFAULT_CONTEXT, &mut invalid),
        result_cap: get_env_parsed("SEARCH_RESULT_CAP", DEFAULT_RESULT_CAP, &mut invalid),
        skip_scripts: get_env_parsed("SEARCH_SKIP_SCRIPTS", false, &mut invalid),
        log_level: get_env_parsed("LOG_LEVEL", tracing::Level::INFO, &mut invalid),
        invalid_vars: invalid,
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sites_dir: PathBuf,
    pub links_file: PathBuf,
    pub sites_file: PathBuf,
    pub search_context: usize,
    pub result_cap: usize,
    pub skip_scripts: bool,
    pub log_level: tracing::Level,
    /// Variables that were set but failed to parse; their defaults are in use.
    /// Reported once logging is up, since CONFIG is built before that.
    pub invalid_vars: Vec<String>,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed<T: FromStr>(key: &str, default: T, invalid: &mut Vec<String>) -> T {
    parse_or_default(key, env::var(key).ok().as_deref(), default, invalid)
}

fn parse_or_default<T: FromStr>(
    key: &str,
    raw: Option<&str>,
    default: T,
    invalid: &mut Vec<String>,
) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            invalid.push(key.to_string());
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default() {
        let mut invalid = Vec::new();
        assert_eq!(parse_or_default("SERVER_PORT", Some("8080"), 3000u16, &mut invalid), 8080);
        assert_eq!(parse_or_default("SERVER_PORT", Some(" 8080 "), 3000u16, &mut invalid), 8080);
        assert!(parse_or_default("SEARCH_SKIP_SCRIPTS", Some("true"), false, &mut invalid));
        assert_eq!(
            parse_or_default("LOG_LEVEL", Some("debug"), tracing::Level::INFO, &mut invalid),
            tracing::Level::DEBUG
        );
        assert!(invalid.is_empty());
    }

    #[test]
    fn test_invalid_values_are_collected() {
        let mut invalid = Vec::new();
        assert_eq!(parse_or_default("SERVER_PORT", Some("eighty"), 3000u16, &mut invalid), 3000);
        assert_eq!(parse_or_default("SEARCH_CONTEXT", Some("-1"), 100usize, &mut invalid), 100);
        assert_eq!(invalid, vec!["SERVER_PORT", "SEARCH_CONTEXT"]);
    }

    #[test]
    fn test_missing_env_falls_back() {
        let mut invalid = Vec::new();
        assert_eq!(get_env_parsed("SITESEARCH_TEST_UNSET_VAR", 42usize, &mut invalid), 42);
        assert_eq!(parse_or_default("SERVER_PORT", None, 3000u16, &mut invalid), 3000);
        assert!(invalid.is_empty());
    }
}
