use anyhow::{Context, Result, anyhow};
use std::env;

use crate::provider::tavily::{SearchDepth, TavilySettings, Topic};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: String,
    pub host: String,
    pub port: u16,
    /// The only origin allowed to call the gateway from a browser.
    pub frontend_uri: String,
    pub tavily: TavilySettings,
}

impl Config {
    /// Build the configuration from the process environment.
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&[])
    }

    /// Like [`Config::from_env`], with `overrides` taking precedence over the
    /// environment. Command-line flags come in this way so they can stand in
    /// for a missing variable.
    pub fn from_env_with(overrides: &[(&str, String)]) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(with_overrides(|key| env::var(key).ok(), overrides))
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let mut tavily = TavilySettings::default();
        if let Some(url) = lookup("TAVILY_BASE_URL") {
            tavily.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(depth) = lookup("TAVILY_SEARCH_DEPTH") {
            tavily.search_depth = depth.parse::<SearchDepth>()?;
        }
        if let Some(topic) = lookup("TAVILY_TOPIC") {
            tavily.topic = topic.parse::<Topic>()?;
        }
        if let Some(raw) = lookup("TAVILY_MAX_RESULTS") {
            let max_results = raw
                .trim()
                .parse::<u8>()
                .with_context(|| format!("TAVILY_MAX_RESULTS must be a number, got {raw:?}"))?;
            if !(1..=20).contains(&max_results) {
                return Err(anyhow!(
                    "TAVILY_MAX_RESULTS must be between 1 and 20, got {max_results}"
                ));
            }
            tavily.max_results = max_results;
        }

        Ok(Config {
            tavily_api_key: get_required(&lookup, "TAVILY_API")?,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            frontend_uri: get_required(&lookup, "FRONTEND_URI")?,
            tavily,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn with_overrides<'a, F>(
    base: F,
    overrides: &'a [(&'a str, String)],
) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key| {
        overrides
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .or_else(|| base(key))
    }
}

fn get_required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("Missing required environment variable: {key}"))
}
