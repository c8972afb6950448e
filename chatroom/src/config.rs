use crate::errors::server_error::ServerError;
use axum::http::HeaderValue;
use chatroom_core::NameMatching;
use std::{env, net::SocketAddr};

const DEFAULT_CHAT_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_HTTP_ADDRESS: &str = "0.0.0.0:3001";

#[derive(Debug, Clone)]
pub struct Config {
    pub chat_address: SocketAddr,
    pub http_address: SocketAddr,
    pub frontend_url: Option<HeaderValue>,
    pub name_matching: NameMatching,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenvy::dotenv` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ServerError> {
        Config::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let chat_address = parse_address(
            "CHAT_ADDRESS",
            var("CHAT_ADDRESS").unwrap_or_else(|| DEFAULT_CHAT_ADDRESS.to_string()),
        )?;

        let http_address = parse_address(
            "HTTP_ADDRESS",
            var("HTTP_ADDRESS").unwrap_or_else(|| DEFAULT_HTTP_ADDRESS.to_string()),
        )?;

        let frontend_url = var("FRONTEND_URL")
            .map(|url| {
                url.parse::<HeaderValue>()
                    .or(Err(ServerError::InvalidFrontendUrl(url)))
            })
            .transpose()?;

        let name_matching = match var("NAME_MATCHING").as_deref() {
            None | Some("exact") => NameMatching::Exact,
            Some("case-insensitive") => NameMatching::CaseInsensitive,
            Some(other) => return Err(ServerError::InvalidNameMatching(other.to_string())),
        };

        Ok(Config {
            chat_address,
            http_address,
            frontend_url,
            name_matching,
        })
    }
}

fn parse_address(variable: &'static str, value: String) -> Result<SocketAddr, ServerError> {
    value
        .parse()
        .or(Err(ServerError::InvalidAddress { variable, value }))
}
