use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{variable} is not a valid socket address: {value}")]
    InvalidAddress { variable: &'static str, value: String },
    #[error("FRONTEND_URL is not a valid header value: {0}")]
    InvalidFrontendUrl(String),
    #[error("NAME_MATCHING must be \"exact\" or \"case-insensitive\", got {0}")]
    InvalidNameMatching(String),
    #[error("Could not bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}
