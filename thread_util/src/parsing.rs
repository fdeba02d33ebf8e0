use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ParsingError {
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid status id: {0}")]
    InvalidStatusId(#[from] std::num::ParseIntError),
}

type Result<T> = std::result::Result<T, ParsingError>;

lazy_static! {
    static ref STATUS_URL: Regex =
        Regex::new(r"https://([\S]+\.twitter\.com|twitter\.com|x\.com)/[\S]+/status/([0-9]+)").unwrap();
}

/// Parse a status id from user input, which is either a bare numeric id
/// or a link to the status like `https://twitter.com/jack/status/20`.
pub fn parse_status_id(input: &str) -> Result<u64> {
    let input = input.trim();
    if input.bytes().all(|b| b.is_ascii_digit()) {
        return parse_numeric_id(input);
    }

    let digits = STATUS_URL
        .captures(input)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str())
        .ok_or(ParsingError::InvalidStatus(input.to_string()))?;
    parse_numeric_id(digits)
}

/// Parse an id written as plain digits only, like a path segment. Zero is not an id.
pub fn parse_numeric_id(input: &str) -> Result<u64> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParsingError::InvalidStatus(input.to_string()));
    }
    let id: u64 = input.parse()?;
    if id == 0 {
        return Err(ParsingError::InvalidStatus(input.to_string()));
    }
    Ok(id)
}

/// Human readable form of a link: scheme stripped and trailing slashes trimmed.
pub fn display_url(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    rest.trim_end_matches('/')
}

/// The last path segment of a link, ignoring trailing slashes.
pub fn last_path_segment(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}
