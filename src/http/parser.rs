use crate::error::HttpError;
use crate::http::request::Method;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The connection closed (or timed out) before a line arrived.
    Missing,
    /// Fewer than two whitespace-separated tokens.
    Malformed,
}

impl From<ParseError> for HttpError {
    fn from(_: ParseError) -> Self {
        HttpError::BadRequest
    }
}

/// The first line of a request: `<METHOD> <URI> [HTTP/<version>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub uri: String,
    pub version: Option<String>,
}

impl RequestLine {
    /// The method, if it is one this server recognizes.
    pub fn known_method(&self) -> Option<Method> {
        Method::from_str(&self.method)
    }
}

/// Parses a request line. Only the method and URI tokens are required.
pub fn parse_request_line(line: Option<&str>) -> Result<RequestLine, ParseError> {
    let line = line.ok_or(ParseError::Missing)?;
    let mut parts = line.split_whitespace();

    let method = parts.next().ok_or(ParseError::Malformed)?;
    let uri = parts.next().ok_or(ParseError::Malformed)?;
    let version = parts.next();

    Ok(RequestLine {
        method: method.to_string(),
        uri: uri.to_string(),
        version: version.map(str::to_string),
    })
}
