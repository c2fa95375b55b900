use std::collections::HashMap;

/// HTTP request methods.
///
/// Every request is dispatched by path alone, so the method token only
/// matters for logging and for keying route registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a known method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

/// The request as seen by a dynamic route handler.
///
/// Built from the raw URI of the request line; headers and bodies are never
/// read.
#[derive(Debug, Clone)]
pub struct Request {
    /// The URI exactly as it appeared on the request line
    pub uri: String,
    /// The URI with its query string removed
    pub path: String,
    /// Decoded query parameters; the last occurrence of a key wins
    pub query: HashMap<String, String>,
}

impl Request {
    /// Splits `uri` into path and query parameters.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::request::Request;
    /// let req = Request::from_uri("/hello?name=Ada%20L");
    /// assert_eq!(req.path, "/hello");
    /// assert_eq!(req.value("name"), Some("Ada L"));
    /// ```
    pub fn from_uri(uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (uri, ""),
        };

        Self {
            uri: uri.to_string(),
            path: path.to_string(),
            query: parse_query(query),
        }
    }

    /// Retrieves a decoded query parameter by name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(|v| v.as_str())
    }
}

/// Decodes an `application/x-www-form-urlencoded` query string.
///
/// `%XX` escapes and `+` are decoded. Repeated keys keep their last value.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
