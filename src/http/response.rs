use crate::error::HttpError;

pub const TEXT_PLAIN: &str = "text/plain; charset=UTF-8";
pub const APPLICATION_JSON: &str = "application/json; charset=UTF-8";

/// HTTP status codes the server knows a reason phrase for.
///
/// Dynamic handlers may set any numeric code; codes outside this set are
/// still written, with a generic reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 202 Accepted
    Accepted,
    /// 204 No Content
    NoContent,
    /// 301 Moved Permanently
    MovedPermanently,
    /// 302 Found
    Found,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
    /// 503 Service Unavailable
    ServiceUnavailable,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::Accepted => 202,
            StatusCode::NoContent => 204,
            StatusCode::MovedPermanently => 301,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
            StatusCode::ServiceUnavailable => 503,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            201 => Some(StatusCode::Created),
            202 => Some(StatusCode::Accepted),
            204 => Some(StatusCode::NoContent),
            301 => Some(StatusCode::MovedPermanently),
            302 => Some(StatusCode::Found),
            400 => Some(StatusCode::BadRequest),
            401 => Some(StatusCode::Unauthorized),
            403 => Some(StatusCode::Forbidden),
            404 => Some(StatusCode::NotFound),
            405 => Some(StatusCode::MethodNotAllowed),
            500 => Some(StatusCode::InternalServerError),
            503 => Some(StatusCode::ServiceUnavailable),
            _ => None,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::Accepted => "Accepted",
            StatusCode::NoContent => "No Content",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::Found => "Found",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Reason phrase for an arbitrary numeric code.
    pub fn reason_for(code: u16) -> &'static str {
        Self::from_u16(code)
            .map(|s| s.reason_phrase())
            .unwrap_or("Unknown Status")
    }
}

/// The response a dynamic route handler fills in.
///
/// Starts out as `200` with an empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: StatusCode::Ok.as_u16(),
            body: String::new(),
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }
}

/// A fully decided response, ready to be framed onto the wire.
///
/// Content-Length is not stored; the writer derives it from `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: String,
    /// Whether the CORS header block is emitted.
    pub cors: bool,
    pub body: Vec<u8>,
}

impl Reply {
    /// A plain-text reply with CORS headers.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            cors: true,
            body: body.into().into_bytes(),
        }
    }

    /// A 200 JSON reply with CORS headers.
    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            status: StatusCode::Ok.as_u16(),
            content_type: APPLICATION_JSON.to_string(),
            cors: true,
            body: value.to_string().into_bytes(),
        }
    }

    /// A 200 reply carrying file contents. File replies never carry CORS headers.
    pub fn file(body: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Ok.as_u16(),
            content_type: content_type.into(),
            cors: false,
            body,
        }
    }

    /// The fixed rendering of a taxonomy error: its reason phrase as the body.
    pub fn error(err: HttpError) -> Self {
        Self::text(err.code(), err.reason_phrase())
    }

    pub fn internal_error() -> Self {
        let status = StatusCode::InternalServerError;
        Self::text(status.as_u16(), status.reason_phrase())
    }

    /// Renders what a dynamic handler produced.
    pub fn from_handler(response: Response) -> Self {
        Self::text(response.status, response.body)
    }
}
