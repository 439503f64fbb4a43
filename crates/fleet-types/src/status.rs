//! Response status codes shared by the console and the protocol engine.
//!
//! Codes use the constrained-application encoding: the upper three bits hold
//! the class and the lower five bits the detail, so `4.04` is `0x84`.

use std::fmt;

/// Status reported for a submitted or completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 2.01: the target was created.
    Created,
    /// 2.02: the target was deleted.
    Deleted,
    /// 2.03: the cached representation is still valid.
    Valid,
    /// 2.04: the target was changed.
    Changed,
    /// 2.05: the response carries content.
    Content,
    /// 2.31: the next block may be sent.
    Continue,
    /// 4.00: the request was malformed.
    BadRequest,
    /// 4.01: the requester is not authorised.
    Unauthorized,
    /// 4.02: an option was not understood.
    BadOption,
    /// 4.03: the operation is forbidden.
    Forbidden,
    /// 4.04: the device or path does not exist.
    NotFound,
    /// 4.05: the operation is not allowed on the target.
    MethodNotAllowed,
    /// 4.06: no acceptable representation exists.
    NotAcceptable,
    /// 4.08: a block-wise transfer is incomplete.
    RequestEntityIncomplete,
    /// 4.12: a precondition failed.
    PreconditionFailed,
    /// 4.13: the payload is too large.
    RequestEntityTooLarge,
    /// 4.15: the content format is unsupported.
    UnsupportedContentFormat,
    /// 5.00: the engine or device failed internally.
    InternalServerError,
    /// 5.01: the operation is not implemented.
    NotImplemented,
    /// 5.02: an intermediary received a bad response.
    BadGateway,
    /// 5.03: the service is unavailable.
    ServiceUnavailable,
    /// 5.04: an intermediary timed out.
    GatewayTimeout,
    /// 5.05: proxying is not supported.
    ProxyingNotSupported,
    /// Any code without a name above.
    Other(u8),
}

const NAMED: [(StatusCode, u8); 23] = [
    (StatusCode::Created, 0x41),
    (StatusCode::Deleted, 0x42),
    (StatusCode::Valid, 0x43),
    (StatusCode::Changed, 0x44),
    (StatusCode::Content, 0x45),
    (StatusCode::Continue, 0x5F),
    (StatusCode::BadRequest, 0x80),
    (StatusCode::Unauthorized, 0x81),
    (StatusCode::BadOption, 0x82),
    (StatusCode::Forbidden, 0x83),
    (StatusCode::NotFound, 0x84),
    (StatusCode::MethodNotAllowed, 0x85),
    (StatusCode::NotAcceptable, 0x86),
    (StatusCode::RequestEntityIncomplete, 0x88),
    (StatusCode::PreconditionFailed, 0x8C),
    (StatusCode::RequestEntityTooLarge, 0x8D),
    (StatusCode::UnsupportedContentFormat, 0x8F),
    (StatusCode::InternalServerError, 0xA0),
    (StatusCode::NotImplemented, 0xA1),
    (StatusCode::BadGateway, 0xA2),
    (StatusCode::ServiceUnavailable, 0xA3),
    (StatusCode::GatewayTimeout, 0xA4),
    (StatusCode::ProxyingNotSupported, 0xA5),
];

impl StatusCode {
    /// Decodes a raw wire code.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        NAMED
            .iter()
            .find(|(_, raw)| *raw == code)
            .map_or(Self::Other(code), |(status, _)| *status)
    }

    /// Raw wire code.
    #[must_use]
    pub fn code(self) -> u8 {
        if let Self::Other(code) = self {
            return code;
        }
        NAMED
            .iter()
            .find(|(status, _)| *status == self)
            .map_or(0, |(_, raw)| *raw)
    }

    /// Class digit (`2`, `4` or `5` for named codes).
    #[must_use]
    pub fn class(self) -> u8 {
        self.code() >> 5
    }

    /// Two-digit detail.
    #[must_use]
    pub fn detail(self) -> u8 {
        self.code() & 0x1F
    }

    /// Whether the status reports success (class 2).
    #[must_use]
    pub fn is_success(self) -> bool {
        self.class() == 2
    }

    /// Human-readable name used by the console.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Deleted => "Deleted",
            Self::Valid => "Valid",
            Self::Changed => "Changed",
            Self::Content => "Content",
            Self::Continue => "Continue",
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::BadOption => "Bad Option",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::NotAcceptable => "Not Acceptable",
            Self::RequestEntityIncomplete => "Request Entity Incomplete",
            Self::PreconditionFailed => "Precondition Failed",
            Self::RequestEntityTooLarge => "Request Entity Too Large",
            Self::UnsupportedContentFormat => "Unsupported Content-Format",
            Self::InternalServerError => "Internal Server Error",
            Self::NotImplemented => "Not Implemented",
            Self::BadGateway => "Bad Gateway",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::GatewayTimeout => "Gateway Timeout",
            Self::ProxyingNotSupported => "Proxying Not Supported",
            Self::Other(_) => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} ({})",
            self.class(),
            self.detail(),
            self.name()
        )
    }
}
