//! Session metrics.
//!
//! Recorded through the `metrics` facade; nothing is emitted unless the
//! binary installs a recorder.

use metrics::counter;

/// Counter of session cookies handed out by the conversion endpoint.
pub const JWT_COOKIE_ISSUED_TOTAL: &str = "jwt_cookie_issued_total";

/// Why a cookie was issued, used as the `reason` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueReason {
    New,
    Refresh,
}

impl IssueReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Refresh => "refresh",
        }
    }
}

pub fn report_jwt_cookie_issued(reason: IssueReason) {
    counter!(JWT_COOKIE_ISSUED_TOTAL, "reason" => reason.as_str()).increment(1);
}
