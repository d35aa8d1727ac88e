use serde::Serialize;

/// Request to log in to the Cash Point Pay server.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub account: &'a str,
    pub password: &'a str,
}
