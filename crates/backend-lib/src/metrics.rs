// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const USER_REGISTERED: &str = "user.registered";
pub const LOGIN_SUCCESS: &str = "user.login.success";
pub const LOGIN_FAILURE: &str = "user.login.failure";
pub const SESSION_ISSUED: &str = "session.issued";
pub const SESSION_REJECTED: &str = "session.rejected";
