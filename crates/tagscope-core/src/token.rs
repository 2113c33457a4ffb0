//! `api-token` derivation.
//!
//! The upstream service checks every tag and graph request for an
//! `api-token` header computed as
//!
//! ```text
//! md5("{identity}|{subject}|{TOKEN_SALT}")   // lowercase hex, 32 chars
//! ```
//!
//! where `identity` is the `user-agent` sent with the request. Map queries
//! have no subject and send the literal [`MAPS_TOKEN`] instead.
//!
//! # Example
//!
//! ```rust
//! use tagscope_core::token::{derive_token, DEFAULT_USER_AGENT, MAPS_TOKEN};
//!
//! let token = derive_token(DEFAULT_USER_AGENT, Some("miami"));
//! assert_eq!(token.len(), 32);
//! assert_eq!(derive_token(DEFAULT_USER_AGENT, None), MAPS_TOKEN);
//! ```

use md5::{Digest, Md5};

/// Browser identity sent as `user-agent`; also the identity half of the token.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_2_0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.146 Safari/537.36";

/// Salt lifted from the upstream web app's client-side hashing routine.
///
/// This is an external protocol constant. If the upstream app changes it,
/// tag and graph requests start failing and this value must be updated.
pub const TOKEN_SALT: &str = r#"function(d){var r = M(V(Y(X(d),8*d.length)));return r.toLowerCase()};function M(d){for(var _,m="0123456789ABCDEF",f="",r=0;r<d.length;r++)_=d.charCodeAt(r)"#;

/// Token sent for requests without a subject (map queries).
pub const MAPS_TOKEN: &str = "test";

/// Derive the `api-token` for `identity` and an optional `subject`.
pub fn derive_token(identity: &str, subject: Option<&str>) -> String {
    match subject {
        Some(subject) => {
            let mut hasher = Md5::new();
            hasher.update(format!("{}|{}|{}", identity, subject, TOKEN_SALT).as_bytes());
            hex::encode(hasher.finalize())
        }
        None => MAPS_TOKEN.to_string(),
    }
}
