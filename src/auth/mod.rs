//! Authentication for the Behave API.
//!
//! Behave authenticates applications with a single long-lived app token,
//! sent as the `X-Behave-Api-Token` header on every request. There is no
//! session or refresh flow; the token is created once and injected by the
//! client into each outgoing request.
//!
//! ```
//! use behave_rs::{ApiToken, BehaveClient, ClientConfig};
//!
//! # fn example() -> behave_rs::Result<()> {
//! let token = ApiToken::new("your-app-token")?;
//! let client = BehaveClient::with_config(token, ClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

mod token;

pub use token::{ApiToken, TOKEN_HEADER};
