//! HTTP client, transport and pagination for the Behave API.
//!
//! This module provides the main entry point [`BehaveClient`], the
//! [`Transport`] seam it sends requests through, and the page iteration
//! helpers in [`paginated`].
//!
//! # Example
//!
//! ```no_run
//! use behave_rs::{BehaveClient, ClientConfig, ApiToken};
//! use std::time::Duration;
//!
//! # fn example() -> behave_rs::Result<()> {
//! let client = BehaveClient::with_config(
//!     ApiToken::new("your-app-token")?,
//!     ClientConfig::default().with_timeout(Duration::from_secs(5)),
//! )?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod transport;

pub use config::{ClientConfig, BASE_URL_ENV_VAR, DEFAULT_BASE_URL, TOKEN_ENV_VAR};
pub use http::BehaveClient;
pub use paginated::{
    iterate, IterateOptions, IterationState, IterationSummary, Page, PageRequest, PageSource,
    PageStream, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};
pub(crate) use http::ClientInner;
pub(crate) use transport::path_segment;
