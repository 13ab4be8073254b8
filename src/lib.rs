//! Typed client for the Lexvault legal research, search and document vault API.
//!
//! ```no_run
//! use lexvault::api::legal::LegalFindParams;
//! use lexvault::{ClientOptions, LexvaultClient};
//!
//! # async fn run() -> lexvault::error::Result<()> {
//! let client = LexvaultClient::new(ClientOptions::from_env()?)?;
//! let params = LegalFindParams::builder()
//!     .query("adverse possession statutory period")
//!     .jurisdiction("us-ca")
//!     .build()?;
//!
//! let found = client.legal().find(&params).await?;
//! for candidate in found.candidates()? {
//!     println!("{} <{}>", candidate.title()?, candidate.url()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod model;

pub use api::client::{HttpRequest, HttpResponse, LexvaultClient, Transport};
pub use api::Service;
pub use config::ClientOptions;
pub use error::{LexvaultError, Result};
pub use model::{ApiEnum, Field, FrozenStore, Model, Params, RawMap, RawStore, Validate, WireEnum};

#[doc(hidden)]
pub mod __private {
    pub use reqwest;
    pub use serde;
    pub use serde_json;
}

#[cfg(test)]
mod error_test;
