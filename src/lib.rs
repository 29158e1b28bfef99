//! guru-stream - streaming spiritual guidance client
//!
//! The core is [`sse::StreamDecoder`], which turns an arbitrarily chunked
//! `data:`-framed response body into structured events. Around it sit the
//! transport seam ([`traits::HttpClient`]), the guidance client, the guru
//! catalogue, and a small CLI.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod guidance;
pub mod gurus;
pub mod logging;
pub mod models;
pub mod session;
pub mod sse;
pub mod traits;

pub use config::GuidanceConfig;
pub use error::{GuruError, GuruResult};
pub use guidance::{GuidanceClient, GuidanceStream};
pub use gurus::GuruKind;
pub use session::GuidanceSession;
pub use sse::{CancelHandle, DecodedEvent, MalformedEventError, StreamDecoder};
