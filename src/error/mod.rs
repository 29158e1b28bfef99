//! Unified error handling.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network, Stream, and Config errors
//! - **Unified Error Type**: `GuruError` consolidates all error types
//! - **Error Context**: Operation, guru, and endpoint attached to errors
//! - **Result Type Alias**: `GuruResult<T>` for consistent return types
//!
//! # Example
//!
//! ```ignore
//! use guru_stream::error::{ErrorContext, GuruResult, ResultExt};
//!
//! fn load() -> GuruResult<GuidanceConfig> {
//!     GuidanceConfig::from_env().context(ErrorContext::new("load_config"))
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, stream cut off | Yes |
//! | Server | Backend errors (5xx) | Yes |
//! | Client | Undecodable responses | No |
//! | User | Bad request, cancelled | No |
//! | Configuration | Invalid settings | No |

mod category;
mod config;
mod context;
mod guru_error;
mod network;
mod result;
mod stream;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use guru_error::GuruError;
pub use network::{classify_reqwest_error, NetworkError};
pub use result::{GuruResult, ResultExt};
pub use stream::StreamError;
