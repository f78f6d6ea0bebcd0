//! vidgate-axum: HTTP surface for the vidgate media gateway.
//!
//! Exposes the range-request streaming endpoint plus the listing and
//! signed-URL routes as an axum [`Router`](axum::Router). The storage side
//! is injected through [`GatewayState`], so every handler runs unchanged
//! against a substitute backend in tests.

pub mod app;
pub mod files;
pub mod media_type;
pub mod range;
pub mod state;
pub mod stream;
mod error;
pub use error::{ErrorBody, GatewayError};
pub use state::{GatewaySettings, GatewayState};

pub use app::{listen, router};
