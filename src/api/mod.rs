//! # API Module
//!
//! HTTP endpoints for the temporary local web server that backs the OAuth
//! authentication flow. Only two routes exist:
//!
//! - [`callback`] - Receives the authorization code from Spotify's
//!   authorization server and completes the PKCE exchange, storing the
//!   resulting token in the shared auth state.
//! - [`health`] - Returns application status and version, handy for
//!   checking that the callback server actually came up.
//!
//! Built on [Axum](https://docs.rs/axum); the routes are wired up in
//! [`crate::server::start_api_server`] and live only as long as the auth
//! flow runs.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
