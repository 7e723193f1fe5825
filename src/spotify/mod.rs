//! # Spotify Integration Module
//!
//! The HTTP layer between the sorting pipeline and the Spotify Web API. It
//! handles authentication, paginated reads, playlist creation, and track
//! insertion, and hides the API's quirks (rate limiting, transient gateway
//! errors) from the higher-level logic.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Sorter)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Saved Tracks (paginated liked-songs reads)
//!     └── Playlist Operations (list, create, members, append)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge generation, browser
//!   launch, local callback server, code-for-token exchange, persistence.
//! - [`tracks`] - Offset-paginated reads of the user's saved tracks
//!   (`GET /me/tracks`), newest first.
//! - [`playlists`] - Playlist listing (`GET /me/playlists`), creation
//!   (`POST /users/{user_id}/playlists`), membership reads
//!   (`GET /playlists/{id}/tracks`), and bulk-append
//!   (`POST /playlists/{id}/tracks`).
//! - [`client`] - [`WebApi`], the production implementation of
//!   [`crate::sorter::SpotifyService`], bundling a token manager with the
//!   request functions above.
//!
//! ## Error Handling
//!
//! Request functions return `Result<_, reqwest::Error>`. Two courtesies are
//! applied before propagating:
//!
//! - **429 Too Many Requests**: the `Retry-After` header is honored with a
//!   sleep for delays up to 120 seconds; longer delays produce a warning
//!   instead.
//! - **502 Bad Gateway**: retried after a 10 second pause.
//!
//! Everything else (auth failures, network failures, malformed payloads)
//! propagates to the caller, where the CLI layer reports it and aborts the
//! run. Writes already committed to the API are not rolled back.
//!
//! ## Authentication Strategy
//!
//! OAuth 2.0 with PKCE: no client secret is stored anywhere. The flow
//! generates a random code verifier, derives the SHA256 challenge, sends the
//! user to the authorization page in their browser, and receives the code on
//! a temporary local HTTP server. Tokens are persisted in the local data
//! directory and refreshed transparently by
//! [`crate::management::TokenManager`] with a safety buffer before expiry.
//!
//! Required scope: `user-library-read playlist-read-private
//! playlist-modify-private`.

pub mod auth;
pub mod client;
pub mod playlists;
pub mod tracks;

pub use client::WebApi;
