//! # CLI Module
//!
//! The user-facing command layer of spomcli. Each subcommand maps to one
//! function here; the functions coordinate the Spotify integration, the
//! sorting pipeline, and terminal feedback.
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the Spotify OAuth 2.0 PKCE flow and persists the token
//!
//! ### Sorting
//!
//! - [`sort`] - The main pipeline: asks (or takes via `--days`) how far back
//!   to look, fetches the saved tracks newer than that cutoff, resolves the
//!   monthly playlists they belong to, and reconciles each playlist's
//!   membership with a per-playlist confirmation
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (user interaction, feedback)
//!     ↓
//! Sorter Layer (fetch → resolve → reconcile)
//!     ↓
//! Spotify Layer (HTTP requests, token refresh)
//! ```
//!
//! ## Error Handling Philosophy
//!
//! Interactive input errors are recovered by re-prompting. Everything that
//! reaches this layer as an error (missing token, network failure, an
//! unresolvable month label) is reported with the colored output macros and
//! aborts the run; work already committed to the remote service stands.
//! Because no state persists between runs, re-running after an abort is
//! always safe.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spomcli auth              # Authenticate with Spotify
//! spomcli sort              # Sort, prompting for the day count
//! spomcli sort --days 30    # Sort the last 30 days without prompting
//! ```

mod auth;
mod sort;

pub use auth::auth;
pub use sort::sort;
