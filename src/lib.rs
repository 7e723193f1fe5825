//! Monthly Liked-Songs Sorter Library
//!
//! This library backs `spomcli`, a command-line tool that files a Spotify
//! user's liked songs into monthly playlists based on the time each track
//! was saved. It pages through the saved-tracks collection, buckets new
//! tracks by calendar month, makes sure the matching monthly playlist
//! exists, and inserts the tracks that are not already in it.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token persistence and refresh
//! - `prompt` - Interactive terminal prompts behind a testable seam
//! - `server` - Local HTTP server for OAuth callbacks
//! - `sorter` - The fetch/resolve/reconcile sorting pipeline
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Timestamp parsing and label formatting helpers
//!
//! # Example
//!
//! ```
//! use spomcli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spomcli::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod prompt;
pub mod server;
pub mod sorter;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object so the pipeline can propagate
/// HTTP errors, parse errors, and plain string errors through one channel
/// while keeping Send + Sync bounds for async contexts.
///
/// # Example
///
/// ```
/// use spomcli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Used for general status updates, such as per-track insert/skip decisions
/// and pagination progress summaries.
///
/// # Example
///
/// ```
/// info!("Found {} new saved tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used when an operation completes, e.g. a playlist was created or tracks
/// were inserted.
///
/// # Example
///
/// ```
/// success!("Inserted {} tracks into {}!", count, name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable errors; the process terminates with exit code 1
/// immediately after the message is printed.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as duplicate
/// playlist names encountered while indexing.
///
/// # Example
///
/// ```
/// warning!("Duplicate playlist name '{}'", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
