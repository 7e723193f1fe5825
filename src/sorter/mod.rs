//! # Sorter Module
//!
//! The sorting pipeline that files newly liked songs into monthly playlists.
//! It runs as three procedures in strict sequence, each taking a service
//! handle and plain data:
//!
//! ```text
//! fetch_new_tracks       page saved tracks back to the cutoff
//!        ↓
//! resolve_playlists      derive month labels, reuse or create playlists
//!        ↓
//! reconcile_playlists    diff membership, confirm, bulk-insert
//! ```
//!
//! ## Service seam
//!
//! All remote access goes through the [`SpotifyService`] trait, which covers
//! the four capability groups the pipeline needs: paginated saved-tracks
//! reads, paginated playlist reads plus creation, paginated membership
//! reads, and bulk-append. The production implementation is
//! [`crate::spotify::WebApi`]; tests supply an in-memory fake.
//!
//! ## Guarantees
//!
//! - Fetching returns exactly the saved tracks strictly newer than the
//!   cutoff, in the order the API delivered them (newest first).
//! - Resolution never creates a playlist whose label already exists, so
//!   re-running without external changes creates nothing the second time.
//! - Reconciliation never re-inserts a track id that is already a member of
//!   its playlist, and declining the per-playlist confirmation leaves that
//!   playlist untouched.
//!
//! Nothing is persisted between runs; membership and existing playlists are
//! re-derived from the live API state every time, so an interrupted run can
//! simply be restarted.

mod buckets;
mod fetch;
mod reconcile;

pub use buckets::resolve_playlists;
pub use fetch::fetch_new_tracks;
pub use reconcile::reconcile_playlists;

use crate::{
    Res,
    types::{Playlist, SavedTrack, Track},
};

/// Page size for the saved-tracks collection.
pub const SAVED_TRACKS_PAGE_LIMIT: u32 = 20;
/// Page size for the user's playlist collection.
pub const PLAYLISTS_PAGE_LIMIT: u32 = 50;
/// Page size for a playlist's member tracks.
pub const PLAYLIST_TRACKS_PAGE_LIMIT: u32 = 100;

/// The remote capabilities the sorting pipeline depends on. All reads use
/// fixed-size offset pagination; saved tracks arrive newest-first.
#[allow(async_fn_in_trait)]
pub trait SpotifyService {
    /// One page of the user's saved tracks, newest first.
    async fn saved_tracks(&self, limit: u32, offset: u32) -> Res<Vec<SavedTrack>>;

    /// One page of the playlists owned or followed by the user.
    async fn user_playlists(&self, limit: u32, offset: u32) -> Res<Vec<Playlist>>;

    /// Creates a private, non-collaborative playlist with an empty
    /// description and returns it.
    async fn create_playlist(&self, name: &str) -> Res<Playlist>;

    /// One page of the tracks currently inside a playlist.
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Vec<Track>>;

    /// Appends the given track URIs to a playlist in one call.
    async fn add_tracks(&self, playlist_id: &str, uris: Vec<String>) -> Res<()>;
}
