use tokio::sync::Mutex;

use crate::{
    Res,
    management::TokenManager,
    sorter::SpotifyService,
    spotify::{playlists, tracks},
    types::{Playlist, SavedTrack, Track},
};

/// Production implementation of [`SpotifyService`] backed by the Spotify
/// Web API. Holds the token manager behind a mutex so the shared reference
/// methods can refresh the access token when it expires.
pub struct WebApi {
    token_mgr: Mutex<TokenManager>,
}

impl WebApi {
    /// Loads the persisted token from the local cache. Fails when no token
    /// has been stored yet, in which case the user needs to run
    /// `spomcli auth` first.
    pub async fn load() -> Result<Self, String> {
        let token_mgr = TokenManager::load().await?;
        Ok(WebApi {
            token_mgr: Mutex::new(token_mgr),
        })
    }

    async fn token(&self) -> String {
        self.token_mgr.lock().await.get_valid_token().await
    }
}

impl SpotifyService for WebApi {
    async fn saved_tracks(&self, limit: u32, offset: u32) -> Res<Vec<SavedTrack>> {
        let token = self.token().await;
        Ok(tracks::get_saved_tracks(&token, limit, offset).await?)
    }

    async fn user_playlists(&self, limit: u32, offset: u32) -> Res<Vec<Playlist>> {
        let token = self.token().await;
        Ok(playlists::get_user_playlists(&token, limit, offset).await?)
    }

    async fn create_playlist(&self, name: &str) -> Res<Playlist> {
        let token = self.token().await;
        Ok(playlists::create_playlist(&token, name).await?)
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Vec<Track>> {
        let token = self.token().await;
        Ok(playlists::get_playlist_tracks(&token, playlist_id, limit, offset).await?)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: Vec<String>) -> Res<()> {
        let token = self.token().await;
        playlists::add_tracks(&token, playlist_id, uris).await?;
        Ok(())
    }
}
