use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, GetUserPlaylistsResponse,
        Playlist, PlaylistItemsResponse, Track,
    },
};

/// Retrieves one page of the playlists owned or followed by the user.
///
/// Uses offset pagination against `GET /me/playlists`. The caller pages
/// until an empty page comes back to index every playlist name.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `limit` - Maximum number of playlists to return (1-50)
/// * `offset` - Index of the first playlist to return
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried after a 10 second delay; other
/// errors are propagated immediately.
pub async fn get_user_playlists(
    token: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<Playlist>, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/playlists?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        limit = limit,
        offset = offset
    );

    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let json = response.json::<GetUserPlaylistsResponse>().await?;
        return Ok(json.items);
    }
}

/// Creates a new private playlist named after a month label.
///
/// Issues `POST /users/{user_id}/playlists` with `public: false`,
/// `collaborative: false`, and an empty description. The owning user id
/// comes from the configuration.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `name` - Display name of the new playlist (the month label)
///
/// # Returns
///
/// The created playlist with its newly assigned id.
pub async fn create_playlist(token: &str, name: &str) -> Result<Playlist, reqwest::Error> {
    let api_url = format!(
        "{uri}/users/{user}/playlists",
        uri = &config::spotify_apiurl(),
        user = &config::spotify_user()
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: String::new(),
        public: false,
        collaborative: false,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<Playlist>().await?;
    Ok(json)
}

/// Retrieves one page of the tracks currently inside a playlist.
///
/// Uses offset pagination against `GET /playlists/{id}/tracks`. Entries
/// whose track is null (removed or local files) are dropped from the page.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify id of the playlist to read
/// * `limit` - Maximum number of entries to return (1-100)
/// * `offset` - Index of the first entry to return
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried after a 10 second delay; other
/// errors are propagated immediately.
pub async fn get_playlist_tracks(
    token: &str,
    playlist_id: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<Track>, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        id = playlist_id,
        limit = limit,
        offset = offset
    );

    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let json = response.json::<PlaylistItemsResponse>().await?;
        let tracks = json.items.into_iter().filter_map(|item| item.track).collect();
        return Ok(tracks);
    }
}

/// Appends tracks to a playlist in one bulk call.
///
/// Issues `POST /playlists/{id}/tracks` with the given track URIs (at most
/// 100 per call, the API's limit).
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify id of the playlist to append to
/// * `uris` - Track URIs (`spotify:track:...`) to append, in order
///
/// # Returns
///
/// The new snapshot id of the playlist.
pub async fn add_tracks(
    token: &str,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<AddTracksResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = AddTracksRequest { uris };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<AddTracksResponse>().await?;
    Ok(json)
}
