use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, types::{SavedTrack, SavedTracksResponse}, warning};

/// Retrieves one page of the user's saved tracks from the Spotify Web API.
///
/// Fetches a fixed-size slice of the liked-songs collection, newest first,
/// using offset pagination. Each entry carries the save timestamp alongside
/// the track reference.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `limit` - Maximum number of entries to return (1-50)
/// * `offset` - Index of the first entry to return
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<SavedTrack>)` - The page of saved tracks; empty past the end
/// - `Err(reqwest::Error)` - Network error, API error, or HTTP error
///
/// # Rate Limiting
///
/// 429 Too Many Requests responses are handled by honoring the
/// `Retry-After` header: delays up to 120 seconds are slept through and the
/// request is retried, longer delays produce a warning and the request is
/// retried without waiting the full span. 502 Bad Gateway responses are
/// retried after a 10 second pause. Other errors are propagated.
///
/// # API Endpoint
///
/// Uses Spotify's `GET /me/tracks` endpoint with `limit` and `offset`
/// parameters.
///
/// # Example
///
/// ```
/// let page = get_saved_tracks(&token, 20, 0).await?;
/// println!("first page holds {} tracks", page.len());
/// ```
pub async fn get_saved_tracks(
    token: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<SavedTrack>, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/tracks?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        limit = limit,
        offset = offset
    );

    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => {
                if resp.status() == StatusCode::TOO_MANY_REQUESTS {
                    if let Some(retry_after) = resp.headers().get("retry-after") {
                        let retry_after = retry_after
                            .to_str()
                            .unwrap_or("0")
                            .parse::<u64>()
                            .unwrap_or(0);
                        if retry_after <= 120 {
                            sleep(Duration::from_secs(retry_after)).await;
                        } else {
                            warning!(
                                "Retry after has reached an abnormal high of {} seconds.",
                                retry_after
                            );
                        }
                        continue; // retry
                    }
                }

                match resp.error_for_status() {
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
                }
            }
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let json = response.json::<SavedTracksResponse>().await?;
        return Ok(json.items);
    }
}
