use std::time::Duration;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{Res, info, types::SavedTrack, utils};

use super::{SAVED_TRACKS_PAGE_LIMIT, SpotifyService};

/// Collects every saved track that was liked strictly after `cutoff`.
///
/// Pages through the saved-tracks collection (newest first) until either the
/// collection is exhausted or the oldest entry of the most recently fetched
/// page is at or before the cutoff. The last page may straddle the cutoff,
/// so after accumulation the tail is trimmed of every entry that is not
/// strictly newer. Order is preserved as delivered by the API.
///
/// Reports the number of qualifying tracks via `info!` and shows a spinner
/// while paging.
pub async fn fetch_new_tracks<S: SpotifyService>(
    service: &S,
    cutoff: DateTime<Utc>,
) -> Res<Vec<SavedTrack>> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching saved tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut offset = 0;
    let mut tracks: Vec<SavedTrack> = Vec::new();
    let mut page = service.saved_tracks(SAVED_TRACKS_PAGE_LIMIT, offset).await?;

    loop {
        let Some(oldest) = page.last() else { break };
        if utils::string_to_datetime(&oldest.added_at)? <= cutoff {
            break;
        }

        offset += SAVED_TRACKS_PAGE_LIMIT;
        tracks.append(&mut page);
        pb.set_message(format!("Fetched {} saved tracks...", tracks.len()));

        page = service.saved_tracks(SAVED_TRACKS_PAGE_LIMIT, offset).await?;
    }

    // incorporate the page that tripped the cutoff check
    tracks.append(&mut page);
    pb.finish_and_clear();

    // tracks is ordered by added_at, so trimming from the oldest end is enough
    while let Some(last) = tracks.last() {
        if utils::string_to_datetime(&last.added_at)? > cutoff {
            break;
        }
        tracks.pop();
    }

    info!(
        "Found {} new saved tracks since {}!",
        tracks.len(),
        utils::datetime_to_string(&cutoff)
    );

    Ok(tracks)
}
