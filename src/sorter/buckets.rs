use std::collections::{HashMap, HashSet};

use crate::{
    Res, info, success,
    types::{MonthPlaylist, SavedTrack},
    utils, warning,
};

use super::{PLAYLISTS_PAGE_LIMIT, SpotifyService};

/// Resolves the monthly playlists required by `tracks`, creating any that do
/// not exist yet.
///
/// The required labels are the distinct month labels of the tracks'
/// save timestamps, kept in first-seen order. Existing playlists are indexed
/// by name across all pages; a required label found there is reused,
/// anything else is created as a private, non-collaborative playlist named
/// after the label. The returned mapping follows first-seen label order.
///
/// When two remote playlists share a name the later one encountered wins
/// the index. That mirrors the remote state being ambiguous in the first
/// place; a warning is emitted so the user can clean it up.
pub async fn resolve_playlists<S: SpotifyService>(
    service: &S,
    tracks: &[SavedTrack],
) -> Res<Vec<MonthPlaylist>> {
    let mut needed: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for track in tracks {
        let label = utils::month_label(&utils::string_to_datetime(&track.added_at)?);
        if seen.insert(label.clone()) {
            needed.push(label);
        }
    }

    info!("We need a total of {} monthly playlists", needed.len());

    let mut existing: HashMap<String, String> = HashMap::new();
    let mut offset = 0;
    loop {
        let page = service.user_playlists(PLAYLISTS_PAGE_LIMIT, offset).await?;
        if page.is_empty() {
            break;
        }
        offset += PLAYLISTS_PAGE_LIMIT;

        for playlist in page {
            if existing.insert(playlist.name.clone(), playlist.id).is_some() {
                warning!(
                    "Duplicate playlist name '{}'; keeping the one found last",
                    playlist.name
                );
            }
        }
    }

    let mut resolved: Vec<MonthPlaylist> = Vec::with_capacity(needed.len());
    for label in needed {
        match existing.get(&label) {
            Some(id) => {
                info!("The playlist {} already exists!", label);
                resolved.push(MonthPlaylist {
                    label,
                    id: id.clone(),
                });
            }
            None => {
                let created = service.create_playlist(&label).await?;
                success!("Created the playlist {}!", label);
                resolved.push(MonthPlaylist {
                    label,
                    id: created.id,
                });
            }
        }
    }

    Ok(resolved)
}
