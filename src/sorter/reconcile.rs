use std::collections::HashSet;

use crate::{
    Res, info,
    prompt::{self, Prompter},
    success,
    types::{BucketPlan, MonthPlaylist, SavedTrack, Track},
    utils,
};

use super::{PLAYLIST_TRACKS_PAGE_LIMIT, SpotifyService};

/// Inserts the fetched tracks into their monthly playlists, skipping tracks
/// already present and asking for confirmation per playlist.
///
/// Tracks are partitioned by month label; every label must have been
/// resolved by [`super::resolve_playlists`], otherwise an error is returned
/// and the remaining work is aborted (writes already committed to other
/// playlists stand). For each playlist the current membership is paged into
/// a set, the absent tracks become insertion candidates, and a single y/n
/// prompt decides whether the bulk-append happens. Declining, or answering
/// anything but yes, leaves that playlist untouched.
pub async fn reconcile_playlists<S: SpotifyService, P: Prompter>(
    service: &S,
    tracks: &[SavedTrack],
    playlists: &[MonthPlaylist],
    prompter: &mut P,
) -> Res<()> {
    let mut plans: Vec<BucketPlan> = playlists
        .iter()
        .map(|p| BucketPlan {
            label: p.label.clone(),
            playlist_id: p.id.clone(),
            tracks: Vec::new(),
        })
        .collect();

    for saved in tracks {
        let label = utils::month_label(&utils::string_to_datetime(&saved.added_at)?);
        let plan = plans
            .iter_mut()
            .find(|plan| plan.label == label)
            .ok_or_else(|| format!("no playlist resolved for label '{}'", label))?;
        plan.tracks.push(saved.track.clone());
    }

    for plan in &plans {
        let present = current_members(service, &plan.playlist_id).await?;

        let mut to_insert: Vec<&Track> = Vec::new();
        let mut skipped = 0usize;
        for track in &plan.tracks {
            if present.contains(&track.id) {
                info!(
                    "Will not insert {} ({}) into {}, since it already exists there!",
                    track.name, track.id, plan.label
                );
                skipped += 1;
            } else {
                info!("Will insert {} ({}) into {}!", track.name, track.id, plan.label);
                to_insert.push(track);
            }
        }

        if to_insert.is_empty() {
            info!("0 tracks to insert into {}!", plan.label);
            continue;
        }

        let question = format!("Insert {} tracks into {}, y/n?", to_insert.len(), plan.label);
        if prompt::confirm(prompter, &question) {
            let uris: Vec<String> = to_insert.iter().map(|t| t.uri.clone()).collect();
            service.add_tracks(&plan.playlist_id, uris).await?;
            success!(
                "Inserted {} tracks into {}! ({} already present)",
                to_insert.len(),
                plan.label,
                skipped
            );
        } else {
            info!("Did not insert any tracks into {}!", plan.label);
        }
    }

    Ok(())
}

/// Pages the full membership of a playlist into a set of track ids.
async fn current_members<S: SpotifyService>(
    service: &S,
    playlist_id: &str,
) -> Res<HashSet<String>> {
    let mut present: HashSet<String> = HashSet::new();
    let mut offset = 0;
    loop {
        let page = service
            .playlist_tracks(playlist_id, PLAYLIST_TRACKS_PAGE_LIMIT, offset)
            .await?;
        if page.is_empty() {
            break;
        }
        offset += PLAYLIST_TRACKS_PAGE_LIMIT;
        present.extend(page.into_iter().map(|track| track.id));
    }
    Ok(present)
}
