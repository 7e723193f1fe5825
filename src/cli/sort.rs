use crate::{
    error, info,
    prompt::{self, TermPrompter},
    sorter, spotify, utils,
};

pub async fn sort(days: Option<u32>) {
    let mut prompter = TermPrompter;

    let days = match days {
        Some(days) => days,
        None => prompt::ask_days_back(&mut prompter),
    };
    let cutoff = utils::cutoff_days_back(days);

    let api = match spotify::WebApi::load().await {
        Ok(api) => api,
        Err(e) => {
            error!(
                "Failed to load token. Please run spomcli auth\n Error: {}",
                e
            );
        }
    };

    let tracks = match sorter::fetch_new_tracks(&api, cutoff).await {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to fetch saved tracks: {}", e),
    };

    if tracks.is_empty() {
        info!("Nothing to sort.");
        return;
    }

    let playlists = match sorter::resolve_playlists(&api, &tracks).await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to resolve monthly playlists: {}", e),
    };

    if let Err(e) = sorter::reconcile_playlists(&api, &tracks, &playlists, &mut prompter).await {
        error!("Failed to insert tracks: {}", e);
    }
}
