use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::Duration;
use spomcli::Res;
use spomcli::prompt::{Prompter, ask_days_back, confirm};
use spomcli::sorter::{
    SpotifyService, fetch_new_tracks, reconcile_playlists, resolve_playlists,
};
use spomcli::types::{Playlist, SavedTrack, Track};
use spomcli::utils;

// Helper function to create a saved track with a given save timestamp
fn saved_track(id: &str, name: &str, added_at: &str) -> SavedTrack {
    SavedTrack {
        added_at: added_at.to_string(),
        track: Track {
            id: id.to_string(),
            name: name.to_string(),
            uri: format!("spotify:track:{}", id),
        },
    }
}

fn member_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("{}_name", id),
        uri: format!("spotify:track:{}", id),
    }
}

fn page<T: Clone>(items: &[T], limit: u32, offset: u32) -> Vec<T> {
    items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

/// In-memory stand-in for the Spotify Web API. Pages like the real thing
/// and records every playlist creation and every bulk-append.
#[derive(Default)]
struct FakeService {
    saved: Vec<SavedTrack>,
    playlists: Mutex<Vec<Playlist>>,
    members: Mutex<HashMap<String, Vec<Track>>>,
    created: Mutex<Vec<String>>,
    added: Mutex<Vec<(String, Vec<String>)>>,
    saved_pages_served: Mutex<u32>,
}

impl FakeService {
    fn with_saved(saved: Vec<SavedTrack>) -> Self {
        FakeService {
            saved,
            ..Default::default()
        }
    }

    fn add_playlist(&self, id: &str, name: &str, members: Vec<Track>) {
        self.playlists.lock().unwrap().push(Playlist {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.members.lock().unwrap().insert(id.to_string(), members);
    }

    fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    fn added(&self) -> Vec<(String, Vec<String>)> {
        self.added.lock().unwrap().clone()
    }
}

impl SpotifyService for FakeService {
    async fn saved_tracks(&self, limit: u32, offset: u32) -> Res<Vec<SavedTrack>> {
        *self.saved_pages_served.lock().unwrap() += 1;
        Ok(page(&self.saved, limit, offset))
    }

    async fn user_playlists(&self, limit: u32, offset: u32) -> Res<Vec<Playlist>> {
        Ok(page(&self.playlists.lock().unwrap(), limit, offset))
    }

    async fn create_playlist(&self, name: &str) -> Res<Playlist> {
        let id = format!("created-{}", self.created.lock().unwrap().len() + 1);
        self.created.lock().unwrap().push(name.to_string());
        self.add_playlist(&id, name, Vec::new());
        Ok(Playlist {
            id,
            name: name.to_string(),
        })
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Vec<Track>> {
        let members = self.members.lock().unwrap();
        let tracks = members.get(playlist_id).cloned().unwrap_or_default();
        Ok(page(&tracks, limit, offset))
    }

    async fn add_tracks(&self, playlist_id: &str, uris: Vec<String>) -> Res<()> {
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), uris.clone()));

        let mut members = self.members.lock().unwrap();
        let entry = members.entry(playlist_id.to_string()).or_default();
        for uri in uris {
            let id = uri.rsplit(':').next().unwrap_or(&uri).to_string();
            entry.push(member_track(&id));
        }
        Ok(())
    }
}

/// Feeds canned answers to the pipeline and records every question asked.
struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            questions: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, question: &str) -> String {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or_default()
    }
}

#[tokio::test]
async fn test_fetch_returns_only_strictly_newer() {
    let service = FakeService::with_saved(vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-07-18T09:00:00Z"),
        saved_track("t3", "Three", "2023-07-15T08:00:00Z"),
        saved_track("t4", "Four", "2023-07-10T07:00:00Z"),
        saved_track("t5", "Five", "2023-07-01T06:00:00Z"),
    ]);

    let cutoff = utils::string_to_datetime("2023-07-12T00:00:00Z").unwrap();
    let tracks = fetch_new_tracks(&service, cutoff).await.unwrap();

    // Only the three tracks saved after the cutoff, original order kept
    let ids: Vec<&str> = tracks.iter().map(|t| t.track.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_fetch_excludes_exact_cutoff_timestamp() {
    let service = FakeService::with_saved(vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-07-12T00:00:00Z"),
    ]);

    // "Strictly newer" means an exact match on the cutoff is excluded
    let cutoff = utils::string_to_datetime("2023-07-12T00:00:00Z").unwrap();
    let tracks = fetch_new_tracks(&service, cutoff).await.unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].track.id, "t1");
}

#[tokio::test]
async fn test_fetch_empty_collection() {
    let service = FakeService::with_saved(Vec::new());
    let cutoff = utils::string_to_datetime("2023-07-12T00:00:00Z").unwrap();

    let tracks = fetch_new_tracks(&service, cutoff).await.unwrap();
    assert!(tracks.is_empty());

    // The empty first page should settle it
    assert_eq!(*service.saved_pages_served.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_fetch_pages_entire_collection_for_ancient_cutoff() {
    // 45 tracks, one minute apart, newest first
    let newest = utils::string_to_datetime("2023-07-15T12:00:00Z").unwrap();
    let saved: Vec<SavedTrack> = (0..45)
        .map(|i| {
            let at = utils::datetime_to_string(&(newest - Duration::minutes(i)));
            saved_track(&format!("t{}", i), &format!("Track {}", i), &at)
        })
        .collect();
    let service = FakeService::with_saved(saved);

    // A cutoff older than everything walks the whole collection once
    let cutoff = utils::string_to_datetime("2013-07-15T12:00:00Z").unwrap();
    let tracks = fetch_new_tracks(&service, cutoff).await.unwrap();

    assert_eq!(tracks.len(), 45);
    assert_eq!(tracks[0].track.id, "t0");
    assert_eq!(tracks[44].track.id, "t44");

    // Three full pages of 20 plus the empty page that ends the loop
    assert_eq!(*service.saved_pages_served.lock().unwrap(), 4);
}

#[tokio::test]
async fn test_resolve_reuses_existing_and_creates_missing() {
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", Vec::new());

    let tracks = vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-07-18T09:00:00Z"),
        saved_track("t3", "Three", "2023-06-30T08:00:00Z"),
    ];

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();

    // First-seen label order: July before June
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].label, "July '23");
    assert_eq!(resolved[0].id, "july-id");
    assert_eq!(resolved[1].label, "June '23");

    // Only the missing month was created
    assert_eq!(service.created(), vec!["June '23"]);
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let service = FakeService::with_saved(Vec::new());
    let tracks = vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-07-18T09:00:00Z"),
    ];

    let first = resolve_playlists(&service, &tracks).await.unwrap();
    let second = resolve_playlists(&service, &tracks).await.unwrap();

    // The second run finds the playlist the first run created
    assert_eq!(service.created().len(), 1);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].id, second[0].id);
}

#[tokio::test]
async fn test_resolve_duplicate_names_later_wins() {
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("first-id", "July '23", Vec::new());
    service.add_playlist("second-id", "July '23", Vec::new());

    let tracks = vec![saved_track("t1", "One", "2023-07-20T10:00:00Z")];
    let resolved = resolve_playlists(&service, &tracks).await.unwrap();

    // The playlist encountered later in pagination wins the index
    assert_eq!(resolved[0].id, "second-id");
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_reconcile_inserts_all_candidates_when_confirmed() {
    // Three tracks saved within one month, empty playlist
    let tracks = vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-07-18T09:00:00Z"),
        saved_track("t3", "Three", "2023-07-15T08:00:00Z"),
    ];
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", Vec::new());

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();
    let mut prompter = ScriptedPrompter::new(&["y"]);
    reconcile_playlists(&service, &tracks, &resolved, &mut prompter)
        .await
        .unwrap();

    let added = service.added();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].0, "july-id");
    assert_eq!(
        added[0].1,
        vec![
            "spotify:track:t1".to_string(),
            "spotify:track:t2".to_string(),
            "spotify:track:t3".to_string(),
        ]
    );

    // One confirmation, for three tracks
    assert_eq!(prompter.questions.len(), 1);
    assert_eq!(prompter.questions[0], "Insert 3 tracks into July '23, y/n?");
}

#[tokio::test]
async fn test_reconcile_skips_already_present_tracks() {
    let tracks = vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-07-18T09:00:00Z"),
        saved_track("t3", "Three", "2023-07-15T08:00:00Z"),
    ];
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", vec![member_track("t2")]);

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();
    let mut prompter = ScriptedPrompter::new(&["y"]);
    reconcile_playlists(&service, &tracks, &resolved, &mut prompter)
        .await
        .unwrap();

    // t2 is already a member and must not be re-inserted
    let added = service.added();
    assert_eq!(added.len(), 1);
    assert_eq!(
        added[0].1,
        vec![
            "spotify:track:t1".to_string(),
            "spotify:track:t3".to_string(),
        ]
    );
    assert_eq!(prompter.questions[0], "Insert 2 tracks into July '23, y/n?");
}

#[tokio::test]
async fn test_reconcile_declined_writes_nothing() {
    let tracks = vec![saved_track("t1", "One", "2023-07-20T10:00:00Z")];
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", Vec::new());

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();
    let mut prompter = ScriptedPrompter::new(&["n"]);
    reconcile_playlists(&service, &tracks, &resolved, &mut prompter)
        .await
        .unwrap();

    assert!(service.added().is_empty());
}

#[tokio::test]
async fn test_reconcile_empty_answer_declines() {
    let tracks = vec![saved_track("t1", "One", "2023-07-20T10:00:00Z")];
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", Vec::new());

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();
    let mut prompter = ScriptedPrompter::new(&[""]);
    reconcile_playlists(&service, &tracks, &resolved, &mut prompter)
        .await
        .unwrap();

    assert!(service.added().is_empty());
}

#[tokio::test]
async fn test_reconcile_nothing_to_insert_skips_prompt() {
    let tracks = vec![saved_track("t1", "One", "2023-07-20T10:00:00Z")];
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", vec![member_track("t1")]);

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();
    let mut prompter = ScriptedPrompter::new(&[]);
    reconcile_playlists(&service, &tracks, &resolved, &mut prompter)
        .await
        .unwrap();

    // No candidates, so no question and no write
    assert!(prompter.questions.is_empty());
    assert!(service.added().is_empty());
}

#[tokio::test]
async fn test_reconcile_confirms_per_playlist() {
    // Two months; accept July, decline June
    let tracks = vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-06-18T09:00:00Z"),
    ];
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", Vec::new());
    service.add_playlist("june-id", "June '23", Vec::new());

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();
    let mut prompter = ScriptedPrompter::new(&["y", "n"]);
    reconcile_playlists(&service, &tracks, &resolved, &mut prompter)
        .await
        .unwrap();

    let added = service.added();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].0, "july-id");
    assert_eq!(prompter.questions.len(), 2);
}

#[tokio::test]
async fn test_reconcile_unresolved_label_is_an_error() {
    let tracks = vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-08-02T09:00:00Z"),
    ];
    let service = FakeService::with_saved(Vec::new());
    service.add_playlist("july-id", "July '23", Vec::new());

    // Only July was resolved; the August track has nowhere to go
    let resolved = resolve_playlists(&service, &tracks[..1]).await.unwrap();
    let mut prompter = ScriptedPrompter::new(&["y"]);
    let result = reconcile_playlists(&service, &tracks, &resolved, &mut prompter).await;

    assert!(result.is_err());
    assert!(service.added().is_empty());
}

#[tokio::test]
async fn test_full_pipeline_single_month_scenario() {
    // Everything saved within July '23, nothing exists remotely yet
    let service = FakeService::with_saved(vec![
        saved_track("t1", "One", "2023-07-20T10:00:00Z"),
        saved_track("t2", "Two", "2023-07-18T09:00:00Z"),
        saved_track("t3", "Three", "2023-07-15T08:00:00Z"),
    ]);

    let cutoff = utils::string_to_datetime("2013-07-15T12:00:00Z").unwrap();
    let tracks = fetch_new_tracks(&service, cutoff).await.unwrap();
    assert_eq!(tracks.len(), 3);

    let resolved = resolve_playlists(&service, &tracks).await.unwrap();
    assert_eq!(service.created(), vec!["July '23"]);

    let mut prompter = ScriptedPrompter::new(&["y"]);
    reconcile_playlists(&service, &tracks, &resolved, &mut prompter)
        .await
        .unwrap();

    let added = service.added();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].1.len(), 3);
}

#[test]
fn test_ask_days_back_reprompts_until_number() {
    let mut prompter = ScriptedPrompter::new(&["abc", "7"]);
    let days = ask_days_back(&mut prompter);

    assert_eq!(days, 7);
    assert_eq!(prompter.questions.len(), 2);
    assert_eq!(prompter.questions[0], "How many days back should I check?");
    assert_eq!(prompter.questions[1], "Please type a number!");
}

#[test]
fn test_ask_days_back_accepts_first_valid_answer() {
    let mut prompter = ScriptedPrompter::new(&["30"]);
    assert_eq!(ask_days_back(&mut prompter), 30);
    assert_eq!(prompter.questions.len(), 1);
}

#[test]
fn test_confirm_only_leading_y_accepts() {
    let mut prompter = ScriptedPrompter::new(&["y", "Y", "yes", "n", "nope", "", "maybe"]);
    assert!(confirm(&mut prompter, "q?"));
    assert!(confirm(&mut prompter, "q?"));
    assert!(confirm(&mut prompter, "q?"));
    assert!(!confirm(&mut prompter, "q?"));
    assert!(!confirm(&mut prompter, "q?"));
    assert!(!confirm(&mut prompter, "q?"));
    assert!(!confirm(&mut prompter, "q?"));
}
