use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::eq_ignore_case;
use super::song::SongId;

/// A named, ordered list of song references. The same song may appear more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    name: String,
    tracks: Vec<SongId>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            tracks: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison, the way playlists are looked up.
    pub fn is_named(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    /// Owned copy of the track order.
    pub fn tracks(&self) -> Vec<SongId> {
        self.tracks.clone()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains(&self, id: SongId) -> bool {
        self.tracks.contains(&id)
    }

    /// Append a song. No duplicate check.
    pub fn add_song(&mut self, id: SongId) {
        self.tracks.push(id);
        self.modified_at = Utc::now();
        debug!("Added song {} to playlist '{}'", id, self.name);
    }

    /// Remove the first occurrence of a song
    pub fn remove_song(&mut self, id: SongId) -> bool {
        if let Some(pos) = self.tracks.iter().position(|t| *t == id) {
            self.tracks.remove(pos);
            self.modified_at = Utc::now();
            debug!("Removed song {} from playlist '{}'", id, self.name);
            true
        } else {
            false
        }
    }

    /// Remove every occurrence, returns how many were dropped.
    pub fn remove_all(&mut self, id: SongId) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| *t != id);
        let removed = before - self.tracks.len();
        if removed > 0 {
            self.modified_at = Utc::now();
        }
        removed
    }

    /// Randomly permuted snapshot of the track order. The playlist itself is not touched.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SongId> {
        let mut order = self.tracks.clone();
        order.shuffle(rng);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_add_allows_duplicates() {
        let mut playlist = Playlist::new("Road Trip");
        let a = SongId::new();
        let b = SongId::new();
        playlist.add_song(a);
        playlist.add_song(b);
        playlist.add_song(a);

        assert_eq!(playlist.tracks(), vec![a, b, a]);
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn test_remove_first_instance_only() {
        let mut playlist = Playlist::new("Road Trip");
        let a = SongId::new();
        let b = SongId::new();
        playlist.add_song(a);
        playlist.add_song(b);
        playlist.add_song(a);

        assert!(playlist.remove_song(a));
        assert_eq!(playlist.tracks(), vec![b, a]);
    }

    #[test]
    fn test_remove_missing_song_leaves_playlist_unchanged() {
        let mut playlist = Playlist::new("Road Trip");
        let a = SongId::new();
        playlist.add_song(a);

        assert!(!playlist.remove_song(SongId::new()));
        assert_eq!(playlist.tracks(), vec![a]);
    }

    #[test]
    fn test_remove_all() {
        let mut playlist = Playlist::new("Loop");
        let a = SongId::new();
        let b = SongId::new();
        for id in [a, b, a, a] {
            playlist.add_song(id);
        }
        assert_eq!(playlist.remove_all(a), 3);
        assert_eq!(playlist.tracks(), vec![b]);
        assert_eq!(playlist.remove_all(a), 0);
    }

    #[test]
    fn test_tracks_is_a_copy() {
        let mut playlist = Playlist::new("Mine");
        playlist.add_song(SongId::new());
        let mut tracks = playlist.tracks();
        tracks.clear();
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn test_name_lookup_ignores_case() {
        let playlist = Playlist::new("Chill Vibes");
        assert!(playlist.is_named("chill vibes"));
        assert!(playlist.is_named("CHILL VIBES"));
        assert!(!playlist.is_named("chill"));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut playlist = Playlist::new("Shuffle me");
        let ids: Vec<SongId> = (0..20).map(|_| SongId::new()).collect();
        for id in &ids {
            playlist.add_song(*id);
        }

        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = playlist.shuffled(&mut rng);
        assert_eq!(shuffled.len(), ids.len());
        for id in &ids {
            assert!(shuffled.contains(id));
        }
        // original order untouched
        assert_eq!(playlist.tracks(), ids);

        // same seed, same order
        let again = playlist.shuffled(&mut StdRng::seed_from_u64(7));
        assert_eq!(shuffled, again);
    }

    #[test]
    fn test_shuffle_empty() {
        let playlist = Playlist::new("Empty");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(playlist.shuffled(&mut rng).is_empty());
    }
}
