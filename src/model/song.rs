use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lowest rating a listener can give. 0 means "unrated" and is never accepted as input.
pub const MIN_RATING: u8 = 1;
/// Highest rating; a song rated this is a favorite.
pub const MAX_RATING: u8 = 5;

/// Stable identity of a song, independent of its display fields.
///
/// Two songs with the same title, artist and album are still different songs.
/// Search matches on fields; playlists, playback, rating and removal match on this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(Uuid);

impl SongId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SongId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    id: SongId,
    title: String,
    artist: String,
    album_title: String, // reference by name, resolved through the catalog
    rating: u8,          // 0 = unrated
    favorite: bool,
    play_count: u64,
    last_played: Option<DateTime<Utc>>,
}

impl Song {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album_title: impl Into<String>,
    ) -> Self {
        Self {
            id: SongId::new(),
            title: title.into(),
            artist: artist.into(),
            album_title: album_title.into(),
            rating: 0,
            favorite: false,
            play_count: 0,
            last_played: None,
        }
    }

    /// Copy of this song as a fresh library entry: new identity, no rating, never played.
    pub fn library_copy(&self) -> Self {
        Self::new(&*self.title, &*self.artist, &*self.album_title)
    }

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album_title(&self) -> &str {
        &self.album_title
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub fn play_count(&self) -> u64 {
        self.play_count
    }

    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        self.last_played
    }

    /// Set the rating. Anything outside `1..=5` is rejected and leaves the song untouched.
    ///
    /// Favorite status follows the rating: only a 5 makes a favorite.
    pub fn set_rating(&mut self, rating: u8) -> bool {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return false;
        }
        self.rating = rating;
        self.favorite = rating == MAX_RATING;
        true
    }

    pub(crate) fn record_play(&mut self, at: DateTime<Utc>) {
        self.play_count += 1;
        self.last_played = Some(at);
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} [{}]", self.title, self.artist, self.album_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire() -> Song {
        Song::new("Fire", "The Heavy", "Sons")
    }

    #[test]
    fn test_new_song_is_unrated() {
        let song = fire();
        assert_eq!(song.title(), "Fire");
        assert_eq!(song.artist(), "The Heavy");
        assert_eq!(song.album_title(), "Sons");
        assert_eq!(song.rating(), 0);
        assert!(!song.is_favorite());
        assert_eq!(song.play_count(), 0);
        assert!(song.last_played().is_none());
    }

    #[test]
    fn test_rating_five_marks_favorite() {
        let mut song = fire();
        assert!(song.set_rating(5));
        assert_eq!(song.rating(), 5);
        assert!(song.is_favorite());

        // dropping below 5 clears it again
        assert!(song.set_rating(4));
        assert!(!song.is_favorite());
    }

    #[test]
    fn test_valid_ratings_below_five_are_not_favorites() {
        for rating in 1..5 {
            let mut song = fire();
            assert!(song.set_rating(rating));
            assert_eq!(song.rating(), rating);
            assert!(!song.is_favorite());
        }
    }

    #[test]
    fn test_out_of_range_rating_is_rejected() {
        for rating in [0u8, 6, 7, 42, u8::MAX] {
            let mut song = fire();
            assert!(!song.set_rating(rating));
            assert_eq!(song.rating(), 0);
            assert!(!song.is_favorite());
        }

        let mut rated = fire();
        rated.set_rating(3);
        assert!(!rated.set_rating(6));
        assert_eq!(rated.rating(), 3);
        assert!(!rated.is_favorite());

        let mut favorite = fire();
        favorite.set_rating(5);
        assert!(!favorite.set_rating(0));
        assert!(favorite.is_favorite());
    }

    #[test]
    fn test_identity_is_not_by_fields() {
        let a = fire();
        let b = fire();
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_library_copy_resets_stats() {
        let mut original = fire();
        original.set_rating(5);
        original.record_play(Utc::now());

        let copy = original.library_copy();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.title(), "Fire");
        assert_eq!(copy.rating(), 0);
        assert_eq!(copy.play_count(), 0);
        assert!(copy.last_played().is_none());
    }

    #[test]
    fn test_record_play() {
        let mut song = fire();
        let now = Utc::now();
        song.record_play(now);
        song.record_play(now);
        assert_eq!(song.play_count(), 2);
        assert_eq!(song.last_played(), Some(now));
    }
}
