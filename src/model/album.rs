use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::song::Song;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumId(Uuid);

impl AlbumId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AlbumId {
    fn default() -> Self {
        Self::new()
    }
}

/// An album and its track list, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    id: AlbumId,
    title: String,
    artist: String,
    genre: String,
    year: u32,
    songs: Vec<Song>,
}

impl Album {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        year: u32,
    ) -> Self {
        Self {
            id: AlbumId::new(),
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            year,
            songs: Vec::new(),
        }
    }

    /// Builder-style helper: append a track by this album's artist.
    pub fn with_track(mut self, title: impl Into<String>) -> Self {
        let song = Song::new(title, &*self.artist, &*self.title);
        self.songs.push(song);
        self
    }

    /// Append a song. Duplicates are kept.
    pub fn add_song(&mut self, song: Song) {
        self.songs.push(song);
    }

    /// Same album under a new identity, for a library that imports it.
    pub fn library_copy(&self) -> Self {
        Self {
            id: AlbumId::new(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> AlbumId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Owned copy of the track list.
    pub fn track_list(&self) -> Vec<Song> {
        self.songs.clone()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({}, {})", self.title, self.artist, self.genre, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sons() -> Album {
        Album::new("Sons", "The Heavy", "Rock", 2020)
            .with_track("Fire")
            .with_track("The Thief")
    }

    #[test]
    fn test_album_fields() {
        let album = sons();
        assert_eq!(album.title(), "Sons");
        assert_eq!(album.artist(), "The Heavy");
        assert_eq!(album.genre(), "Rock");
        assert_eq!(album.year(), 2020);
        assert_eq!(album.len(), 2);
        assert_eq!(album.songs()[0].album_title(), "Sons");
        assert_eq!(album.songs()[1].artist(), "The Heavy");
    }

    #[test]
    fn test_track_list_is_a_copy() {
        let album = sons();
        let mut tracks = album.track_list();
        tracks.clear();
        tracks.push(Song::new("Intruder", "Nobody", "Elsewhere"));

        assert_eq!(album.len(), 2);
        assert_eq!(album.track_list()[0].title(), "Fire");
    }

    #[test]
    fn test_duplicate_tracks_are_kept_in_order() {
        let mut album = Album::new("Live", "Band", "Rock", 1999);
        let encore = Song::new("Encore", "Band", "Live");
        album.add_song(encore.clone());
        album.add_song(Song::new("Opener", "Band", "Live"));
        album.add_song(encore);

        let titles: Vec<_> = album.songs().iter().map(|s| s.title()).collect();
        assert_eq!(titles, ["Encore", "Opener", "Encore"]);
    }

    #[test]
    fn test_library_copy_gets_new_id() {
        let album = sons();
        let copy = album.library_copy();
        assert_ne!(copy.id(), album.id());
        assert_eq!(copy.title(), album.title());
        assert_eq!(copy.len(), album.len());
    }
}
