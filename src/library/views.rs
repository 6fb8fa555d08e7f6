// Derived, read-only views over the library's songs
// Everything here returns fresh copies and leaves the library alone

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use super::Library;
use crate::catalog::Catalog;
use crate::model::Song;

/// Minimum songs a genre needs before it gets its own playlist.
pub const GENRE_PLAYLIST_MIN_SONGS: usize = 10;

/// Ratings at or above this count as "top rated".
pub const TOP_RATED_MIN: u8 = 4;

impl Library {
    pub fn songs_by_title(&self) -> Vec<Song> {
        let mut songs = self.songs();
        songs.sort_by(|a, b| a.title().cmp(b.title()));
        songs
    }

    pub fn songs_by_artist(&self) -> Vec<Song> {
        let mut songs = self.songs();
        songs.sort_by(|a, b| a.artist().cmp(b.artist()));
        songs
    }

    /// Highest rated first; equal ratings keep library order.
    pub fn songs_by_rating(&self) -> Vec<Song> {
        let mut songs = self.songs();
        songs.sort_by(|a, b| b.rating().cmp(&a.rating()));
        songs
    }

    pub fn favorites(&self) -> Vec<Song> {
        self.songs
            .iter()
            .filter(|s| s.is_favorite())
            .cloned()
            .collect()
    }

    pub fn top_rated(&self) -> Vec<Song> {
        let mut songs: Vec<Song> = self
            .songs
            .iter()
            .filter(|s| s.rating() >= TOP_RATED_MIN)
            .cloned()
            .collect();
        songs.sort_by(|a, b| b.rating().cmp(&a.rating()));
        songs
    }

    /// Songs grouped by their album's genre, only for genres with enough songs.
    ///
    /// The genre comes from the catalog album named by each song's album title.
    /// Songs whose album is not in the catalog are left out.
    pub fn genre_playlists(&self, catalog: &Catalog) -> BTreeMap<String, Vec<Song>> {
        let mut buckets: BTreeMap<String, Vec<Song>> = BTreeMap::new();
        for song in &self.songs {
            if let Some(album) = catalog.find_album(song.album_title()) {
                buckets
                    .entry(album.genre().to_string())
                    .or_default()
                    .push(song.clone());
            }
        }
        buckets.retain(|_, songs| songs.len() >= GENRE_PLAYLIST_MIN_SONGS);
        buckets
    }

    /// The whole library in random order.
    pub fn shuffled_songs<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Song> {
        let mut songs = self.songs();
        songs.shuffle(rng);
        songs
    }
}
