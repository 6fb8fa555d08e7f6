// A single user's music library - the heart of tunestash
// Imports from the catalog, tracks plays, keeps playlists and ratings

pub mod history; // recent and frequent plays
pub mod views;   // sorted/filtered/grouped read-only views

pub use history::HISTORY_LIMIT;
pub use views::{GENRE_PLAYLIST_MIN_SONGS, TOP_RATED_MIN};

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::model::{eq_ignore_case, Album, AlbumId, Playlist, Song, SongId};
use history::PlayHistory;

/// Everything one user owns: imported songs and albums, playlists, play history.
///
/// Songs are per-library copies of catalog songs, so ratings and play counts
/// belong to the user. Every accessor hands out owned snapshots.
///
/// Policies:
/// - importing a song whose title is already in the library is rejected
/// - importing an album never deduplicates its songs
/// - removing an album also removes every song whose album title matches it,
///   which can catch songs from a different album with the same title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    songs: Vec<Song>,
    albums: Vec<Album>,
    playlists: Vec<Playlist>,
    history: PlayHistory,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- import ----

    /// Add the first catalog song with this title (ignoring case).
    ///
    /// Returns false when the catalog has no such song or the library already
    /// holds a song with that title.
    pub fn import_song(&mut self, catalog: &Catalog, title: &str) -> bool {
        if self.songs.iter().any(|s| eq_ignore_case(s.title(), title)) {
            debug!("'{}' is already in the library", title);
            return false;
        }

        let Some(found) = catalog.find_song(title) else {
            debug!("No song titled '{}' in the catalog", title);
            return false;
        };

        let song = found.library_copy();
        info!("Imported song '{}' by {}", song.title(), song.artist());
        self.songs.push(song);
        true
    }

    /// Add a catalog album and all of its songs.
    pub fn import_album(&mut self, catalog: &Catalog, title: &str) -> bool {
        let Some(album) = catalog.find_album(title) else {
            debug!("No album titled '{}' in the catalog", title);
            return false;
        };

        self.songs.extend(album.songs().iter().map(Song::library_copy));
        self.albums.push(album.library_copy());
        info!(
            "Imported album '{}' by {} ({} songs)",
            album.title(),
            album.artist(),
            album.len()
        );
        true
    }

    // ---- search ----

    pub fn search_songs_by_title(&self, title: &str) -> Vec<Song> {
        self.songs_where(|s| eq_ignore_case(s.title(), title))
    }

    pub fn search_songs_by_artist(&self, artist: &str) -> Vec<Song> {
        self.songs_where(|s| eq_ignore_case(s.artist(), artist))
    }

    pub fn search_songs_by_album(&self, album_title: &str) -> Vec<Song> {
        self.songs_where(|s| eq_ignore_case(s.album_title(), album_title))
    }

    pub fn search_albums_by_title(&self, title: &str) -> Vec<Album> {
        self.albums_where(|a| eq_ignore_case(a.title(), title))
    }

    pub fn search_albums_by_artist(&self, artist: &str) -> Vec<Album> {
        self.albums_where(|a| eq_ignore_case(a.artist(), artist))
    }

    /// First song with this title, ignoring case.
    pub fn find_song(&self, title: &str) -> Option<Song> {
        self.songs
            .iter()
            .find(|s| eq_ignore_case(s.title(), title))
            .cloned()
    }

    fn songs_where(&self, pred: impl Fn(&Song) -> bool) -> Vec<Song> {
        self.songs.iter().filter(|s| pred(s)).cloned().collect()
    }

    fn albums_where(&self, pred: impl Fn(&Album) -> bool) -> Vec<Album> {
        self.albums.iter().filter(|a| pred(a)).cloned().collect()
    }

    // ---- accessors ----

    pub fn songs(&self) -> Vec<Song> {
        self.songs.clone()
    }

    pub fn albums(&self) -> Vec<Album> {
        self.albums.clone()
    }

    pub fn song(&self, id: SongId) -> Option<Song> {
        self.songs.iter().find(|s| s.id() == id).cloned()
    }

    pub fn contains_song(&self, id: SongId) -> bool {
        self.songs.iter().any(|s| s.id() == id)
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    fn song_mut(&mut self, id: SongId) -> Option<&mut Song> {
        self.songs.iter_mut().find(|s| s.id() == id)
    }

    fn resolve(&self, ids: &[SongId]) -> Vec<Song> {
        ids.iter().filter_map(|id| self.song(*id)).collect()
    }

    // ---- playback ----

    /// Count a play: bumps the play count, stamps the time, updates history.
    pub fn play(&mut self, id: SongId) -> bool {
        let Some(song) = self.song_mut(id) else {
            return false;
        };
        song.record_play(Utc::now());
        debug!("Playing '{}' (play #{})", song.title(), song.play_count());

        self.history.record(id, &self.songs);
        true
    }

    /// Up to ten songs, most recently played first.
    pub fn recent_plays(&self) -> Vec<Song> {
        self.resolve(self.history.recent())
    }

    /// Up to ten songs, most played first.
    pub fn frequent_plays(&self) -> Vec<Song> {
        self.resolve(self.history.frequent())
    }

    // ---- rating ----

    /// Rate a library song 1 to 5. Out-of-range ratings change nothing.
    pub fn rate_song(&mut self, id: SongId, rating: u8) -> bool {
        match self.song_mut(id) {
            Some(song) => {
                let accepted = song.set_rating(rating);
                if accepted {
                    debug!("Rated '{}' {}", song.title(), rating);
                }
                accepted
            }
            None => false,
        }
    }

    // ---- playlists ----

    pub fn create_playlist(&mut self, name: &str) -> bool {
        if self.playlist_index(name).is_some() {
            return false;
        }
        self.playlists.push(Playlist::new(name));
        info!("Created playlist '{}'", name);
        true
    }

    /// Append a library song to a playlist. Duplicates are allowed.
    pub fn add_song_to_playlist(&mut self, name: &str, id: SongId) -> bool {
        if !self.contains_song(id) {
            return false;
        }
        match self.playlist_mut(name) {
            Some(playlist) => {
                playlist.add_song(id);
                true
            }
            None => false,
        }
    }

    /// Remove the first occurrence of a song from a playlist.
    pub fn remove_song_from_playlist(&mut self, name: &str, id: SongId) -> bool {
        self.playlist_mut(name)
            .map(|playlist| playlist.remove_song(id))
            .unwrap_or(false)
    }

    pub fn get_playlist(&self, name: &str) -> Option<Playlist> {
        self.playlist_index(name).map(|i| self.playlists[i].clone())
    }

    pub fn delete_playlist(&mut self, name: &str) -> bool {
        match self.playlist_index(name) {
            Some(i) => {
                let playlist = self.playlists.remove(i);
                info!("Deleted playlist '{}'", playlist.name());
                true
            }
            None => false,
        }
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.playlists.clone()
    }

    /// The playlist's songs in playlist order, duplicates included.
    pub fn playlist_songs(&self, name: &str) -> Option<Vec<Song>> {
        let i = self.playlist_index(name)?;
        Some(self.resolve(&self.playlists[i].tracks()))
    }

    /// The playlist's songs in a random order.
    pub fn shuffled_playlist<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Option<Vec<Song>> {
        let i = self.playlist_index(name)?;
        Some(self.resolve(&self.playlists[i].shuffled(rng)))
    }

    fn playlist_index(&self, name: &str) -> Option<usize> {
        self.playlists.iter().position(|p| p.is_named(name))
    }

    fn playlist_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.is_named(name))
    }

    // ---- removal ----

    pub fn remove_song(&mut self, id: SongId) -> bool {
        let Some(pos) = self.songs.iter().position(|s| s.id() == id) else {
            return false;
        };
        let song = self.songs.remove(pos);
        info!("Removed song '{}'", song.title());
        self.purge(&[id]);
        true
    }

    /// Remove an album and every song whose album title matches it (ignoring case).
    pub fn remove_album(&mut self, id: AlbumId) -> bool {
        let Some(pos) = self.albums.iter().position(|a| a.id() == id) else {
            return false;
        };
        let album = self.albums.remove(pos);

        let removed: Vec<SongId> = self
            .songs
            .iter()
            .filter(|s| eq_ignore_case(s.album_title(), album.title()))
            .map(Song::id)
            .collect();
        self.songs.retain(|s| !removed.contains(&s.id()));
        info!(
            "Removed album '{}' and {} of its songs",
            album.title(),
            removed.len()
        );

        self.purge(&removed);
        true
    }

    // Removed songs leave every playlist and both history lists.
    fn purge(&mut self, removed: &[SongId]) {
        for playlist in &mut self.playlists {
            for id in removed {
                playlist.remove_all(*id);
            }
        }
        self.history.forget(removed, &self.songs);
    }
}
