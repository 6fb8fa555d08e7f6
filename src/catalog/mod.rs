// The store everyone imports from
// Loaded once at startup; albums can be appended later but never removed

pub mod loader;

pub use loader::{album_file_name, LoadReport, SkippedAlbum};

use tracing::info;

use crate::model::{eq_ignore_case, Album, Song};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    albums: Vec<Album>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_albums(albums: Vec<Album>) -> Self {
        Self { albums }
    }

    /// Snapshot of every album, in load order.
    pub fn albums(&self) -> Vec<Album> {
        self.albums.clone()
    }

    /// First album whose title matches, ignoring case.
    pub fn find_album(&self, title: &str) -> Option<&Album> {
        self.albums.iter().find(|a| eq_ignore_case(a.title(), title))
    }

    /// First song on any album whose title matches, ignoring case.
    pub fn find_song(&self, title: &str) -> Option<&Song> {
        self.albums
            .iter()
            .flat_map(|a| a.songs())
            .find(|s| eq_ignore_case(s.title(), title))
    }

    pub fn add_album(&mut self, album: Album) {
        info!("Catalog: added album '{}' by {}", album.title(), album.artist());
        self.albums.push(album);
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn song_count(&self) -> usize {
        self.albums.iter().map(Album::len).sum()
    }

    pub fn album_titles(&self) -> Vec<String> {
        self.albums.iter().map(|a| a.title().to_string()).collect()
    }

    pub fn song_titles(&self) -> Vec<String> {
        self.albums
            .iter()
            .flat_map(|a| a.songs())
            .map(|s| s.title().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_albums(vec![
            Album::new("Sons", "The Heavy", "Rock", 2020)
                .with_track("Fire")
                .with_track("The Thief"),
            Album::new("Begin Again", "Norah Jones", "Pop", 2019)
                .with_track("My Heart Is Full")
                .with_track("Fire"),
        ])
    }

    #[test]
    fn test_find_album_ignores_case() {
        let catalog = catalog();
        assert_eq!(catalog.find_album("sons").map(|a| a.artist()), Some("The Heavy"));
        assert_eq!(catalog.find_album("BEGIN AGAIN").map(|a| a.year()), Some(2019));
        assert!(catalog.find_album("Nope").is_none());
    }

    #[test]
    fn test_find_song_returns_first_hit() {
        let catalog = catalog();
        let fire = catalog.find_song("FIRE").unwrap();
        assert_eq!(fire.album_title(), "Sons");
        assert!(catalog.find_song("Missing").is_none());
    }

    #[test]
    fn test_albums_is_a_snapshot() {
        let catalog = catalog();
        let mut albums = catalog.albums();
        albums.clear();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_add_album() {
        let mut catalog = catalog();
        catalog.add_album(Album::new("21", "Adele", "Pop", 2011).with_track("Rolling in the Deep"));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.song_count(), 5);
        assert!(catalog.find_song("rolling in the deep").is_some());
        assert_eq!(catalog.album_titles(), ["Sons", "Begin Again", "21"]);
    }
}
