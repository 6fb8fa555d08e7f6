// Entities shared by the catalog and the per-user library

pub mod album;
pub mod playlist;
pub mod song;

pub use album::{Album, AlbumId};
pub use playlist::Playlist;
pub use song::{Song, SongId, MAX_RATING, MIN_RATING};

/// Case-insensitive equality used for every title, artist and playlist lookup.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("Sons", "sons"));
        assert!(eq_ignore_case("THE THIEF", "the thief"));
        assert!(eq_ignore_case("Ölfarbe", "ölfarbe"));
        assert!(!eq_ignore_case("Fire", "Fire "));
        assert!(!eq_ignore_case("Fire", "Fir"));
    }
}
