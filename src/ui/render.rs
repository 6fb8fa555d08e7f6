// Plain-text formatting for songs, albums and playlists

use crate::model::{Album, Playlist, Song, MAX_RATING};

pub fn stars(rating: u8) -> String {
    let full = rating.min(MAX_RATING) as usize;
    let empty = MAX_RATING as usize - full;
    format!("{}{}", "★".repeat(full), "☆".repeat(empty))
}

pub fn song_line(song: &Song) -> String {
    let mut line = format!(
        "{} - {} [{}] {}",
        song.title(),
        song.artist(),
        song.album_title(),
        stars(song.rating())
    );
    if song.is_favorite() {
        line.push_str(" ♥");
    }
    if song.play_count() > 0 {
        line.push_str(&format!(" ({} plays)", song.play_count()));
    }
    line
}

/// Numbered list, one song per line.
pub fn song_list(songs: &[Song]) -> String {
    songs
        .iter()
        .enumerate()
        .map(|(i, song)| format!("{:>3}. {}\n", i + 1, song_line(song)))
        .collect()
}

pub fn album_block(album: &Album) -> String {
    let mut block = format!(
        "Album: {}\nArtist: {}\nGenre: {}\nYear: {}\nSongs:\n",
        album.title(),
        album.artist(),
        album.genre(),
        album.year()
    );
    for song in album.songs() {
        block.push_str(&format!("  - {}\n", song.title()));
    }
    block
}

pub fn playlist_line(playlist: &Playlist) -> String {
    let count = playlist.len();
    format!(
        "{} ({} {})",
        playlist.name(),
        count,
        if count == 1 { "song" } else { "songs" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn test_song_line() {
        let mut song = Song::new("Fire", "The Heavy", "Sons");
        assert_eq!(song_line(&song), "Fire - The Heavy [Sons] ☆☆☆☆☆");

        song.set_rating(5);
        song.record_play(chrono::Utc::now());
        assert_eq!(song_line(&song), "Fire - The Heavy [Sons] ★★★★★ ♥ (1 plays)");
    }

    #[test]
    fn test_album_block() {
        let album = Album::new("Sons", "The Heavy", "Rock", 2020)
            .with_track("Fire")
            .with_track("The Thief");
        let block = album_block(&album);
        assert!(block.starts_with("Album: Sons\nArtist: The Heavy\nGenre: Rock\nYear: 2020\n"));
        assert!(block.ends_with("  - Fire\n  - The Thief\n"));
    }

    #[test]
    fn test_playlist_line() {
        let mut playlist = Playlist::new("Gym");
        assert_eq!(playlist_line(&playlist), "Gym (0 songs)");
        playlist.add_song(crate::model::SongId::new());
        assert_eq!(playlist_line(&playlist), "Gym (1 song)");
    }
}
