// Catalog loading from plain text files
//
// Index file: one "album title, artist" pair per line.
// Album file: "<title>_<artist>.txt", header "title, artist, genre, year",
// then one song title per line.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::Catalog;
use crate::error::{Error, Result};
use crate::model::{Album, Song};

/// What happened while loading: how many albums made it in and which didn't.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedAlbum>,
}

#[derive(Debug, Clone)]
pub struct SkippedAlbum {
    pub entry: String,
    pub reason: String,
}

impl LoadReport {
    fn skip(&mut self, entry: impl Into<String>, reason: impl Into<String>) {
        let entry = entry.into();
        let reason = reason.into();
        warn!("Skipping album '{}': {}", entry, reason);
        self.skipped.push(SkippedAlbum { entry, reason });
    }
}

pub fn album_file_name(title: &str, artist: &str) -> String {
    format!("{}_{}.txt", title, artist)
}

impl Catalog {
    /// Load a catalog from `dir`, reading `index_file` inside it.
    ///
    /// Never fails as a whole: a missing index yields an empty catalog and every
    /// bad album is skipped with a warning. The report says what was dropped.
    pub fn load<P: AsRef<Path>>(dir: P, index_file: &str) -> (Self, LoadReport) {
        let dir = dir.as_ref();
        let index_path = dir.join(index_file);
        let mut catalog = Catalog::new();
        let mut report = LoadReport::default();

        let index = match fs::read_to_string(&index_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read catalog index {}: {}", index_path.display(), e);
                return (catalog, report);
            }
        };

        for (line_no, line) in index.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let Some((title, artist)) = parse_index_line(line) else {
                report.skip(line.trim(), format!("malformed index line {}", line_no + 1));
                continue;
            };

            let path = dir.join(album_file_name(&title, &artist));
            match load_album_file(&path, &title, &artist) {
                Ok(album) => {
                    debug!("Loaded '{}' with {} songs", album.title(), album.len());
                    catalog.albums.push(album);
                    report.loaded += 1;
                }
                Err(e) => report.skip(format!("{}, {}", title, artist), e.to_string()),
            }
        }

        info!(
            "Catalog loaded from {}: {} albums, {} skipped",
            dir.display(),
            report.loaded,
            report.skipped.len()
        );
        (catalog, report)
    }
}

fn parse_index_line(line: &str) -> Option<(String, String)> {
    let mut parts = line.split(',').map(str::trim);
    let title = parts.next().filter(|t| !t.is_empty())?;
    let artist = parts.next().filter(|a| !a.is_empty())?;
    Some((title.to_string(), artist.to_string()))
}

fn load_album_file(path: &Path, index_title: &str, index_artist: &str) -> Result<Album> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_album(path, &content, index_title, index_artist)
}

/// Parse the contents of one album file.
///
/// Songs take their artist and album title from the index entry, so they line up
/// with what users type when importing.
pub(crate) fn parse_album(
    path: &Path,
    content: &str,
    index_title: &str,
    index_artist: &str,
) -> Result<Album> {
    let malformed = |reason: &str| Error::MalformedAlbum {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    };

    let mut lines = content.lines();
    let header = lines.next().ok_or_else(|| malformed("empty file"))?;
    let fields: Vec<&str> = header.split(',').map(str::trim).collect();
    if fields.len() < 4 {
        return Err(malformed("header needs title, artist, genre, year"));
    }

    let year: u32 = fields[3]
        .parse()
        .map_err(|_| malformed(&format!("bad year '{}'", fields[3])))?;

    let mut album = Album::new(fields[0], fields[1], fields[2], year);
    for song_title in lines.map(str::trim).filter(|l| !l.is_empty()) {
        album.add_song(Song::new(song_title, index_artist, index_title));
    }

    Ok(album)
}
