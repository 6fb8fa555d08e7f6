use serde::{Deserialize, Serialize};

use crate::model::{Song, SongId};

/// How many songs the recent and frequent lists keep.
pub const HISTORY_LIMIT: usize = 10;

/// Recently and frequently played songs, by identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlayHistory {
    recent: Vec<SongId>,   // most recent first
    frequent: Vec<SongId>, // highest play count first
}

impl PlayHistory {
    /// Move `id` to the front of the recent list and re-rank the frequent list.
    ///
    /// `songs` must already reflect the new play count.
    pub fn record(&mut self, id: SongId, songs: &[Song]) {
        self.recent.retain(|r| *r != id);
        self.recent.insert(0, id);
        self.recent.truncate(HISTORY_LIMIT);
        self.rerank(songs);
    }

    /// Drop removed songs from both lists.
    pub fn forget(&mut self, removed: &[SongId], songs: &[Song]) {
        self.recent.retain(|r| !removed.contains(r));
        self.rerank(songs);
    }

    pub fn recent(&self) -> &[SongId] {
        &self.recent
    }

    pub fn frequent(&self) -> &[SongId] {
        &self.frequent
    }

    // Every library song is ranked, played or not. Ties keep library order (sort_by is stable).
    fn rerank(&mut self, songs: &[Song]) {
        let mut ranked: Vec<&Song> = songs.iter().collect();
        ranked.sort_by(|a, b| b.play_count().cmp(&a.play_count()));
        self.frequent = ranked
            .into_iter()
            .take(HISTORY_LIMIT)
            .map(Song::id)
            .collect();
    }
}
