// tunestash library - catalog, per-user libraries and accounts
// The binaries are thin wrappers around these modules

pub mod accounts; // users, passwords, persistence
pub mod catalog;  // the read-only music store
pub mod config;   // settings and default paths
pub mod error;    // crate-wide error type
pub mod library;  // one user's songs, albums, playlists, history
pub mod model;    // songs, albums, playlists
pub mod ui;       // text menus

pub use accounts::{Account, AccountDirectory};
pub use catalog::{Catalog, LoadReport};
pub use config::Config;
pub use error::{Error, Result};
pub use library::Library;
pub use model::{Album, AlbumId, Playlist, Song, SongId};
