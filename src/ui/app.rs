use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};

use super::render::{album_block, playlist_line, song_line, song_list, stars};
use super::suggest::suggestions;
use crate::accounts::AccountDirectory;
use crate::catalog::Catalog;
use crate::library::Library;
use crate::model::{Album, Song};

const MAIN_MENU: &str = "\n1. Log in\n2. Create account\n3. Quit\nChoose option: ";

const LIBRARY_MENU: &str = "\n1. Search\n2. Add song\n3. Add album\n4. Play song\n5. Rate song\n\
6. Remove song\n7. Remove album\n8. Playlists\n9. Views\n0. Log out\nChoose option: ";

const SEARCH_MENU: &str = "\nSearch for:\n1. Song by title\n2. Song by artist\n3. Album by title\n\
4. Album by artist\n5. Songs on an album\n6. Browse the store\nChoose option: ";

const PLAYLIST_MENU: &str = "\nPlaylists:\n1. List playlists\n2. Create playlist\n\
3. Add song to playlist\n4. Remove song from playlist\n5. Show playlist\n6. Shuffle playlist\n\
7. Delete playlist\n0. Back\nChoose option: ";

const VIEWS_MENU: &str = "\nViews:\n1. Songs by title\n2. Songs by artist\n3. Songs by rating\n\
4. Favorites\n5. Top rated\n6. Recently played\n7. Most played\n8. Genre playlists\n\
9. Shuffle library\n0. Back\nChoose option: ";

/// What the caller should do after a menu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Logout,
    Quit, // also used when input runs out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Number(u32),
    Invalid,
    Eof,
}

/// The text menu front end.
///
/// Reads one line per prompt from `input` and writes everything to `output`, so
/// a session can be scripted in tests the same way a user would type it.
pub struct App<'a, R, W> {
    catalog: &'a Catalog,
    accounts: &'a mut AccountDirectory,
    input: R,
    output: W,
    current_user: Option<String>,
    suggestions: usize,
    rng: StdRng,
}

impl<'a, R: BufRead, W: Write> App<'a, R, W> {
    pub fn new(catalog: &'a Catalog, accounts: &'a mut AccountDirectory, input: R, output: W) -> Self {
        Self {
            catalog,
            accounts,
            input,
            output,
            current_user: None,
            suggestions: 3,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_suggestions(mut self, limit: usize) -> Self {
        self.suggestions = limit;
        self
    }

    /// Fixed shuffle order, for reproducible sessions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Main loop: log in, create accounts, quit. Returns when the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "🎵 tunestash - your music library")?;
        writeln!(
            self.output,
            "The store has {} albums and {} songs.",
            self.catalog.len(),
            self.catalog.song_count()
        )?;

        loop {
            let flow = match self.choose(MAIN_MENU)? {
                Choice::Eof | Choice::Number(3) => Flow::Quit,
                Choice::Number(1) => self.login()?,
                Choice::Number(2) => self.create_account()?,
                _ => {
                    self.say("Invalid choice")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }

        self.save_accounts();
        self.say("\n👋 Thanks for using tunestash!")
    }

    // ---- accounts ----

    fn login(&mut self) -> io::Result<Flow> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(Flow::Quit);
        };

        if !self.accounts.authenticate(&username, &password) {
            info!("Failed login for '{}'", username);
            self.say("Invalid username or password.")?;
            return Ok(Flow::Continue);
        }

        info!("'{}' logged in", username);
        self.say(&format!("Welcome, {}!", username))?;
        self.current_user = Some(username);

        let flow = self.library_menu();
        self.current_user = None;
        self.save_accounts();
        flow
    }

    fn create_account(&mut self) -> io::Result<Flow> {
        let Some(username) = self.prompt("Choose a username: ")? else {
            return Ok(Flow::Quit);
        };
        if username.is_empty() {
            self.say("Username cannot be empty.")?;
            return Ok(Flow::Continue);
        }
        let Some(password) = self.prompt("Choose a password: ")? else {
            return Ok(Flow::Quit);
        };
        if password.is_empty() {
            self.say("Password cannot be empty.")?;
            return Ok(Flow::Continue);
        }

        if self.accounts.contains(&username) {
            self.say(&format!("Replacing existing account '{}'.", username))?;
        }
        match self.accounts.create_user(&username, &password) {
            Ok(_) => self.say("Account created. You can log in now.")?,
            Err(e) => {
                error!("Could not create account '{}': {}", username, e);
                self.say(&format!("Could not create account: {}", e))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn save_accounts(&mut self) {
        if let Err(e) = self.accounts.save() {
            error!("Error saving accounts: {}", e);
        }
    }

    // ---- library menu ----

    fn library_menu(&mut self) -> io::Result<Flow> {
        loop {
            let flow = match self.choose(LIBRARY_MENU)? {
                Choice::Eof => Flow::Quit,
                Choice::Number(0) => Flow::Logout,
                Choice::Number(1) => self.search_menu()?,
                Choice::Number(2) => self.add_song()?,
                Choice::Number(3) => self.add_album()?,
                Choice::Number(4) => self.play_song()?,
                Choice::Number(5) => self.rate_song()?,
                Choice::Number(6) => self.remove_song()?,
                Choice::Number(7) => self.remove_album()?,
                Choice::Number(8) => self.playlist_menu()?,
                Choice::Number(9) => self.views_menu()?,
                _ => {
                    self.say("Invalid choice")?;
                    Flow::Continue
                }
            };

            match flow {
                Flow::Continue => {}
                Flow::Logout => {
                    self.say("Logged out.")?;
                    return Ok(Flow::Continue);
                }
                Flow::Quit => return Ok(Flow::Quit),
            }
        }
    }

    fn search_menu(&mut self) -> io::Result<Flow> {
        let choice = self.choose(SEARCH_MENU)?;
        let question = match choice {
            Choice::Eof => return Ok(Flow::Quit),
            Choice::Number(1) => "Enter song title: ",
            Choice::Number(2) | Choice::Number(4) => "Enter artist name: ",
            Choice::Number(3) | Choice::Number(5) => "Enter album title: ",
            Choice::Number(6) => {
                self.browse_store()?;
                return Ok(Flow::Continue);
            }
            _ => {
                self.say("Invalid choice")?;
                return Ok(Flow::Continue);
            }
        };
        let Some(query) = self.prompt(question)? else {
            return Ok(Flow::Quit);
        };

        match choice {
            Choice::Number(1) => {
                let songs = self.library_view(|lib| lib.search_songs_by_title(&query));
                self.show_songs(&songs, "No songs found.")?;
            }
            Choice::Number(2) => {
                let songs = self.library_view(|lib| lib.search_songs_by_artist(&query));
                self.show_songs(&songs, "No songs found.")?;
            }
            Choice::Number(3) => {
                let albums = self.library_view(|lib| lib.search_albums_by_title(&query));
                self.show_albums(&albums)?;
            }
            Choice::Number(4) => {
                let albums = self.library_view(|lib| lib.search_albums_by_artist(&query));
                self.show_albums(&albums)?;
            }
            _ => {
                let songs = self.library_view(|lib| lib.search_songs_by_album(&query));
                self.show_songs(&songs, "No songs found.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn browse_store(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            return self.say("The store is empty.");
        }
        for album in self.catalog.albums() {
            write!(self.output, "{}", album_block(&album))?;
        }
        Ok(())
    }

    fn add_song(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt("Enter song title to add: ")? else {
            return Ok(Flow::Quit);
        };

        let (already, added) = self
            .with_library(|lib, catalog| {
                let already = lib.find_song(&title).is_some();
                (already, !already && lib.import_song(catalog, &title))
            })
            .unwrap_or((false, false));

        if added {
            self.say("Song added successfully!")?;
        } else if already {
            self.say(&format!("'{}' is already in your library.", title))?;
        } else {
            self.say("Song not found in store.")?;
            let titles = self.catalog.song_titles();
            self.hint(&title, &titles)?;
        }
        Ok(Flow::Continue)
    }

    fn add_album(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt("Enter album title to add: ")? else {
            return Ok(Flow::Quit);
        };

        let added = self
            .with_library(|lib, catalog| lib.import_album(catalog, &title))
            .unwrap_or(false);

        if added {
            self.say("Album added successfully!")?;
        } else {
            self.say("Album not found in store.")?;
            let titles = self.catalog.album_titles();
            self.hint(&title, &titles)?;
        }
        Ok(Flow::Continue)
    }

    fn play_song(&mut self) -> io::Result<Flow> {
        let Some(song) = self.pick_song("Enter song title to play: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(song) = song else {
            return Ok(Flow::Continue);
        };

        let id = song.id();
        let played = self
            .with_library(|lib, _| if lib.play(id) { lib.song(id) } else { None })
            .flatten();
        match played {
            Some(song) => self.say(&format!("▶ Now playing: {}", song_line(&song)))?,
            None => self.say("Song not found in your library.")?,
        }
        Ok(Flow::Continue)
    }

    fn rate_song(&mut self) -> io::Result<Flow> {
        let Some(song) = self.pick_song("Enter song title to rate: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(song) = song else {
            return Ok(Flow::Continue);
        };
        let Some(input) = self.prompt("Rating (1-5): ")? else {
            return Ok(Flow::Quit);
        };

        let id = song.id();
        let rated = match input.parse::<u8>() {
            Ok(rating) => self
                .with_library(|lib, _| if lib.rate_song(id, rating) { lib.song(id) } else { None })
                .flatten(),
            Err(_) => None,
        };

        match rated {
            Some(song) => {
                self.say(&format!("Rated '{}' {}", song.title(), stars(song.rating())))?;
                if song.is_favorite() {
                    self.say("♥ Added to favorites")?;
                }
            }
            None => self.say("Invalid rating. Use a number from 1 to 5.")?,
        }
        Ok(Flow::Continue)
    }

    fn remove_song(&mut self) -> io::Result<Flow> {
        let Some(song) = self.pick_song("Enter song title to remove: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(song) = song else {
            return Ok(Flow::Continue);
        };

        let id = song.id();
        if self.with_library(|lib, _| lib.remove_song(id)).unwrap_or(false) {
            self.say(&format!("Removed '{}' from your library.", song.title()))?;
        } else {
            self.say("Song not found in your library.")?;
        }
        Ok(Flow::Continue)
    }

    fn remove_album(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt("Enter album title to remove: ")? else {
            return Ok(Flow::Quit);
        };

        let removed = self
            .with_library(|lib, _| {
                lib.search_albums_by_title(&title)
                    .first()
                    .map(|album| lib.remove_album(album.id()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);

        if removed {
            self.say(&format!("Removed album '{}' and its songs.", title))?;
        } else {
            self.say("Album not found in your library.")?;
        }
        Ok(Flow::Continue)
    }

    // ---- playlists ----

    fn playlist_menu(&mut self) -> io::Result<Flow> {
        loop {
            let flow = match self.choose(PLAYLIST_MENU)? {
                Choice::Eof => Flow::Quit,
                Choice::Number(0) => return Ok(Flow::Continue),
                Choice::Number(1) => self.list_playlists()?,
                Choice::Number(2) => self.create_playlist()?,
                Choice::Number(3) => self.add_to_playlist()?,
                Choice::Number(4) => self.remove_from_playlist()?,
                Choice::Number(5) => self.show_playlist(false)?,
                Choice::Number(6) => self.show_playlist(true)?,
                Choice::Number(7) => self.delete_playlist()?,
                _ => {
                    self.say("Invalid choice")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn list_playlists(&mut self) -> io::Result<Flow> {
        let playlists = self.library_view(|lib| lib.playlists());
        if playlists.is_empty() {
            self.say("No playlists yet.")?;
        }
        for playlist in &playlists {
            writeln!(self.output, "  {}", playlist_line(playlist))?;
        }
        Ok(Flow::Continue)
    }

    fn create_playlist(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Playlist name: ")? else {
            return Ok(Flow::Quit);
        };
        if name.is_empty() {
            self.say("Playlist name cannot be empty.")?;
            return Ok(Flow::Continue);
        }

        if self.with_library(|lib, _| lib.create_playlist(&name)).unwrap_or(false) {
            self.say(&format!("Created playlist '{}'.", name))?;
        } else {
            self.say(&format!("A playlist named '{}' already exists.", name))?;
        }
        Ok(Flow::Continue)
    }

    fn add_to_playlist(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Playlist name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(song) = self.pick_song("Enter song title to add: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(song) = song else {
            return Ok(Flow::Continue);
        };

        let id = song.id();
        if self
            .with_library(|lib, _| lib.add_song_to_playlist(&name, id))
            .unwrap_or(false)
        {
            self.say(&format!("Added '{}' to '{}'.", song.title(), name))?;
        } else {
            self.say("Playlist not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn remove_from_playlist(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Playlist name: ")? else {
            return Ok(Flow::Quit);
        };
        if self.library_view(|lib| lib.get_playlist(&name)).is_none() {
            self.say("Playlist not found.")?;
            return Ok(Flow::Continue);
        }
        let Some(song) = self.pick_song("Enter song title to remove: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(song) = song else {
            return Ok(Flow::Continue);
        };

        let id = song.id();
        if self
            .with_library(|lib, _| lib.remove_song_from_playlist(&name, id))
            .unwrap_or(false)
        {
            self.say(&format!("Removed '{}' from '{}'.", song.title(), name))?;
        } else {
            self.say("That song is not on that playlist.")?;
        }
        Ok(Flow::Continue)
    }

    fn show_playlist(&mut self, shuffle: bool) -> io::Result<Flow> {
        let Some(name) = self.prompt("Playlist name: ")? else {
            return Ok(Flow::Quit);
        };

        let songs = if shuffle {
            let user = self.current_user.as_deref();
            let rng = &mut self.rng;
            user.and_then(|u| self.accounts.get(u))
                .and_then(|account| account.library().shuffled_playlist(&name, rng))
        } else {
            self.library_view(|lib| lib.playlist_songs(&name))
        };

        match songs {
            Some(songs) => self.show_songs(&songs, "This playlist is empty.")?,
            None => self.say("Playlist not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn delete_playlist(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Playlist name: ")? else {
            return Ok(Flow::Quit);
        };
        if self.with_library(|lib, _| lib.delete_playlist(&name)).unwrap_or(false) {
            self.say(&format!("Deleted playlist '{}'.", name))?;
        } else {
            self.say("Playlist not found.")?;
        }
        Ok(Flow::Continue)
    }

    // ---- views ----

    fn views_menu(&mut self) -> io::Result<Flow> {
        let songs = match self.choose(VIEWS_MENU)? {
            Choice::Eof => return Ok(Flow::Quit),
            Choice::Number(0) => return Ok(Flow::Continue),
            Choice::Number(1) => self.library_view(Library::songs_by_title),
            Choice::Number(2) => self.library_view(Library::songs_by_artist),
            Choice::Number(3) => self.library_view(Library::songs_by_rating),
            Choice::Number(4) => self.library_view(Library::favorites),
            Choice::Number(5) => self.library_view(Library::top_rated),
            Choice::Number(6) => self.library_view(Library::recent_plays),
            Choice::Number(7) => self.library_view(Library::frequent_plays),
            Choice::Number(8) => {
                self.show_genres()?;
                return Ok(Flow::Continue);
            }
            Choice::Number(9) => {
                let user = self.current_user.as_deref();
                let rng = &mut self.rng;
                user.and_then(|u| self.accounts.get(u))
                    .map(|account| account.library().shuffled_songs(rng))
                    .unwrap_or_default()
            }
            _ => {
                self.say("Invalid choice")?;
                return Ok(Flow::Continue);
            }
        };

        self.show_songs(&songs, "Nothing to show.")?;
        Ok(Flow::Continue)
    }

    fn show_genres(&mut self) -> io::Result<()> {
        let catalog = self.catalog;
        let genres = self.library_view(|lib| lib.genre_playlists(catalog));
        if genres.is_empty() {
            return self.say("No genre has enough songs for a playlist yet.");
        }
        for (genre, songs) in &genres {
            writeln!(self.output, "\n{} ({} songs)", genre, songs.len())?;
            write!(self.output, "{}", song_list(songs))?;
        }
        Ok(())
    }

    // ---- helpers ----

    /// Run `f` against the logged-in user's library.
    fn with_library<T>(&mut self, f: impl FnOnce(&mut Library, &Catalog) -> T) -> Option<T> {
        let user = self.current_user.as_deref()?;
        let catalog = self.catalog;
        self.accounts
            .get_mut(user)
            .map(|account| f(account.library_mut(), catalog))
    }

    /// Read-only query against the logged-in user's library; empty when nobody is logged in.
    fn library_view<T: Default>(&self, f: impl FnOnce(&Library) -> T) -> T {
        self.current_user
            .as_deref()
            .and_then(|user| self.accounts.get(user))
            .map(|account| f(account.library()))
            .unwrap_or_default()
    }

    /// Ask for a title and look it up in the library.
    ///
    /// Several songs can share a title (album imports keep duplicates); the user then
    /// picks one from a numbered list.
    ///
    /// Outer `None` means input ended; inner `None` means no song was picked (already reported).
    fn pick_song(&mut self, question: &str) -> io::Result<Option<Option<Song>>> {
        let Some(title) = self.prompt(question)? else {
            return Ok(None);
        };
        let mut matches = self.library_view(|lib| lib.search_songs_by_title(&title));
        if matches.len() <= 1 {
            let song = matches.pop();
            if song.is_none() {
                debug!("'{}' not in library", title);
                self.say("Song not found in your library.")?;
            }
            return Ok(Some(song));
        }

        write!(self.output, "{}", song_list(&matches))?;
        let which = format!("Which one (1-{}): ", matches.len());
        match self.choose(&which)? {
            Choice::Eof => Ok(None),
            Choice::Number(n) if n >= 1 && (n as usize) <= matches.len() => {
                Ok(Some(Some(matches.swap_remove(n as usize - 1))))
            }
            _ => {
                self.say("Invalid choice")?;
                Ok(Some(None))
            }
        }
    }

    fn show_songs(&mut self, songs: &[Song], empty: &str) -> io::Result<()> {
        if songs.is_empty() {
            return self.say(empty);
        }
        write!(self.output, "{}", song_list(songs))
    }

    fn show_albums(&mut self, albums: &[Album]) -> io::Result<()> {
        if albums.is_empty() {
            return self.say("No albums found.");
        }
        for album in albums {
            write!(self.output, "{}", album_block(album))?;
        }
        Ok(())
    }

    fn hint(&mut self, query: &str, candidates: &[String]) -> io::Result<()> {
        let hints = suggestions(query, candidates, self.suggestions);
        if !hints.is_empty() {
            self.say(&format!("Did you mean: {}?", hints.join(", ")))?;
        }
        Ok(())
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn choose(&mut self, menu: &str) -> io::Result<Choice> {
        let Some(line) = self.prompt(menu)? else {
            return Ok(Choice::Eof);
        };
        Ok(match line.parse::<u32>() {
            Ok(n) => Choice::Number(n),
            Err(_) => Choice::Invalid,
        })
    }
}
