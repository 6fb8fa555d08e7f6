// End-to-end: catalog files on disk -> accounts -> library work -> reload

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use tunestash::catalog::album_file_name;
use tunestash::{AccountDirectory, Catalog};

fn write_album(dir: &Path, title: &str, artist: &str, genre: &str, year: u32, songs: &[&str]) {
    let mut content = format!("{},{},{},{}\n", title, artist, genre, year);
    for song in songs {
        content.push_str(song);
        content.push('\n');
    }
    fs::write(dir.join(album_file_name(title, artist)), content).unwrap();
}

fn build_catalog(dir: &Path) -> Catalog {
    fs::write(
        dir.join("albums.txt"),
        "Sons,The Heavy\n21,Adele\nDiscovery,Daft Punk\nGhost Album,Nobody\n",
    )
    .unwrap();
    write_album(dir, "Sons", "The Heavy", "Rock", 2020, &["Fire", "The Thief", "Heavy For You"]);
    write_album(dir, "21", "Adele", "Pop", 2011, &["Rolling in the Deep", "Someone Like You"]);
    write_album(
        dir,
        "Discovery",
        "Daft Punk",
        "Electronic",
        2001,
        &[
            "One More Time",
            "Aerodynamic",
            "Digital Love",
            "Harder Better Faster Stronger",
            "Crescendolls",
            "Nightvision",
            "Superheroes",
            "High Life",
            "Something About Us",
            "Voyager",
            "Veridis Quo",
        ],
    );

    let (catalog, report) = Catalog::load(dir, "albums.txt");
    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped.len(), 1);
    catalog
}

#[test]
fn test_full_session_survives_restart() {
    let catalog_dir = tempdir().unwrap();
    let data_dir = tempdir().unwrap();
    let accounts_path = data_dir.path().join("users.json");
    let catalog = build_catalog(catalog_dir.path());
    assert_eq!(catalog.song_count(), 16);

    {
        let mut accounts = AccountDirectory::load(&accounts_path);
        let library = accounts.create_user("alice", "s3cret").unwrap().library_mut();

        assert!(library.import_album(&catalog, "discovery"));
        assert!(library.import_song(&catalog, "fire"));
        assert!(!library.import_song(&catalog, "Fire"));
        assert!(!library.import_song(&catalog, "Not A Song"));
        assert_eq!(library.song_count(), 12);

        let fire = library.find_song("Fire").unwrap().id();
        let voyager = library.find_song("Voyager").unwrap().id();
        for _ in 0..3 {
            library.play(voyager);
        }
        library.play(fire);
        assert!(library.rate_song(fire, 5));
        assert!(library.rate_song(voyager, 4));
        assert!(!library.rate_song(voyager, 6));

        assert!(library.create_playlist("Road Trip"));
        assert!(library.add_song_to_playlist("road trip", voyager));
        assert!(library.add_song_to_playlist("Road Trip", fire));

        accounts.save().unwrap();
    }

    let mut accounts = AccountDirectory::load(&accounts_path);
    assert!(accounts.authenticate("alice", "s3cret"));
    assert!(!accounts.authenticate("alice", "secret"));

    let library = accounts.get_mut("alice").unwrap().library_mut();
    let recent: Vec<String> = library
        .recent_plays()
        .iter()
        .map(|s| s.title().to_string())
        .collect();
    assert_eq!(recent, ["Fire", "Voyager"]);
    let frequent: Vec<String> = library
        .frequent_plays()
        .iter()
        .map(|s| s.title().to_string())
        .collect();
    assert_eq!(frequent.len(), 10);
    assert_eq!(frequent[..2], ["Voyager", "Fire"]);

    let favorites = library.favorites();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title(), "Fire");
    assert_eq!(library.top_rated().len(), 2);

    let genres = library.genre_playlists(&catalog);
    assert_eq!(genres.keys().collect::<Vec<_>>(), ["Electronic"]);
    assert_eq!(genres["Electronic"].len(), 11);

    let mut rng = StdRng::seed_from_u64(42);
    let shuffled = library.shuffled_playlist("Road Trip", &mut rng).unwrap();
    assert_eq!(shuffled.len(), 2);

    // dropping the album takes its songs out of playlists and history
    let discovery = library.search_albums_by_title("Discovery")[0].id();
    assert!(library.remove_album(discovery));
    assert_eq!(library.song_count(), 1);
    let road_trip = library.playlist_songs("Road Trip").unwrap();
    assert_eq!(road_trip.len(), 1);
    assert_eq!(road_trip[0].title(), "Fire");
    let frequent = library.frequent_plays();
    assert_eq!(frequent.len(), 1);
    assert_eq!(frequent[0].title(), "Fire");
    assert!(library.genre_playlists(&catalog).is_empty());
}

#[test]
fn test_libraries_are_independent() {
    let catalog_dir = tempdir().unwrap();
    let catalog = build_catalog(catalog_dir.path());
    let mut accounts = AccountDirectory::in_memory();

    accounts.create_user("alice", "a").unwrap();
    accounts.create_user("bob", "b").unwrap();

    let alice = accounts.get_mut("alice").unwrap().library_mut();
    alice.import_song(&catalog, "Fire");
    let fire = alice.find_song("Fire").unwrap().id();
    alice.rate_song(fire, 5);

    let bob = accounts.get_mut("bob").unwrap().library_mut();
    bob.import_song(&catalog, "Fire");
    let bobs_fire = bob.find_song("Fire").unwrap();
    assert_ne!(bobs_fire.id(), fire);
    assert_eq!(bobs_fire.rating(), 0);

    // the catalog copy is untouched
    assert_eq!(catalog.find_song("Fire").unwrap().rating(), 0);
}
