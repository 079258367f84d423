//! Shared access to a [`CatalogStore`].
//!
//! The store's operations are multi-step (resolve, then mutate) and must not
//! interleave, so every operation here runs under one lock acquisition.

use super::error::Result;
use super::ids::{AlbumId, ArtistId, PlaylistId, SongId, UserId};
use super::popularity::MostPopular;
use super::store::CatalogStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Default)]
pub struct GuardedCatalog {
    inner: Arc<Mutex<CatalogStore>>,
}

impl GuardedCatalog {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // Store operations do not panic midway, a poisoned store is still consistent.
    fn lock(&self) -> MutexGuard<'_, CatalogStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a read-only closure against the store.
    pub fn read<R>(&self, f: impl FnOnce(&CatalogStore) -> R) -> R {
        f(&self.lock())
    }

    /// Runs several operations as one, without other callers interleaving.
    pub fn write<R>(&self, f: impl FnOnce(&mut CatalogStore) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn create_user(&self, name: &str, mobile: &str) -> UserId {
        self.lock().create_user(name, mobile)
    }

    pub fn create_artist(&self, name: &str) -> ArtistId {
        self.lock().create_artist(name)
    }

    pub fn create_album(&self, title: &str, artist_name: &str) -> AlbumId {
        self.lock().create_album(title, artist_name)
    }

    pub fn create_song(&self, title: &str, album_title: &str, length: u32) -> Result<SongId> {
        self.lock().create_song(title, album_title, length)
    }

    pub fn create_playlist_on_length(
        &self,
        mobile: &str,
        title: &str,
        length: u32,
    ) -> Result<PlaylistId> {
        self.lock().create_playlist_on_length(mobile, title, length)
    }

    pub fn create_playlist_on_names<S: AsRef<str>>(
        &self,
        mobile: &str,
        title: &str,
        song_titles: &[S],
    ) -> Result<PlaylistId> {
        self.lock()
            .create_playlist_on_names(mobile, title, song_titles)
    }

    pub fn find_playlist(&self, mobile: &str, title: &str) -> Result<PlaylistId> {
        self.lock().find_playlist(mobile, title)
    }

    pub fn like_song(&self, mobile: &str, song_title: &str) -> Result<SongId> {
        self.lock().like_song(mobile, song_title)
    }

    pub fn most_popular_artist(&self) -> String {
        self.lock().most_popular_artist()
    }

    pub fn most_popular_song(&self) -> String {
        self.lock().most_popular_song()
    }

    pub fn top_artist(&self) -> MostPopular {
        self.lock().top_artist()
    }

    pub fn top_song(&self) -> MostPopular {
        self.lock().top_song()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_likes_are_counted_exactly() {
        let catalog = GuardedCatalog::default();
        catalog.create_album("Abbey Road", "The Beatles");
        catalog.create_song("Something", "Abbey Road", 182).unwrap();
        for i in 0..16 {
            catalog.create_user(&format!("user {}", i), &format!("555-{:04}", i));
        }

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let catalog = catalog.clone();
                thread::spawn(move || {
                    let mobile = format!("555-{:04}", i);
                    catalog.like_song(&mobile, "Something").unwrap();
                    // Second like from the same user is always rejected.
                    assert!(catalog.like_song(&mobile, "Something").is_err());
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        catalog.read(|store| {
            let song = store.find_song("Something").unwrap();
            let artist = store.find_artist("The Beatles").unwrap();
            assert_eq!(store.song(song).unwrap().likes, 16);
            assert_eq!(store.artist(artist).unwrap().likes, 16);
            assert_eq!(store.song_likers(song).len(), 16);
        });
    }

    #[test]
    fn concurrent_visits_register_each_user_once() {
        let catalog = GuardedCatalog::default();
        catalog.create_user("Owner", "000");
        catalog.create_playlist_on_length("000", "Empty", 1).unwrap();
        for i in 0..8 {
            catalog.create_user(&format!("user {}", i), &format!("{}", i + 1));
        }

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let catalog = catalog.clone();
                thread::spawn(move || {
                    let mobile = format!("{}", i + 1);
                    for _ in 0..5 {
                        catalog.find_playlist(&mobile, "empty").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let listeners = catalog.read(|store| {
            let playlist = store.find_playlist_by_title("Empty").unwrap();
            store.playlist_listeners(playlist).len()
        });
        assert_eq!(listeners, 8);
    }

    #[test]
    fn write_groups_operations() {
        let catalog = GuardedCatalog::new(CatalogStore::new());
        let song = catalog.write(|store| -> Result<SongId> {
            store.create_user("Alice", "1");
            store.create_album("Kid A", "Radiohead");
            store.create_song("Idioteque", "Kid A", 309)?;
            store.like_song("1", "Idioteque")
        });

        assert!(song.is_ok());
        assert_eq!(catalog.most_popular_song(), "Idioteque");
        assert_eq!(catalog.most_popular_artist(), "Radiohead");
        assert_eq!(catalog.top_song().name(), Some("Idioteque"));
    }
}
