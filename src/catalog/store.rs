//! The catalog store.
//!
//! Owns every entity and every relationship. External callers address
//! entities by mobile number, name or title; those keys are resolved through
//! case-insensitive [`NameIndex`]es where the first registered entity wins.

use super::error::{CatalogError, Result};
use super::ids::{AlbumId, ArtistId, PlaylistId, SongId, UserId};
use super::lookup::NameIndex;
use super::models::{Album, Artist, Playlist, Song, User};
use super::popularity::{most_liked, MostPopular};
use super::relations::Relations;
use crate::config::PopularitySettings;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Summary counters, mostly for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub users: usize,
    pub artists: usize,
    pub albums: usize,
    pub songs: usize,
    pub playlists: usize,
    pub song_likes: u64,
    pub top_artist: MostPopular,
    pub top_song: MostPopular,
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    settings: PopularitySettings,

    users: Vec<User>,
    artists: Vec<Artist>,
    albums: Vec<Album>,
    songs: Vec<Song>,
    playlists: Vec<Playlist>,

    users_by_mobile: NameIndex<UserId>,
    artists_by_name: NameIndex<ArtistId>,
    albums_by_title: NameIndex<AlbumId>,
    songs_by_title: NameIndex<SongId>,
    playlists_by_title: NameIndex<PlaylistId>,

    relations: Relations,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PopularitySettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // =========================================================================
    // Entity creation
    // =========================================================================

    /// Registers a new user. Mobile numbers are not checked for uniqueness.
    pub fn create_user(&mut self, name: &str, mobile: &str) -> UserId {
        let id = UserId::from_index(self.users.len());
        self.users.push(User {
            id,
            name: name.to_owned(),
            mobile: mobile.to_owned(),
        });
        if !self.users_by_mobile.insert(mobile, id) {
            debug!("Mobile {} is already registered, {} is shadowed", mobile, id);
        }
        debug!("Created user {} ({})", id, name);
        id
    }

    pub fn create_artist(&mut self, name: &str) -> ArtistId {
        let id = ArtistId::from_index(self.artists.len());
        self.artists.push(Artist {
            id,
            name: name.to_owned(),
            likes: 0,
        });
        self.artists_by_name.insert(name, id);
        debug!("Created artist {} ({})", id, name);
        id
    }

    /// Creates an album under the artist named `artist_name`, creating the
    /// artist first if no artist has that name.
    pub fn create_album(&mut self, title: &str, artist_name: &str) -> AlbumId {
        let artist = match self.artists_by_name.get(artist_name) {
            Some(artist) => artist,
            None => self.create_artist(artist_name),
        };

        let id = AlbumId::from_index(self.albums.len());
        self.albums.push(Album {
            id,
            title: title.to_owned(),
        });
        self.albums_by_title.insert(title, id);
        self.relations.link_album(artist, id);
        debug!("Created album {} ({}) by {}", id, title, artist);
        id
    }

    pub fn create_song(&mut self, title: &str, album_title: &str, length: u32) -> Result<SongId> {
        let album = self.require_album(album_title)?;

        let id = SongId::from_index(self.songs.len());
        self.songs.push(Song {
            id,
            title: title.to_owned(),
            length,
            likes: 0,
        });
        self.songs_by_title.insert(title, id);
        self.relations.link_song(album, id);
        debug!("Created song {} ({}, {}) on {}", id, title, length, album);
        Ok(id)
    }

    // =========================================================================
    // Playlist creation
    // =========================================================================

    /// Creates a playlist holding every song whose length is exactly `length`,
    /// in creation order. No song matching is not an error.
    ///
    /// The user is only checked for existence: they become neither the
    /// creator nor a listener of the new playlist.
    pub fn create_playlist_on_length(
        &mut self,
        mobile: &str,
        title: &str,
        length: u32,
    ) -> Result<PlaylistId> {
        self.require_user(mobile)?;

        let songs: Vec<SongId> = self
            .songs
            .iter()
            .filter(|song| song.length == length)
            .map(|song| song.id)
            .collect();

        let id = self.push_playlist(title);
        self.relations.add_playlist_songs(id, &songs);
        info!(
            "Created playlist {} ({}) with {} songs of length {}",
            id,
            title,
            songs.len(),
            length
        );
        Ok(id)
    }

    /// Creates a playlist from song titles, each resolved to the first song
    /// with that title. Either every title resolves and the playlist is
    /// created, or nothing changes.
    ///
    /// The requesting user becomes the creator and first listener.
    pub fn create_playlist_on_names<S: AsRef<str>>(
        &mut self,
        mobile: &str,
        title: &str,
        song_titles: &[S],
    ) -> Result<PlaylistId> {
        let user = self.require_user(mobile)?;

        let songs = song_titles
            .iter()
            .map(|song_title| {
                let song_title = song_title.as_ref();
                self.songs_by_title
                    .get(song_title)
                    .ok_or_else(|| CatalogError::InvalidSelection {
                        title: song_title.to_owned(),
                    })
            })
            .collect::<Result<Vec<SongId>>>()?;

        let id = self.push_playlist(title);
        self.relations.add_playlist_songs(id, &songs);
        self.relations.add_listener(id, user);
        self.relations.record_creator(user, id);
        info!(
            "User {} created playlist {} ({}) with {} songs",
            user,
            id,
            title,
            songs.len()
        );
        Ok(id)
    }

    fn push_playlist(&mut self, title: &str) -> PlaylistId {
        let id = PlaylistId::from_index(self.playlists.len());
        self.playlists.push(Playlist {
            id,
            title: title.to_owned(),
        });
        self.playlists_by_title.insert(title, id);
        id
    }

    // =========================================================================
    // Playlist visits
    // =========================================================================

    /// Looks up a playlist on behalf of a user. A user who is neither the
    /// playlist's creator nor already one of its listeners becomes a listener.
    pub fn find_playlist(&mut self, mobile: &str, title: &str) -> Result<PlaylistId> {
        let user = self.require_user(mobile)?;
        let playlist =
            self.playlists_by_title
                .get(title)
                .ok_or_else(|| CatalogError::PlaylistNotFound {
                    title: title.to_owned(),
                })?;

        if self.relations.is_creator(user, playlist)
            || self.relations.is_listener(playlist, user)
        {
            return Ok(playlist);
        }
        self.relations.add_listener(playlist, user);
        debug!("User {} is now listening to {}", user, playlist);
        Ok(playlist)
    }

    // =========================================================================
    // Likes
    // =========================================================================

    /// Records that the user likes the song. The song's like count goes up by
    /// one, and so does the like count of the artist owning the song's album.
    pub fn like_song(&mut self, mobile: &str, song_title: &str) -> Result<SongId> {
        let song = self
            .songs_by_title
            .get(song_title)
            .ok_or_else(|| CatalogError::SongNotFound {
                title: song_title.to_owned(),
            })?;
        let user = self.require_user(mobile)?;

        if self.relations.has_liked(song, user) {
            return Err(CatalogError::AlreadyLiked {
                mobile: mobile.to_owned(),
                title: song_title.to_owned(),
            });
        }
        self.relations.add_liker(song, user);
        self.songs[song.index()].likes += 1;

        let artist = self
            .relations
            .album_of_song(song)
            .and_then(|album| self.relations.artist_of_album(album));
        match artist {
            Some(artist) => self.artists[artist.index()].likes += 1,
            None => warn!("Song {} has no owning artist, artist likes unchanged", song),
        }

        info!("User {} liked {}", user, song);
        Ok(song)
    }

    // =========================================================================
    // Popularity
    // =========================================================================

    pub fn top_artist(&self) -> MostPopular {
        most_liked(
            self.artists
                .iter()
                .map(|artist| (artist.name.as_str(), artist.likes)),
        )
    }

    pub fn top_song(&self) -> MostPopular {
        most_liked(
            self.songs
                .iter()
                .map(|song| (song.title.as_str(), song.likes)),
        )
    }

    /// Name of the most liked artist, or one of the configured sentinels.
    pub fn most_popular_artist(&self) -> String {
        self.top_artist().into_message(
            &self.settings.no_artists_message,
            &self.settings.no_liked_artist_message,
        )
    }

    /// Title of the most liked song, or one of the configured sentinels.
    pub fn most_popular_song(&self) -> String {
        self.top_song().into_message(
            &self.settings.no_songs_message,
            &self.settings.no_liked_song_message,
        )
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn find_user(&self, mobile: &str) -> Option<UserId> {
        self.users_by_mobile.get(mobile)
    }

    pub fn find_artist(&self, name: &str) -> Option<ArtistId> {
        self.artists_by_name.get(name)
    }

    pub fn find_album(&self, title: &str) -> Option<AlbumId> {
        self.albums_by_title.get(title)
    }

    pub fn find_song(&self, title: &str) -> Option<SongId> {
        self.songs_by_title.get(title)
    }

    /// Plain lookup by title, without the listener bookkeeping of
    /// [`CatalogStore::find_playlist`].
    pub fn find_playlist_by_title(&self, title: &str) -> Option<PlaylistId> {
        self.playlists_by_title.get(title)
    }

    fn require_user(&self, mobile: &str) -> Result<UserId> {
        self.find_user(mobile)
            .ok_or_else(|| CatalogError::UserNotFound {
                mobile: mobile.to_owned(),
            })
    }

    fn require_album(&self, title: &str) -> Result<AlbumId> {
        self.find_album(title)
            .ok_or_else(|| CatalogError::AlbumNotFound {
                title: title.to_owned(),
            })
    }

    // =========================================================================
    // Entity access
    // =========================================================================

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(id.index())
    }

    pub fn artist(&self, id: ArtistId) -> Option<&Artist> {
        self.artists.get(id.index())
    }

    pub fn album(&self, id: AlbumId) -> Option<&Album> {
        self.albums.get(id.index())
    }

    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.get(id.index())
    }

    pub fn playlist(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.get(id.index())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    // =========================================================================
    // Relationship access
    // =========================================================================

    pub fn albums_of_artist(&self, artist: ArtistId) -> &[AlbumId] {
        self.relations.albums_of_artist(artist)
    }

    pub fn songs_of_album(&self, album: AlbumId) -> &[SongId] {
        self.relations.songs_of_album(album)
    }

    pub fn artist_of_album(&self, album: AlbumId) -> Option<ArtistId> {
        self.relations.artist_of_album(album)
    }

    pub fn album_of_song(&self, song: SongId) -> Option<AlbumId> {
        self.relations.album_of_song(song)
    }

    pub fn playlist_songs(&self, playlist: PlaylistId) -> &[SongId] {
        self.relations.playlist_songs(playlist)
    }

    pub fn playlist_listeners(&self, playlist: PlaylistId) -> &[UserId] {
        self.relations.playlist_listeners(playlist)
    }

    pub fn created_playlist(&self, user: UserId) -> Option<PlaylistId> {
        self.relations.created_playlist(user)
    }

    pub fn user_playlists(&self, user: UserId) -> &[PlaylistId] {
        self.relations.user_playlists(user)
    }

    pub fn song_likers(&self, song: SongId) -> &[UserId] {
        self.relations.song_likers(song)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            users: self.users.len(),
            artists: self.artists.len(),
            albums: self.albums.len(),
            songs: self.songs.len(),
            playlists: self.playlists.len(),
            song_likes: self.songs.iter().map(|song| u64::from(song.likes)).sum(),
            top_artist: self.top_artist(),
            top_song: self.top_song(),
        }
    }
}
