//! Associations between catalog entities.
//!
//! None of these are stored on the entities themselves. Keys are only created
//! the first time something is attached to them; absent keys read back as
//! empty. Nothing is ever removed.

use super::ids::{AlbumId, ArtistId, PlaylistId, SongId, UserId};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct Relations {
    artist_albums: HashMap<ArtistId, Vec<AlbumId>>,
    album_songs: HashMap<AlbumId, Vec<SongId>>,
    pub(crate) playlist_songs: HashMap<PlaylistId, Vec<SongId>>,
    playlist_listeners: HashMap<PlaylistId, Vec<UserId>>,
    creator_playlist: HashMap<UserId, PlaylistId>,
    user_playlists: HashMap<UserId, Vec<PlaylistId>>,
    song_likers: HashMap<SongId, Vec<UserId>>,

    // Reverse indices, kept in step with artist_albums and album_songs.
    album_artist: HashMap<AlbumId, ArtistId>,
    song_album: HashMap<SongId, AlbumId>,
}

impl Relations {
    // =========================================================================
    // Ownership
    // =========================================================================

    /// Records `album` as belonging to `artist`. An album has exactly one
    /// artist, linking it a second time is ignored.
    pub fn link_album(&mut self, artist: ArtistId, album: AlbumId) -> bool {
        if self.album_artist.contains_key(&album) {
            return false;
        }
        self.album_artist.insert(album, artist);
        self.artist_albums.entry(artist).or_default().push(album);
        true
    }

    /// Records `song` as belonging to `album`. A song has exactly one album,
    /// linking it a second time is ignored.
    pub fn link_song(&mut self, album: AlbumId, song: SongId) -> bool {
        if self.song_album.contains_key(&song) {
            return false;
        }
        self.song_album.insert(song, album);
        self.album_songs.entry(album).or_default().push(song);
        true
    }

    pub fn albums_of_artist(&self, artist: ArtistId) -> &[AlbumId] {
        self.artist_albums
            .get(&artist)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn songs_of_album(&self, album: AlbumId) -> &[SongId] {
        self.album_songs
            .get(&album)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn artist_of_album(&self, album: AlbumId) -> Option<ArtistId> {
        self.album_artist.get(&album).copied()
    }

    pub fn album_of_song(&self, song: SongId) -> Option<AlbumId> {
        self.song_album.get(&song).copied()
    }

    // =========================================================================
    // Playlists
    // =========================================================================

    /// Appends `songs` to the playlist's song list, creating it if needed.
    /// Duplicates are kept.
    pub fn add_playlist_songs(&mut self, playlist: PlaylistId, songs: &[SongId]) {
        self.playlist_songs
            .entry(playlist)
            .or_default()
            .extend_from_slice(songs);
    }

    pub fn playlist_songs(&self, playlist: PlaylistId) -> &[SongId] {
        self.playlist_songs
            .get(&playlist)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Adds `user` to the listeners of `playlist` unless already present.
    pub fn add_listener(&mut self, playlist: PlaylistId, user: UserId) {
        let listeners = self.playlist_listeners.entry(playlist).or_default();
        if !listeners.contains(&user) {
            listeners.push(user);
        }
    }

    pub fn is_listener(&self, playlist: PlaylistId, user: UserId) -> bool {
        self.playlist_listeners(playlist).contains(&user)
    }

    pub fn playlist_listeners(&self, playlist: PlaylistId) -> &[UserId] {
        self.playlist_listeners
            .get(&playlist)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Records `user` as the creator of `playlist`. The user's created
    /// playlist pointer is replaced, while the full list keeps growing.
    pub fn record_creator(&mut self, user: UserId, playlist: PlaylistId) {
        self.creator_playlist.insert(user, playlist);
        self.user_playlists.entry(user).or_default().push(playlist);
    }

    pub fn created_playlist(&self, user: UserId) -> Option<PlaylistId> {
        self.creator_playlist.get(&user).copied()
    }

    pub fn is_creator(&self, user: UserId, playlist: PlaylistId) -> bool {
        self.created_playlist(user) == Some(playlist)
    }

    pub fn user_playlists(&self, user: UserId) -> &[PlaylistId] {
        self.user_playlists
            .get(&user)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // =========================================================================
    // Likes
    // =========================================================================

    /// Adds `user` to the likers of `song` unless already present.
    pub fn add_liker(&mut self, song: SongId, user: UserId) {
        let likers = self.song_likers.entry(song).or_default();
        if !likers.contains(&user) {
            likers.push(user);
        }
    }

    pub fn has_liked(&self, song: SongId, user: UserId) -> bool {
        self.song_likers(song).contains(&user)
    }

    pub fn song_likers(&self, song: SongId) -> &[UserId] {
        self.song_likers
            .get(&song)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (ArtistId, AlbumId, SongId, PlaylistId, UserId) {
        (
            ArtistId::from_index(0),
            AlbumId::from_index(0),
            SongId::from_index(0),
            PlaylistId::from_index(0),
            UserId::from_index(0),
        )
    }

    #[test]
    fn absent_keys_read_as_empty() {
        let relations = Relations::default();
        let (artist, album, song, playlist, user) = ids();

        assert!(relations.albums_of_artist(artist).is_empty());
        assert!(relations.songs_of_album(album).is_empty());
        assert!(relations.playlist_songs(playlist).is_empty());
        assert!(relations.playlist_listeners(playlist).is_empty());
        assert!(relations.user_playlists(user).is_empty());
        assert!(relations.song_likers(song).is_empty());
        assert_eq!(relations.created_playlist(user), None);
        assert_eq!(relations.album_of_song(song), None);
        assert_eq!(relations.artist_of_album(album), None);
        assert!(relations.playlist_songs.is_empty());
    }

    #[test]
    fn ownership_links_are_indexed_both_ways() {
        let mut relations = Relations::default();
        let (artist, album, song, _, _) = ids();

        assert!(relations.link_album(artist, album));
        assert!(relations.link_song(album, song));

        assert_eq!(relations.albums_of_artist(artist), &[album]);
        assert_eq!(relations.songs_of_album(album), &[song]);
        assert_eq!(relations.artist_of_album(album), Some(artist));
        assert_eq!(relations.album_of_song(song), Some(album));
    }

    #[test]
    fn album_cannot_move_to_second_artist() {
        let mut relations = Relations::default();
        let (artist, album, _, _, _) = ids();
        let other = ArtistId::from_index(1);

        assert!(relations.link_album(artist, album));
        assert!(!relations.link_album(other, album));

        assert_eq!(relations.artist_of_album(album), Some(artist));
        assert!(relations.albums_of_artist(other).is_empty());
    }

    #[test]
    fn listeners_have_set_semantics() {
        let mut relations = Relations::default();
        let (_, _, _, playlist, user) = ids();

        assert!(!relations.is_listener(playlist, user));
        relations.add_listener(playlist, user);
        relations.add_listener(playlist, user);
        assert_eq!(relations.playlist_listeners(playlist), &[user]);
        assert!(relations.is_listener(playlist, user));
    }

    #[test]
    fn playlist_songs_keep_duplicates() {
        let mut relations = Relations::default();
        let (_, _, song, playlist, _) = ids();

        relations.add_playlist_songs(playlist, &[song, song]);
        assert_eq!(relations.playlist_songs(playlist), &[song, song]);
    }

    #[test]
    fn empty_song_list_still_registers_playlist() {
        let mut relations = Relations::default();
        let (_, _, _, playlist, _) = ids();

        relations.add_playlist_songs(playlist, &[]);
        assert!(relations.playlist_songs.contains_key(&playlist));
        assert!(relations.playlist_songs(playlist).is_empty());
    }

    #[test]
    fn creator_pointer_is_last_playlist_wins() {
        let mut relations = Relations::default();
        let (_, _, _, first, user) = ids();
        let second = PlaylistId::from_index(1);

        relations.record_creator(user, first);
        relations.record_creator(user, second);

        assert_eq!(relations.created_playlist(user), Some(second));
        assert!(!relations.is_creator(user, first));
        assert!(relations.is_creator(user, second));
        assert_eq!(relations.user_playlists(user), &[first, second]);
    }

    #[test]
    fn likers_are_not_counted_twice() {
        let mut relations = Relations::default();
        let (_, _, song, _, user) = ids();

        assert!(!relations.has_liked(song, user));
        relations.add_liker(song, user);
        relations.add_liker(song, user);
        assert_eq!(relations.song_likers(song), &[user]);
        assert!(relations.has_liked(song, user));
    }
}
