//! Catalog entity records.
//!
//! Entities only hold their own fields. Ownership (which album a song belongs
//! to, which artist an album belongs to) and social data (listeners, likers)
//! live in the store's relation tables.

use super::ids::{AlbumId, ArtistId, PlaylistId, SongId, UserId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// External lookup key. Not unique, the first user registered with a
    /// given mobile shadows later ones.
    pub mobile: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    /// One per like received by any song of any of this artist's albums.
    pub likes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub length: u32,
    pub likes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub title: String,
}
