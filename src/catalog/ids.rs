//! Opaque identifiers for catalog entities.
//!
//! Identifiers are assigned by the store at creation time and are positions in
//! the store's entity arenas, so they are only meaningful for the store that
//! issued them.

use serde::Serialize;
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn from_index(index: usize) -> Self {
                $name(index)
            }

            pub(crate) fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

entity_id!(UserId, "user");
entity_id!(ArtistId, "artist");
entity_id!(AlbumId, "album");
entity_id!(SongId, "song");
entity_id!(
    /// Playlists are never deduplicated by title, two playlists may share one.
    PlaylistId,
    "playlist"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_entity_prefix() {
        assert_eq!(UserId::from_index(0).to_string(), "user-0");
        assert_eq!(SongId::from_index(12).to_string(), "song-12");
        assert_eq!(PlaylistId::from_index(3).to_string(), "playlist-3");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&AlbumId::from_index(7)).unwrap();
        assert_eq!(json, "7");
    }
}
