//! Music Catalog Library
//!
//! In-memory store for users, artists, albums, songs and playlists, along with
//! the relationships among them (listeners, likes, ownership).

pub mod catalog;
pub mod config;

// Re-export commonly used types for convenience
pub use catalog::{
    AlbumId, ArtistId, CatalogError, CatalogStore, ErrorKind, GuardedCatalog, MostPopular,
    PlaylistId, SongId, UserId,
};
pub use config::{AppConfig, PopularitySettings};
