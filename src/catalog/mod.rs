mod error;
mod guarded;
mod ids;
mod lookup;
mod models;
mod popularity;
mod relations;
mod store;

pub use error::{CatalogError, ErrorKind, Result};
pub use guarded::GuardedCatalog;
pub use ids::{AlbumId, ArtistId, PlaylistId, SongId, UserId};
pub use lookup::{fold_key, NameIndex};
pub use models::{Album, Artist, Playlist, Song, User};
pub use popularity::MostPopular;
pub use store::{CatalogStats, CatalogStore};
