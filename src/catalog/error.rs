use thiserror::Error;

/// Errors returned by catalog operations.
///
/// Every failing operation leaves the store exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("User with mobile {mobile} not found")]
    UserNotFound { mobile: String },

    #[error("Album {title} not found")]
    AlbumNotFound { title: String },

    #[error("Song {title} not found")]
    SongNotFound { title: String },

    #[error("Playlist {title} not found")]
    PlaylistNotFound { title: String },

    #[error("Song with title '{title}' not found, no playlist was created")]
    InvalidSelection { title: String },

    #[error("User with mobile {mobile} already likes {title}")]
    AlreadyLiked { mobile: String, title: String },
}

/// Abstract failure category, for callers that only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidSelection,
    AlreadyLiked,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::UserNotFound { .. }
            | CatalogError::AlbumNotFound { .. }
            | CatalogError::SongNotFound { .. }
            | CatalogError::PlaylistNotFound { .. } => ErrorKind::NotFound,
            CatalogError::InvalidSelection { .. } => ErrorKind::InvalidSelection,
            CatalogError::AlreadyLiked { .. } => ErrorKind::AlreadyLiked,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
