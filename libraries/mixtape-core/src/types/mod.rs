//! Domain types

mod batch;
mod ids;
mod message;
mod metadata;
mod song;

pub use batch::SuggestionBatch;
pub use ids::{MessageId, SongId};
pub use message::{ChatMessage, Role};
pub use metadata::PlaylistMetadata;
pub use song::Song;
