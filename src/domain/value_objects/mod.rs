//! Value objects - Immutable objects defined by their attributes

mod card_type;
mod generated_content;
mod ids;
mod soft_delete;

pub use card_type::CardType;
pub use generated_content::{CardDraft, StoryBackground};
pub use ids::*;
pub use soft_delete::SoftDelete;
