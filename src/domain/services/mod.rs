//! Domain services - Pure operations that don't belong to a single entity

pub mod card_layout;

pub use card_layout::{CardFace, CardGrid, FaceText, Page, PT_TO_MM};
