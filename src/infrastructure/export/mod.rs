//! Card sheet export
//!
//! Renders a game's cards into a printable document and writes it to the
//! files directory.

mod card_sheet;

pub use card_sheet::{CardSheetRenderer, CardSheetWriter, LayoutError};
