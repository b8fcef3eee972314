//! Printable card sheet
//!
//! One A4 inline SVG per page, in millimetres, concatenated into a single
//! HTML document. Every page but the last is followed by a page break.

use std::fmt::Write as _;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::application::services::ErrorKind;
use crate::domain::entities::Card;
use crate::domain::services::{CardFace, CardGrid, FaceText, Page, PT_TO_MM};
use crate::domain::value_objects::GameId;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LayoutError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Layout
    }
}

/// Renders cards onto the fixed grid
#[derive(Debug, Clone, Copy, Default)]
pub struct CardSheetRenderer {
    grid: CardGrid,
    face: CardFace,
}

impl CardSheetRenderer {
    pub fn new(grid: CardGrid, face: CardFace) -> Self {
        Self { grid, face }
    }

    /// The whole document. Pure: the same cards in the same order always
    /// produce the same bytes.
    pub fn render(&self, title: &str, cards: &[Card]) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(title));
        html.push_str(
            "<style>\n\
             @page { size: A4; margin: 0; }\n\
             body { margin: 0; }\n\
             svg.page { display: block; width: 210mm; height: 297mm; }\n\
             svg.page.break { break-after: page; page-break-after: always; }\n\
             text { font-family: Helvetica, Arial, sans-serif; }\n\
             </style>\n</head>\n<body>\n",
        );
        for page in self.grid.paginate(cards) {
            self.render_page(&mut html, &page);
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_page(&self, html: &mut String, page: &Page<'_, Card>) {
        let class = if page.breaks_after { "page break" } else { "page" };
        let _ = writeln!(
            html,
            "<svg class=\"{class}\" data-page=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{PAGE_WIDTH_MM}mm\" height=\"{PAGE_HEIGHT_MM}mm\" \
             viewBox=\"0 0 {PAGE_WIDTH_MM} {PAGE_HEIGHT_MM}\">",
            page.number + 1
        );
        for placement in &page.placements {
            let card = placement.card;
            let slot = &placement.slot;
            let _ = writeln!(
                html,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"#000\" stroke-width=\"0.3\"/>",
                mm(slot.x_mm),
                mm(slot.y_mm),
                mm(self.grid.card_width_mm),
                mm(self.grid.card_height_mm),
            );
            let text = FaceText {
                title: &card.name,
                label: card.card_type.label(),
                description: &card.description,
                effect: &card.effect,
            };
            for line in self.face.compose(&self.grid, slot, &text) {
                let weight = if line.bold { " font-weight=\"bold\"" } else { "" };
                let _ = writeln!(
                    html,
                    "<text x=\"{}\" y=\"{}\" font-size=\"{}\"{weight}>{}</text>",
                    mm(line.x_mm),
                    mm(line.y_mm),
                    mm(line.font_size_pt * PT_TO_MM),
                    escape(&line.text),
                );
            }
        }
        html.push_str("</svg>\n");
    }
}

fn mm(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Writes rendered sheets under the files directory
#[derive(Debug, Clone)]
pub struct CardSheetWriter {
    files_dir: PathBuf,
}

impl CardSheetWriter {
    pub fn new(files_dir: impl Into<PathBuf>) -> Self {
        Self {
            files_dir: files_dir.into(),
        }
    }

    pub fn file_name(game_id: GameId) -> String {
        format!("game_{}.html", game_id)
    }

    #[instrument(skip(self, document), fields(game_id = %game_id))]
    pub async fn write(&self, game_id: GameId, document: &str) -> Result<PathBuf, LayoutError> {
        tokio::fs::create_dir_all(&self.files_dir)
            .await
            .map_err(|source| LayoutError::Io {
                path: self.files_dir.clone(),
                source,
            })?;
        let path = self.files_dir.join(Self::file_name(game_id));
        tokio::fs::write(&path, document)
            .await
            .map_err(|source| LayoutError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = document.len(), "Card sheet written");
        Ok(path)
    }
}
