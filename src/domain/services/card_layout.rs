//! Card layout engine - grid placement, pagination and card-face geometry
//!
//! Everything here is pure arithmetic over the input order and the grid
//! constants: the same cards in the same order always land on the same
//! coordinates. Units are millimetres; font sizes are points.

/// Millimetres per typographic point
pub const PT_TO_MM: f64 = 25.4 / 72.0;
/// Average glyph advance as a fraction of the font size (sans-serif)
const AVERAGE_GLYPH_EM: f64 = 0.5;

const ELLIPSIS: char = '\u{2026}';

/// Fixed-size printable grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGrid {
    pub columns: usize,
    pub rows: usize,
    pub card_width_mm: f64,
    pub card_height_mm: f64,
    pub margin_mm: f64,
    pub gap_mm: f64,
}

impl Default for CardGrid {
    /// Poker-size cards, three by two on an A4 sheet
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 2,
            card_width_mm: 63.5,
            card_height_mm: 88.9,
            margin_mm: 10.0,
            gap_mm: 5.0,
        }
    }
}

/// Where a card goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Position in the input sequence
    pub index: usize,
    pub page: usize,
    pub row: usize,
    pub column: usize,
    pub x_mm: f64,
    pub y_mm: f64,
}

/// A card together with its slot
#[derive(Debug, PartialEq)]
pub struct Placement<'a, T> {
    pub card: &'a T,
    pub slot: Slot,
}

/// One output page
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub number: usize,
    pub placements: Vec<Placement<'a, T>>,
    /// Whether a page break follows this page
    pub breaks_after: bool,
}

impl CardGrid {
    pub fn page_capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Slot for the card at `index`
    pub fn slot(&self, index: usize) -> Slot {
        let page = index / self.page_capacity();
        let row = (index / self.columns) % self.rows;
        let column = index % self.columns;
        Slot {
            index,
            page,
            row,
            column,
            x_mm: self.margin_mm + column as f64 * (self.card_width_mm + self.gap_mm),
            y_mm: self.margin_mm + row as f64 * (self.card_height_mm + self.gap_mm),
        }
    }

    /// Place every card, in input order
    pub fn layout<'a, T>(&self, cards: &'a [T]) -> Vec<Placement<'a, T>> {
        cards
            .iter()
            .enumerate()
            .map(|(index, card)| Placement {
                card,
                slot: self.slot(index),
            })
            .collect()
    }

    pub fn page_count(&self, card_count: usize) -> usize {
        card_count.div_ceil(self.page_capacity())
    }

    /// Group placements into pages in ascending order. Every page except the
    /// last is followed by a break.
    pub fn paginate<'a, T>(&self, cards: &'a [T]) -> Vec<Page<'a, T>> {
        let total = self.page_count(cards.len());
        let mut pages: Vec<Page<'a, T>> = (0..total)
            .map(|number| Page {
                number,
                placements: Vec::with_capacity(self.page_capacity()),
                breaks_after: number + 1 < total,
            })
            .collect();
        for placement in self.layout(cards) {
            pages[placement.slot.page].placements.push(placement);
        }
        pages
    }
}

/// One line of text on a card face, positioned on the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x_mm: f64,
    /// Baseline
    pub y_mm: f64,
    pub font_size_pt: f64,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TextStyle {
    font_size_pt: f64,
    line_height_mm: f64,
    bold: bool,
}

const TITLE: TextStyle = TextStyle {
    font_size_pt: 12.0,
    line_height_mm: 6.0,
    bold: true,
};
const LABEL: TextStyle = TextStyle {
    font_size_pt: 8.0,
    line_height_mm: 4.5,
    bold: false,
};
const BODY: TextStyle = TextStyle {
    font_size_pt: 10.0,
    line_height_mm: 5.0,
    bold: false,
};

/// Geometry of the text inside a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFace {
    pub padding_mm: f64,
    /// Distance from the card top to the first title baseline
    pub title_baseline_mm: f64,
    /// Extra space between the description and effect blocks
    pub block_gap_mm: f64,
    pub max_title_lines: usize,
}

impl Default for CardFace {
    fn default() -> Self {
        Self {
            padding_mm: 5.0,
            title_baseline_mm: 10.0,
            block_gap_mm: 3.0,
            max_title_lines: 2,
        }
    }
}

/// Text content of one card face
#[derive(Debug, Clone, Copy)]
pub struct FaceText<'a> {
    pub title: &'a str,
    pub label: &'a str,
    pub description: &'a str,
    pub effect: &'a str,
}

impl CardFace {
    /// Lay out title, label, description and `Effect: ...` inside the card
    /// at `slot`. Text never leaves the interior; when the blocks overflow
    /// the card bottom the last visible line ends with an ellipsis.
    pub fn compose(&self, grid: &CardGrid, slot: &Slot, text: &FaceText<'_>) -> Vec<TextLine> {
        let interior_width = grid.card_width_mm - 2.0 * self.padding_mm;
        let x = slot.x_mm + self.padding_mm;
        let bottom = slot.y_mm + grid.card_height_mm - self.padding_mm;

        let mut cursor = Cursor {
            lines: Vec::new(),
            x_mm: x,
            baseline_mm: slot.y_mm + self.title_baseline_mm,
            bottom_mm: bottom,
            clipped: false,
        };

        let mut title = wrap_text(text.title, max_chars(interior_width, TITLE.font_size_pt));
        if title.len() > self.max_title_lines {
            title.truncate(self.max_title_lines);
            end_with_ellipsis(
                title.last_mut(),
                max_chars(interior_width, TITLE.font_size_pt),
            );
        }
        cursor.push_block(title, TITLE, interior_width);
        cursor.push_block(
            wrap_text(text.label, max_chars(interior_width, LABEL.font_size_pt)),
            LABEL,
            interior_width,
        );
        cursor.advance(BODY.line_height_mm - LABEL.line_height_mm);
        cursor.push_block(
            wrap_text(text.description, max_chars(interior_width, BODY.font_size_pt)),
            BODY,
            interior_width,
        );
        cursor.advance(self.block_gap_mm);
        let effect = format!("Effect: {}", text.effect);
        cursor.push_block(
            wrap_text(&effect, max_chars(interior_width, BODY.font_size_pt)),
            BODY,
            interior_width,
        );
        cursor.lines
    }
}

struct Cursor {
    lines: Vec<TextLine>,
    x_mm: f64,
    baseline_mm: f64,
    bottom_mm: f64,
    clipped: bool,
}

impl Cursor {
    fn advance(&mut self, mm: f64) {
        self.baseline_mm += mm;
    }

    fn push_block(&mut self, block: Vec<String>, style: TextStyle, width_mm: f64) {
        if self.clipped {
            return;
        }
        for text in block {
            if self.baseline_mm > self.bottom_mm {
                self.clipped = true;
                let limit = max_chars(width_mm, style.font_size_pt);
                end_with_ellipsis(self.lines.last_mut().map(|line| &mut line.text), limit);
                return;
            }
            self.lines.push(TextLine {
                x_mm: self.x_mm,
                y_mm: self.baseline_mm,
                font_size_pt: style.font_size_pt,
                bold: style.bold,
                text,
            });
            self.baseline_mm += style.line_height_mm;
        }
    }
}

fn end_with_ellipsis(line: Option<&mut String>, limit: usize) {
    let Some(line) = line else {
        return;
    };
    let mut kept: String = line.chars().take(limit.saturating_sub(1)).collect();
    let trimmed = kept.trim_end().len();
    kept.truncate(trimmed);
    kept.push(ELLIPSIS);
    *line = kept;
}

/// Characters that fit on one line of `width_mm` at `font_size_pt`
pub fn max_chars(width_mm: f64, font_size_pt: f64) -> usize {
    let glyph_mm = font_size_pt * PT_TO_MM * AVERAGE_GLYPH_EM;
    ((width_mm / glyph_mm).floor() as usize).max(1)
}

/// Greedy word wrap on whitespace; words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}
