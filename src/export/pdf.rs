//! PDF rendering for plan documents. DejaVu Sans is embedded so titles render
//! as written, macrons and other non-Latin-1 text included.

use std::io::Cursor;

use printpdf::{Mm, PdfDocument};
use tracing::warn;

use super::{LineStyle, PlanDocument};
use crate::error::{Error, Result};

/// Turns a laid-out plan into document bytes.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, doc: &PlanDocument) -> Result<Vec<u8>>;
}

const REGULAR_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BOLD_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const WRAP_COLUMNS: usize = 84;
const MM_PER_PT: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "text";

/// A4 renderer using embedded TrueType fonts.
#[derive(Debug, Clone, Copy)]
pub struct FontPdfRenderer {
    regular: &'static [u8],
    bold: &'static [u8],
}

impl Default for FontPdfRenderer {
    fn default() -> Self {
        FontPdfRenderer {
            regular: REGULAR_FONT,
            bold: BOLD_FONT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    bold: bool,
    size: f32,
    y_mm: f32,
    text: String,
}

impl FontPdfRenderer {
    /// Characters in `text` that the regular face has no glyph for.
    pub fn missing_glyphs(&self, text: &str) -> Vec<char> {
        let Ok(face) = ttf_parser::Face::parse(self.regular, 0) else {
            return text.chars().filter(|c| !c.is_whitespace()).collect();
        };
        let mut missing: Vec<char> = text
            .chars()
            .filter(|c| !c.is_control() && face.glyph_index(*c).is_none())
            .collect();
        missing.dedup();
        missing
    }

    fn paginate(doc: &PlanDocument) -> Vec<Vec<PlacedLine>> {
        let mut pages = vec![Vec::new()];
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        for line in &doc.lines {
            let (bold, size) = match line.style {
                LineStyle::Title => (true, 20.0),
                LineStyle::Heading => (true, 13.0),
                LineStyle::Body | LineStyle::Blank => (false, 11.0),
            };
            let leading = size * 1.45 * MM_PER_PT;
            let pieces = if line.style == LineStyle::Blank {
                vec![String::new()]
            } else {
                wrap(&line.text, WRAP_COLUMNS)
            };
            for piece in pieces {
                if y - leading < MARGIN_MM {
                    pages.push(Vec::new());
                    y = PAGE_HEIGHT_MM - MARGIN_MM;
                }
                y -= leading;
                if !piece.is_empty() {
                    if let Some(page) = pages.last_mut() {
                        page.push(PlacedLine {
                            bold,
                            size,
                            y_mm: y,
                            text: piece,
                        });
                    }
                }
            }
        }
        pages
    }
}

impl PdfRenderer for FontPdfRenderer {
    fn render(&self, doc: &PlanDocument) -> Result<Vec<u8>> {
        let pages = Self::paginate(doc);
        for line in doc.lines.iter() {
            let missing = self.missing_glyphs(&line.text);
            if !missing.is_empty() {
                warn!(missing = ?missing, "export text has characters the embedded font cannot draw");
            }
        }

        let (pdf, first_page, first_layer) = PdfDocument::new(
            doc.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let regular = pdf.add_external_font(Cursor::new(self.regular)).map_err(export_error)?;
        let bold = pdf.add_external_font(Cursor::new(self.bold)).map_err(export_error)?;

        for (index, lines) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME)
            };
            let layer = pdf.get_page(page).get_layer(layer);
            for line in lines {
                let font = if line.bold { &bold } else { &regular };
                layer.use_text(line.text.as_str(), line.size, Mm(MARGIN_MM), Mm(line.y_mm), font);
            }
        }

        pdf.save_to_bytes().map_err(export_error)
    }
}

fn export_error(err: impl std::fmt::Debug) -> Error {
    Error::Export(format!("{err:?}"))
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
