//! Raster export of the current grid: a PNG rendition of the board
//! drawn with an 8x8 bitmap font, fed to the share layer.

use std::fmt;
use std::io::Cursor;

use contracts::{AppState, TARGET_COUNT};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgba, RgbaImage};

const GRID_COLS: u32 = 4;
const GRID_ROWS: u32 = 4;
const CELL_SIZE: u32 = 236;
const CELL_GAP: u32 = 12;
const MARGIN: u32 = 24;
const TITLE_BAND: u32 = 64;
const FOOTER_BAND: u32 = 48;
const CELL_PAD: u32 = 12;

const BACKGROUND: Rgba<u8> = Rgba([248, 250, 252, 255]);
const CELL_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CELL_FILL_ANNOTATED: Rgba<u8> = Rgba([224, 231, 255, 255]);
const CELL_BORDER: Rgba<u8> = Rgba([199, 210, 254, 255]);
const TITLE_COLOR: Rgba<u8> = Rgba([79, 70, 229, 255]);
const VALUE_COLOR: Rgba<u8> = Rgba([30, 41, 59, 255]);
const NAME_COLOR: Rgba<u8> = Rgba([67, 56, 202, 255]);

#[derive(Debug)]
pub enum ExportError {
    /// Nothing to capture: the grid has not been generated.
    EmptyGrid,
    Image(image::ImageError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "no grid to capture; start a game first"),
            Self::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<image::ImageError> for ExportError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value)
    }
}

/// Draw the board into an RGBA buffer: title banner, the 4x4 cell
/// grid with word-wrapped values and person names, and a progress
/// footer. Reads the grid only; never mutates state.
pub fn render_board(state: &AppState) -> Result<RgbaImage, ExportError> {
    if state.grid.is_empty() {
        return Err(ExportError::EmptyGrid);
    }

    let width = MARGIN * 2 + GRID_COLS * CELL_SIZE + (GRID_COLS - 1) * CELL_GAP;
    let height =
        TITLE_BAND + MARGIN * 2 + GRID_ROWS * CELL_SIZE + (GRID_ROWS - 1) * CELL_GAP + FOOTER_BAND;
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    draw_centered_text(&mut img, "ICEBREAKER BINGO", TITLE_BAND / 2 - 12, TITLE_COLOR, 3);

    for (index, cell) in state.grid.iter().enumerate() {
        let col = index as u32 % GRID_COLS;
        let row = index as u32 / GRID_COLS;
        if row >= GRID_ROWS {
            break;
        }
        let x = MARGIN + col * (CELL_SIZE + CELL_GAP);
        let y = TITLE_BAND + MARGIN + row * (CELL_SIZE + CELL_GAP);

        let fill = if cell.is_annotated() {
            CELL_FILL_ANNOTATED
        } else {
            CELL_FILL
        };
        fill_rect(&mut img, x, y, CELL_SIZE, CELL_SIZE, fill);
        draw_rect_outline(&mut img, x, y, CELL_SIZE, CELL_SIZE, CELL_BORDER);

        let max_chars = ((CELL_SIZE - 2 * CELL_PAD) / 16) as usize;
        let lines = wrap_text(&cell.value, max_chars);
        let mut cursor_y = y + CELL_PAD + 8;
        for line in lines.iter().take(8) {
            let line_width = line.chars().count() as u32 * 16;
            let line_x = x + (CELL_SIZE.saturating_sub(line_width)) / 2;
            draw_text(&mut img, line, line_x, cursor_y, VALUE_COLOR, 2);
            cursor_y += 22;
        }

        if let Some(name) = cell.person_name.as_deref() {
            let mut label: String = name.chars().take(max_chars).collect();
            label.make_ascii_uppercase();
            let label_width = label.chars().count() as u32 * 16;
            let label_x = x + (CELL_SIZE.saturating_sub(label_width)) / 2;
            let label_y = y + CELL_SIZE - CELL_PAD - 16;
            draw_text(&mut img, &label, label_x, label_y, NAME_COLOR, 2);
        }
    }

    let footer = format!("FILLED {}/{}", state.filled_count(), TARGET_COUNT);
    draw_centered_text(&mut img, &footer, height - FOOTER_BAND / 2 - 8, TITLE_COLOR, 2);

    Ok(img)
}

/// Encode the rendered board as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut payload = Vec::new();
    image::DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut payload), ImageFormat::Png)?;
    Ok(payload)
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn draw_rect_outline(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    if w == 0 || h == 0 {
        return;
    }
    fill_rect(img, x, y, w, 2, color);
    fill_rect(img, x, y + h - 2, w, 2, color);
    fill_rect(img, x, y, 2, h, color);
    fill_rect(img, x + w - 2, y, 2, h, color);
}

/// Scaled 8x8 bitmap glyphs; characters outside the basic set render
/// as '?', same as the font's own fallback convention.
fn draw_text(img: &mut RgbaImage, text: &str, x: u32, y: u32, color: Rgba<u8>, scale: u32) {
    let scale = scale.max(1);
    let mut cursor_x = x;
    for ch in text.chars() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        for (row_index, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for col_index in 0..8u32 {
                if (row_bits >> col_index) & 1 == 0 {
                    continue;
                }
                let base_x = cursor_x + col_index * scale;
                let base_y = y + row_index as u32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = base_x + sx;
                        let py = base_y + sy;
                        if px < img.width() && py < img.height() {
                            img.put_pixel(px, py, color);
                        }
                    }
                }
            }
        }
        cursor_x += 8 * scale;
    }
}

fn draw_centered_text(img: &mut RgbaImage, text: &str, y: u32, color: Rgba<u8>, scale: u32) {
    let text_width = text.chars().count() as u32 * 8 * scale;
    let x = img.width().saturating_sub(text_width) / 2;
    draw_text(img, text, x, y, color, scale);
}

/// Greedy word wrap; words longer than the budget are hard-broken.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max_chars).collect();
            word = word.chars().skip(max_chars).collect();
            lines.push(head);
        }
        let needed = word.chars().count() + if current.is_empty() { 0 } else { 1 };
        if current.chars().count() + needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Cell;

    fn playing_state() -> AppState {
        AppState {
            phase: contracts::Phase::Playing,
            selection: Vec::new(),
            grid: (0..TARGET_COUNT)
                .map(|idx| Cell {
                    id: format!("{idx}-1700000000000"),
                    value: format!("Loves a very long descriptive value number {idx}"),
                    person_name: (idx % 3 == 0).then(|| format!("Guest {idx}")),
                })
                .collect(),
        }
    }

    #[test]
    fn renders_a_full_board() {
        let img = render_board(&playing_state()).expect("board renders");
        assert_eq!(img.width(), 1028);
        assert_eq!(img.height(), 1140);
    }

    #[test]
    fn refuses_to_capture_an_empty_grid() {
        let err = render_board(&AppState::default()).expect_err("no grid to render");
        assert!(matches!(err, ExportError::EmptyGrid));
    }

    #[test]
    fn png_payload_decodes_back_to_the_same_dimensions() {
        let img = render_board(&playing_state()).expect("board renders");
        let payload = encode_png(&img).expect("png encodes");

        let decoded = image::load_from_memory(&payload).expect("png decodes");
        assert_eq!(decoded.width(), img.width());
        assert_eq!(decoded.height(), img.height());
    }

    #[test]
    fn wrap_text_respects_the_budget() {
        let lines = wrap_text("Has visited three continents", 13);
        assert!(lines.iter().all(|line| line.chars().count() <= 13));
        assert_eq!(lines.join(" "), "Has visited three continents");

        let hard_broken = wrap_text("incomprehensibilities", 8);
        assert!(hard_broken.iter().all(|line| line.chars().count() <= 8));
    }
}
