use crate::color::Color;
use crate::fonts::Font;
use crate::text::{wrap_text, Rect, TextAlign, TextStyle};
use crate::writer::{escape_pdf_string, format_coord};

/// Result of trying to place a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitResult {
    /// The row was drawn; the cursor advanced past it.
    Placed,
    /// No room left on this page; turn the page and retry.
    PageFull,
    /// The row does not fit even in a fresh, empty area.
    TooSmall,
}

/// Style options for a table cell.
#[derive(Debug, Clone)]
pub struct CellStyle {
    pub font: Font,
    pub size: f64,
    pub align: TextAlign,
    /// Text color. Defaults to black.
    pub text_color: Option<Color>,
    /// Cell background fill (overrides the row background).
    pub background: Option<Color>,
    /// Padding applied to all four sides, in points.
    pub padding: f64,
}

impl Default for CellStyle {
    fn default() -> Self {
        CellStyle {
            font: Font::Helvetica,
            size: 9.0,
            align: TextAlign::Left,
            text_color: None,
            background: None,
            padding: 5.0,
        }
    }
}

/// A single table cell: text plus style. Text word-wraps to the
/// column width; the row grows to fit the tallest cell.
#[derive(Clone)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            style: CellStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Cell {
            text: text.into(),
            style,
        }
    }
}

/// A row of cells. Missing trailing cells render as empty columns.
#[derive(Clone)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Background fill applied to the entire row; per-cell
    /// backgrounds draw on top.
    pub background: Option<Color>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row {
            cells,
            background: None,
        }
    }

    pub fn shaded(cells: Vec<Cell>, background: Color) -> Self {
        Row {
            cells,
            background: Some(background),
        }
    }
}

/// Table layout configuration: column widths plus a reference cell
/// style. Holds no row data; the caller streams one `Row` at a time
/// through `PdfDocument::fit_row`, which lets arbitrarily long item
/// lists paginate without buffering.
pub struct Table {
    /// Column widths in points.
    pub columns: Vec<f64>,
    /// Reference style for constructing cells.
    pub default_style: CellStyle,
}

impl Table {
    pub fn new(columns: Vec<f64>) -> Self {
        Table {
            columns,
            default_style: CellStyle::default(),
        }
    }

    /// Total width of all columns.
    pub fn width(&self) -> f64 {
        self.columns.iter().sum()
    }

    /// Height the given row will occupy, from wrapped cell content.
    pub fn row_height(&self, row: &Row) -> f64 {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, &col_width)| match row.cells.get(idx) {
                Some(cell) => {
                    let style = TextStyle::new(cell.style.font, cell.style.size);
                    let avail = (col_width - 2.0 * cell.style.padding).max(0.0);
                    let lines = wrap_text(&cell.text, avail, &style).len();
                    lines as f64 * style.line_height() + 2.0 * cell.style.padding
                }
                None => {
                    let style =
                        TextStyle::new(self.default_style.font, self.default_style.size);
                    style.line_height() + 2.0 * self.default_style.padding
                }
            })
            .fold(0.0_f64, f64::max)
    }

    /// Generate content stream bytes for one row at the cursor
    /// position, advancing the cursor on success.
    pub(crate) fn generate_row_ops(
        &self,
        row: &Row,
        cursor: &mut TableCursor,
    ) -> (Vec<u8>, FitResult) {
        let row_height = self.row_height(row);

        if cursor.current_y - row_height < cursor.rect.bottom() {
            // Nothing placed on this page yet means the area itself is
            // too small; otherwise the page is simply full.
            let result = if cursor.first_row {
                FitResult::TooSmall
            } else {
                FitResult::PageFull
            };
            return (Vec::new(), result);
        }

        let mut output = Vec::new();
        self.draw_backgrounds(row, cursor, row_height, &mut output);

        let mut col_x = cursor.rect.x;
        for (idx, &col_width) in self.columns.iter().enumerate() {
            if let Some(cell) = row.cells.get(idx) {
                draw_cell(cell, col_x, cursor.current_y, col_width, &mut output);
            }
            col_x += col_width;
        }

        cursor.current_y -= row_height;
        cursor.first_row = false;
        (output, FitResult::Placed)
    }

    fn draw_backgrounds(
        &self,
        row: &Row,
        cursor: &TableCursor,
        row_height: f64,
        output: &mut Vec<u8>,
    ) {
        let row_bottom = cursor.current_y - row_height;

        if let Some(bg) = row.background {
            fill_rect(bg, cursor.rect.x, row_bottom, self.width(), row_height, output);
        }
        let mut col_x = cursor.rect.x;
        for (idx, &col_width) in self.columns.iter().enumerate() {
            if let Some(bg) = row.cells.get(idx).and_then(|c| c.style.background) {
                fill_rect(bg, col_x, row_bottom, col_width, row_height, output);
            }
            col_x += col_width;
        }
    }
}

/// Tracks where the next row will be placed within a page area.
///
/// Created once per table, then passed to each `fit_row` call. Call
/// `reset()` when starting a new page to restore the cursor to the
/// top of the new area; `is_first_row()` then reports true so the
/// caller can repeat a header row.
pub struct TableCursor {
    pub(crate) rect: Rect,
    pub(crate) current_y: f64,
    pub(crate) first_row: bool,
}

impl TableCursor {
    /// Create a cursor positioned at the top of `rect`.
    pub fn new(rect: &Rect) -> Self {
        TableCursor {
            rect: *rect,
            current_y: rect.y,
            first_row: true,
        }
    }

    /// Reset to the top of a new area when starting a new page.
    pub fn reset(&mut self, rect: &Rect) {
        self.rect = *rect;
        self.current_y = rect.y;
        self.first_row = true;
    }

    /// True until a row is placed on the current page.
    pub fn is_first_row(&self) -> bool {
        self.first_row
    }

    /// Y coordinate where the next row would be placed. After the
    /// last row this is the table's bottom edge; use it to position
    /// whatever follows the table.
    pub fn current_y(&self) -> f64 {
        self.current_y
    }
}

fn fill_rect(color: Color, x: f64, y: f64, width: f64, height: f64, output: &mut Vec<u8>) {
    output.extend_from_slice(
        format!(
            "{} {} {} rg\n{} {} {} {} re\nf\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
            format_coord(x),
            format_coord(y),
            format_coord(width),
            format_coord(height),
        )
        .as_bytes(),
    );
}

/// Render one cell's wrapped text. Each line positions absolutely so
/// alignment can differ per line length.
fn draw_cell(cell: &Cell, cell_x: f64, row_top: f64, col_width: f64, output: &mut Vec<u8>) {
    let style = TextStyle::new(cell.style.font, cell.style.size);
    let avail = (col_width - 2.0 * cell.style.padding).max(0.0);
    let lines = wrap_text(&cell.text, avail, &style);
    let line_height = style.line_height();

    output.extend_from_slice(b"q\n");

    // Always set an explicit fill color: background fills would
    // otherwise bleed into the text color.
    let color = cell.style.text_color.unwrap_or(Color::gray(0.0));
    output.extend_from_slice(
        format!(
            "{} {} {} rg\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
        )
        .as_bytes(),
    );

    output.extend_from_slice(b"BT\n");
    output.extend_from_slice(
        format!(
            "/{} {} Tf\n",
            cell.style.font.pdf_name(),
            format_coord(cell.style.size),
        )
        .as_bytes(),
    );

    // Baseline of the first line: top minus padding minus ascent
    // (approximated by the font size).
    let mut baseline = row_top - cell.style.padding - cell.style.size;
    for line in &lines {
        if !line.is_empty() {
            let line_x = match cell.style.align {
                TextAlign::Left => cell_x + cell.style.padding,
                TextAlign::Right => cell_x + col_width - cell.style.padding - style.width(line),
                TextAlign::Center => cell_x + (col_width - style.width(line)) / 2.0,
            };
            output.extend_from_slice(
                format!(
                    "1 0 0 1 {} {} Tm\n({}) Tj\n",
                    format_coord(line_x),
                    format_coord(baseline),
                    escape_pdf_string(line),
                )
                .as_bytes(),
            );
        }
        baseline -= line_height;
    }

    output.extend_from_slice(b"ET\nQ\n");
}
