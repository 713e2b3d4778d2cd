//! The invoice document renderer.
//!
//! One layout routine serves every exit action: the caller receives
//! the finished byte stream and decides whether to save it or hand it
//! to a print pipeline. Behavior varies only through
//! [`RenderOptions`].

use std::path::PathBuf;

use pdf_render::{
    scale_to_fit, Cell, CellStyle, Color, FitResult, Font, ImageId, PdfDocument, Rect, Row,
    Table, TableCursor, TextAlign, TextStyle,
};

use crate::error::RenderError;
use crate::format::{format_amount, format_percent, format_quantity};
use crate::layout::{
    item_table_columns, negotiate_metadata_columns, plan_totals_card, resolve_accent, CardLine,
    TotalsCard, BAND_HEIGHT, CARD_CORNER_RADIUS, CARD_DIVIDER_HEIGHT, CARD_LINE_HEIGHT,
    CARD_PADDING, CARD_WIDTH, COLUMN_GUTTER, CONTENT_WIDTH, FOOTER_HEIGHT, MARGIN, PAGE_HEIGHT,
    PAGE_WIDTH, SECTION_SPACING,
};
use crate::merge::{
    resolve_bill_to_lines, resolve_details_lines, resolve_from_lines, resolve_sender_email,
    resolve_sender_name,
};
use crate::model::{trimmed, Branding, InvoiceDocument, LineItem, PartySnapshot};
use crate::source::{HttpLogoFetcher, LogoFetcher};
use crate::totals::{compute_totals, line_total};

const TABLE_HEADER_BG: Color = Color {
    r: 0.15,
    g: 0.18,
    b: 0.25,
};
const STRIPE_BG: Color = Color {
    r: 0.95,
    g: 0.96,
    b: 0.98,
};
const ATTENTION: Color = Color {
    r: 0.78,
    g: 0.12,
    b: 0.12,
};
const CARD_BG: Color = Color {
    r: 0.965,
    g: 0.965,
    b: 0.97,
};
const MUTED: Color = Color {
    r: 0.42,
    g: 0.42,
    b: 0.42,
};
const RULE: Color = Color {
    r: 0.75,
    g: 0.75,
    b: 0.75,
};
const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

const LOGO_BOX: f64 = 56.0;
const FOOTER_CAPTION: &str = "Thank you for your business";

fn bold(size: f64) -> TextStyle {
    TextStyle::new(Font::HelveticaBold, size)
}

fn regular(size: f64) -> TextStyle {
    TextStyle::new(Font::Helvetica, size)
}

fn oblique(size: f64) -> TextStyle {
    TextStyle::new(Font::HelveticaOblique, size)
}

/// Recognized rendering options. One configuration struct replaces
/// the per-call-site variants the download and print paths used to
/// carry.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Draw the payment lines (method, amount paid, amount due) in
    /// the details column and the totals card.
    pub include_payment_section: bool,
    /// Local image used when the branding logo is absent or cannot
    /// be fetched.
    pub logo_fallback_path: Option<PathBuf>,
    /// Deflate page content streams. Off by default so output stays
    /// byte-inspectable.
    pub compress: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            include_payment_section: true,
            logo_fallback_path: None,
            compress: false,
        }
    }
}

/// Renders an [`InvoiceDocument`] into a paginated PDF byte stream.
///
/// Stateless between calls: concurrent renders are safe since all
/// inputs are passed by value or shared reference and no global state
/// is touched.
pub struct InvoiceRenderer {
    options: RenderOptions,
    logo_fetcher: Option<Box<dyn LogoFetcher>>,
}

impl Default for InvoiceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceRenderer {
    pub fn new() -> Self {
        InvoiceRenderer {
            options: RenderOptions::default(),
            logo_fetcher: Some(Box::new(HttpLogoFetcher::default())),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the logo fetcher (tests, local asset pipelines).
    pub fn with_logo_fetcher(mut self, fetcher: Box<dyn LogoFetcher>) -> Self {
        self.logo_fetcher = Some(fetcher);
        self
    }

    /// Never fetch a remote logo; only `logo_fallback_path` applies.
    pub fn without_logo_fetcher(mut self) -> Self {
        self.logo_fetcher = None;
        self
    }

    /// Lay the invoice out and return the finished PDF bytes.
    ///
    /// `profile_fallback` supplies sender details wherever the
    /// invoice's own snapshot and the branding record are silent.
    /// Logo problems and missing optional fields degrade to
    /// placeholders; only stream assembly failures error.
    pub fn render(
        &self,
        doc: &InvoiceDocument,
        profile_fallback: &PartySnapshot,
        branding: Option<&Branding>,
    ) -> Result<Vec<u8>, RenderError> {
        let totals = compute_totals(&doc.items, &doc.discount);
        let accent = resolve_accent(branding);
        let include_payment = self.options.include_payment_section;

        let mut pdf = PdfDocument::new(Vec::new())?;
        pdf.set_compression(self.options.compress);
        pdf.set_info("Title", &format!("Invoice {}", doc.reference()));
        pdf.set_info(
            "Author",
            &resolve_sender_name(doc.sender.as_ref(), profile_fallback, branding),
        );

        let logo_id = self.load_logo(&mut pdf, branding);

        pdf.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
        draw_band(&mut pdf, doc, profile_fallback, branding, accent, logo_id);

        let metadata_top = PAGE_HEIGHT - BAND_HEIGHT - SECTION_SPACING;
        let table_top = draw_metadata_block(
            &mut pdf,
            doc,
            profile_fallback,
            branding,
            include_payment,
            metadata_top,
        );

        let table_end = draw_items_table(&mut pdf, doc, table_top)?;

        let card = plan_totals_card(doc, &totals, include_payment);
        let card_end = draw_totals_card(&mut pdf, &card, table_end);

        draw_text_sections(&mut pdf, doc, table_end.min(card_end) - SECTION_SPACING)?;

        draw_footer(&mut pdf);
        pdf.end_page()?;
        Ok(pdf.end_document()?)
    }

    /// Resolve logo bytes and load them into the document. Every
    /// failure along the way is soft: warn and render without.
    fn load_logo(
        &self,
        pdf: &mut PdfDocument<Vec<u8>>,
        branding: Option<&Branding>,
    ) -> Option<ImageId> {
        let bytes = self.acquire_logo_bytes(branding)?;
        match pdf.load_image_bytes(&bytes) {
            Ok(id) => Some(id),
            Err(reason) => {
                tracing::warn!(%reason, "could not embed logo image; continuing without it");
                None
            }
        }
    }

    fn acquire_logo_bytes(&self, branding: Option<&Branding>) -> Option<Vec<u8>> {
        let url = branding.and_then(|b| trimmed(&b.logo_url));
        if let (Some(fetcher), Some(url)) = (self.logo_fetcher.as_deref(), url) {
            match fetcher.fetch(&url) {
                Ok(bytes) => return Some(bytes),
                Err(error) => {
                    tracing::warn!(%url, %error, "logo fetch failed; trying fallback");
                }
            }
        }
        if let Some(path) = &self.options.logo_fallback_path {
            match std::fs::read(path) {
                Ok(bytes) => return Some(bytes),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "logo fallback unreadable");
                }
            }
        }
        None
    }
}

/// Filename for save exits: `Invoice-{number or id}.pdf`.
pub fn suggested_filename(doc: &InvoiceDocument) -> String {
    format!("Invoice-{}.pdf", doc.reference())
}

// ---- drawing helpers ------------------------------------------------

fn draw_band(
    pdf: &mut PdfDocument<Vec<u8>>,
    doc: &InvoiceDocument,
    fallback: &PartySnapshot,
    branding: Option<&Branding>,
    accent: Color,
    logo_id: Option<ImageId>,
) {
    let band_bottom = PAGE_HEIGHT - BAND_HEIGHT;
    pdf.save_state();
    pdf.set_fill_color(accent);
    pdf.rect(0.0, band_bottom, PAGE_WIDTH, BAND_HEIGHT);
    pdf.fill();

    let mut text_x = MARGIN;
    if let Some(id) = logo_id {
        let (iw, ih) = pdf.image_size(id);
        let (w, h) = scale_to_fit(iw, ih, LOGO_BOX, LOGO_BOX);
        let logo_y = band_bottom + (BAND_HEIGHT - h) / 2.0;
        pdf.place_image(id, MARGIN, logo_y, w, h);
        text_x = MARGIN + LOGO_BOX + 12.0;
    }

    pdf.set_fill_color(WHITE);
    let name = resolve_sender_name(doc.sender.as_ref(), fallback, branding);
    pdf.place_text_styled(&name, text_x, PAGE_HEIGHT - 46.0, &bold(15.0));
    if let Some(email) = resolve_sender_email(doc.sender.as_ref(), fallback, branding) {
        pdf.place_text_styled(&email, text_x, PAGE_HEIGHT - 61.0, &regular(9.0));
    }

    let title = bold(22.0);
    let title_x = PAGE_WIDTH - MARGIN - title.width("INVOICE");
    pdf.place_text_styled("INVOICE", title_x, PAGE_HEIGHT - 48.0, &title);
    let number = regular(10.0);
    let number_x = PAGE_WIDTH - MARGIN - number.width(doc.reference());
    pdf.place_text_styled(doc.reference(), number_x, PAGE_HEIGHT - 64.0, &number);
    pdf.restore_state();
}

/// Draw the three-column From / Bill To / Invoice Details block.
/// Returns the y where content below the block starts.
fn draw_metadata_block(
    pdf: &mut PdfDocument<Vec<u8>>,
    doc: &InvoiceDocument,
    fallback: &PartySnapshot,
    branding: Option<&Branding>,
    include_payment: bool,
    top: f64,
) -> f64 {
    let widths = negotiate_metadata_columns(CONTENT_WIDTH);
    let columns = [
        ("From", resolve_from_lines(doc.sender.as_ref(), fallback, branding)),
        ("Bill To", resolve_bill_to_lines(&doc.bill_to)),
        ("Invoice Details", resolve_details_lines(doc, include_payment)),
    ];

    let heading = bold(10.0);
    let body = regular(9.0);
    let heading_gap = 4.0;

    let mut x = MARGIN;
    let mut block_height = 0.0_f64;
    for (i, (title, lines)) in columns.iter().enumerate() {
        let wrapped: Vec<String> = lines
            .iter()
            .flat_map(|line| pdf_render::wrap_text(line, widths[i], &body))
            .collect();

        pdf.save_state();
        pdf.set_fill_color(MUTED);
        pdf.place_text_styled(title, x, top - heading.size, &heading);
        pdf.restore_state();

        let mut baseline = top - heading.line_height() - heading_gap - body.size;
        for line in &wrapped {
            pdf.place_text_styled(line, x, baseline, &body);
            baseline -= body.line_height();
        }

        let height =
            heading.line_height() + heading_gap + wrapped.len() as f64 * body.line_height();
        block_height = block_height.max(height);
        x += widths[i] + COLUMN_GUTTER;
    }

    top - block_height - SECTION_SPACING
}

fn header_row() -> Row {
    let base = CellStyle {
        font: Font::HelveticaBold,
        size: 9.0,
        text_color: Some(WHITE),
        ..CellStyle::default()
    };
    let right = CellStyle {
        align: TextAlign::Right,
        ..base.clone()
    };
    Row::shaded(
        vec![
            Cell::styled("ITEM", base.clone()),
            Cell::styled("DESCRIPTION", base),
            Cell::styled("QTY", right.clone()),
            Cell::styled("UNIT PRICE", right.clone()),
            Cell::styled("TAX", right.clone()),
            Cell::styled("TOTAL", right),
        ],
        TABLE_HEADER_BG,
    )
}

fn item_row(item: &LineItem, index: usize, currency: &str) -> Row {
    let base = CellStyle::default();
    let right = CellStyle {
        align: TextAlign::Right,
        ..base.clone()
    };
    let cells = vec![
        Cell::styled(item.description_primary.clone(), base.clone()),
        Cell::styled(
            item.description_secondary.clone().unwrap_or_default(),
            base,
        ),
        Cell::styled(format_quantity(item.quantity), right.clone()),
        Cell::styled(format_amount(item.unit_price, currency), right.clone()),
        Cell::styled(format_percent(item.tax_percent), right.clone()),
        Cell::styled(format_amount(line_total(item), currency), right),
    ];
    if index % 2 == 0 {
        Row::shaded(cells, STRIPE_BG)
    } else {
        Row::new(cells)
    }
}

/// Lay out the items table, turning pages as needed and repeating the
/// header row on each. Returns the table's bottom edge.
fn draw_items_table(
    pdf: &mut PdfDocument<Vec<u8>>,
    doc: &InvoiceDocument,
    top: f64,
) -> Result<f64, RenderError> {
    let table = Table::new(item_table_columns());
    let area = Rect {
        x: MARGIN,
        y: top,
        width: CONTENT_WIDTH,
        height: top - (MARGIN + FOOTER_HEIGHT),
    };
    let mut cursor = TableCursor::new(&area);
    let header = header_row();
    pdf.fit_row(&table, &header, &mut cursor)?;

    for (index, item) in doc.items.iter().enumerate() {
        let row = item_row(item, index, &doc.currency);
        let mut turned = false;
        loop {
            match pdf.fit_row(&table, &row, &mut cursor)? {
                FitResult::Placed => break,
                FitResult::PageFull | FitResult::TooSmall if !turned => {
                    turned = true;
                    turn_page(pdf);
                    cursor.reset(&continuation_area());
                    pdf.fit_row(&table, &header, &mut cursor)?;
                }
                FitResult::PageFull | FitResult::TooSmall => {
                    tracing::warn!(index, "line item taller than a full page; skipping row");
                    break;
                }
            }
        }
    }

    Ok(cursor.current_y())
}

/// Full-height content area on continuation pages (no header band).
fn continuation_area() -> Rect {
    Rect {
        x: MARGIN,
        y: PAGE_HEIGHT - MARGIN,
        width: CONTENT_WIDTH,
        height: PAGE_HEIGHT - 2.0 * MARGIN - FOOTER_HEIGHT,
    }
}

/// Draw the rounded totals card anchored bottom-right under the
/// table. Returns the card's bottom edge.
fn draw_totals_card(pdf: &mut PdfDocument<Vec<u8>>, card: &TotalsCard, table_end: f64) -> f64 {
    let height = card.height();
    let mut top = table_end - 16.0;
    if top - height < MARGIN + FOOTER_HEIGHT {
        turn_page(pdf);
        top = PAGE_HEIGHT - MARGIN;
    }
    let x = PAGE_WIDTH - MARGIN - CARD_WIDTH;
    let bottom = top - height;

    pdf.save_state();
    pdf.set_fill_color(CARD_BG);
    pdf.set_stroke_color(RULE);
    pdf.set_line_width(0.75);
    pdf.rounded_rect(x, bottom, CARD_WIDTH, height, CARD_CORNER_RADIUS);
    pdf.fill_stroke();

    let label_x = x + CARD_PADDING;
    let value_right = x + CARD_WIDTH - CARD_PADDING;
    let mut line_top = top - CARD_PADDING;

    for line in &card.lines {
        match line {
            CardLine::Entry {
                label,
                value,
                bold: emphasized,
                attention,
            } => {
                let style = if *emphasized { bold(9.5) } else { regular(9.0) };
                let baseline = line_top - 11.0;

                pdf.set_fill_color(if *emphasized { Color::gray(0.0) } else { MUTED });
                pdf.place_text_styled(label, label_x, baseline, &style);

                pdf.set_fill_color(if *attention { ATTENTION } else { Color::gray(0.0) });
                let value_x = value_right - style.width(value);
                pdf.place_text_styled(value, value_x, baseline, &style);

                line_top -= CARD_LINE_HEIGHT;
            }
            CardLine::Caption(text) => {
                pdf.set_fill_color(MUTED);
                pdf.place_text_styled(text, label_x, line_top - 10.0, &oblique(7.5));
                line_top -= CARD_LINE_HEIGHT;
            }
            CardLine::Divider => {
                let rule_y = line_top - CARD_DIVIDER_HEIGHT / 2.0;
                pdf.set_stroke_color(RULE);
                pdf.set_line_width(0.5);
                pdf.move_to(label_x, rule_y);
                pdf.line_to(value_right, rule_y);
                pdf.stroke();
                line_top -= CARD_DIVIDER_HEIGHT;
            }
        }
    }
    pdf.restore_state();
    bottom
}

/// Notes and Terms: labeled word-wrapped blocks stacked below the
/// totals card. Sections with empty text are not rendered at all.
fn draw_text_sections(
    pdf: &mut PdfDocument<Vec<u8>>,
    doc: &InvoiceDocument,
    start_y: f64,
) -> Result<(), RenderError> {
    let heading = bold(10.0);
    let body = regular(9.0);
    let bottom_limit = MARGIN + FOOTER_HEIGHT;
    let mut y = start_y;

    for (title, text) in [("Notes", &doc.notes), ("Terms", &doc.terms)] {
        let Some(text) = trimmed(text) else { continue };

        if y - heading.line_height() - body.line_height() < bottom_limit {
            turn_page(pdf);
            y = PAGE_HEIGHT - MARGIN;
        }

        pdf.save_state();
        pdf.set_fill_color(MUTED);
        pdf.place_text_styled(title, MARGIN, y - heading.size, &heading);
        pdf.restore_state();
        y -= heading.line_height() + 4.0;

        for line in pdf_render::wrap_text(&text, CONTENT_WIDTH, &body) {
            if y - body.line_height() < bottom_limit {
                turn_page(pdf);
                y = PAGE_HEIGHT - MARGIN;
            }
            pdf.place_text_styled(&line, MARGIN, y - body.size, &body);
            y -= body.line_height();
        }
        y -= SECTION_SPACING;
    }
    Ok(())
}

/// Footer on every page: rule, centered caption, right-aligned page
/// number from the live page count.
fn draw_footer(pdf: &mut PdfDocument<Vec<u8>>) {
    let page_number = pdf.page_count();
    let rule_y = MARGIN + 24.0;

    pdf.save_state();
    pdf.set_stroke_color(RULE);
    pdf.set_line_width(0.5);
    pdf.move_to(MARGIN, rule_y);
    pdf.line_to(PAGE_WIDTH - MARGIN, rule_y);
    pdf.stroke();

    pdf.set_fill_color(MUTED);
    let caption = oblique(8.0);
    let caption_x = (PAGE_WIDTH - caption.width(FOOTER_CAPTION)) / 2.0;
    pdf.place_text_styled(FOOTER_CAPTION, caption_x, MARGIN + 10.0, &caption);

    let label = format!("Page {}", page_number);
    let number = regular(8.0);
    let number_x = PAGE_WIDTH - MARGIN - number.width(&label);
    pdf.place_text_styled(&label, number_x, MARGIN + 10.0, &number);
    pdf.restore_state();
}

/// Close the current page (footer included) and open the next one.
fn turn_page(pdf: &mut PdfDocument<Vec<u8>>) {
    draw_footer(pdf);
    pdf.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
}
