/// Example: running page numbers with incremental page output.
///
/// Pages are flushed as they finish, so the footer uses the live
/// `page_count()` at draw time, the "Page N" pattern used by
/// paginated reports and invoices.
///
/// Run with:
///   cargo run --example generate_page_numbers -p pdf-render
///
/// Writes output to: output/page-numbers.pdf
use pdf_render::{Cell, FitResult, Font, PdfDocument, Rect, Row, Table, TableCursor, TextStyle};

const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 40.0;

fn content_area() -> Rect {
    Rect {
        x: MARGIN,
        y: PAGE_HEIGHT - MARGIN,
        width: PAGE_WIDTH - 2.0 * MARGIN,
        height: PAGE_HEIGHT - 2.0 * MARGIN - 30.0,
    }
}

fn draw_footer(doc: &mut PdfDocument<std::io::BufWriter<std::fs::File>>) {
    let label = format!("Page {}", doc.page_count());
    let style = TextStyle::new(Font::Helvetica, 9.0);
    let x = PAGE_WIDTH - MARGIN - style.width(&label);
    doc.place_text_styled(&label, x, MARGIN - 14.0, &style);
}

fn main() {
    std::fs::create_dir_all("output").unwrap();
    let path = "output/page-numbers.pdf";
    let mut doc = PdfDocument::create(path).expect("create PDF");
    doc.set_compression(true);
    doc.set_info("Title", "Page Numbering Example");

    let table = Table::new(vec![120.0, 395.28]);
    doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
    let mut cursor = TableCursor::new(&content_area());

    for i in 1..=120 {
        let row = Row::new(vec![
            Cell::new(format!("Entry {}", i)),
            Cell::new("Filler content that pushes the table across several pages."),
        ]);
        loop {
            match doc.fit_row(&table, &row, &mut cursor).expect("fit_row") {
                FitResult::Placed => break,
                FitResult::PageFull | FitResult::TooSmall => {
                    draw_footer(&mut doc);
                    doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
                    cursor.reset(&content_area());
                }
            }
        }
    }
    draw_footer(&mut doc);

    let total = doc.page_count();
    doc.end_document().expect("end_document");
    println!("Written {} pages to {}", total, path);
}
