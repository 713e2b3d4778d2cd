/// Example: vector graphics (paths, fills, and rounded rectangles).
///
/// Run with:
///   cargo run --example generate_graphics -p pdf-render
///
/// Writes output to: output/graphics.pdf
use pdf_render::{Color, Font, PdfDocument, TextStyle};

const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 40.0;

fn main() {
    std::fs::create_dir_all("output").unwrap();
    let path = "output/graphics.pdf";
    let mut doc = PdfDocument::create(path).expect("create PDF");
    doc.set_compression(true);
    doc.set_info("Title", "Graphics Example");

    doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);

    // Full-width header band.
    doc.set_fill_color(Color::rgb(0.118, 0.227, 0.373));
    doc.rect(0.0, PAGE_HEIGHT - 90.0, PAGE_WIDTH, 90.0);
    doc.fill();
    doc.save_state();
    doc.set_fill_color(Color::gray(1.0));
    doc.place_text_styled(
        "Band with contrasting text",
        MARGIN,
        PAGE_HEIGHT - 52.0,
        &TextStyle::new(Font::HelveticaBold, 16.0),
    );
    doc.restore_state();

    // Stroked triangle.
    doc.save_state();
    doc.set_stroke_color(Color::rgb(0.8, 0.12, 0.12));
    doc.set_line_width(1.5);
    doc.move_to(100.0, 500.0);
    doc.line_to(220.0, 500.0);
    doc.line_to(160.0, 610.0);
    doc.close_path();
    doc.stroke();
    doc.restore_state();

    // Filled and outlined rounded card.
    doc.save_state();
    doc.set_fill_color(Color::gray(0.965));
    doc.set_stroke_color(Color::gray(0.75));
    doc.set_line_width(0.75);
    doc.rounded_rect(300.0, 480.0, 230.0, 130.0, 6.0);
    doc.fill_stroke();
    doc.restore_state();
    doc.place_text_styled(
        "Rounded card",
        312.0,
        580.0,
        &TextStyle::new(Font::Helvetica, 10.0),
    );

    doc.end_document().expect("end_document");
    println!("Written to {}", path);
}
