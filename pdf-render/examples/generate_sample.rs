/// Basic example: styled text and word-wrapped paragraphs.
///
/// Run with:
///   cargo run --example generate_sample -p pdf-render
///
/// Writes output to: output/sample.pdf
use pdf_render::{wrap_text, Color, Font, PdfDocument, TextStyle};

const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 40.0;

fn main() {
    std::fs::create_dir_all("output").unwrap();
    let path = "output/sample.pdf";
    let mut doc = PdfDocument::create(path).expect("create PDF");
    doc.set_compression(true);
    doc.set_info("Title", "pdf-render sample");

    doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);

    let heading = TextStyle::new(Font::HelveticaBold, 18.0);
    doc.place_text_styled("Sample Document", MARGIN, PAGE_HEIGHT - MARGIN - 18.0, &heading);

    let body = TextStyle::new(Font::Helvetica, 10.0);
    let paragraph = "This paragraph is wrapped to the content width at layout time. \
        Splitting happens only at word boundaries; a word wider than the line \
        overflows rather than being broken mid-word.";

    let mut baseline = PAGE_HEIGHT - MARGIN - 50.0;
    for line in wrap_text(paragraph, PAGE_WIDTH - 2.0 * MARGIN, &body) {
        doc.place_text_styled(&line, MARGIN, baseline, &body);
        baseline -= body.line_height();
    }

    doc.save_state();
    doc.set_fill_color(Color::gray(0.45));
    let caption = TextStyle::new(Font::HelveticaOblique, 8.0);
    doc.place_text_styled("Set in the builtin Helvetica family.", MARGIN, baseline - 8.0, &caption);
    doc.restore_state();

    doc.end_document().expect("end_document");
    println!("Written to {}", path);
}
