use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::color::Color;
use crate::image::{self, ImageFormat, ImageId};
use crate::objects::{ObjId, PdfObject};
use crate::table::{FitResult, Row, Table, TableCursor};
use crate::text::TextStyle;
use crate::writer::{escape_pdf_string, format_coord, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FONT_OBJ_BASE: u32 = 3;
const FIRST_DYNAMIC_OBJ_NUM: u32 = 6;

/// High-level API for building PDF documents.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Pages are written incrementally: `end_page()` flushes page data to
/// the writer and frees page content from memory, keeping memory flat
/// for documents with many pages.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    next_obj_num: u32,
    compress: bool,
    images: Vec<LoadedImage>,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
    images_used: Vec<usize>,
}

struct LoadedImage {
    obj: ObjId,
    width: u32,
    height: u32,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a new PDF document that writes to a file.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a new PDF document that writes to the given writer.
    /// Writes the PDF header and the shared font objects immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        for (i, font) in crate::fonts::Font::all().iter().enumerate() {
            let obj = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.base_name())),
            ]);
            pdf_writer.write_object(ObjId(FONT_OBJ_BASE + i as u32, 0), &obj)?;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            next_obj_num: FIRST_DYNAMIC_OBJ_NUM,
            compress: false,
            images: Vec::new(),
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Enable or disable FlateDecode compression of page content
    /// streams. Off by default.
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    /// Number of pages so far, counting the currently open page.
    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len() + usize::from(self.current_page.is_some())
    }

    fn alloc_obj(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    fn page_mut(&mut self, op: &str) -> &mut PageBuilder {
        match self.current_page.as_mut() {
            Some(page) => page,
            None => panic!("{} called with no open page", op),
        }
    }

    fn push_ops(&mut self, op_name: &str, ops: &str) -> &mut Self {
        self.page_mut(op_name).content_ops.extend_from_slice(ops.as_bytes());
        self
    }

    /// Begin a new page with the given dimensions in points.
    /// If a page is currently open, it is automatically closed.
    pub fn begin_page(&mut self, width: f64, height: f64) -> &mut Self {
        if self.current_page.is_some() {
            // Auto-close previous page. Write errors resurface from
            // the next fallible call.
            let _ = self.end_page();
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
            images_used: Vec::new(),
        });
        self
    }

    // ---- text -------------------------------------------------------

    /// Place text at (x, y) using default 12pt Helvetica.
    /// Coordinates use PDF's bottom-left origin; y is the baseline.
    pub fn place_text(&mut self, text: &str, x: f64, y: f64) -> &mut Self {
        self.place_text_styled(text, x, y, &TextStyle::default())
    }

    /// Place text at (x, y) with an explicit style.
    pub fn place_text_styled(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> &mut Self {
        let ops = format!(
            "BT\n/{} {} Tf\n{} {} Td\n({}) Tj\nET\n",
            style.font.pdf_name(),
            format_coord(style.size),
            format_coord(x),
            format_coord(y),
            escape_pdf_string(text),
        );
        self.push_ops("place_text", &ops)
    }

    // ---- graphics state ---------------------------------------------

    pub fn save_state(&mut self) -> &mut Self {
        self.push_ops("save_state", "q\n")
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.push_ops("restore_state", "Q\n")
    }

    /// Set the fill color. Also applies to text drawn afterwards.
    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        let ops = format!(
            "{} {} {} rg\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
        );
        self.push_ops("set_fill_color", &ops)
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        let ops = format!(
            "{} {} {} RG\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
        );
        self.push_ops("set_stroke_color", &ops)
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        let ops = format!("{} w\n", format_coord(width));
        self.push_ops("set_line_width", &ops)
    }

    // ---- path construction ------------------------------------------

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let ops = format!("{} {} m\n", format_coord(x), format_coord(y));
        self.push_ops("move_to", &ops)
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let ops = format!("{} {} l\n", format_coord(x), format_coord(y));
        self.push_ops("line_to", &ops)
    }

    /// Cubic Bezier curve to (x3, y3) with control points (x1, y1) and
    /// (x2, y2).
    pub fn curve_to(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    ) -> &mut Self {
        let ops = format!(
            "{} {} {} {} {} {} c\n",
            format_coord(x1),
            format_coord(y1),
            format_coord(x2),
            format_coord(y2),
            format_coord(x3),
            format_coord(y3),
        );
        self.push_ops("curve_to", &ops)
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.push_ops("close_path", "h\n")
    }

    /// Append a rectangle to the path. (x, y) is the bottom-left corner.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let ops = format!(
            "{} {} {} {} re\n",
            format_coord(x),
            format_coord(y),
            format_coord(width),
            format_coord(height),
        );
        self.push_ops("rect", &ops)
    }

    /// Append a rounded rectangle to the path. (x, y) is the
    /// bottom-left corner, `radius` applies to all four corners.
    pub fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> &mut Self {
        // Bezier circle-quadrant approximation constant.
        const K: f64 = 0.552_284_749_831;
        let r = radius.min(width / 2.0).min(height / 2.0);
        let c = r * K;
        let (x1, y1) = (x + width, y + height);

        self.move_to(x + r, y);
        self.line_to(x1 - r, y);
        self.curve_to(x1 - r + c, y, x1, y + r - c, x1, y + r);
        self.line_to(x1, y1 - r);
        self.curve_to(x1, y1 - r + c, x1 - r + c, y1, x1 - r, y1);
        self.line_to(x + r, y1);
        self.curve_to(x + r - c, y1, x, y1 - r + c, x, y1 - r);
        self.line_to(x, y + r);
        self.curve_to(x, y + r - c, x + r - c, y, x + r, y);
        self.close_path()
    }

    // ---- path painting ----------------------------------------------

    pub fn fill(&mut self) -> &mut Self {
        self.push_ops("fill", "f\n")
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.push_ops("stroke", "S\n")
    }

    pub fn fill_stroke(&mut self) -> &mut Self {
        self.push_ops("fill_stroke", "B\n")
    }

    // ---- images -----------------------------------------------------

    /// Load an image (JPEG or PNG) for later placement. The image
    /// XObject is written to the output immediately; the returned id
    /// can be placed on any number of pages.
    pub fn load_image_bytes(&mut self, data: &[u8]) -> Result<ImageId, String> {
        let decoded = image::decode(data)?;

        let smask_id = match &decoded.alpha {
            Some(alpha) => {
                let deflated = deflate(alpha).map_err(|e| e.to_string())?;
                let id = self.alloc_obj();
                let obj = PdfObject::stream(
                    vec![
                        ("Type", PdfObject::name("XObject")),
                        ("Subtype", PdfObject::name("Image")),
                        ("Width", PdfObject::Integer(decoded.width as i64)),
                        ("Height", PdfObject::Integer(decoded.height as i64)),
                        ("ColorSpace", PdfObject::name("DeviceGray")),
                        ("BitsPerComponent", PdfObject::Integer(8)),
                        ("Filter", PdfObject::name("FlateDecode")),
                    ],
                    deflated,
                );
                self.writer.write_object(id, &obj).map_err(|e| e.to_string())?;
                Some(id)
            }
            None => None,
        };

        let color_space = if decoded.grayscale {
            "DeviceGray"
        } else {
            "DeviceRGB"
        };
        let (filter, data) = match decoded.format {
            ImageFormat::Jpeg => ("DCTDecode", decoded.data),
            ImageFormat::Png => (
                "FlateDecode",
                deflate(&decoded.data).map_err(|e| e.to_string())?,
            ),
        };

        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(decoded.width as i64)),
            ("Height", PdfObject::Integer(decoded.height as i64)),
            ("ColorSpace", PdfObject::name(color_space)),
            ("BitsPerComponent", PdfObject::Integer(8)),
            ("Filter", PdfObject::name(filter)),
        ];
        if let Some(id) = smask_id {
            dict.push(("SMask", PdfObject::reference(id)));
        }

        let id = self.alloc_obj();
        let obj = PdfObject::stream(dict, data);
        self.writer.write_object(id, &obj).map_err(|e| e.to_string())?;

        self.images.push(LoadedImage {
            obj: id,
            width: decoded.width,
            height: decoded.height,
        });
        Ok(ImageId(self.images.len() - 1))
    }

    /// Pixel dimensions of a loaded image.
    pub fn image_size(&self, id: ImageId) -> (u32, u32) {
        let img = &self.images[id.0];
        (img.width, img.height)
    }

    /// Draw a loaded image into the rectangle with bottom-left corner
    /// (x, y) and the given display size in points.
    pub fn place_image(&mut self, id: ImageId, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let ops = format!(
            "q\n{} 0 0 {} {} {} cm\n/Im{} Do\nQ\n",
            format_coord(width),
            format_coord(height),
            format_coord(x),
            format_coord(y),
            id.0,
        );
        let page = self.page_mut("place_image");
        page.content_ops.extend_from_slice(ops.as_bytes());
        if !page.images_used.contains(&id.0) {
            page.images_used.push(id.0);
        }
        self
    }

    // ---- tables -----------------------------------------------------

    /// Fit one table row at the cursor position on the current page.
    ///
    /// Returns `FitResult::Placed` when the row was drawn,
    /// `FitResult::PageFull` when the caller should turn the page and
    /// retry, and `FitResult::TooSmall` when the row cannot fit even
    /// on a fresh page area.
    pub fn fit_row(
        &mut self,
        table: &Table,
        row: &Row,
        cursor: &mut TableCursor,
    ) -> io::Result<FitResult> {
        let (ops, result) = table.generate_row_ops(row, cursor);
        self.page_mut("fit_row").content_ops.extend_from_slice(&ops);
        Ok(result)
    }

    // ---- page lifecycle ---------------------------------------------

    /// End the current page. Writes page objects to the writer and
    /// frees page content from memory.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = match self.current_page.take() {
            Some(page) => page,
            None => panic!("end_page called with no open page"),
        };

        let content_id = self.alloc_obj();
        let page_id = self.alloc_obj();

        let (dict, data) = if self.compress {
            let deflated = deflate(&page.content_ops)?;
            (
                vec![("Filter", PdfObject::name("FlateDecode"))],
                deflated,
            )
        } else {
            (vec![], page.content_ops)
        };
        let content_stream = PdfObject::stream(dict, data);
        self.writer.write_object(content_id, &content_stream)?;

        let font_entries: Vec<(String, PdfObject)> = crate::fonts::Font::all()
            .iter()
            .enumerate()
            .map(|(i, font)| {
                (
                    font.pdf_name().to_string(),
                    PdfObject::Reference(ObjId(FONT_OBJ_BASE + i as u32, 0)),
                )
            })
            .collect();
        let mut resources = vec![("Font".to_string(), PdfObject::Dictionary(font_entries))];
        if !page.images_used.is_empty() {
            let xobjects: Vec<(String, PdfObject)> = page
                .images_used
                .iter()
                .map(|&idx| (format!("Im{}", idx), PdfObject::Reference(self.images[idx].obj)))
                .collect();
            resources.push(("XObject".to_string(), PdfObject::Dictionary(xobjects)));
        }

        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::reference(PAGES_OBJ)),
            (
                "MediaBox",
                PdfObject::array(vec![
                    PdfObject::Integer(0),
                    PdfObject::Integer(0),
                    PdfObject::Real(page.width),
                    PdfObject::Real(page.height),
                ]),
            ),
            ("Contents", PdfObject::reference(content_id)),
            ("Resources", PdfObject::Dictionary(resources)),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        Ok(())
    }

    /// Finish the document. Writes the catalog, pages tree, info
    /// dictionary, xref table, and trailer. Consumes self.
    pub fn end_document(mut self) -> io::Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        let info_id = if !self.info.is_empty() {
            let id = self.alloc_obj();
            let entries: Vec<(&str, PdfObject)> = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        } else {
            None
        };

        let kids: Vec<PdfObject> = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let page_count = self.page_obj_ids.len() as i64;
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(page_count)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;

        Ok(self.writer.into_inner())
    }
}

/// Zlib-deflate a byte slice for a FlateDecode stream.
fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
