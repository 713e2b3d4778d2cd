pub mod color;
pub mod document;
pub mod fonts;
pub mod image;
pub mod objects;
pub mod table;
pub mod text;
pub mod writer;

pub use color::Color;
pub use document::PdfDocument;
pub use fonts::Font;
pub use image::{scale_to_fit, ImageFormat, ImageId};
pub use table::{Cell, CellStyle, FitResult, Row, Table, TableCursor};
pub use text::{wrap_text, Rect, TextAlign, TextStyle};
