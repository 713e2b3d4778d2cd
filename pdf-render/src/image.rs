/// Opaque handle to an image loaded into a PdfDocument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub(crate) usize);

/// Supported embedded image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Embedded as-is with DCTDecode; only dimensions are parsed.
    Jpeg,
    /// Decoded to raw pixels and deflated into the PDF.
    Png,
}

/// Parsed image data ready for embedding.
pub(crate) struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// DeviceGray when true, DeviceRGB otherwise.
    pub grayscale: bool,
    /// Raw pixel data (PNG) or the original JPEG byte stream.
    pub data: Vec<u8>,
    /// Separate alpha channel, split out for an SMask entry.
    pub alpha: Option<Vec<u8>>,
}

/// Detect the image format from magic bytes.
pub(crate) fn detect_format(data: &[u8]) -> Result<ImageFormat, String> {
    if data.len() < 4 {
        return Err("image data too short to detect format".to_string());
    }
    if data[0] == 0xFF && data[1] == 0xD8 {
        Ok(ImageFormat::Jpeg)
    } else if data[..4] == [0x89, 0x50, 0x4E, 0x47] {
        Ok(ImageFormat::Png)
    } else {
        Err("unsupported image format (expected JPEG or PNG)".to_string())
    }
}

/// Parse image bytes into a form ready for embedding.
pub(crate) fn decode(data: &[u8]) -> Result<DecodedImage, String> {
    match detect_format(data)? {
        ImageFormat::Jpeg => decode_jpeg(data),
        ImageFormat::Png => decode_png(data),
    }
}

/// JPEG is embedded untouched; only the SOF marker is scanned for
/// dimensions and component count.
fn decode_jpeg(data: &[u8]) -> Result<DecodedImage, String> {
    let (width, height, components) = jpeg_dimensions(data)?;
    let grayscale = match components {
        1 => true,
        3 => false,
        n => {
            return Err(format!(
                "unsupported JPEG component count: {} (expected 1 or 3)",
                n
            ))
        }
    };
    Ok(DecodedImage {
        width,
        height,
        format: ImageFormat::Jpeg,
        grayscale,
        data: data.to_vec(),
        alpha: None,
    })
}

/// Scan JPEG markers for SOF0-SOF3 and extract width/height/components.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8), String> {
    let len = data.len();
    let mut i = 0;
    while i + 1 < len {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= len {
                return Err("JPEG SOF marker truncated".to_string());
            }
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            return Ok((width, height, data[i + 9]));
        }
        if marker == 0xFF || marker == 0x00 {
            i += 1;
            continue;
        }
        // Standalone markers carry no length field.
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        if i + 3 >= len {
            break;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    Err("no SOF marker found in JPEG data".to_string())
}

/// Decode PNG via the `png` crate, splitting any alpha channel out for
/// use as an SMask.
fn decode_png(data: &[u8]) -> Result<DecodedImage, String> {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("PNG decode error: {}", e))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("PNG frame error: {}", e))?;
    buf.truncate(info.buffer_size());

    let (width, height) = (info.width, info.height);
    let pixel_count = (width as usize) * (height as usize);

    match info.color_type {
        png::ColorType::Rgb => Ok(DecodedImage {
            width,
            height,
            format: ImageFormat::Png,
            grayscale: false,
            data: buf,
            alpha: None,
        }),
        png::ColorType::Rgba => {
            let mut rgb = Vec::with_capacity(pixel_count * 3);
            let mut alpha = Vec::with_capacity(pixel_count);
            for px in buf.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
                alpha.push(px[3]);
            }
            Ok(DecodedImage {
                width,
                height,
                format: ImageFormat::Png,
                grayscale: false,
                data: rgb,
                alpha: Some(alpha),
            })
        }
        png::ColorType::Grayscale => Ok(DecodedImage {
            width,
            height,
            format: ImageFormat::Png,
            grayscale: true,
            data: buf,
            alpha: None,
        }),
        png::ColorType::GrayscaleAlpha => {
            let mut gray = Vec::with_capacity(pixel_count);
            let mut alpha = Vec::with_capacity(pixel_count);
            for px in buf.chunks_exact(2) {
                gray.push(px[0]);
                alpha.push(px[1]);
            }
            Ok(DecodedImage {
                width,
                height,
                format: ImageFormat::Png,
                grayscale: true,
                data: gray,
                alpha: Some(alpha),
            })
        }
        other => Err(format!("unsupported PNG color type: {:?}", other)),
    }
}

/// Scale pixel dimensions to fit inside a box, preserving aspect
/// ratio. Never scales up past natural size in points.
pub fn scale_to_fit(img_w: u32, img_h: u32, max_w: f64, max_h: f64) -> (f64, f64) {
    let iw = img_w as f64;
    let ih = img_h as f64;
    if iw <= 0.0 || ih <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (max_w / iw).min(max_h / ih).min(1.0);
    (iw * scale, ih * scale)
}
