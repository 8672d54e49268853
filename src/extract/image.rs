//! Conversion of PDF image XObjects to PNG.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Document as LopdfDocument, Object, Stream};

use crate::error::{Error, Result};

/// A PNG-encoded image.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// PNG bytes
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Encode an image XObject stream as PNG.
///
/// JPEG streams are decoded and re-encoded. Raw or Flate/LZW compressed
/// samples are accepted for 8-bit gray and RGB color spaces.
pub fn encode_png(doc: &LopdfDocument, stream: &Stream) -> Result<EncodedImage> {
    let filters = stream_filters(stream);

    match filters.as_slice() {
        [f] if f == "DCTDecode" => {
            let img = image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg)?;
            to_png(img)
        }
        [] => encode_samples(doc, stream, stream.content.clone()),
        fs if fs.iter().all(|f| f == "FlateDecode" || f == "LZWDecode") => {
            let samples = stream
                .decompressed_content()
                .map_err(|e| Error::ImageExtract(e.to_string()))?;
            encode_samples(doc, stream, samples)
        }
        fs => Err(Error::ImageExtract(format!(
            "unsupported filter {}",
            fs.join("+")
        ))),
    }
}

fn encode_samples(
    doc: &LopdfDocument,
    stream: &Stream,
    mut samples: Vec<u8>,
) -> Result<EncodedImage> {
    let dict = &stream.dict;
    let width = dict_u32(dict, b"Width")?;
    let height = dict_u32(dict, b"Height")?;

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|b| b.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        return Err(Error::ImageExtract(format!(
            "{} bits per component is not supported",
            bits
        )));
    }

    let components = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|cs| color_components(doc, cs))
        .ok_or_else(|| Error::ImageExtract("unsupported color space".to_string()))?;

    let expected = width as usize * height as usize * components as usize;
    if samples.len() < expected {
        return Err(Error::ImageExtract(format!(
            "expected {} bytes of samples, found {}",
            expected,
            samples.len()
        )));
    }
    samples.truncate(expected);

    let img = match components {
        1 => GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        _ => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
    }
    .ok_or_else(|| Error::ImageExtract("sample buffer does not fit image".to_string()))?;

    to_png(img)
}

fn to_png(img: DynamicImage) -> Result<EncodedImage> {
    let (width, height) = (img.width(), img.height());
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(EncodedImage {
        data: out.into_inner(),
        width,
        height,
    })
}

/// Filter names applied to a stream, outermost first.
pub(crate) fn stream_filters(stream: &Stream) -> Vec<String> {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(n)) => vec![String::from_utf8_lossy(n).to_string()],
        Ok(Object::Array(arr)) => arr
            .iter()
            .filter_map(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Number of color components for gray and RGB color spaces.
fn color_components(doc: &LopdfDocument, cs: &Object) -> Option<u8> {
    match cs {
        Object::Name(n) => match n.as_slice() {
            b"DeviceGray" | b"CalGray" => Some(1),
            b"DeviceRGB" | b"CalRGB" => Some(3),
            _ => None,
        },
        Object::Reference(r) => color_components(doc, doc.get_object(*r).ok()?),
        Object::Array(arr) => match arr.first()?.as_name().ok()? {
            b"ICCBased" => {
                let profile = match arr.get(1)? {
                    Object::Reference(r) => doc.get_object(*r).ok()?,
                    other => other,
                };
                let n = profile.as_stream().ok()?.dict.get(b"N").ok()?.as_i64().ok()?;
                match n {
                    1 => Some(1),
                    3 => Some(3),
                    _ => None,
                }
            }
            b"CalGray" => Some(1),
            b"CalRGB" => Some(3),
            _ => None,
        },
        _ => None,
    }
}

fn dict_u32(dict: &lopdf::Dictionary, key: &[u8]) -> Result<u32> {
    dict.get(key)
        .ok()
        .and_then(|v| v.as_i64().ok())
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
        .ok_or_else(|| Error::ImageExtract(format!("missing {}", String::from_utf8_lossy(key))))
}
