use crate::error::RenderError;
use pixel_stylize::{Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;

/// Decode PNG bytes into an RGB image.
///
/// Every PNG color type is accepted. Palette and low bit-depth images are
/// expanded, 16-bit channels are reduced to 8 bits, and alpha is
/// composited onto a white background.
pub fn decode_png(bytes: &[u8]) -> Result<RgbImage, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];
    let (width, height) = (info.width as usize, info.height as usize);

    let pixels: Vec<Rgb> = match info.color_type {
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|c| {
                Rgb::new(
                    over_white(c[0], c[3]),
                    over_white(c[1], c[3]),
                    over_white(c[2], c[3]),
                )
            })
            .collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| Rgb::new(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|c| {
                let v = over_white(c[0], c[1]);
                Rgb::new(v, v, v)
            })
            .collect(),
        png::ColorType::Indexed => {
            return Err(RenderError::Decode(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width,
        height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    RgbImage::from_pixels(width, height, pixels)
        .map_err(|e| RenderError::Decode(e.to_string()))
}

/// Composite one channel with straight alpha onto white.
fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Encode an RGB image as an optimized PNG.
///
/// Images with at most 256 distinct colors are written as indexed PNGs
/// with the smallest bit depth that fits the palette; anything else is
/// written as 8-bit RGB. The result is re-compressed with oxipng.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let too_large = || RenderError::UnsupportedDimensions {
        width: image.width(),
        height: image.height(),
    };
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;

    let (color_type, bit_depth, plte, packed) = match index_colors(image) {
        Some((palette, indices)) => {
            let (depth, bits) = match palette.len() {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let plte: Vec<u8> = palette.iter().flat_map(|c| c.to_bytes()).collect();
            let packed = if bits == 8 {
                indices
            } else {
                pack_nbits(&indices, image.width(), bits)
            };
            (png::ColorType::Indexed, depth, Some(plte), packed)
        }
        None => (
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            image.to_raw(),
        ),
    };

    // Encode PNG (fast settings, oxipng re-compresses)
    let png_bytes = write_png(width, height, color_type, bit_depth, plte.as_deref(), &packed)?;

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or_else(|e| {
        tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
        png_bytes
    });
    Ok(optimized)
}

/// Palette in first-appearance order plus one index per pixel, or `None`
/// when the image has more than 256 colors.
fn index_colors(image: &RgbImage) -> Option<(Vec<Rgb>, Vec<u8>)> {
    let mut lookup: HashMap<Rgb, u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(image.pixels().len());
    for &p in image.pixels() {
        let idx = match lookup.get(&p) {
            Some(&idx) => idx,
            None => {
                let idx = u8::try_from(palette.len()).ok()?;
                palette.push(p);
                lookup.insert(p, idx);
                idx
            }
        };
        indices.push(idx);
    }
    Some((palette, indices))
}

fn write_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = indices.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
