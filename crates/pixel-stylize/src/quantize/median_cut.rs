//! Median-cut quantization.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::color::Rgb;
use crate::image::RgbImage;

/// Boxes with fewer pixels than this are never split.
const MIN_SPLIT_PIXELS: u64 = 10;

/// A box of histogram entries `(color, pixel count)`.
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<(Rgb, u64)>,
    pixels: u64,
}

impl ColorBox {
    fn new(entries: Vec<(Rgb, u64)>) -> Self {
        let pixels = entries.iter().map(|(_, n)| n).sum();
        Self { entries, pixels }
    }

    fn splittable(&self) -> bool {
        self.pixels >= MIN_SPLIT_PIXELS && self.entries.len() >= 2
    }

    /// Channel (0 = r, 1 = g, 2 = b) with the widest value range.
    /// Ties go to the lower channel index.
    fn widest_channel(&self) -> usize {
        let mut lo = [u8::MAX; 3];
        let mut hi = [u8::MIN; 3];
        for (color, _) in &self.entries {
            for (c, v) in color.to_bytes().into_iter().enumerate() {
                lo[c] = lo[c].min(v);
                hi[c] = hi[c].max(v);
            }
        }
        let mut best = 0;
        for c in 1..3 {
            if hi[c] - lo[c] > hi[best] - lo[best] {
                best = c;
            }
        }
        best
    }

    /// Split at the pixel-weighted median of the widest channel. Both halves
    /// are non-empty.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        self.entries
            .sort_unstable_by_key(|(color, _)| (color.to_bytes()[channel], *color));

        let half = self.pixels.div_ceil(2);
        let mut cumulative = 0;
        let mut cut = self.entries.len() - 1;
        for (i, (_, n)) in self.entries.iter().enumerate() {
            cumulative += n;
            if cumulative >= half {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.entries.len() - 1);

        let right = self.entries.split_off(cut);
        (ColorBox::new(self.entries), ColorBox::new(right))
    }

    /// Pixel-weighted mean color.
    fn mean(&self) -> Rgb {
        let mut sum = [0u64; 3];
        for (color, n) in &self.entries {
            sum[0] += color.r as u64 * n;
            sum[1] += color.g as u64 * n;
            sum[2] += color.b as u64 * n;
        }
        let p = self.pixels.max(1);
        let mean = |v: u64| ((v + p / 2) / p) as u8;
        Rgb::new(mean(sum[0]), mean(sum[1]), mean(sum[2]))
    }
}

/// Quantize to at most `k` colors with median cut.
///
/// Starting from one box holding the whole color histogram, the box with the
/// most pixels is repeatedly split along its widest channel at the median,
/// until there are `k` boxes or no box with at least 10 pixels and two
/// distinct colors remains. Each pixel takes its own box's mean color.
pub fn median_cut(image: &RgbImage, k: usize) -> RgbImage {
    let k = k.max(1);

    let mut histogram: HashMap<Rgb, u64> = HashMap::new();
    for p in image.pixels() {
        *histogram.entry(*p).or_insert(0) += 1;
    }
    let mut entries: Vec<(Rgb, u64)> = histogram.into_iter().collect();
    entries.sort_unstable();

    let mut boxes = vec![ColorBox::new(entries)];
    while boxes.len() < k {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.splittable())
            .max_by(|(ia, a), (ib, b)| a.pixels.cmp(&b.pixels).then(ib.cmp(ia)))
            .map(|(i, _)| i);
        let Some(idx) = candidate else {
            break;
        };

        let (left, right) = boxes.swap_remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    tracing::debug!(k, boxes = boxes.len(), "median cut finished");

    let mut lookup: HashMap<Rgb, Rgb> = HashMap::new();
    for b in &boxes {
        let mean = b.mean();
        for (color, _) in &b.entries {
            lookup.insert(*color, mean);
        }
    }

    let pixels = image
        .pixels()
        .par_iter()
        .map(|p| lookup.get(p).copied().unwrap_or(*p))
        .collect();
    image.with_pixels(pixels)
}
