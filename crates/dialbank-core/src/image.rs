/// Borrowed view of an interleaved 3-channel color frame.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h*3
}

/// Owned 3-channel color frame.
#[derive(Clone, Debug)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Allocate a frame filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn as_view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Overwrite one pixel; out-of-bounds coordinates are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 3;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }
}

impl GrayImage {
    #[inline]
    pub fn as_view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[inline]
fn get_rgb(src: &RgbImageView<'_>, x: i32, y: i32) -> Option<[u8; 3]> {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return None;
    }
    let idx = (y as usize * src.width + x as usize) * 3;
    Some([src.data[idx], src.data[idx + 1], src.data[idx + 2]])
}

/// Naive grayscale intensity at an integer pixel: the plain channel mean.
///
/// Returns `None` out of bounds. The needle scanner scores darkness with
/// this mean, not with luma weights; keep the two conversions separate.
#[inline]
pub fn mean_intensity(src: &RgbImageView<'_>, x: i32, y: i32) -> Option<f32> {
    let [r, g, b] = get_rgb(src, x, y)?;
    Some((r as f32 + g as f32 + b as f32) / 3.0)
}

/// Rec.601 grayscale derivation of a color frame, for circle detectors.
pub fn to_gray(src: &RgbImageView<'_>) -> GrayImage {
    let mut data = Vec::with_capacity(src.width * src.height);
    for px in src.data.chunks_exact(3) {
        let luma = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
        data.push(luma.round().clamp(0.0, 255.0) as u8);
    }
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}
