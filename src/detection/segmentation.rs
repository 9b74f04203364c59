use image::{GrayImage, Luma, Rgb, RgbImage};

/// Inclusive `[low, high]` bound on one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRange {
    pub low: f64,
    pub high: f64,
}

impl ChannelRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: u8) -> bool {
        let v = value as f64;
        v >= self.low && v <= self.high
    }
}

/// Hue, saturation and value bounds.
///
/// Hue is in half-degrees (`0..180`), saturation and value in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvThreshold {
    pub hue: ChannelRange,
    pub saturation: ChannelRange,
    pub value: ChannelRange,
}

impl HsvThreshold {
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        self.hue.contains(hsv[0]) && self.saturation.contains(hsv[1]) && self.value.contains(hsv[2])
    }
}

impl Default for HsvThreshold {
    fn default() -> Self {
        Self {
            hue: ChannelRange::new(66.0, 100.0),
            saturation: ChannelRange::new(66.0, 240.0),
            value: ChannelRange::new(123.0, 255.0),
        }
    }
}

/// Convert one RGB pixel to 8-bit HSV.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0;
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);

    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (v - min) as f32;
    let vf = v as f32;

    let s = if v == 0 { 0.0 } else { 255.0 * delta / vf };

    let mut h = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (gf - bf) / delta
    } else if v == g {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    let mut h = (h / 2.0).round() as u16;
    if h >= 180 {
        h -= 180;
    }

    [h as u8, s.round().min(255.0) as u8, v]
}

/// Binary mask of pixels whose HSV values all fall inside `threshold`.
/// Set pixels are 255, others 0.
pub fn hsv_threshold(frame: &RgbImage, threshold: &HsvThreshold) -> GrayImage {
    let (width, height) = frame.dimensions();
    let mut mask = GrayImage::new(width, height);
    for (x, y, pixel) in frame.enumerate_pixels() {
        if threshold.contains(rgb_to_hsv(*pixel)) {
            mask.put_pixel(x, y, Luma([255u8]));
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(rgb_to_hsv(Rgb([255, 0, 0])), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 255, 0])), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 255])), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(Rgb([0, 0, 0])), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(Rgb([128, 128, 128])), [0, 0, 128]);
    }

    #[test]
    fn test_hue_wraps_below_180() {
        // 359 degrees rounds to 180 half-degrees, which is red again
        let [h, _, _] = rgb_to_hsv(Rgb([255, 0, 4]));
        assert!(h < 180);
    }

    #[test]
    fn test_boundary_values_are_included() {
        let range = ChannelRange::new(66.0, 100.0);
        assert!(range.contains(66));
        assert!(range.contains(100));
        assert!(!range.contains(65));
        assert!(!range.contains(101));
    }

    #[test]
    fn test_threshold_marks_only_matching_pixels() {
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([20, 220, 180]));
        frame.put_pixel(1, 0, Rgb([0, 255, 0]));

        let mask = hsv_threshold(&frame, &HsvThreshold::default());
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
        assert_eq!(mask.get_pixel(1, 0)[0], 0);
    }
}
