use image::{DynamicImage, Rgb, RgbImage};

/// Inside the default HSV range: hue 84, saturation 232, value 220.
pub const TARGET_GREEN: Rgb<u8> = Rgb([20, 220, 180]);
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

pub const WIDTH: u32 = 320;
pub const HEIGHT: u32 = 240;

/// Black frame at the working resolution.
pub fn blank_frame() -> RgbImage {
    RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND)
}

pub fn to_frame(img: RgbImage) -> DynamicImage {
    DynamicImage::ImageRgb8(img)
}

/// Fill pixels `x0..x0 + w`, `y0..y0 + h` with `color`, clipped to the image.
pub fn fill_rect(img: &mut RgbImage, x0: i32, y0: i32, w: i32, h: i32, color: Rgb<u8>) {
    for y in y0.max(0)..(y0 + h).min(img.height() as i32) {
        for x in x0.max(0)..(x0 + w).min(img.width() as i32) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Solid `size` x `size` square, convex.
pub fn draw_square(img: &mut RgbImage, x: i32, y: i32, size: i32) {
    fill_rect(img, x, y, size, size, TARGET_GREEN);
}

/// Plus sign centered on pixel (`cx`, `cy`), spanning `2 * half + 1` pixels
/// each way with arms `2 * arm_half + 1` pixels thick.
///
/// Symmetric about its center, so its centroid is exactly (`cx`, `cy`).
/// Solidity is about 53% for (20, 4) and (10, 2).
pub fn draw_cross(img: &mut RgbImage, cx: i32, cy: i32, half: i32, arm_half: i32) {
    let span = 2 * half + 1;
    let arm = 2 * arm_half + 1;
    fill_rect(img, cx - half, cy - arm_half, span, arm, TARGET_GREEN);
    fill_rect(img, cx - arm_half, cy - half, arm, span, TARGET_GREEN);
}

/// 40x40 "U": two 6px bars joined by a 6px base. Solidity about 35%.
pub fn draw_u(img: &mut RgbImage, x: i32, y: i32) {
    fill_rect(img, x, y, 6, 40, TARGET_GREEN);
    fill_rect(img, x + 34, y, 6, 40, TARGET_GREEN);
    fill_rect(img, x, y + 34, 40, 6, TARGET_GREEN);
}

/// 40x40 square with a 20x20 notch cut from the middle of its top edge.
/// Non-convex, solidity about 72%.
pub fn draw_notched_square(img: &mut RgbImage, x: i32, y: i32) {
    fill_rect(img, x, y, 40, 40, TARGET_GREEN);
    fill_rect(img, x + 10, y, 20, 20, BACKGROUND);
}

/// 40x40 square outline, 5px thick.
pub fn draw_frame(img: &mut RgbImage, x: i32, y: i32) {
    fill_rect(img, x, y, 40, 40, TARGET_GREEN);
    fill_rect(img, x + 5, y + 5, 30, 30, BACKGROUND);
}

/// Frame holding a single shape drawn by `draw`.
pub fn frame_with(draw: impl FnOnce(&mut RgbImage)) -> DynamicImage {
    let mut img = blank_frame();
    draw(&mut img);
    to_frame(img)
}

pub fn assert_no_position(result: &pivision::TargetResult) {
    assert_eq!(result.center, pivision::PointF::ORIGIN);
    assert_eq!(result.offset, pivision::PointF::ORIGIN);
}
