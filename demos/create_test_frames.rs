use image::{Rgb, RgbImage};
use std::path::PathBuf;

const TARGET: Rgb<u8> = Rgb([20, 220, 180]);

fn fill(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, TARGET);
        }
    }
}

/// Write a short sequence of 640x480 frames with a plus-shaped target
/// sweeping left to right, plus a matching config file.
fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test_frames"));
    std::fs::create_dir_all(&out_dir)?;

    for (i, cx) in (80..=560).step_by(80).enumerate() {
        let mut img = RgbImage::from_pixel(640, 480, Rgb([30, 30, 30]));
        fill(&mut img, cx - 40, 240 - 8, 81, 17);
        fill(&mut img, cx - 8, 240 - 40, 17, 81);

        let path = out_dir.join(format!("frame_{:03}.png", i));
        img.save(&path)?;
        println!("Created {}", path.display());
    }

    let config = serde_json::json!({
        "team": 0,
        "ntmode": "server",
        "cameras": [{ "name": "sim", "path": out_dir.display().to_string() }]
    });
    let config_path = out_dir.join("frc.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("Created {}", config_path.display());

    Ok(())
}
