use image::ImageReader;
use pivision::TargetPipeline;
use pivision::detection::filter;

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "image.png".to_string());
    let img = ImageReader::open(&path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;

    let pipeline = TargetPipeline::default();
    let contours = pipeline.get_contours(&img)?;
    println!("Found {} contours in {}\n", contours.len(), path);

    for (i, contour) in contours.iter().enumerate() {
        let bb = contour.bounding_rect();
        let verdict = match filter::evaluate(contour, &pipeline.config.filter) {
            Ok(()) => "target".to_string(),
            Err(reason) => format!("rejected: {}", reason),
        };
        println!(
            "  Contour {}: bbox=({}, {}) {}x{}, area={:.1}, solidity={}, vertices={}, {}",
            i + 1,
            bb.x,
            bb.y,
            bb.width,
            bb.height,
            contour.area(),
            contour
                .solidity()
                .map(|s| format!("{:.1}%", s))
                .unwrap_or_else(|| "n/a".to_string()),
            contour.vertex_count(),
            verdict
        );
    }

    let result = pipeline.process(&img)?;
    println!(
        "\nTargets: {}  center=({:.1}, {:.1})  offset=({:.1}, {:.1})",
        result.count, result.center.x, result.center.y, result.offset.x, result.offset.y
    );

    Ok(())
}
