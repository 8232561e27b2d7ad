use crate::error::Error;
use crate::scene::{Layer, PixelElement, RenderScene};

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Directory files are written to when the caller does not name one.
pub const DEFAULT_DIRECTORY: &str = "generated";

/// File stem used when the caller does not name the file.
pub const DEFAULT_FILENAME: &str = "gradient-qr-shape";

/// Id of the gradient declared in the SVG `<defs>`.
pub const GRADIENT_ID: &str = "shapeGradient";

/*---- Utilities ----*/

fn svg_open(scene: &RenderScene) -> String {
    let mut result = String::new();
    result += "<?xml version=\"1.0\" standalone=\"no\"?>\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{}\" height=\"{}\" version=\"1.1\">\n",
        scene.width, scene.height
    );
    result += "\t<defs>\n";
    result += &format!(
        "\t\t<linearGradient id=\"{}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">\n",
        GRADIENT_ID
    );
    let stops = [(0, scene.gradient.left), (50, scene.gradient.center), (100, scene.gradient.right)];
    for (offset, color) in stops {
        result += &format!("\t\t\t<stop offset=\"{}%\" stop-color=\"{}\"/>\n", offset, color);
    }
    result += "\t\t</linearGradient>\n";
    result += "\t</defs>\n";
    result
}

fn push_layer(result: &mut String, layer: Layer, elements: &[PixelElement]) {
    *result += &format!("\t<g class=\"{}\">\n", layer.class_name());
    for e in elements {
        *result += &format!(
            "\t\t<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            e.x, e.y, e.width, e.height, e.fill
        );
    }
    *result += "\t</g>\n";
}

/// Returns a standalone SVG document for the scene.
///
/// The document declares the three-stop gradient in `<defs>` and then holds
/// two groups of `<rect>` elements: the decorative background, then the QR
/// modules. The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(scene: &RenderScene) -> String {
    let mut result = svg_open(scene);
    push_layer(&mut result, Layer::Background, &scene.background);
    push_layer(&mut result, Layer::Qr, &scene.qr);
    result += "</svg>\n";
    result
}

/// Returns an SVG document whose only content is the scene rasterized to a PNG,
/// embedded as a base64 data URI.
///
/// # Errors
///
/// Returns [`Error::Image`] if PNG encoding fails.
pub fn to_embedded_svg_string(scene: &RenderScene) -> Result<String, Error> {
    let png = encode_png(&scene_to_image(scene))?;
    let mut result = svg_open(scene);
    result += &format!(
        "\t<image x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" xlink:href=\"data:image/png;base64,{}\"/>\n",
        scene.width,
        scene.height,
        general_purpose::STANDARD.encode(png)
    );
    result += "</svg>\n";
    Ok(result)
}

/// Rasterizes the scene onto a transparent canvas in paint order.
///
/// A canvas pixel takes an element's color when the pixel's center lies in the
/// element's rectangle.
pub fn scene_to_image(scene: &RenderScene) -> RgbaImage {
    let width = scene.width.max(0.0).ceil() as u32;
    let height = scene.height.max(0.0).ceil() as u32;
    let mut img = RgbaImage::new(width, height);

    for (_, e) in scene.iter() {
        let [r, g, b] = e.fill.to_array();
        let x0 = (e.x - 0.5).ceil().max(0.0) as u32;
        let y0 = (e.y - 0.5).ceil().max(0.0) as u32;
        let x1 = ((e.x + e.width - 0.5).ceil().max(0.0) as u32).min(width);
        let y1 = ((e.y + e.height - 0.5).ceil().max(0.0) as u32).min(height);
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }
    }

    img
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, Error> {
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(img.clone()).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

fn output_path(
    directory_path: Option<&str>,
    filename: Option<&str>,
    extension: &str,
) -> Result<PathBuf, Error> {
    let directory_path = directory_path.unwrap_or(DEFAULT_DIRECTORY);
    let filename = filename.unwrap_or(DEFAULT_FILENAME);
    if filename.is_empty() || filename.contains(['/', '\\']) {
        return Err(Error::Export(format!("invalid file name `{}`", filename)));
    }

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
    }

    let stem = filename.strip_suffix(&format!(".{}", extension)).unwrap_or(filename);
    Ok(Path::new(directory_path).join(format!("{}.{}", stem, extension)))
}

/// Writes the scene as an `.svg` file and returns its path.
///
/// # Arguments
///
/// * `scene` - The rendered scene.
/// * `directory_path` - Optional. Where to write the file. Defaults to "generated".
/// * `filename` - Optional. File name, with or without `.svg`. Defaults to "gradient-qr-shape".
/// * `embed_raster` - Whether to embed a PNG instead of writing vector rectangles.
///
/// # Errors
///
/// Returns an error if the file name is unusable or the file cannot be written.
/// Nothing is written in that case.
///
/// # Example
///
/// ```no_run
/// use qishape::config::RenderConfig;
/// use qishape::helper::save_svg;
/// use qishape::render::{RenderController, RenderOptions};
///
/// let mut controller = RenderController::with_default_encoder(RenderOptions::default());
/// let scene = controller.update(RenderConfig::default()).unwrap();
/// let path = save_svg(scene, Some("images"), None, false).unwrap();
/// println!("{}", path.display());
/// ```
pub fn save_svg(
    scene: &RenderScene,
    directory_path: Option<&str>,
    filename: Option<&str>,
    embed_raster: bool,
) -> Result<PathBuf, Error> {
    let document = if embed_raster { to_embedded_svg_string(scene)? } else { to_svg_string(scene) };
    let file_path = output_path(directory_path, filename, "svg")?;
    fs::write(&file_path, document)?;
    Ok(file_path)
}

/// Writes the raster preview as a `.png` file and returns its path.
///
/// Defaults match [`save_svg`].
pub fn save_png(
    scene: &RenderScene,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf, Error> {
    let file_path = output_path(directory_path, filename, "png")?;
    scene_to_image(scene).save(&file_path)?;
    Ok(file_path)
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Gradient, Rgb};

    fn sample_scene() -> RenderScene {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        RenderScene::assemble(
            20.0,
            20.0,
            Gradient::from_hex_or_black("#FF0000", "#00FF00", "#0000FF"),
            vec![PixelElement::new(0.0, 0.0, 6.0, 6.0, red), PixelElement::new(4.0, 4.0, 6.0, 6.0, red)],
            vec![PixelElement::new(5.0, 5.0, 2.5, 2.5, blue)],
        )
    }

    #[test]
    fn test_to_svg_string() {
        let svg = to_svg_string(&sample_scene());

        assert!(svg.starts_with("<?xml version=\"1.0\" standalone=\"no\"?>"));
        assert!(svg.contains("width=\"20\" height=\"20\""));
        assert!(svg.contains("<stop offset=\"0%\" stop-color=\"#FF0000\"/>"));
        assert!(svg.contains("<stop offset=\"50%\" stop-color=\"#00FF00\"/>"));
        assert!(svg.contains("<stop offset=\"100%\" stop-color=\"#0000FF\"/>"));
        assert_eq!(svg.matches("<g ").count(), 2);
        assert_eq!(svg.matches("<rect ").count(), 3);
        let background = svg.find("class=\"shape-pixels\"").unwrap();
        let qr = svg.find("class=\"qr-code\"").unwrap();
        assert!(background < qr);
        assert!(svg.contains("<rect x=\"5\" y=\"5\" width=\"2.5\" height=\"2.5\" fill=\"#0000FF\"/>"));
        assert!(svg.trim_end().ends_with("</svg>"));
        let lines: Vec<&str> = svg.lines().collect();
        let open = lines.iter().position(|l| l.trim() == "<g class=\"qr-code\">").unwrap();
        assert_eq!(lines[open + 1].trim(), "<rect x=\"5\" y=\"5\" width=\"2.5\" height=\"2.5\" fill=\"#0000FF\"/>");
        assert_eq!(lines[open + 2].trim(), "</g>");
    }

    #[test]
    fn test_scene_to_image_paint_order() {
        let img = scene_to_image(&sample_scene());
        assert_eq!(img.dimensions(), (20, 20));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        // QR layer covers the overlapping background pixel
        assert_eq!(*img.get_pixel(5, 5), Rgba([0, 0, 255, 255]));
        assert_eq!(*img.get_pixel(6, 6), Rgba([0, 0, 255, 255]));
        assert_eq!(*img.get_pixel(7, 7), Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(15, 15)[3], 0);
    }

    #[test]
    fn test_embedded_svg_has_one_image() {
        let svg = to_embedded_svg_string(&sample_scene()).unwrap();
        assert_eq!(svg.matches("<image ").count(), 1);
        assert!(svg.contains("data:image/png;base64,"));
        assert!(!svg.contains("<rect "));
    }

    #[test]
    fn test_save_svg_and_png() {
        let dir = std::env::temp_dir().join(format!("qishape-helper-{}", std::process::id()));
        let dir = dir.to_str().unwrap();
        let svg = save_svg(&sample_scene(), Some(dir), Some("shape.svg"), false).unwrap();
        assert!(svg.ends_with("shape.svg"));
        assert!(fs::read_to_string(&svg).unwrap().contains("<svg "));
        let png = save_png(&sample_scene(), Some(dir), None).unwrap();
        assert!(png.ends_with("gradient-qr-shape.png"));
        assert_eq!(image::open(&png).unwrap().to_rgba8().dimensions(), (20, 20));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_bad_filename_writes_nothing() {
        let err = save_svg(&sample_scene(), Some("unused"), Some("a/b"), false).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
        assert!(!Path::new("unused").exists());
    }
}
