/// The stochastic pixel field that fills the silhouette around the QR code.
use rand::Rng;

use crate::color::Gradient;
use crate::mask::MaskRegion;
use crate::scene::PixelElement;
use crate::shape::{ShapeGeometry, ShapeKind};

pub const DEFAULT_PIXEL_SIZE: f64 = 6.5;
pub const DEFAULT_KEEP_PROBABILITY: f64 = 0.6;

/// Gap left between neighbouring decorative pixels.
const PIXEL_GAP: f64 = 0.5;

/// A grid cell that may receive a decorative pixel.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

/// Grid dimensions `(cols, rows)` covering the shape's bounding box.
pub fn grid_size(shape: &ShapeGeometry, pixel_size: f64) -> (usize, usize) {
    let cols = (shape.width / pixel_size).ceil().max(0.0) as usize;
    let rows = (shape.height / pixel_size).ceil().max(0.0) as usize;
    (cols, rows)
}

/// Cells whose top-left corner is inside the shape and outside the padded mask.
///
/// Squares yield nothing: they are rendered as the bare QR code.
pub fn candidate_cells<'a>(
    shape: &'a ShapeGeometry,
    mask: &'a MaskRegion,
    pixel_size: f64,
) -> impl Iterator<Item = Cell> + 'a {
    let (cols, rows) = if shape.kind == ShapeKind::Square || pixel_size <= 0.0 {
        (0, 0)
    } else {
        grid_size(shape, pixel_size)
    };
    let (left, top) = shape.origin();
    (0..rows)
        .flat_map(move |row| (0..cols).map(move |col| (col, row)))
        .map(move |(col, row)| Cell {
            col,
            row,
            x: left + col as f64 * pixel_size,
            y: top + row as f64 * pixel_size,
        })
        .filter(move |cell| shape.contains(cell.x, cell.y) && !mask.contains_padded(cell.x, cell.y))
}

/// Generates the decorative background layer.
///
/// Each candidate cell survives a Bernoulli trial with `keep_probability` and
/// becomes a pixel of side `pixel_size - 0.5`, colored by its column:
/// `gradient.interpolate(col / cols)`.
///
/// # Example
///
/// ```rust
/// use qishape::color::Gradient;
/// use qishape::field::generate_field;
/// use qishape::mask::MaskRegion;
/// use qishape::shape::{ShapeGeometry, ShapeKind};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let shape = ShapeGeometry::for_canvas(ShapeKind::Circle, 550.0, 20.0);
/// let mask = MaskRegion::compute(shape.kind, shape.width, shape.center_x, shape.center_y, 200.0);
/// let mut rng = StdRng::seed_from_u64(7);
/// let pixels = generate_field(&shape, &mask, &Gradient::default(), 6.5, 0.6, &mut rng);
/// assert!(!pixels.is_empty());
/// ```
pub fn generate_field<R: Rng + ?Sized>(
    shape: &ShapeGeometry,
    mask: &MaskRegion,
    gradient: &Gradient,
    pixel_size: f64,
    keep_probability: f64,
    rng: &mut R,
) -> Vec<PixelElement> {
    let (cols, _) = grid_size(shape, pixel_size);
    let keep = if keep_probability.is_nan() { 0.0 } else { keep_probability.clamp(0.0, 1.0) };
    let side = (pixel_size - PIXEL_GAP).max(0.0);
    candidate_cells(shape, mask, pixel_size)
        .filter(|_| rng.gen_bool(keep))
        .map(|cell| {
            let fill = gradient.interpolate(cell.col as f64 / cols as f64);
            PixelElement::new(cell.x, cell.y, side, side, fill)
        })
        .collect()
}
