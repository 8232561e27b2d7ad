/// Places QR modules into the mask region, optionally merging them into larger rectangles.
use std::collections::HashMap;

use crate::color::{Gradient, Rgb};
use crate::mask::MaskRegion;
use crate::matrix::BitMatrix;
use crate::scene::PixelElement;

/// A rectangle of dark modules, in module units.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModuleRect {
    pub mx: usize,
    pub my: usize,
    pub width: usize,
    pub height: usize,
    pub fill: Rgb,
}

impl ModuleRect {
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

fn module_color(gradient: &Gradient, mx: usize, size: usize) -> Rgb {
    gradient.interpolate(mx as f64 / size as f64)
}

/// One rectangle per dark module, colored by `mx / size`.
pub fn module_rects(matrix: &BitMatrix, gradient: &Gradient) -> Vec<ModuleRect> {
    let size = matrix.size();
    matrix
        .iter()
        .filter(|&(_, _, dark)| dark)
        .map(|(mx, my, _)| ModuleRect { mx, my, width: 1, height: 1, fill: module_color(gradient, mx, size) })
        .collect()
}

/// Merges dark modules into as few same-colored rectangles as a row-then-column
/// sweep finds.
///
/// Horizontal runs stop where the gradient color changes, so every module keeps
/// the color it would have had on its own. Runs with the same start and length
/// on consecutive rows are then stacked into one rectangle. The total area
/// always equals the number of dark modules.
pub fn merge_runs(matrix: &BitMatrix, gradient: &Gradient) -> Vec<ModuleRect> {
    let size = matrix.size();
    let mut rects: Vec<ModuleRect> = Vec::new();
    // (start, width) -> index of the rectangle that ended on the previous row
    let mut open: HashMap<(usize, usize), usize> = HashMap::new();

    for my in 0..size {
        let mut next_open = HashMap::new();
        let mut mx = 0;
        while mx < size {
            if !matrix.get(mx, my) {
                mx += 1;
                continue;
            }
            let start = mx;
            let fill = module_color(gradient, start, size);
            while mx < size && matrix.get(mx, my) && module_color(gradient, mx, size) == fill {
                mx += 1;
            }
            let key = (start, mx - start);
            let index = match open.get(&key) {
                Some(&index) => {
                    rects[index].height += 1;
                    index
                }
                None => {
                    rects.push(ModuleRect { mx: start, my, width: key.1, height: 1, fill });
                    rects.len() - 1
                }
            };
            next_open.insert(key, index);
        }
        open = next_open;
    }
    rects
}

/// Lays out the QR layer inside `mask`.
///
/// Each module is `qr_size / size` wide and positioned at
/// `mask.x + mx * module_size`, `mask.y + my * module_size`. An empty matrix
/// gives an empty layer.
///
/// # Example
///
/// ```rust
/// use qishape::color::Gradient;
/// use qishape::mask::MaskRegion;
/// use qishape::matrix::BitMatrix;
/// use qishape::placer::place_modules;
/// use qishape::shape::ShapeKind;
///
/// let matrix = BitMatrix::from_rows(&[vec![true, true], vec![false, true]]).unwrap();
/// let mask = MaskRegion::compute(ShapeKind::Square, 400.0, 275.0, 275.0, 200.0);
/// let modules = place_modules(&matrix, &mask, &Gradient::default(), 200.0, false);
/// assert_eq!(modules.len(), 3);
/// assert_eq!((modules[1].x, modules[1].width), (275.0, 100.0));
/// ```
pub fn place_modules(
    matrix: &BitMatrix,
    mask: &MaskRegion,
    gradient: &Gradient,
    qr_size: f64,
    merge: bool,
) -> Vec<PixelElement> {
    if matrix.is_empty() {
        return Vec::new();
    }
    let module_size = qr_size / matrix.size() as f64;
    let rects = if merge { merge_runs(matrix, gradient) } else { module_rects(matrix, gradient) };
    rects
        .into_iter()
        .map(|r| {
            PixelElement::new(
                mask.x + r.mx as f64 * module_size,
                mask.y + r.my as f64 * module_size,
                r.width as f64 * module_size,
                r.height as f64 * module_size,
                r.fill,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{LevelHEncoder, QrEncoder};
    use crate::shape::ShapeKind;

    fn covered(rects: &[ModuleRect], size: usize) -> Vec<Option<Rgb>> {
        let mut grid = vec![None; size * size];
        for r in rects {
            for y in r.my..r.my + r.height {
                for x in r.mx..r.mx + r.width {
                    assert!(grid[y * size + x].is_none(), "overlap at ({x}, {y})");
                    grid[y * size + x] = Some(r.fill);
                }
            }
        }
        grid
    }

    #[test]
    fn test_one_element_per_dark_module() {
        let matrix = LevelHEncoder.encode("https://www.triangoal.it/business-card").unwrap();
        let mask = MaskRegion::compute(ShapeKind::Circle, 433.5, 275.0, 275.0, 200.0);
        let modules = place_modules(&matrix, &mask, &Gradient::default(), 200.0, false);
        assert_eq!(modules.len(), matrix.count_dark());
        let module_size = 200.0 / matrix.size() as f64;
        for m in &modules {
            assert_eq!((m.width, m.height), (module_size, module_size));
            assert!(m.x >= mask.x && m.x + m.width <= mask.x + 200.0 + 1e-9);
        }
    }

    #[test]
    fn test_merge_is_area_preserving_and_color_exact() {
        let matrix = LevelHEncoder.encode("https://example.com/x").unwrap();
        let gradient = Gradient::from_hex_or_black("#FF0000", "#00FF00", "#0000FF");
        let single = module_rects(&matrix, &gradient);
        let merged = merge_runs(&matrix, &gradient);
        let area: usize = merged.iter().map(ModuleRect::area).sum();
        assert_eq!(area, matrix.count_dark());
        assert_eq!(single.len(), matrix.count_dark());
        assert_eq!(covered(&merged, matrix.size()), covered(&single, matrix.size()));
    }

    #[test]
    fn test_merge_reduces_element_count_for_flat_gradient() {
        let matrix = LevelHEncoder.encode("https://example.com/x").unwrap();
        let flat = Gradient::new(Rgb::BLACK, Rgb::BLACK, Rgb::BLACK);
        let merged = merge_runs(&matrix, &flat);
        assert!(merged.len() < matrix.count_dark());
        // each finder pattern's 7x1 top edge collapses into one run
        assert!(merged.iter().any(|r| r.mx == 0 && r.my == 0 && r.width == 7));
    }

    #[test]
    fn test_merge_stacks_identical_rows() {
        let matrix = BitMatrix::from_rows(&[
            vec![true, true, false],
            vec![true, true, false],
            vec![false, false, true],
        ])
        .unwrap();
        let flat = Gradient::new(Rgb::WHITE, Rgb::WHITE, Rgb::WHITE);
        let merged = merge_runs(&matrix, &flat);
        assert_eq!(
            merged,
            [
                ModuleRect { mx: 0, my: 0, width: 2, height: 2, fill: Rgb::WHITE },
                ModuleRect { mx: 2, my: 2, width: 1, height: 1, fill: Rgb::WHITE },
            ]
        );
    }

    #[test]
    fn test_empty_matrix_places_nothing() {
        let mask = MaskRegion::compute(ShapeKind::Triangle, 561.0, 275.0, 275.0, 200.0);
        assert!(place_modules(&BitMatrix::empty(), &mask, &Gradient::default(), 200.0, true).is_empty());
    }
}
