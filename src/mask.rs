/// The rectangle reserved for the QR code inside the silhouette.
use crate::shape::{ShapeKind, SQRT3_2};

/// Side length, in canvas units, of the QR code.
pub const DEFAULT_QR_SIZE: f64 = 200.0;

/// Axis-aligned rectangle the QR modules are drawn into.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MaskRegion {
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-edge growth applied to a [`MaskRegion`] before testing decorative cells.
/// Positive values grow the rectangle outward, negative values shrink it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MaskPadding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl MaskPadding {
    pub fn for_shape(kind: ShapeKind) -> Option<Self> {
        match kind {
            ShapeKind::Triangle => Some(Self { left: 5.0, top: 5.0, right: -1.0, bottom: 0.0 }),
            ShapeKind::Circle => Some(Self { left: 5.0, top: 10.0, right: 5.0, bottom: 5.0 }),
            // squares get no decorative fill, so nothing is masked
            ShapeKind::Square => None,
        }
    }
}

impl MaskRegion {
    /// Positions a `qr_size` square for a shape of width `shape_width` centered
    /// at (`center_x`, `center_y`).
    ///
    /// The triangle pushes the code left and down into the wide lower half;
    /// the circle and square center it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qishape::mask::MaskRegion;
    /// use qishape::shape::ShapeKind;
    ///
    /// let mask = MaskRegion::compute(ShapeKind::Circle, 433.5, 275.0, 275.0, 200.0);
    /// assert_eq!((mask.x, mask.y), (175.0, 175.0));
    /// ```
    pub fn compute(
        kind: ShapeKind,
        shape_width: f64,
        center_x: f64,
        center_y: f64,
        qr_size: f64,
    ) -> Self {
        let (x, y) = match kind {
            ShapeKind::Triangle => {
                let triangle_height = SQRT3_2 * shape_width;
                (
                    center_x - qr_size / 2.3 - 8.0,
                    center_y - triangle_height / 2.0 + triangle_height * 0.5,
                )
            }
            ShapeKind::Circle | ShapeKind::Square => (center_x - qr_size / 2.0, center_y - qr_size / 2.0),
        };
        Self { kind, x, y, width: qr_size, height: qr_size }
    }

    /// Returns whether (`x`, `y`) falls in the region grown by the shape's
    /// [`MaskPadding`]. Always false for squares.
    pub fn contains_padded(&self, x: f64, y: f64) -> bool {
        let Some(pad) = MaskPadding::for_shape(self.kind) else {
            return false;
        };
        x >= self.x - pad.left
            && x <= self.x + self.width + pad.right
            && y >= self.y - pad.top
            && y <= self.y + self.height + pad.bottom
    }
}
