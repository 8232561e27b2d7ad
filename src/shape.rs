/// Silhouette geometry: sizing on the canvas and point membership.
use core::fmt;
use core::str::FromStr;

/// `√3 / 2`, the height of an equilateral triangle with unit side.
pub const SQRT3_2: f64 = 0.866_025_403_784_438_6;

/// The decorative outline the QR code is embedded in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ShapeKind {
    #[default]
    Triangle,
    Circle,
    Square,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Triangle, ShapeKind::Circle, ShapeKind::Square];

    /// Fraction of the padded canvas extent the shape spans.
    pub fn scale(self) -> f64 {
        match self {
            ShapeKind::Triangle => 1.1,
            ShapeKind::Circle => 0.85,
            ShapeKind::Square => 0.8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a shape name is not one of `triangle`, `circle`, `square`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape `{0}` (expected triangle, circle or square)")]
pub struct UnknownShape(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownShape(s.to_string()))
    }
}

/// A sized and positioned silhouette.
///
/// `width` is the side length for the triangle and square and the diameter for
/// the circle. The triangle is isosceles with its apex up, so its `height` is
/// `√3/2 · width`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ShapeGeometry {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ShapeGeometry {
    pub fn new(kind: ShapeKind, width: f64, center_x: f64, center_y: f64) -> Self {
        let height = match kind {
            ShapeKind::Triangle => SQRT3_2 * width,
            ShapeKind::Circle | ShapeKind::Square => width,
        };
        Self { kind, width, height, center_x, center_y }
    }

    /// Sizes the shape for a square canvas of side `canvas_size` with `padding`
    /// on every edge, centered on the canvas.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qishape::shape::{ShapeGeometry, ShapeKind};
    ///
    /// let circle = ShapeGeometry::for_canvas(ShapeKind::Circle, 550.0, 20.0);
    /// assert_eq!(circle.width, 510.0 * 0.85);
    /// assert_eq!((circle.center_x, circle.center_y), (275.0, 275.0));
    /// ```
    pub fn for_canvas(kind: ShapeKind, canvas_size: f64, padding: f64) -> Self {
        let extent = canvas_size - 2.0 * padding;
        let center = canvas_size / 2.0;
        Self::new(kind, extent * kind.scale(), center, center)
    }

    /// Top-left corner of the bounding box.
    pub fn origin(&self) -> (f64, f64) {
        (self.center_x - self.width / 2.0, self.center_y - self.height / 2.0)
    }

    /// Apex, bottom-left and bottom-right corners of the triangle.
    pub fn triangle_vertices(&self) -> [(f64, f64); 3] {
        let half_side = self.width / 2.0;
        let half_height = SQRT3_2 * self.width / 2.0;
        [
            (self.center_x, self.center_y - half_height),
            (self.center_x - half_side, self.center_y + half_height),
            (self.center_x + half_side, self.center_y + half_height),
        ]
    }

    /// Returns whether the point lies inside the silhouette.
    ///
    /// - Triangle: the three sub-triangles formed with the point must add up
    ///   to the full area, within one square unit.
    /// - Circle: distance to the center is at most 98% of the radius.
    /// - Square: inclusive bounding-box test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self.kind {
            ShapeKind::Triangle => {
                let [top, left, right] = self.triangle_vertices();
                let p = (x, y);
                let whole = area(left, right, top);
                let parts = area(p, right, top) + area(left, p, top) + area(left, right, p);
                (whole - parts).abs() < 1.0
            }
            ShapeKind::Circle => {
                let radius = self.width / 2.0;
                let distance = (x - self.center_x).hypot(y - self.center_y);
                distance <= radius * 0.98
            }
            ShapeKind::Square => {
                let half_width = self.width / 2.0;
                let half_height = self.height / 2.0;
                x >= self.center_x - half_width
                    && x <= self.center_x + half_width
                    && y >= self.center_y - half_height
                    && y <= self.center_y + half_height
            }
        }
    }
}

fn area(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    ((a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1)) / 2.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_sizing() {
        let t = ShapeGeometry::for_canvas(ShapeKind::Triangle, 550.0, 20.0);
        assert!((t.width - 561.0).abs() < 1e-9);
        assert!((t.height - SQRT3_2 * 561.0).abs() < 1e-9);
        let s = ShapeGeometry::for_canvas(ShapeKind::Square, 550.0, 20.0);
        assert!((s.width - 408.0).abs() < 1e-9);
        assert_eq!(s.width, s.height);
    }

    #[test]
    fn test_triangle_centroid_inside_far_point_outside() {
        let t = ShapeGeometry::for_canvas(ShapeKind::Triangle, 550.0, 20.0);
        let [a, b, c] = t.triangle_vertices();
        let centroid = ((a.0 + b.0 + c.0) / 3.0, (a.1 + b.1 + c.1) / 3.0);
        assert!(t.contains(centroid.0, centroid.1));
        assert!(!t.contains(-1000.0, -1000.0));
        assert!(!t.contains(5000.0, 275.0));
    }

    #[test]
    fn test_triangle_corners_excluded_near_apex() {
        let t = ShapeGeometry::new(ShapeKind::Triangle, 300.0, 0.0, 0.0);
        let (ox, oy) = t.origin();
        // top corners of the bounding box are outside the triangle
        assert!(!t.contains(ox + 1.0, oy + 1.0));
        assert!(!t.contains(ox + t.width - 1.0, oy + 1.0));
        // the apex itself is on the boundary
        assert!(t.contains(0.0, oy));
    }

    #[test]
    fn test_circle_threshold() {
        let c = ShapeGeometry::new(ShapeKind::Circle, 200.0, 50.0, 50.0);
        let r = 100.0;
        assert!(!c.contains(50.0 + r * 0.99, 50.0));
        assert!(c.contains(50.0, 50.0 + r * 0.9));
        assert!(c.contains(50.0 - r * 0.97, 50.0));
    }

    #[test]
    fn test_square_bounds_inclusive() {
        let s = ShapeGeometry::new(ShapeKind::Square, 100.0, 0.0, 0.0);
        for (x, y) in [(-50.0, -50.0), (50.0, -50.0), (-50.0, 50.0), (50.0, 50.0)] {
            assert!(s.contains(x, y));
        }
        assert!(!s.contains(50.1, 0.0));
    }

    #[test]
    fn test_shape_kind_parse() {
        assert_eq!("Circle".parse::<ShapeKind>(), Ok(ShapeKind::Circle));
        assert_eq!(" square ".parse::<ShapeKind>(), Ok(ShapeKind::Square));
        let err = "hexagon".parse::<ShapeKind>().unwrap_err();
        assert_eq!(err, UnknownShape("hexagon".to_string()));
        assert_eq!(err.to_string(), "unknown shape `hexagon` (expected triangle, circle or square)");
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        assert!(boxed.source().is_none());
        assert_eq!(ShapeKind::Triangle.to_string(), "triangle");
    }
}
