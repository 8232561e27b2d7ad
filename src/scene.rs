/// Rendered output: colored rectangles in paint order.
use crate::color::{Gradient, Rgb};

/// One filled rectangle, either a decorative pixel or a QR module (or a merged
/// run of modules).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PixelElement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
}

impl PixelElement {
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill: Rgb) -> Self {
        Self { x, y, width, height, fill }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Layer {
    Background,
    Qr,
}

impl Layer {
    /// `class` attribute of the layer's SVG group.
    pub fn class_name(self) -> &'static str {
        match self {
            Layer::Background => "shape-pixels",
            Layer::Qr => "qr-code",
        }
    }
}

/// Everything one render pass produced.
///
/// The background layer is painted first and the QR layer on top. All export
/// views (SVG, embedded raster, PNG) are derived from this value, so the random
/// fill is resolved exactly once per pass.
#[derive(Clone, PartialEq, Debug)]
pub struct RenderScene {
    pub width: f64,
    pub height: f64,
    pub gradient: Gradient,
    pub background: Vec<PixelElement>,
    pub qr: Vec<PixelElement>,
}

impl RenderScene {
    /// Combines both layers into a scene for a `width` x `height` canvas.
    pub fn assemble(
        width: f64,
        height: f64,
        gradient: Gradient,
        background: Vec<PixelElement>,
        qr: Vec<PixelElement>,
    ) -> Self {
        Self { width, height, gradient, background, qr }
    }

    pub fn layer(&self, layer: Layer) -> &[PixelElement] {
        match layer {
            Layer::Background => &self.background,
            Layer::Qr => &self.qr,
        }
    }

    /// All elements in paint order, tagged with their layer.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &PixelElement)> + '_ {
        let background = self.background.iter().map(|e| (Layer::Background, e));
        let qr = self.qr.iter().map(|e| (Layer::Qr, e));
        background.chain(qr)
    }

    pub fn len(&self) -> usize {
        self.background.len() + self.qr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_qr(&self) -> bool {
        !self.qr.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_order_background_first() {
        let bg = vec![PixelElement::new(0.0, 0.0, 6.0, 6.0, Rgb::BLACK); 3];
        let qr = vec![PixelElement::new(10.0, 10.0, 8.0, 8.0, Rgb::WHITE); 2];
        let scene = RenderScene::assemble(550.0, 550.0, Gradient::default(), bg, qr);
        let layers: Vec<Layer> = scene.iter().map(|(layer, _)| layer).collect();
        assert_eq!(
            layers,
            [Layer::Background, Layer::Background, Layer::Background, Layer::Qr, Layer::Qr]
        );
        assert_eq!(scene.len(), 5);
        assert!(scene.has_qr());
        assert_eq!(scene.layer(Layer::Qr)[0].area(), 64.0);
    }
}
