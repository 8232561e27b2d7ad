/// Render passes and the controller that owns the current scene.
///
/// A pass turns a [`RenderConfig`] into a [`RenderScene`] from scratch. The
/// [`RenderController`] numbers passes as they start; a finished pass whose
/// number has been overtaken by a newer one is discarded instead of replacing
/// the current scene.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RenderConfig;
use crate::field::{generate_field, DEFAULT_KEEP_PROBABILITY, DEFAULT_PIXEL_SIZE};
use crate::mask::{MaskRegion, DEFAULT_QR_SIZE};
use crate::matrix::{matrix_or_empty, LevelHEncoder, QrEncoder};
use crate::placer::place_modules;
use crate::scene::RenderScene;
use crate::shape::ShapeGeometry;

/// Fixed rendering constants.
#[derive(Clone, PartialEq, Debug)]
pub struct RenderOptions {
    /// Side of the square canvas.
    pub canvas_size: f64,
    /// Inset applied on every edge before sizing the shape.
    pub padding: f64,
    /// Grid step of the decorative field.
    pub pixel_size: f64,
    /// Chance that an eligible decorative cell is drawn.
    pub keep_probability: f64,
    /// Side of the QR code.
    pub qr_size: f64,
    /// Merge same-colored module runs into larger rectangles.
    pub merge_modules: bool,
    /// Fixes the decorative pattern; `None` draws a fresh pattern every pass.
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas_size: 550.0,
            padding: 20.0,
            pixel_size: DEFAULT_PIXEL_SIZE,
            keep_probability: DEFAULT_KEEP_PROBABILITY,
            qr_size: DEFAULT_QR_SIZE,
            merge_modules: false,
            seed: None,
        }
    }
}

/// Runs one render pass.
///
/// Encoding failures are logged and yield a scene without a QR layer.
///
/// # Example
///
/// ```rust
/// use qishape::config::RenderConfig;
/// use qishape::matrix::LevelHEncoder;
/// use qishape::render::{render, RenderOptions};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let scene = render(&RenderConfig::default(), &RenderOptions::default(), &LevelHEncoder, &mut StdRng::seed_from_u64(1));
/// assert!(scene.has_qr());
/// assert!(!scene.background.is_empty());
/// ```
pub fn render<E: QrEncoder + ?Sized, R: Rng + ?Sized>(
    config: &RenderConfig,
    options: &RenderOptions,
    encoder: &E,
    rng: &mut R,
) -> RenderScene {
    let text = config.effective_text();
    let matrix = matrix_or_empty(encoder, &text);

    let shape = ShapeGeometry::for_canvas(config.shape, options.canvas_size, options.padding);
    let mask = MaskRegion::compute(shape.kind, shape.width, shape.center_x, shape.center_y, options.qr_size);

    let background = generate_field(
        &shape,
        &mask,
        &config.gradient,
        options.pixel_size,
        options.keep_probability,
        rng,
    );
    let qr = place_modules(&matrix, &mask, &config.gradient, options.qr_size, options.merge_modules);

    log::debug!(
        "rendered {} for {:?}: {} background pixels, {} QR elements ({} modules per side)",
        config.shape,
        text,
        background.len(),
        qr.len(),
        matrix.size()
    );

    RenderScene::assemble(options.canvas_size, options.canvas_size, config.gradient, background, qr)
}

/// A started pass: its sequence number and the configuration it renders.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PassTicket {
    id: u64,
    config: RenderConfig,
}

impl PassTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

/// A finished pass waiting to be committed.
#[derive(Clone, PartialEq, Debug)]
pub struct RenderedPass {
    pub id: u64,
    pub scene: RenderScene,
}

/// Owns the encoder, the options and the single current scene.
pub struct RenderController<E = LevelHEncoder> {
    encoder: E,
    options: RenderOptions,
    issued: u64,
    committed: u64,
    current: Option<RenderScene>,
}

impl RenderController<LevelHEncoder> {
    pub fn with_default_encoder(options: RenderOptions) -> Self {
        Self::new(LevelHEncoder, options)
    }
}

impl<E: QrEncoder> RenderController<E> {
    pub fn new(encoder: E, options: RenderOptions) -> Self {
        Self { encoder, options, issued: 0, committed: 0, current: None }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The scene of the newest committed pass.
    pub fn current(&self) -> Option<&RenderScene> {
        self.current.as_ref()
    }

    /// Sequence number of the newest committed pass, 0 before the first one.
    pub fn committed_id(&self) -> u64 {
        self.committed
    }

    /// Starts a pass. Every pass started earlier becomes stale.
    pub fn begin(&mut self, config: RenderConfig) -> PassTicket {
        self.issued += 1;
        PassTicket { id: self.issued, config }
    }

    pub fn is_stale(&self, id: u64) -> bool {
        id < self.issued
    }

    /// Renders the ticket's configuration. Does not touch the current scene.
    pub fn run(&self, ticket: &PassTicket) -> RenderedPass {
        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scene = render(&ticket.config, &self.options, &self.encoder, &mut rng);
        RenderedPass { id: ticket.id, scene }
    }

    /// Makes the pass current unless a newer pass has started. Returns whether
    /// the scene was kept.
    pub fn commit(&mut self, pass: RenderedPass) -> bool {
        if self.is_stale(pass.id) {
            log::info!("discarding pass {} superseded by pass {}", pass.id, self.issued);
            return false;
        }
        self.committed = pass.id;
        self.current = Some(pass.scene);
        true
    }

    /// Starts, runs and commits a pass in one go, returning the current scene.
    pub fn update(&mut self, config: RenderConfig) -> Option<&RenderScene> {
        let ticket = self.begin(config);
        let pass = self.run(&ticket);
        self.commit(pass);
        self.current()
    }
}
