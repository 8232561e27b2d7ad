/// QR bit matrices and the encoder seam that produces them.
///
/// The encoder itself is an external collaborator: anything implementing
/// [`QrEncoder`] can feed the renderer. [`LevelHEncoder`] is the stock one,
/// backed by the `qrcode` crate at error-correction level H.
use qrcode::{Color, EcLevel, QrCode};

use crate::error::Error;

/// A square grid of QR modules, `true` meaning dark.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BitMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl BitMatrix {
    /// The matrix used when no QR code could be produced.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a matrix from row-major modules. Returns `None` unless `modules`
    /// holds exactly `size * size` entries.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Option<Self> {
        (size.checked_mul(size)? == modules.len()).then_some(Self { size, modules })
    }

    /// Builds a matrix from rows. Returns `None` for ragged or non-square input.
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Self::from_modules(size, rows.concat())
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the module at (`x`, `y`); anything outside the grid is light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x]
    }

    /// Number of dark modules.
    pub fn count_dark(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }

    /// Row-major iterator over `(x, y, dark)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .map(move |(i, &dark)| (i % self.size, i / self.size, dark))
    }
}

/// Turns text into a QR bit matrix.
pub trait QrEncoder {
    fn encode(&self, text: &str) -> Result<BitMatrix, Error>;
}

/// Encodes with the `qrcode` crate at error-correction level H.
#[derive(Clone, Copy, Debug, Default)]
pub struct LevelHEncoder;

impl QrEncoder for LevelHEncoder {
    fn encode(&self, text: &str) -> Result<BitMatrix, Error> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)
            .map_err(|err| Error::Encoding(err.to_string()))?;
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        BitMatrix::from_modules(code.width(), modules)
            .ok_or_else(|| Error::Encoding("encoder returned a malformed matrix".to_string()))
    }
}

/// Encodes `text`, swallowing failures into an empty matrix.
///
/// The failure is logged; the caller renders the decorative field alone.
pub fn matrix_or_empty<E: QrEncoder + ?Sized>(encoder: &E, text: &str) -> BitMatrix {
    match encoder.encode(text) {
        Ok(matrix) => matrix,
        Err(err) => {
            log::error!("{} ({} bytes of text); rendering without a QR code", err, text.len());
            BitMatrix::empty()
        }
    }
}
