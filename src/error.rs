use thiserror::Error;

/// Errors produced while building or exporting a rendered QR shape.
///
/// None of these abort a render pass: encoding failures degrade to a
/// decorative-only scene, invalid colors fall back to black, and export
/// failures are returned to whoever asked for the file.
#[derive(Debug, Error)]
pub enum Error {
    /// The encoder could not turn the text into a QR matrix (usually the
    /// text is too long for error-correction level H).
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    /// A color stop is not of the form `#RRGGBB`.
    #[error("invalid color `{0}`, expected #RRGGBB")]
    InvalidColor(String),

    /// The scene could not be turned into a downloadable artifact.
    #[error("export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
