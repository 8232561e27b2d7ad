/// The user-facing inputs that fully determine a render pass.
use crate::color::Gradient;
use crate::shape::ShapeKind;

pub const DEFAULT_BASE_URL: &str = "https://www.triangoal.it/business-card";

/// Base URL, optional path segment, gradient stops and shape.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RenderConfig {
    pub base_url: String,
    pub dynamic_param: String,
    pub gradient: Gradient,
    pub shape: ShapeKind,
}

impl RenderConfig {
    pub fn new(
        base_url: impl Into<String>,
        dynamic_param: impl Into<String>,
        gradient: Gradient,
        shape: ShapeKind,
    ) -> Self {
        Self { base_url: base_url.into(), dynamic_param: dynamic_param.into(), gradient, shape }
    }

    /// The text that gets encoded: `base/segment`, or just `base` when the
    /// segment is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qishape::config::RenderConfig;
    ///
    /// let mut config = RenderConfig::default();
    /// config.base_url = "https://example.com".to_string();
    /// assert_eq!(config.effective_text(), "https://example.com");
    /// config.dynamic_param = "42".to_string();
    /// assert_eq!(config.effective_text(), "https://example.com/42");
    /// ```
    pub fn effective_text(&self) -> String {
        if self.dynamic_param.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, self.dynamic_param)
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, "", Gradient::default(), ShapeKind::Triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_segment_only_changes_text() {
        let base = RenderConfig::new("https://example.com", "", Gradient::default(), ShapeKind::Circle);
        let with_segment = RenderConfig { dynamic_param: "42".to_string(), ..base.clone() };
        assert_eq!(base.effective_text(), "https://example.com");
        assert_eq!(with_segment.effective_text(), "https://example.com/42");
        assert_eq!(with_segment.gradient, base.gradient);
        assert_eq!(with_segment.shape, base.shape);
        assert_eq!(with_segment.base_url, base.base_url);
    }

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.effective_text(), DEFAULT_BASE_URL);
        assert_eq!(config.gradient.left.to_hex(), "#FF0066");
        assert_eq!(config.gradient.center.to_hex(), "#9933FF");
        assert_eq!(config.gradient.right.to_hex(), "#0066FF");
        assert_eq!(config.shape, ShapeKind::Triangle);
    }
}
