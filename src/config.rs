//! Engine configuration parsed from environment variables.

use crate::consts::{
    CELL_SIZE, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, GRID_SPACING, LASSO_SAMPLE_STRIDE, MAX_SCALE, MIN_SCALE,
};
use crate::error::InkError;

/// Tunables for stroke building, selection, zoom and caching.
#[derive(Debug, Clone, PartialEq)]
pub struct InkConfig {
    /// Full stroke width at pressure 1.0, in document units.
    pub stroke_width: f64,
    /// Fill color given to new strokes.
    pub stroke_color: String,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Spatial cache cell size in document units.
    pub cell_size: f64,
    /// Outline sampling stride for lasso containment.
    pub lasso_stride: usize,
    /// Reference grid spacing in document units.
    pub grid_spacing: f64,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            cell_size: CELL_SIZE,
            lasso_stride: LASSO_SAMPLE_STRIDE,
            grid_spacing: GRID_SPACING,
        }
    }
}

impl InkConfig {
    /// Build config from environment variables.
    ///
    /// All optional; absent values fall back to [`InkConfig::default`]:
    /// - `INK_STROKE_WIDTH`
    /// - `INK_STROKE_COLOR`
    /// - `INK_MIN_SCALE` / `INK_MAX_SCALE`
    /// - `INK_CELL_SIZE`
    /// - `INK_LASSO_STRIDE`
    /// - `INK_GRID_SPACING`
    ///
    /// # Errors
    ///
    /// Returns [`InkError::ConfigParse`] when a present value is malformed or
    /// the resulting config fails [`InkConfig::validate`].
    pub fn from_env() -> Result<Self, InkError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`InkConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cfg = Self {
            stroke_width: parse_f64(&lookup, "INK_STROKE_WIDTH", defaults.stroke_width)?,
            stroke_color: lookup("INK_STROKE_COLOR")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.stroke_color),
            min_scale: parse_f64(&lookup, "INK_MIN_SCALE", defaults.min_scale)?,
            max_scale: parse_f64(&lookup, "INK_MAX_SCALE", defaults.max_scale)?,
            cell_size: parse_f64(&lookup, "INK_CELL_SIZE", defaults.cell_size)?,
            lasso_stride: parse_usize(&lookup, "INK_LASSO_STRIDE", defaults.lasso_stride)?,
            grid_spacing: parse_f64(&lookup, "INK_GRID_SPACING", defaults.grid_spacing)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that sizes are positive and the zoom range is well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`InkError::ConfigParse`] naming the first offending field.
    pub fn validate(&self) -> Result<(), InkError> {
        let positive = [
            ("stroke_width", self.stroke_width),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("cell_size", self.cell_size),
            ("grid_spacing", self.grid_spacing),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InkError::ConfigParse(format!("{name} must be positive, got {value}")));
            }
        }
        if self.min_scale > self.max_scale {
            return Err(InkError::ConfigParse(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if self.lasso_stride == 0 {
            return Err(InkError::ConfigParse("lasso_stride must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, InkError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| InkError::ConfigParse(format!("{key}: {e}"))),
    }
}

fn parse_usize<F>(lookup: &F, key: &str, default: usize) -> Result<usize, InkError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|e| InkError::ConfigParse(format!("{key}: {e}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
