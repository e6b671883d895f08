use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors produced while building or loading a viewport
#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("field of view must be a positive number of degrees, got {0}")]
    InvalidFieldOfView(f64),
    #[error("could not read viewport file {path:?}: {message}")]
    Config { path: String, message: String },
}

/// everything one render pass needs to know about the view. It is owned by the caller and is
/// not modified while a pass runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportState {
    /// right ascension at the center of the view, degrees
    pub center_ra: f64,
    /// declination at the center of the view, degrees
    pub center_dec: f64,
    /// angular width of the view, degrees. Must be > 0
    pub field_of_view: f64,
    /// rotation of the projected field about its center, degrees
    pub rotation: f64,
    /// stars fainter than this are left out
    pub limiting_magnitude: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl Default for ViewportState {
    /// the start-up view: Cygnus, 60 degrees wide, naked eye limit
    fn default() -> ViewportState {
        ViewportState {
            center_ra: 300.0,
            center_dec: 40.0,
            field_of_view: 60.0,
            rotation: 0.0,
            limiting_magnitude: 6.5,
            pixel_width: 640,
            pixel_height: 480,
        }
    }
}

impl ViewportState {
    /// returns the viewport unchanged if it can be projected, the projection divides by the
    /// field of view so 0, negative and non-finite values are refused here
    pub fn validated(self) -> Result<ViewportState, ViewportError> {
        if !self.field_of_view.is_finite() || self.field_of_view <= 0.0 {
            return Err(ViewportError::InvalidFieldOfView(self.field_of_view));
        }
        Ok(self)
    }

    /// reads a viewport from a JSON file, fields missing from the file keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<ViewportState, ViewportError> {
        let path = path.as_ref();
        let config_error = |message: String| ViewportError::Config {
            path: path.display().to_string(),
            message,
        };
        let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let viewport: ViewportState =
            serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))?;
        viewport.validated()
    }
}
