use std::time::Duration;

use crate::error::ConfigError;

/// Clicking closer than this to a shape's first point closes the shape.
pub const SHAPE_CLOSE_DISTANCE: f32 = 10.0;

/// Fragment key holding the shape collection.
pub const SHAPES_KEY: &str = "shapes";

/// Editor layout and behaviour settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Side length of the square drawing canvas in pixels
    pub canvas_size: f32,
    /// Distance between grid lines in pixels
    pub grid_spacing: f32,
    /// Grid cells from the origin to the blue axis lines
    pub axis_cells: u32,
    pub close_distance: f32,
    /// Radius of the draggable vertex handles
    pub handle_radius: f32,
    /// Side lengths of the preview canvases, largest first
    pub preview_sizes: Vec<u32>,
    /// Quiet period before a write reaches the URL
    pub debounce: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: 512.0,
            grid_spacing: 8.0,
            axis_cells: 32,
            close_distance: SHAPE_CLOSE_DISTANCE,
            handle_radius: 5.0,
            preview_sizes: vec![256, 128, 64, 32],
            debounce: Duration::from_millis(50),
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(ConfigError::InvalidCanvasSize(self.canvas_size));
        }
        if !self.grid_spacing.is_finite() || self.grid_spacing <= 0.0 {
            return Err(ConfigError::InvalidGridSpacing(self.grid_spacing));
        }
        if self.close_distance.is_nan() || self.close_distance < 0.0 {
            return Err(ConfigError::InvalidCloseDistance(self.close_distance));
        }
        if let Some(&size) = self
            .preview_sizes
            .iter()
            .find(|&&size| size == 0 || size as f32 > self.canvas_size)
        {
            return Err(ConfigError::InvalidPreviewSize(size));
        }
        Ok(())
    }

    /// Factor that maps canvas coordinates onto a preview of `preview_size` pixels.
    pub fn preview_divider(&self, preview_size: u32) -> f32 {
        self.canvas_size / preview_size as f32
    }
}
