//! Pan/zoom transform applied to the laid-out tree.

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;
pub const INITIAL_SCALE: f64 = 0.9;
pub const INITIAL_OFFSET_X: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    height: f64,
}

impl Viewport {
    /// Root near the left edge, vertically centered.
    pub fn initial(height: f64) -> Self {
        Self {
            translate_x: INITIAL_OFFSET_X,
            translate_y: height / 2.0,
            scale: INITIAL_SCALE,
            height,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::initial(self.height);
    }

    /// Multiply the scale by `factor`, keeping the screen point `focus`
    /// fixed. The resulting scale is clamped to [`MIN_SCALE`, `MAX_SCALE`].
    pub fn zoom_by(&mut self, factor: f64, focus: (f64, f64)) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let applied = scale / self.scale;
        self.translate_x = focus.0 - (focus.0 - self.translate_x) * applied;
        self.translate_y = focus.1 - (focus.1 - self.translate_y) * applied;
        self.scale = scale;
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Map a layout position to screen coordinates.
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }

    /// SVG `transform` attribute value.
    pub fn transform(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}
