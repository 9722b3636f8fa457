use eframe::egui::{Pos2, Vec2};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 4.0;

/// Zoom and pan between layout (world) space and screen space:
/// `screen = origin + pan + (world - focus) * zoom`.
///
/// `focus` is the world point drawn at `origin` while unpanned; it defaults to
/// the world origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub pan: Vec2,
    zoom: f32,
    pub focus: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            focus: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn focused_on(focus: Vec2) -> Self {
        Self {
            focus,
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn world_to_screen(&self, origin: Pos2, world: Vec2) -> Pos2 {
        origin + self.pan + (world - self.focus) * self.zoom
    }

    pub fn screen_to_world(&self, origin: Pos2, screen: Pos2) -> Vec2 {
        (screen - origin - self.pan) / self.zoom + self.focus
    }

    /// Scales by `factor` while keeping the world point under `pointer` in
    /// place.
    pub fn zoom_about(&mut self, origin: Pos2, pointer: Pos2, factor: f32) {
        let anchor = self.screen_to_world(origin, pointer);
        self.set_zoom(self.zoom * factor);
        self.pan = pointer - origin - (anchor - self.focus) * self.zoom;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
