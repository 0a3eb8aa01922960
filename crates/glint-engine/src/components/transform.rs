use glam::Vec2;

use crate::components::component::Component;

/// Spatial state of a GameObject plus a monotonic version counter.
///
/// Every mutation that actually changes a field bumps `version` by one;
/// a mutation that leaves the field bit-identical is skipped (exact
/// equality, no epsilon). Dependents compare versions to detect staleness
/// in O(1) instead of diffing fields. Inputs are not validated: NaN and
/// infinity propagate, and NaN never compares equal, so it always counts
/// as a change.
pub struct TransformComponent {
    position: Vec2,
    scale: Vec2,
    rotation: f32,
    version: u32,
}

impl TransformComponent {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
            rotation: 0.0,
            version: 0,
        }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation_degrees: f32) -> Self {
        self.rotation = rotation_degrees;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn set_position(&mut self, position: Vec2) {
        if position == self.position {
            return;
        }
        self.position = position;
        self.bump();
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        if scale == self.scale {
            return;
        }
        self.scale = scale;
        self.bump();
    }

    pub fn set_rotation(&mut self, rotation_degrees: f32) {
        if rotation_degrees == self.rotation {
            return;
        }
        self.rotation = rotation_degrees;
        self.bump();
    }

    pub fn translate(&mut self, delta: Vec2) {
        let next = self.position + delta;
        if next == self.position {
            return;
        }
        self.position = next;
        self.bump();
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl Component for TransformComponent {}
