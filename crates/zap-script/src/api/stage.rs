use glam::{Vec3, Vec4};
use crate::api::types::EntityId;

/// The capabilities a script needs from anything it animates.
///
/// Colors are RGBA. A target without a color-bearing surface returns `None`
/// from `color` and ignores `set_color`.
pub trait Target {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn scale(&self) -> Vec3;
    fn set_scale(&mut self, scale: Vec3);

    /// Rotation about the z axis, in radians.
    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, angle: f32);

    fn color(&self) -> Option<Vec4>;
    fn set_color(&mut self, color: Vec4);

    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Host-side world the scripts run against.
///
/// Any container that can resolve ids to `Target`s can drive the engine;
/// `Scene` is the bundled implementation.
pub trait Stage {
    fn target(&self, id: EntityId) -> Option<&dyn Target>;
    fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Target>;

    /// Direct children of a target, in hierarchy order.
    fn children(&self, id: EntityId) -> Vec<EntityId>;

    /// Destroy a target and everything parented under it.
    fn destroy(&mut self, id: EntityId);

    fn contains(&self, id: EntityId) -> bool {
        self.target(id).is_some()
    }

    /// Distance between two targets, or `None` if either is missing.
    fn distance(&self, a: EntityId, b: EntityId) -> Option<f32> {
        let a = self.target(a)?.position();
        let b = self.target(b)?.position();
        Some(a.distance(b))
    }
}
