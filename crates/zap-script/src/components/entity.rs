use glam::{Vec3, Vec4};
use crate::api::stage::Target;
use crate::api::types::EntityId;

/// Fat Entity: a single struct with the fields scripts animate.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name (`Scene::find_by_tag`).
    pub tag: String,
    /// Whether this entity is active. Scripts owned by inactive entities are not ticked.
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Rotation about z, in radians.
    pub rotation: f32,
    /// Local scale.
    pub scale: Vec3,
    /// RGBA color surface. Entities without one ignore color tweens.
    pub color: Option<Vec4>,
    /// Parent in the hierarchy. Maintained by `Scene::set_parent`.
    pub parent: Option<EntityId>,
    /// Children in the hierarchy. Maintained by `Scene::set_parent`.
    pub children: Vec<EntityId>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: 0.0,
            scale: Vec3::ONE,
            color: None,
            parent: None,
            children: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Target for Entity {
    fn position(&self) -> Vec3 {
        self.pos
    }

    fn set_position(&mut self, position: Vec3) {
        self.pos = position;
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f32) {
        self.rotation = angle;
    }

    fn color(&self) -> Option<Vec4> {
        self.color
    }

    fn set_color(&mut self, color: Vec4) {
        if let Some(current) = &mut self.color {
            *current = color;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
