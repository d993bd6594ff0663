use crate::api::stage::{Stage, Target};
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Simple entity storage using a flat Vec.
/// Designed for small-to-medium entity counts (hundreds, not millions).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove a single entity by ID, detaching it from its parent.
    /// Children are left in place with no parent. Use `Stage::destroy` to remove a subtree.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        let entity = self.entities.swap_remove(idx);

        if let Some(parent) = entity.parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }
        for &child in &entity.children {
            if let Some(child) = self.get_mut(child) {
                child.parent = None;
            }
        }
        Some(entity)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    /// Returns false if either entity is missing.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> bool {
        if self.get(child).is_none() || parent.is_some_and(|p| self.get(p).is_none()) {
            return false;
        }

        let old_parent = self.get(child).and_then(|e| e.parent);
        if let Some(old) = old_parent.and_then(|p| self.get_mut(p)) {
            old.children.retain(|&c| c != child);
        }
        if let Some(p) = parent.and_then(|p| self.get_mut(p)) {
            if !p.children.contains(&child) {
                p.children.push(child);
            }
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
        }
        true
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Scene {
    fn target(&self, id: EntityId) -> Option<&dyn Target> {
        self.get(id).map(|e| e as &dyn Target)
    }

    fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Target> {
        self.get_mut(id).map(|e| e as &mut dyn Target)
    }

    fn children(&self, id: EntityId) -> Vec<EntityId> {
        self.get(id).map(|e| e.children.clone()).unwrap_or_default()
    }

    fn destroy(&mut self, id: EntityId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(entity) = self.despawn(next) {
                pending.extend(entity.children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(10.0, 20.0, 0.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(10.0, 20.0, 0.0));
    }

    #[test]
    fn despawn_orphans_children() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        scene.set_parent(EntityId(2), Some(EntityId(1)));
        scene.set_parent(EntityId(3), Some(EntityId(2)));

        let removed = scene.despawn(EntityId(2)).unwrap();
        assert_eq!(removed.children, vec![EntityId(3)]);
        assert!(scene.children(EntityId(1)).is_empty());
        assert_eq!(scene.get(EntityId(3)).unwrap().parent, None);
    }

    #[test]
    fn tag_lookup_skips_despawned_entities() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("guard"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("guard"));
        assert_eq!(scene.find_by_tag("guard").unwrap().id, EntityId(1));

        scene.despawn(EntityId(1));
        assert_eq!(scene.find_by_tag("guard").unwrap().id, EntityId(2));
        assert!(scene.find_by_tag("player").is_none());
    }

    #[test]
    fn reparenting_moves_child_between_parents() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        assert!(scene.set_parent(EntityId(3), Some(EntityId(1))));
        assert!(scene.set_parent(EntityId(3), Some(EntityId(2))));

        assert!(scene.children(EntityId(1)).is_empty());
        assert_eq!(scene.children(EntityId(2)), vec![EntityId(3)]);
        assert_eq!(scene.get(EntityId(3)).unwrap().parent, Some(EntityId(2)));
        assert!(!scene.set_parent(EntityId(3), Some(EntityId(9))));
    }

    #[test]
    fn destroy_removes_subtree() {
        let mut scene = Scene::new();
        for i in 1..=4 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        scene.set_parent(EntityId(2), Some(EntityId(1)));
        scene.set_parent(EntityId(3), Some(EntityId(2)));

        scene.destroy(EntityId(1));
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(EntityId(4)));
    }

    #[test]
    fn distance_between_targets() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)).with_pos(Vec3::new(3.0, 4.0, 0.0)));
        assert_eq!(scene.distance(EntityId(1), EntityId(2)), Some(5.0));
        assert_eq!(scene.distance(EntityId(1), EntityId(7)), None);
    }
}
