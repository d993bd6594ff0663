// extensions/actions.rs
//
// One-shot target actions and condition waits for scripts.
// Instant actions complete in the tick they are reached; waits suspend
// until the stage or input state satisfies them.

use glam::{Vec2, Vec3, Vec4};
use crate::api::error::ScriptError;
use crate::api::stage::Stage;
use crate::api::types::EntityId;
use crate::script::builder::Script;
use crate::script::frame::Frame;

impl Script<'_> {
    pub fn set_position(&mut self, target: EntityId, position: Vec3) -> &mut Self {
        self.try_perform(move |frame| {
            frame.target_mut(target)?.set_position(position);
            Ok(())
        })
    }

    pub fn set_active(&mut self, target: EntityId, active: bool) -> &mut Self {
        self.try_perform(move |frame| {
            frame.target_mut(target)?.set_active(active);
            Ok(())
        })
    }

    pub fn activate(&mut self, target: EntityId) -> &mut Self {
        self.set_active(target, true)
    }

    pub fn deactivate(&mut self, target: EntityId) -> &mut Self {
        self.set_active(target, false)
    }

    /// Destroy a target and its descendants. Chains they own are dropped on
    /// their next tick.
    pub fn destroy_target(&mut self, target: EntityId) -> &mut Self {
        self.perform(move |frame| frame.stage_mut().destroy(target))
    }

    /// Overwrite the color. Skipped with a warning on colorless targets.
    pub fn set_color(&mut self, target: EntityId, color: Vec4) -> &mut Self {
        self.try_perform(move |frame| {
            let t = frame.target_mut(target)?;
            if t.color().is_none() {
                log::warn!("set_color: target {:?} has no color, skipping", target);
                return Ok(());
            }
            t.set_color(color);
            Ok(())
        })
    }

    /// Overwrite only the alpha channel.
    pub fn set_opacity(&mut self, target: EntityId, opacity: f32) -> &mut Self {
        self.try_perform(move |frame| {
            let t = frame.target_mut(target)?;
            match t.color() {
                Some(mut color) => {
                    color.w = opacity;
                    t.set_color(color);
                }
                None => log::warn!("set_opacity: target {:?} has no color, skipping", target),
            }
            Ok(())
        })
    }

    // -- Proximity --

    /// Suspend until `a` and `b` are at most `distance` apart.
    pub fn wait_until_within_distance(&mut self, a: EntityId, b: EntityId, distance: f32) -> &mut Self {
        self.add_step(move |frame| Ok(stage_distance(frame, a, b)? <= distance))
    }

    /// Suspend until `a` and `b` are more than `distance` apart.
    pub fn wait_until_distance_apart(&mut self, a: EntityId, b: EntityId, distance: f32) -> &mut Self {
        self.add_step(move |frame| Ok(stage_distance(frame, a, b)? > distance))
    }

    // -- Input --
    //
    // Input waits poll on the variable-rate phase so a press is never missed
    // between fixed ticks, then hand the chain back to the fixed phase.

    /// Suspend until the pointer is pressed anywhere.
    pub fn wait_until_clicked(&mut self) -> &mut Self {
        self.set_channel_update()
            .wait_until(|frame| frame.input().pointer_pressed())
            .set_channel_fixed_update()
    }

    pub fn wait_until_key_pressed(&mut self, key_code: u32) -> &mut Self {
        self.set_channel_update()
            .wait_until(move |frame| frame.input().is_pressed(key_code))
            .set_channel_fixed_update()
    }

    /// Suspend until the pointer is pressed inside the target's footprint:
    /// the xy box centered on its position with its scale as extents.
    pub fn wait_until_target_clicked(&mut self, target: EntityId) -> &mut Self {
        self.set_channel_update()
            .add_step(move |frame| {
                let t = frame.target(target)?;
                let center = t.position().truncate();
                let half = t.scale().truncate().abs() * 0.5;
                let input = frame.input();
                Ok(input.pointer_pressed() && contains(center, half, input.pointer()))
            })
            .set_channel_fixed_update()
    }
}

/// Distance as the stage measures it.
fn stage_distance(frame: &Frame<'_>, a: EntityId, b: EntityId) -> Result<f32, ScriptError> {
    let stage = frame.stage();
    stage
        .distance(a, b)
        .ok_or_else(|| ScriptError::MissingTarget(if stage.contains(a) { b } else { a }))
}

fn contains(center: Vec2, half_extents: Vec2, point: Vec2) -> bool {
    let offset = (point - center).abs();
    offset.x <= half_extents.x && offset.y <= half_extents.y
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::api::stage::{Stage, Target};
    use crate::api::types::Channel;
    use crate::components::entity::Entity;
    use crate::core::scene::Scene;
    use crate::input::queue::InputEvent;
    use crate::script::runner::ScriptRunner;

    const A: EntityId = EntityId(1);
    const B: EntityId = EntityId(2);

    fn setup() -> (ScriptRunner, Scene) {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(A).with_color(Vec4::ONE));
        scene.spawn(Entity::new(B).with_pos(Vec3::new(10.0, 0.0, 0.0)));
        (ScriptRunner::default(), scene)
    }

    fn flag() -> Rc<Cell<bool>> {
        Rc::new(Cell::new(false))
    }

    #[test]
    fn instant_actions_apply_in_one_tick() {
        let (mut runner, mut scene) = setup();
        runner
            .script(B)
            .set_position(A, Vec3::new(1.0, 2.0, 3.0))
            .set_opacity(A, 0.25)
            .deactivate(A);

        runner.tick_at(Channel::FixedUpdate, 0.0, &mut scene);
        let a = scene.get(A).unwrap();
        assert_eq!(a.pos, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(a.color, Some(Vec4::new(1.0, 1.0, 1.0, 0.25)));
        assert!(!a.active);
    }

    #[test]
    fn set_color_skips_colorless_target() {
        let (mut runner, mut scene) = setup();
        let done = flag();
        let d = done.clone();
        runner.script(A).set_color(B, Vec4::ONE).perform(move |_| d.set(true));

        let faults = runner.tick_at(Channel::FixedUpdate, 0.0, &mut scene);
        assert!(faults.is_empty());
        assert!(done.get());
        assert_eq!(scene.get(B).unwrap().color, None);
    }

    #[test]
    fn set_position_on_missing_target_faults() {
        let (mut runner, mut scene) = setup();
        runner.script(A).set_position(EntityId(42), Vec3::ZERO);
        let faults = runner.tick_at(Channel::FixedUpdate, 0.0, &mut scene);
        assert!(matches!(faults[0].error, ScriptError::MissingTarget(EntityId(42))));
    }

    #[test]
    fn destroy_target_drops_owned_chains_next_tick() {
        let (mut runner, mut scene) = setup();
        let owned = runner.script(B).wait(10.0).id();
        runner.named("reaper").destroy_target(B);

        runner.tick_at(Channel::FixedUpdate, 0.0, &mut scene);
        assert!(!scene.contains(B));
        runner.tick_at(Channel::FixedUpdate, 0.1, &mut scene);
        assert!(!runner.contains(owned));
    }

    #[test]
    fn proximity_waits() {
        let (mut runner, mut scene) = setup();
        let near = flag();
        let far = flag();
        let (n, f) = (near.clone(), far.clone());
        runner
            .script(A)
            .wait_until_within_distance(A, B, 2.0)
            .perform(move |_| n.set(true))
            .wait_until_distance_apart(A, B, 5.0)
            .perform(move |_| f.set(true));

        runner.tick_at(Channel::FixedUpdate, 0.0, &mut scene);
        assert!(!near.get());

        scene.get_mut(B).unwrap().pos = Vec3::new(2.0, 0.0, 0.0);
        runner.tick_at(Channel::FixedUpdate, 0.1, &mut scene);
        assert!(near.get(), "boundary distance counts as within");
        assert!(!far.get());

        scene.get_mut(B).unwrap().pos = Vec3::new(5.0, 0.0, 0.0);
        runner.tick_at(Channel::FixedUpdate, 0.2, &mut scene);
        assert!(!far.get(), "apart is strict");

        scene.get_mut(B).unwrap().pos = Vec3::new(5.5, 0.0, 0.0);
        runner.tick_at(Channel::FixedUpdate, 0.3, &mut scene);
        assert!(far.get());
    }

    /// Host that measures distance in the xy plane only.
    struct FlatStage(Scene);

    impl Stage for FlatStage {
        fn target(&self, id: EntityId) -> Option<&dyn Target> {
            self.0.target(id)
        }

        fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Target> {
            self.0.target_mut(id)
        }

        fn children(&self, id: EntityId) -> Vec<EntityId> {
            self.0.children(id)
        }

        fn destroy(&mut self, id: EntityId) {
            self.0.destroy(id)
        }

        fn distance(&self, a: EntityId, b: EntityId) -> Option<f32> {
            let a = self.0.get(a)?.pos.truncate();
            let b = self.0.get(b)?.pos.truncate();
            Some(a.distance(b))
        }
    }

    #[test]
    fn proximity_waits_use_the_stage_distance() {
        let (mut runner, mut scene) = setup();
        scene.get_mut(B).unwrap().pos = Vec3::new(0.0, 0.0, 10.0);
        let mut stage = FlatStage(scene);
        let near = flag();
        let n = near.clone();
        let id = runner
            .script(A)
            .wait_until_within_distance(A, B, 1.0)
            .perform(move |_| n.set(true))
            .wait_until_distance_apart(A, B, 5.0)
            .id();

        runner.tick_at(Channel::FixedUpdate, 0.0, &mut stage);
        assert!(near.get(), "10 units apart in z, 0 in the plane");
        assert!(runner.contains(id), "still 0 apart in the plane");
    }

    #[test]
    fn proximity_wait_on_missing_target_faults() {
        let (mut runner, mut scene) = setup();
        runner.script(A).wait_until_within_distance(A, EntityId(42), 1.0);
        let faults = runner.tick_at(Channel::FixedUpdate, 0.0, &mut scene);
        assert!(matches!(faults[0].error, ScriptError::MissingTarget(EntityId(42))));
    }

    #[test]
    fn wait_until_clicked_polls_on_update_then_returns_to_fixed() {
        let (mut runner, mut scene) = setup();
        let clicked = flag();
        let c = clicked.clone();
        let id = runner
            .script(A)
            .wait_until_clicked()
            .perform(move |frame| c.set(frame.channel() == Channel::Update))
            .wait(10.0)
            .id();

        let dt = runner.config().fixed_dt;
        runner.frame(dt, &mut scene);
        assert_eq!(runner.chain(id).unwrap().channel(), Channel::Update);

        runner.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        runner.frame(dt, &mut scene);
        assert!(clicked.get(), "the click resolves within the update tick");
        assert_eq!(runner.chain(id).unwrap().channel(), Channel::FixedUpdate);
    }

    #[test]
    fn key_press_wait() {
        let (mut runner, mut scene) = setup();
        let pressed = flag();
        let p = pressed.clone();
        runner.script(A).wait_until_key_pressed(32).perform(move |_| p.set(true));

        runner.frame(0.02, &mut scene);
        runner.push_input(InputEvent::KeyDown { key_code: 13 });
        runner.frame(0.02, &mut scene);
        assert!(!pressed.get());
        runner.push_input(InputEvent::KeyDown { key_code: 32 });
        runner.frame(0.02, &mut scene);
        assert!(pressed.get());
    }

    #[test]
    fn target_click_requires_pointer_inside_footprint() {
        let (mut runner, mut scene) = setup();
        let hit = flag();
        let h = hit.clone();
        scene.get_mut(A).unwrap().scale = Vec3::new(2.0, 2.0, 1.0);
        runner.script(B).wait_until_target_clicked(A).perform(move |_| h.set(true));

        runner.push_input(InputEvent::PointerDown { x: 1.5, y: 0.0 });
        runner.frame(0.02, &mut scene);
        assert!(!hit.get());

        runner.push_input(InputEvent::PointerUp { x: 1.5, y: 0.0 });
        runner.push_input(InputEvent::PointerDown { x: 0.9, y: -0.9 });
        runner.frame(0.02, &mut scene);
        assert!(hit.get());
    }
}
