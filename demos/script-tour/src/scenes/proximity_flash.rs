//! A light flashes until a visitor comes close, turns blue for a while, then
//! resumes flashing.

use glam::{Vec3, Vec4};
use zap_script::{Easing, Entity, EntityId, ScriptId};
use crate::host::{Demo, DemoContext};

pub const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
pub const TRIGGER_DISTANCE: f32 = 3.0;
pub const BLUE_HOLD: f32 = 5.0;

#[derive(Default)]
pub struct ProximityFlash {
    pub light: Option<EntityId>,
    pub visitor: Option<EntityId>,
    pub flashing: Option<ScriptId>,
}

impl Demo for ProximityFlash {
    fn name(&self) -> &'static str {
        "proximity-flash"
    }

    fn init(&mut self, ctx: &mut DemoContext) {
        let light = ctx.next_id();
        let visitor = ctx.next_id();
        let controller = ctx.next_id();
        ctx.scene.spawn(Entity::new(light).with_tag("light").with_color(Vec4::ONE));
        ctx.scene.spawn(Entity::new(visitor).with_tag("visitor").with_pos(Vec3::new(8.0, 0.0, 0.0)));
        ctx.scene.spawn(Entity::new(controller).with_tag("controller"));

        let flashing = ctx
            .scripts
            .named("Flashing")
            .animate_opacity(light, 0.0, 1.0, Easing::Linear, true)
            .animate_opacity(light, 1.0, 1.0, Easing::Linear, true)
            .loop_forever()
            .id();

        ctx.scripts
            .script(controller)
            .wait_until_within_distance(light, visitor, TRIGGER_DISTANCE)
            .pause_script(flashing)
            .animate_color(light, BLUE, 1.0, Easing::Linear)
            .wait(BLUE_HOLD)
            .resume_script(flashing);

        ctx.scripts
            .script(visitor)
            .animate_position(visitor, Vec3::new(2.0, 0.0, 0.0), 4.0, Easing::QuadOut);

        self.light = Some(light);
        self.visitor = Some(visitor);
        self.flashing = Some(flashing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DemoRunner;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn visitor_pauses_flash_until_hold_expires() {
        let mut tour = DemoRunner::new(ProximityFlash::default());
        tour.init();
        let light = tour.demo().light.unwrap();
        let flashing = tour.demo().flashing.unwrap();

        tour.run_for(0.5, DT);
        let alpha = tour.ctx().scene.get(light).unwrap().color.unwrap().w;
        assert!(alpha < 1.0 && alpha > 0.0, "fading, alpha = {}", alpha);

        // The visitor crosses the trigger distance at roughly 2.4s.
        tour.run_for(2.5, DT);
        assert!(!tour.ctx().scripts.chain(flashing).unwrap().is_enabled());

        tour.run_for(1.5, DT);
        let color = tour.ctx().scene.get(light).unwrap().color.unwrap();
        assert!(color.truncate().abs_diff_eq(BLUE.truncate(), 1e-5), "color = {:?}", color);
        assert!(!tour.ctx().scripts.chain(flashing).unwrap().is_enabled());

        tour.run_for(BLUE_HOLD, DT);
        assert!(tour.ctx().scripts.chain(flashing).unwrap().is_enabled());
        assert!(tour.faults().is_empty());
    }
}
