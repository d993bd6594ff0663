//! A square that walks a box forever, turning, pulsing and recoloring on each leg.

use std::f32::consts::FRAC_PI_2;
use glam::{Vec3, Vec4};
use zap_script::{Easing, Entity, EntityId};
use crate::host::{Demo, DemoContext};

pub const YELLOW: Vec4 = Vec4::new(1.0, 0.92, 0.016, 1.0);
pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

pub struct LoopingSquare {
    pub duration: f32,
    pub distance: f32,
    pub expand: f32,
    /// Turn per leg, in radians.
    pub rotation: f32,
    pub easing: Easing,
    pub square: Option<EntityId>,
}

impl Default for LoopingSquare {
    fn default() -> Self {
        Self {
            duration: 0.5,
            distance: 2.0,
            expand: 2.0,
            rotation: FRAC_PI_2,
            easing: Easing::QuadInOut,
            square: None,
        }
    }
}

impl LoopingSquare {
    /// Seconds for one lap of four legs.
    pub fn lap_time(&self) -> f32 {
        self.duration * 16.0
    }
}

impl Demo for LoopingSquare {
    fn name(&self) -> &'static str {
        "looping-square"
    }

    fn init(&mut self, ctx: &mut DemoContext) {
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id).with_tag("square").with_color(Vec4::ONE));
        self.square = Some(id);

        let (d, e) = (self.duration, self.easing);
        let grow = Vec3::new(self.expand, self.expand, 0.0);
        let legs = [(Vec3::X, YELLOW), (Vec3::Y, RED), (Vec3::NEG_X, GREEN), (Vec3::NEG_Y, BLUE)];

        let mut script = ctx.scripts.looping(id);
        for (leg, (direction, color)) in legs.into_iter().enumerate() {
            script
                .translate(id, direction * self.distance, d, e)
                .rotate(id, self.rotation, d, e);
            if leg % 2 == 0 {
                script.expand(id, grow, d, e);
            } else {
                script.shrink(id, grow, d, e);
            }
            script.animate_color(id, color, d, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;
    use zap_script::Channel;
    use crate::host::DemoRunner;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn one_lap_returns_square_to_start() {
        let mut tour = DemoRunner::new(LoopingSquare::default());
        tour.init();
        let id = tour.demo().square.unwrap();

        // Tick on every step boundary so each tween lands exactly.
        let ctx = tour.ctx_mut();
        for k in 0..=16 {
            let now = k as f32 * 0.5;
            let faults = ctx.scripts.tick_at(Channel::FixedUpdate, now, &mut ctx.scene);
            assert!(faults.is_empty());

            if k == 4 {
                let square = ctx.scene.get(id).unwrap();
                assert!(close(square.pos, Vec3::new(2.0, 0.0, 0.0)), "pos = {:?}", square.pos);
                assert!(close(square.scale, Vec3::new(3.0, 3.0, 1.0)));
                assert_eq!(square.color, Some(YELLOW));
            }
        }

        let square = ctx.scene.get(id).unwrap();
        assert!(close(square.pos, Vec3::ZERO), "pos = {:?}", square.pos);
        assert!(close(square.scale, Vec3::ONE));
        assert!((square.rotation - TAU).abs() < 1e-4);
        assert_eq!(square.color, Some(BLUE));
        assert_eq!(ctx.scripts.len(), 1, "the lap loops instead of finishing");
    }
}
