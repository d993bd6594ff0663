//! Click the sign to start a self-destruct countdown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use glam::{Vec3, Vec4};
use zap_script::{Entity, EntityId};
use crate::host::{Demo, DemoContext};

pub struct Countdown {
    pub sign: Option<EntityId>,
    /// Text shown on the sign.
    pub label: Rc<RefCell<String>>,
    pub beeps: Rc<Cell<u32>>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            sign: None,
            label: Rc::new(RefCell::new("Click me".to_string())),
            beeps: Rc::new(Cell::new(0)),
        }
    }
}

impl Demo for Countdown {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn init(&mut self, ctx: &mut DemoContext) {
        let sign = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sign)
                .with_tag("sign")
                .with_scale(Vec3::new(4.0, 1.0, 1.0))
                .with_color(Vec4::ONE),
        );
        self.sign = Some(sign);

        let beeps = self.beeps.clone();
        let mut script = ctx.scripts.script(sign);
        script.wait_until_target_clicked(sign).perform(move |_| {
            beeps.set(beeps.get() + 1);
            log::info!("beep");
        });
        for n in (1..=3).rev() {
            let label = self.label.clone();
            script
                .perform(move |_| *label.borrow_mut() = format!("Self destruct in {}...", n))
                .wait(1.0);
        }
        script.destroy_target(sign);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zap_script::{InputEvent, Stage};
    use crate::host::DemoRunner;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn countdown_starts_on_click_and_destroys_sign() {
        let mut tour = DemoRunner::new(Countdown::default());
        tour.init();
        let sign = tour.demo().sign.unwrap();

        tour.run_for(1.0, DT);
        assert_eq!(tour.demo().label.borrow().as_str(), "Click me");

        // Outside the 4x1 footprint, then inside it.
        tour.push_input(InputEvent::PointerDown { x: 0.0, y: 2.0 });
        tour.tick(DT);
        assert_eq!(tour.demo().beeps.get(), 0);
        tour.push_input(InputEvent::PointerUp { x: 0.0, y: 2.0 });
        tour.push_input(InputEvent::PointerDown { x: 1.8, y: 0.3 });
        tour.tick(DT);
        assert_eq!(tour.demo().beeps.get(), 1);
        assert_eq!(tour.demo().label.borrow().as_str(), "Self destruct in 3...");

        tour.run_for(1.5, DT);
        assert_eq!(tour.demo().label.borrow().as_str(), "Self destruct in 2...");

        tour.run_for(2.0, DT);
        assert_eq!(tour.demo().label.borrow().as_str(), "Self destruct in 1...");
        assert!(!tour.ctx().scene.contains(sign));
        assert!(tour.ctx().scripts.is_empty());
        assert!(tour.faults().is_empty());
    }
}
