//! A small top-down scene: the player walks with WASD, spins with space, and
//! a patrolling guard stops to greet them once they come close.

use std::cell::{Cell, RefCell};
use std::f32::consts::TAU;
use std::rc::Rc;
use glam::{Vec3, Vec4};
use zap_script::{Easing, Entity, EntityId, Frame, Rng, Script, ScriptId};
use crate::host::{Demo, DemoContext};

pub const MOVEMENT_DURATION: f32 = 0.15;
pub const MOVEMENT_DISTANCE: f32 = 1.0;
pub const SPIN_DURATION: f32 = 1.0;
pub const SPOT_DISTANCE: f32 = 4.0;
const SPEECH_FADE: f32 = 0.4;
const SPEECH_HOLD: f32 = 2.0;
const SPEECH_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);
pub const SPEECH_TAG: &str = "speech";

pub const KEY_A: u32 = 65;
pub const KEY_D: u32 = 68;
pub const KEY_S: u32 = 83;
pub const KEY_W: u32 = 87;
pub const KEY_SPACE: u32 = 32;

/// A grid-walking square. Moves and spins run as forked chains; the square
/// ignores new commands until the current one lands.
#[derive(Clone)]
pub struct Square {
    pub id: EntityId,
    busy: Rc<Cell<bool>>,
}

impl Square {
    pub fn new(id: EntityId) -> Self {
        Self { id, busy: Rc::new(Cell::new(false)) }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Hop one cell along `direction`.
    pub fn step(&self, frame: &mut Frame<'_>, direction: Vec3) {
        if self.busy.replace(true) {
            return;
        }
        let (id, busy) = (self.id, self.busy.clone());
        frame.fork_named("Step", move |s| {
            s.translate(id, direction * MOVEMENT_DISTANCE, MOVEMENT_DURATION, Easing::QuartIn)
                .perform(move |_| busy.set(false));
        });
    }

    pub fn spin(&self, frame: &mut Frame<'_>, clockwise: bool) {
        if self.busy.replace(true) {
            return;
        }
        let (id, busy) = (self.id, self.busy.clone());
        let angle = if clockwise { -TAU } else { TAU };
        frame.fork_named("Spin", move |s| {
            s.rotate(id, angle, SPIN_DURATION, Easing::ExpoIn)
                .perform(move |_| busy.set(false));
        });
    }

    /// Step along the dominant axis towards `destination`.
    pub fn move_towards(&self, frame: &mut Frame<'_>, destination: Vec3) {
        let Ok(target) = frame.target(self.id) else {
            return;
        };
        let delta = destination - target.position();
        let direction = if delta.x.abs() >= delta.y.abs() {
            Vec3::X * delta.x.signum()
        } else {
            Vec3::Y * delta.y.signum()
        };
        self.step(frame, direction);
    }

    /// Within one cell of `destination`. A vanished square counts as arrived.
    pub fn arrived_at(&self, frame: &Frame<'_>, destination: Vec3) -> bool {
        frame
            .target(self.id)
            .map_or(true, |t| t.position().distance(destination) < 1.0)
    }
}

/// The speech bubble: one text entity shared by every speaker.
#[derive(Clone)]
pub struct Speech {
    pub text: EntityId,
    pub line: Rc<RefCell<String>>,
    pub speaker: Rc<Cell<Option<EntityId>>>,
}

impl Speech {
    pub fn new(text: EntityId) -> Self {
        Self {
            text,
            line: Rc::new(RefCell::new(String::new())),
            speaker: Rc::new(Cell::new(None)),
        }
    }
}

pub trait SquareScripts {
    /// Keep stepping until the square arrives at `destination`.
    fn walk_to(&mut self, square: &Square, destination: Vec3) -> &mut Self;

    /// Show `line` above `speaker`, hold it, then fade it out.
    fn say(&mut self, speaker: EntityId, line: &str, speech: &Speech) -> &mut Self;
}

impl SquareScripts for Script<'_> {
    fn walk_to(&mut self, square: &Square, destination: Vec3) -> &mut Self {
        let mover = square.clone();
        let checker = square.clone();
        self.perform_until(
            move |frame| mover.move_towards(frame, destination),
            move |frame| checker.arrived_at(frame, destination),
        )
    }

    fn say(&mut self, speaker: EntityId, line: &str, speech: &Speech) -> &mut Self {
        let text = speech.text;
        let bubble = speech.clone();
        let line = line.to_string();
        self.perform(move |_| {
            *bubble.line.borrow_mut() = line.clone();
            bubble.speaker.set(Some(speaker));
        })
        .activate(text)
        .set_opacity(text, 0.0)
        .animate_opacity(text, 1.0, SPEECH_FADE, Easing::QuadInOut, false)
        .wait(SPEECH_HOLD)
        .animate_opacity(text, 0.0, SPEECH_FADE, Easing::QuadInOut, false)
        .deactivate(text)
    }
}

pub struct Adventure {
    pub seed: u64,
    pub player: Option<Square>,
    pub guard: Option<Square>,
    pub speech: Option<Speech>,
    pub patrol: Option<ScriptId>,
    pub spot: Option<ScriptId>,
}

impl Default for Adventure {
    fn default() -> Self {
        Self {
            seed: 7,
            player: None,
            guard: None,
            speech: None,
            patrol: None,
            spot: None,
        }
    }
}

impl Demo for Adventure {
    fn name(&self) -> &'static str {
        "adventure"
    }

    fn init(&mut self, ctx: &mut DemoContext) {
        let player = Square::new(ctx.next_id());
        let guard = Square::new(ctx.next_id());
        let speech = Speech::new(ctx.next_id());

        ctx.scene.spawn(
            Entity::new(player.id)
                .with_tag("player")
                .with_pos(Vec3::new(6.0, 0.0, 0.0))
                .with_color(Vec4::new(0.2, 0.6, 1.0, 1.0)),
        );
        ctx.scene.spawn(
            Entity::new(guard.id)
                .with_tag("guard")
                .with_color(Vec4::new(0.9, 0.3, 0.2, 1.0)),
        );
        ctx.scene.spawn(
            Entity::new(speech.text)
                .with_tag(SPEECH_TAG)
                .with_color(Vec4::new(1.0, 1.0, 1.0, 0.0))
                .with_active(false),
        );

        ctx.scripts
            .named("Introduction")
            .set_opacity(player.id, 0.0)
            .animate_opacity(player.id, 1.0, 0.5, Easing::QuadOut, false);

        let patrol = ctx
            .scripts
            .looping(guard.id)
            .walk_to(&guard, Vec3::new(0.0, 3.0, 0.0))
            .wait(3.0)
            .walk_to(&guard, Vec3::ZERO)
            .wait(3.0)
            .id();

        let spot = ctx
            .scripts
            .script(guard.id)
            .wait_until_within_distance(guard.id, player.id, SPOT_DISTANCE)
            .pause_script(patrol)
            .say(guard.id, "Hello there", &speech)
            .wait(2.0)
            .say(guard.id, "Welcome to the kingdom", &speech)
            .id();

        for id in [player.id, guard.id] {
            let breath = Vec3::new(0.1, 0.1, 0.0);
            ctx.scripts
                .looping(id)
                .expand(id, breath, 1.5, Easing::SineInOut)
                .wait(0.25)
                .shrink(id, breath, 1.5, Easing::SineInOut)
                .wait(0.25);
        }

        let rng = Rc::new(RefCell::new(Rng::new(self.seed)));
        let controlled = player.clone();
        ctx.scripts
            .looping(player.id)
            .set_channel_update()
            .perform(move |frame| {
                let input = frame.input();
                let direction = if input.is_held(KEY_A) {
                    Some(Vec3::NEG_X)
                } else if input.is_held(KEY_D) {
                    Some(Vec3::X)
                } else if input.is_held(KEY_W) {
                    Some(Vec3::Y)
                } else if input.is_held(KEY_S) {
                    Some(Vec3::NEG_Y)
                } else {
                    None
                };
                let spin = input.is_pressed(KEY_SPACE);

                if let Some(direction) = direction {
                    controlled.step(frame, direction);
                }
                if spin {
                    let clockwise = rng.borrow_mut().next_int(2) == 0;
                    controlled.spin(frame, clockwise);
                }
            });

        self.player = Some(player);
        self.guard = Some(guard);
        self.speech = Some(speech);
        self.patrol = Some(patrol);
        self.spot = Some(spot);
    }

    fn update(&mut self, ctx: &mut DemoContext) {
        let Some(speech) = &self.speech else {
            return;
        };
        let Some(speaker) = speech.speaker.get() else {
            return;
        };
        let Some(anchor) = ctx.scene.get(speaker).map(|e| e.pos) else {
            return;
        };
        if let Some(text) = ctx.scene.find_by_tag_mut(SPEECH_TAG) {
            text.pos = anchor + SPEECH_OFFSET;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DemoRunner;
    use zap_script::InputEvent;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn guard_greets_approaching_player() {
        let mut tour = DemoRunner::new(Adventure::default());
        tour.init();
        let player = tour.demo().player.clone().unwrap();
        let patrol = tour.demo().patrol.unwrap();
        let spot = tour.demo().spot.unwrap();
        let speech = tour.demo().speech.clone().unwrap();

        tour.push_input(InputEvent::KeyDown { key_code: KEY_A });
        tour.run_for(0.8, DT);
        tour.push_input(InputEvent::KeyUp { key_code: KEY_A });
        tour.run_for(2.0, DT);

        let x = tour.ctx().scene.get(player.id).unwrap().pos.x;
        assert!(x < 3.0, "player walked left, x = {}", x);
        assert!(!tour.ctx().scripts.chain(patrol).unwrap().is_enabled());
        assert_eq!(speech.line.borrow().as_str(), "Hello there");
        let text = tour.ctx().scene.find_by_tag(SPEECH_TAG).unwrap();
        assert_eq!(text.id, speech.text);
        assert!(text.active);
        let guard = tour.demo().guard.as_ref().unwrap().id;
        let over_guard = tour.ctx().scene.get(guard).unwrap().pos + SPEECH_OFFSET;
        assert!(text.pos.abs_diff_eq(over_guard, 1e-5));

        tour.run_for(6.0, DT);
        assert_eq!(speech.line.borrow().as_str(), "Welcome to the kingdom");
        assert!(!tour.ctx().scene.get(speech.text).unwrap().active);
        assert!(!tour.ctx().scripts.contains(spot));
        assert!(tour.faults().is_empty());
    }

    #[test]
    fn busy_square_ignores_new_commands() {
        let mut tour = DemoRunner::new(Adventure::default());
        tour.init();
        let player = tour.demo().player.clone().unwrap();
        // Let the controls settle on the update phase.
        tour.run_for(0.1, DT);

        tour.push_input(InputEvent::KeyDown { key_code: KEY_SPACE });
        tour.tick(DT);
        tour.push_input(InputEvent::KeyUp { key_code: KEY_SPACE });
        assert!(player.is_busy());

        // Holding D while spinning does not move the square.
        tour.push_input(InputEvent::KeyDown { key_code: KEY_D });
        tour.run_for(0.5, DT);
        tour.push_input(InputEvent::KeyUp { key_code: KEY_D });
        let entity = tour.ctx().scene.get(player.id).unwrap();
        assert_eq!(entity.pos, Vec3::new(6.0, 0.0, 0.0));

        tour.run_for(0.7, DT);
        let entity = tour.ctx().scene.get(player.id).unwrap();
        assert!((entity.rotation.abs() - TAU).abs() < 1e-4);
        assert!(!player.is_busy());
    }
}
