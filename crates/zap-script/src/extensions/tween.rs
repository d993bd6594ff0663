// extensions/tween.rs
//
// Tween steps: time-bounded interpolation appended to a script.
// A tween step captures its start on the first tick it is reached and
// lands exactly on its goal on the terminal tick, whatever the frame timing.
//
// Usage:
//   runner.script(id)
//       .translate(id, Vec3::new(4.0, 0.0, 0.0), 0.5, Easing::QuadOut)
//       .rotate(id, FRAC_PI_2, 1.0, Easing::BackOut);

use glam::{Vec3, Vec4};
use crate::api::error::ScriptError;
use crate::api::types::EntityId;
use crate::script::builder::Script;
use crate::script::frame::Frame;
use super::easing::Easing;

/// Scale `direction` to `distance` along itself, never past its own length.
/// Negative distances (overshooting curves) point backwards.
fn clamp_along(direction: Vec3, distance: f32) -> Vec3 {
    let length = direction.length();
    direction.normalize_or_zero() * distance.clamp(-length, length)
}

impl Script<'_> {
    /// Shared driver for timed steps.
    ///
    /// `enter` runs on the first tick and returns per-run state, or `None` to
    /// skip the step. `apply` then runs every tick with normalized progress,
    /// which is exactly 1.0 on the terminal tick. State resets on completion,
    /// so looping chains re-enter cleanly.
    fn timed<S, E, A>(&mut self, duration: f32, mut enter: E, mut apply: A) -> &mut Self
    where
        S: 'static,
        E: FnMut(&mut Frame<'_>) -> Result<Option<S>, ScriptError> + 'static,
        A: FnMut(&mut Frame<'_>, &mut S, f32) -> Result<(), ScriptError> + 'static,
    {
        let mut active: Option<(f32, f32, S)> = None;
        self.add_step(move |frame| {
            let now = frame.now();
            if active.is_none() {
                match enter(frame)? {
                    Some(state) => active = Some((now, now + duration, state)),
                    None => return Ok(true),
                }
            }
            let Some((start, end, state)) = active.as_mut() else {
                return Ok(true);
            };

            if now >= *end {
                apply(frame, state, 1.0)?;
                active = None;
                return Ok(true);
            }
            let progress = (now - *start) / duration;
            apply(frame, state, progress.clamp(0.0, 1.0))?;
            Ok(false)
        })
    }

    /// Ease a scalar from 0 to `value` over `duration`, feeding `apply_delta`
    /// the change since its previous call.
    ///
    /// The deltas always sum to `value`, so several tweens can push the same
    /// quantity at once without clobbering each other.
    pub fn tween<F>(&mut self, value: f32, duration: f32, easing: Easing, mut apply_delta: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, f32) -> Result<(), ScriptError> + 'static,
    {
        let ease = easing.function();
        self.timed(
            duration,
            |_| Ok(Some(0.0_f32)),
            move |frame, previous: &mut f32, t| {
                let current = if t >= 1.0 { value } else { ease(0.0, value, t) };
                let delta = current - *previous;
                *previous = current;
                apply_delta(frame, delta)
            },
        )
    }

    /// Rotate about z by `angle` radians.
    pub fn rotate(&mut self, target: EntityId, angle: f32, duration: f32, easing: Easing) -> &mut Self {
        self.tween(angle, duration, easing, move |frame, delta| {
            let t = frame.target_mut(target)?;
            t.set_rotation(t.rotation() + delta);
            Ok(())
        })
    }

    /// Move by `offset` relative to wherever the target is.
    pub fn translate(&mut self, target: EntityId, offset: Vec3, duration: f32, easing: Easing) -> &mut Self {
        self.tween(offset.length(), duration, easing, move |frame, distance| {
            let t = frame.target_mut(target)?;
            t.set_position(t.position() + clamp_along(offset, distance));
            Ok(())
        })
    }

    /// Grow the scale by `amount`.
    pub fn expand(&mut self, target: EntityId, amount: Vec3, duration: f32, easing: Easing) -> &mut Self {
        self.tween(amount.length(), duration, easing, move |frame, distance| {
            let t = frame.target_mut(target)?;
            t.set_scale(t.scale() + clamp_along(amount, distance));
            Ok(())
        })
    }

    /// Reduce the scale by `amount`.
    pub fn shrink(&mut self, target: EntityId, amount: Vec3, duration: f32, easing: Easing) -> &mut Self {
        self.tween(amount.length(), duration, easing, move |frame, distance| {
            let t = frame.target_mut(target)?;
            t.set_scale(t.scale() - clamp_along(amount, distance));
            Ok(())
        })
    }

    /// Blend from the color the target has on entry to `color`.
    /// Targets without a color surface are skipped with a warning.
    pub fn animate_color(&mut self, target: EntityId, color: Vec4, duration: f32, easing: Easing) -> &mut Self {
        let ease = easing.function();
        self.timed(
            duration,
            move |frame| {
                let from = frame.target(target)?.color();
                if from.is_none() {
                    log::warn!("animate_color: target {:?} has no color, skipping", target);
                }
                Ok(from)
            },
            move |frame, from: &mut Vec4, t| {
                let blended = if t >= 1.0 { color } else { from.lerp(color, ease(0.0, 1.0, t)) };
                frame.target_mut(target)?.set_color(blended);
                Ok(())
            },
        )
    }

    /// Move along a straight line to `destination`, landing on it exactly.
    pub fn animate_position(
        &mut self,
        target: EntityId,
        destination: Vec3,
        duration: f32,
        easing: Easing,
    ) -> &mut Self {
        let ease = easing.function();
        self.timed(
            duration,
            move |frame| Ok(Some(frame.target(target)?.position())),
            move |frame, start: &mut Vec3, t| {
                let position = if t >= 1.0 {
                    destination
                } else {
                    let path = destination - *start;
                    *start + clamp_along(path, ease(0.0, path.length(), t))
                };
                frame.target_mut(target)?.set_position(position);
                Ok(())
            },
        )
    }

    /// Move to where `other` stands when the step is reached.
    pub fn animate_position_to(
        &mut self,
        target: EntityId,
        other: EntityId,
        duration: f32,
        easing: Easing,
    ) -> &mut Self {
        let ease = easing.function();
        self.timed(
            duration,
            move |frame| {
                let start = frame.target(target)?.position();
                let destination = frame.target(other)?.position();
                Ok(Some((start, destination)))
            },
            move |frame, path: &mut (Vec3, Vec3), t| {
                let (start, destination) = *path;
                let position = if t >= 1.0 {
                    destination
                } else {
                    let path = destination - start;
                    start + clamp_along(path, ease(0.0, path.length(), t))
                };
                frame.target_mut(target)?.set_position(position);
                Ok(())
            },
        )
    }

    /// Fade alpha to `opacity`.
    ///
    /// With `children_too`, each child gets its own forked fade (recursively)
    /// that runs alongside this chain without holding it up.
    pub fn animate_opacity(
        &mut self,
        target: EntityId,
        opacity: f32,
        duration: f32,
        easing: Easing,
        children_too: bool,
    ) -> &mut Self {
        if children_too {
            self.perform(move |frame| {
                let children = frame.stage().children(target);
                for child in children {
                    frame.fork(|sub| {
                        sub.animate_opacity(child, opacity, duration, easing, true);
                    });
                }
            });
        }

        let ease = easing.function();
        self.timed(
            duration,
            move |frame| {
                let color = frame.target(target)?.color();
                if color.is_none() {
                    log::warn!("animate_opacity: target {:?} has no color, skipping", target);
                }
                Ok(color.map(|c| c.w))
            },
            move |frame, from: &mut f32, t| {
                let alpha = if t >= 1.0 { opacity } else { ease(*from, opacity, t) };
                let t = frame.target_mut(target)?;
                if let Some(mut color) = t.color() {
                    color.w = alpha;
                    t.set_color(color);
                }
                Ok(())
            },
        )
    }
}
