use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::api::error::ScriptError;
use crate::api::types::{Channel, OnFinished, ScriptId};
use crate::script::chain::ActionChain;
use crate::script::frame::Frame;

/// Fluent builder over one action chain.
///
/// Every method appends zero or more steps and hands the builder back, so a
/// whole timeline reads as one expression:
///
/// ```ignore
/// runner.script(square)
///     .perform(|_| log::info!("start"))
///     .wait(2.0)
///     .rotate(square, 90.0, 1.0, Easing::QuadOut)
///     .id();
/// ```
pub struct Script<'a> {
    id: ScriptId,
    chain: &'a mut ActionChain,
}

impl<'a> Script<'a> {
    pub(crate) fn new(id: ScriptId, chain: &'a mut ActionChain) -> Self {
        Self { id, chain }
    }

    pub(crate) fn register(
        chains: &'a mut SlotMap<ScriptId, ActionChain>,
        chain: ActionChain,
    ) -> Self {
        let id = chains.insert(chain);
        log::debug!("Registered script {:?} ({})", id, chains[id].name);
        Self::new(id, &mut chains[id])
    }

    pub fn id(&self) -> ScriptId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.chain.name
    }

    /// Number of steps in the chain, including while it is running.
    /// The next appended step gets this index for `jump_to`.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    // -- Primitives --

    /// Append a raw step. The closure returns `Ok(true)` when done.
    pub fn add_step<F>(&mut self, step: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>) -> Result<bool, ScriptError> + 'static,
    {
        self.chain.steps.push(Box::new(step));
        self
    }

    /// Run `action` once and move on in the same tick.
    pub fn perform<F>(&mut self, mut action: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>) + 'static,
    {
        self.add_step(move |frame| {
            action(frame);
            Ok(true)
        })
    }

    /// Like `perform`, but a failing action faults the chain.
    pub fn try_perform<F>(&mut self, mut action: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>) -> Result<(), ScriptError> + 'static,
    {
        self.add_step(move |frame| {
            action(frame)?;
            Ok(true)
        })
    }

    /// Each tick: complete if `condition` holds, otherwise run `action` and
    /// suspend. The action never runs on the tick the condition first holds.
    pub fn perform_until<F, C>(&mut self, mut action: F, mut condition: C) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>) + 'static,
        C: FnMut(&Frame<'_>) -> bool + 'static,
    {
        self.add_step(move |frame| {
            if condition(frame) {
                return Ok(true);
            }
            action(frame);
            Ok(false)
        })
    }

    /// Suspend until `condition` holds.
    pub fn wait_until<C>(&mut self, mut condition: C) -> &mut Self
    where
        C: FnMut(&Frame<'_>) -> bool + 'static,
    {
        self.add_step(move |frame| Ok(condition(frame)))
    }

    /// Start an independent sub-chain without waiting for it.
    ///
    /// `build` runs each time the step is reached, so a looping parent forks
    /// a fresh sub-chain per cycle.
    pub fn fork<B>(&mut self, mut build: B) -> &mut Self
    where
        B: FnMut(&mut Script<'_>) + 'static,
    {
        self.perform(move |frame| {
            frame.fork(&mut build);
        })
    }

    // -- Composites --

    /// Suspend for `duration` seconds from the moment the step is reached.
    pub fn wait(&mut self, duration: f32) -> &mut Self {
        let mut deadline: Option<f32> = None;
        self.add_step(move |frame| {
            let now = frame.now();
            let end = *deadline.get_or_insert(now + duration);
            if now >= end {
                deadline = None;
                return Ok(true);
            }
            Ok(false)
        })
    }

    /// Run `action` every tick until `duration` seconds have passed.
    pub fn perform_for<F>(&mut self, mut action: F, duration: f32) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>) + 'static,
    {
        let mut deadline: Option<f32> = None;
        self.add_step(move |frame| {
            let now = frame.now();
            let end = *deadline.get_or_insert(now + duration);
            if now > end {
                deadline = None;
                return Ok(true);
            }
            action(frame);
            Ok(false)
        })
    }

    /// Append `times` copies of a perform step sharing one action.
    pub fn perform_times<F>(&mut self, action: F, times: usize) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>) + 'static,
    {
        let action = Rc::new(RefCell::new(action));
        for _ in 0..times {
            let action = Rc::clone(&action);
            self.perform(move |frame| (*action.borrow_mut())(frame));
        }
        self
    }

    pub fn perform_if<C, F>(&mut self, mut condition: C, mut action: F) -> &mut Self
    where
        C: FnMut(&Frame<'_>) -> bool + 'static,
        F: FnMut(&mut Frame<'_>) + 'static,
    {
        self.perform(move |frame| {
            if condition(frame) {
                action(frame);
            }
        })
    }

    pub fn perform_if_else<C, F, G>(
        &mut self,
        mut condition: C,
        mut action: F,
        mut otherwise: G,
    ) -> &mut Self
    where
        C: FnMut(&Frame<'_>) -> bool + 'static,
        F: FnMut(&mut Frame<'_>) + 'static,
        G: FnMut(&mut Frame<'_>) + 'static,
    {
        self.perform(move |frame| {
            if condition(frame) {
                action(frame);
            } else {
                otherwise(frame);
            }
        })
    }

    // -- Control --

    /// Rewind to the first step whenever the end is reached.
    pub fn loop_forever(&mut self) -> &mut Self {
        self.set_on_finished(OnFinished::Loop)
    }

    pub fn set_on_finished(&mut self, policy: OnFinished) -> &mut Self {
        self.chain.on_finished = policy;
        self
    }

    /// Disable the chain now. Takes effect immediately, not as a step.
    pub fn pause(&mut self) -> &mut Self {
        self.chain.enabled = false;
        self
    }

    pub fn resume(&mut self) -> &mut Self {
        self.chain.enabled = true;
        self
    }

    pub fn set_channel_update(&mut self) -> &mut Self {
        self.set_channel(Channel::Update)
    }

    pub fn set_channel_fixed_update(&mut self) -> &mut Self {
        self.set_channel(Channel::FixedUpdate)
    }

    fn set_channel(&mut self, channel: Channel) -> &mut Self {
        self.perform(move |frame| frame.set_channel(channel))
    }

    /// Continue at step `index` when this step is reached.
    pub fn jump_to(&mut self, index: usize) -> &mut Self {
        self.perform(move |frame| frame.jump_to(index))
    }

    /// Deactivate the owner when reached (or disable an ownerless chain).
    pub fn deactivate_chain(&mut self) -> &mut Self {
        self.perform(|frame| frame.deactivate_own())
    }

    /// Destroy this chain when reached. Later steps never run.
    pub fn destroy_chain(&mut self) -> &mut Self {
        self.perform(|frame| {
            frame.destroy(frame.script_id());
        })
    }

    pub fn pause_script(&mut self, other: ScriptId) -> &mut Self {
        self.perform(move |frame| {
            frame.pause(other);
        })
    }

    pub fn resume_script(&mut self, other: ScriptId) -> &mut Self {
        self.perform(move |frame| {
            frame.resume(other);
        })
    }

    pub fn log(&mut self, message: impl Into<String>) -> &mut Self {
        let name = self.chain.name.clone();
        let message = message.into();
        self.perform(move |_| log::info!("Script {} : {}", name, message))
    }
}
