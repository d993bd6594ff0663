use slotmap::SlotMap;

use crate::api::config::RunnerConfig;
use crate::api::error::ScriptFault;
use crate::api::stage::Stage;
use crate::api::types::{Channel, EntityId, OnFinished, ScriptId};
use crate::core::time::{Clock, FixedTimestep};
use crate::input::queue::{InputEvent, InputQueue, InputState};
use crate::script::builder::Script;
use crate::script::chain::{self, ActionChain};
use crate::script::frame::Frame;

/// Registry of every live action chain, plus the driver that ticks them.
///
/// The runner is the single owner of all chains. Hosts create one, build
/// scripts through it, and call `frame` once per rendered frame (or `tick` /
/// `tick_at` per phase when they run their own loop). `clear` tears the
/// registry down.
pub struct ScriptRunner {
    chains: SlotMap<ScriptId, ActionChain>,
    config: RunnerConfig,
    clock: Clock,
    timestep: FixedTimestep,
    input_queue: InputQueue,
    input: InputState,
}

impl ScriptRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_fixed_steps);
        Self {
            chains: SlotMap::with_key(),
            config,
            clock: Clock::new(),
            timestep,
            input_queue: InputQueue::new(),
            input: InputState::new(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Interpolation alpha left over from the last `frame`.
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    // -- Construction --

    /// New chain owned by `owner` that removes itself when done.
    pub fn script(&mut self, owner: EntityId) -> Script<'_> {
        self.script_with(owner, OnFinished::DestroyScript)
    }

    pub fn script_with(&mut self, owner: EntityId, policy: OnFinished) -> Script<'_> {
        let chain = ActionChain::new(
            format!("Script {}", owner.0),
            Some(owner),
            policy,
            self.config.default_channel,
        );
        Script::register(&mut self.chains, chain)
    }

    pub fn looping(&mut self, owner: EntityId) -> Script<'_> {
        self.script_with(owner, OnFinished::Loop)
    }

    /// Append to the first chain `owner` already has, or start one.
    pub fn reuse(&mut self, owner: EntityId) -> Script<'_> {
        let existing = self
            .chains
            .iter()
            .find(|(_, c)| c.owner == Some(owner) && !c.pending_destroy)
            .map(|(id, _)| id);
        match existing {
            Some(id) => Script::new(id, &mut self.chains[id]),
            None => self.script(owner),
        }
    }

    /// Ownerless chain that disables itself when done.
    pub fn named(&mut self, name: impl Into<String>) -> Script<'_> {
        self.named_with(name, None)
    }

    /// Ownerless chain filed under `parent` for bookkeeping.
    pub fn named_in(&mut self, name: impl Into<String>, parent: EntityId) -> Script<'_> {
        self.named_with(name, Some(parent))
    }

    fn named_with(&mut self, name: impl Into<String>, parent: Option<EntityId>) -> Script<'_> {
        let mut chain = ActionChain::new(
            format!("Script - {}", name.into()),
            None,
            OnFinished::DeactivateOwner,
            self.config.default_channel,
        );
        chain.parent = parent;
        Script::register(&mut self.chains, chain)
    }

    /// Builder over an existing chain.
    pub fn extend(&mut self, id: ScriptId) -> Option<Script<'_>> {
        self.chains.get_mut(id).map(|chain| Script::new(id, chain))
    }

    // -- Control --

    pub fn pause(&mut self, id: ScriptId) -> bool {
        self.chains.get_mut(id).map(|c| c.enabled = false).is_some()
    }

    pub fn resume(&mut self, id: ScriptId) -> bool {
        self.chains.get_mut(id).map(|c| c.enabled = true).is_some()
    }

    pub fn destroy(&mut self, id: ScriptId) -> bool {
        self.chains.remove(id).is_some()
    }

    /// Drop every chain owned by `owner`. Returns how many were removed.
    pub fn remove_owned_by(&mut self, owner: EntityId) -> usize {
        let before = self.chains.len();
        self.chains.retain(|_, c| c.owner != Some(owner));
        before - self.chains.len()
    }

    /// Drop every chain and reset time and input.
    pub fn clear(&mut self) {
        self.chains.clear();
        self.clock = Clock::new();
        self.timestep = FixedTimestep::with_max_steps(self.config.fixed_dt, self.config.max_fixed_steps);
        self.input_queue.drain();
        self.input = InputState::new();
    }

    // -- Queries --

    pub fn contains(&self, id: ScriptId) -> bool {
        self.chains.contains_key(id)
    }

    pub fn chain(&self, id: ScriptId) -> Option<&ActionChain> {
        self.chains.get(id)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn ids_parented_to(&self, parent: EntityId) -> Vec<ScriptId> {
        self.chains
            .iter()
            .filter(|(_, c)| c.parent == Some(parent))
            .map(|(id, _)| id)
            .collect()
    }

    // -- Ticking --

    /// Queue an input event. It becomes visible on the next `frame`.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input_queue.push(event);
    }

    /// Run one full frame: fold input, run the fixed phase as many times as
    /// `dt` is worth, then the variable phase, then clear transient input.
    pub fn frame(&mut self, dt: f32, stage: &mut dyn Stage) -> Vec<ScriptFault> {
        for event in self.input_queue.drain() {
            self.input.apply(event);
        }

        // Long frames count for at most the fixed phase's catch-up budget,
        // so both clocks stay within one fixed step of each other.
        let dt = dt.min(self.timestep.dt() * self.config.max_fixed_steps.max(1) as f32);
        self.clock.advance(dt);
        let mut faults = Vec::new();
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.clock.advance_fixed(self.timestep.dt());
            faults.extend(self.tick(Channel::FixedUpdate, stage));
        }
        faults.extend(self.tick(Channel::Update, stage));

        self.input.end_frame();
        faults
    }

    /// Tick the phase at an explicit time. The clock never moves backwards.
    pub fn tick_at(&mut self, channel: Channel, now: f32, stage: &mut dyn Stage) -> Vec<ScriptFault> {
        self.clock.set(channel, now);
        self.tick(channel, stage)
    }

    /// Tick every enabled chain on `channel` once, at the clock's time.
    ///
    /// Faulted chains are removed and reported; the rest of the batch still runs.
    pub fn tick(&mut self, channel: Channel, stage: &mut dyn Stage) -> Vec<ScriptFault> {
        let now = self.clock.now(channel);
        let eligible: Vec<ScriptId> = self
            .chains
            .iter()
            .filter(|(_, c)| c.ticks_on(channel))
            .map(|(id, _)| id)
            .collect();

        let mut faults = Vec::new();
        for id in eligible {
            // An earlier chain may have paused, moved, or removed this one.
            let Some(chain) = self.chains.get(id) else { continue };
            if !chain.ticks_on(channel) {
                continue;
            }
            if let Some(owner) = chain.owner {
                match stage.target(owner) {
                    None => {
                        log::debug!("Dropping script {:?} ({}): owner {:?} is gone", id, chain.name, owner);
                        self.chains.remove(id);
                        continue;
                    }
                    Some(target) if !target.is_active() => continue,
                    Some(_) => {}
                }
            }

            if let Some(fault) = self.run_chain(id, channel, now, stage) {
                faults.push(fault);
            }
        }
        faults
    }

    fn run_chain(
        &mut self,
        id: ScriptId,
        channel: Channel,
        now: f32,
        stage: &mut dyn Stage,
    ) -> Option<ScriptFault> {
        let mut steps = match self.chains.get_mut(id) {
            Some(chain) => {
                chain.held = chain.steps.len();
                std::mem::take(&mut chain.steps)
            }
            None => return None,
        };

        let result = {
            let mut frame = Frame {
                now,
                channel,
                current: id,
                stage: &mut *stage,
                chains: &mut self.chains,
                input: &self.input,
                config: &self.config,
            };
            chain::run(&mut steps, &mut frame)
        };

        let chain = self.chains.get_mut(id)?;
        // Keep anything appended after the last step ran.
        steps.append(&mut chain.steps);
        chain.steps = steps;
        chain.held = 0;

        match result {
            Err(error) => {
                let name = chain.name.clone();
                log::error!("Script {} faulted: {}", name, error);
                self.chains.remove(id);
                Some(ScriptFault { script: id, name, error })
            }
            Ok(_) if chain.pending_destroy => {
                self.chains.remove(id);
                None
            }
            Ok(true) => {
                self.finish(id, stage);
                None
            }
            Ok(false) => None,
        }
    }

    /// Apply the termination policy of a chain whose cursor reached the end.
    fn finish(&mut self, id: ScriptId, stage: &mut dyn Stage) {
        let Some(chain) = self.chains.get_mut(id) else { return };
        log::debug!("Script {} finished: {:?}", chain.name, chain.on_finished);

        match (chain.on_finished, chain.owner) {
            (OnFinished::DestroyScript, _) | (OnFinished::DestroyOwner, None) => {
                self.chains.remove(id);
            }
            (OnFinished::DisableScript, _) | (OnFinished::DeactivateOwner, None) => {
                chain.enabled = false;
            }
            (OnFinished::DeactivateOwner, Some(owner)) => {
                if let Some(target) = stage.target_mut(owner) {
                    target.set_active(false);
                }
            }
            (OnFinished::DestroyOwner, Some(owner)) => {
                stage.destroy(owner);
                self.remove_owned_by(owner);
            }
            (OnFinished::Loop, _) => {
                chain.cursor = 0;
            }
        }
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}
