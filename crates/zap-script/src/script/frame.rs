use slotmap::SlotMap;

use crate::api::config::RunnerConfig;
use crate::api::error::ScriptError;
use crate::api::stage::{Stage, Target};
use crate::api::types::{Channel, EntityId, OnFinished, ScriptId};
use crate::input::queue::InputState;
use crate::script::builder::Script;
use crate::script::chain::{ActionChain, Step};

/// Context handed to every step while its chain is ticking.
///
/// A frame borrows the stage, the input state, and the runner's registry for
/// the duration of one chain's run. Steps use it to read time, mutate
/// targets, and steer any chain, their own included.
pub struct Frame<'a> {
    pub(crate) now: f32,
    pub(crate) channel: Channel,
    pub(crate) current: ScriptId,
    pub(crate) stage: &'a mut dyn Stage,
    pub(crate) chains: &'a mut SlotMap<ScriptId, ActionChain>,
    pub(crate) input: &'a InputState,
    pub(crate) config: &'a RunnerConfig,
}

impl<'a> Frame<'a> {
    /// Current time in seconds for the ticking phase.
    pub fn now(&self) -> f32 {
        self.now
    }

    /// The phase this tick belongs to.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Id of the chain whose step is running.
    pub fn script_id(&self) -> ScriptId {
        self.current
    }

    /// Owner of the running chain, if it has one.
    pub fn owner(&self) -> Option<EntityId> {
        self.chains.get(self.current).and_then(|c| c.owner)
    }

    pub fn input(&self) -> &InputState {
        self.input
    }

    pub fn stage(&self) -> &dyn Stage {
        &*self.stage
    }

    pub fn stage_mut(&mut self) -> &mut dyn Stage {
        &mut *self.stage
    }

    /// Resolve a target, failing with `MissingTarget` if the stage lost it.
    pub fn target(&self, id: EntityId) -> Result<&dyn Target, ScriptError> {
        self.stage.target(id).ok_or(ScriptError::MissingTarget(id))
    }

    pub fn target_mut(&mut self, id: EntityId) -> Result<&mut dyn Target, ScriptError> {
        self.stage.target_mut(id).ok_or(ScriptError::MissingTarget(id))
    }

    // -- Registry control --

    /// Stop ticking a chain. Pausing the running chain halts it after the
    /// current step. Returns false if the chain does not exist.
    pub fn pause(&mut self, id: ScriptId) -> bool {
        self.chains.get_mut(id).map(|c| c.enabled = false).is_some()
    }

    pub fn resume(&mut self, id: ScriptId) -> bool {
        self.chains.get_mut(id).map(|c| c.enabled = true).is_some()
    }

    pub fn is_paused(&self, id: ScriptId) -> bool {
        self.chains.get(id).is_some_and(|c| !c.enabled)
    }

    /// Whether a chain is still registered.
    pub fn contains(&self, id: ScriptId) -> bool {
        self.chains.get(id).is_some_and(|c| !c.pending_destroy)
    }

    /// Remove a chain. The running chain is removed once its tick ends.
    pub fn destroy(&mut self, id: ScriptId) -> bool {
        if id == self.current {
            return self.chains.get_mut(id).map(|c| c.pending_destroy = true).is_some();
        }
        self.chains.remove(id).is_some()
    }

    /// Move the running chain to another phase. The current run continues.
    pub fn set_channel(&mut self, channel: Channel) {
        if let Some(chain) = self.chains.get_mut(self.current) {
            chain.channel = channel;
        }
    }

    pub fn set_on_finished(&mut self, policy: OnFinished) {
        if let Some(chain) = self.chains.get_mut(self.current) {
            chain.on_finished = policy;
        }
    }

    /// Continue the running chain at step `index` once the current step returns.
    pub fn jump_to(&mut self, index: usize) {
        if let Some(chain) = self.chains.get_mut(self.current) {
            chain.jump = Some(index);
        }
    }

    /// Deactivate the running chain's owner, or disable the chain when it has none.
    pub fn deactivate_own(&mut self) {
        match self.owner() {
            Some(owner) => {
                if let Some(target) = self.stage.target_mut(owner) {
                    target.set_active(false);
                }
            }
            None => {
                self.pause(self.current);
            }
        }
    }

    /// Start an independent chain that destroys itself on completion.
    ///
    /// The new chain has a real id immediately and first ticks on the next
    /// run of its phase. Its faults are not propagated to the caller.
    pub fn fork(&mut self, build: impl FnOnce(&mut Script<'_>)) -> ScriptId {
        let name = self.config.fork_name.clone();
        self.fork_named(name, build)
    }

    pub fn fork_named(
        &mut self,
        name: impl Into<String>,
        build: impl FnOnce(&mut Script<'_>),
    ) -> ScriptId {
        let chain = ActionChain::new(name, None, OnFinished::DestroyOwner, self.config.default_channel);
        let mut script = Script::register(self.chains, chain);
        build(&mut script);
        let id = script.id();
        log::debug!("Forked script {:?} from {:?}", id, self.current);
        id
    }

    /// Builder over an existing chain. Steps appended to the running chain
    /// take part in the current run.
    pub fn script(&mut self, id: ScriptId) -> Option<Script<'_>> {
        self.chains.get_mut(id).map(|chain| Script::new(id, chain))
    }

    // -- Run loop plumbing --

    pub(crate) fn own_cursor(&self) -> usize {
        self.chains.get(self.current).map_or(0, |c| c.cursor)
    }

    pub(crate) fn set_own_cursor(&mut self, cursor: usize) {
        if let Some(chain) = self.chains.get_mut(self.current) {
            chain.cursor = cursor;
        }
    }

    /// Move steps appended during the run onto the end of `steps`.
    pub(crate) fn take_appended(&mut self, steps: &mut Vec<Step>) {
        if let Some(chain) = self.chains.get_mut(self.current) {
            chain.held += chain.steps.len();
            steps.append(&mut chain.steps);
        }
    }

    pub(crate) fn take_jump(&mut self) -> Option<usize> {
        self.chains.get_mut(self.current).and_then(|c| c.jump.take())
    }

    /// Whether the running chain was paused or destroyed by its own step.
    pub(crate) fn own_halted(&self) -> bool {
        self.chains
            .get(self.current)
            .map_or(true, |c| !c.enabled || c.pending_destroy)
    }
}
