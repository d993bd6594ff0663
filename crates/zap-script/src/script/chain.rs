use crate::api::error::ScriptError;
use crate::api::types::{Channel, EntityId, OnFinished};
use crate::script::frame::Frame;

/// One unit of a chain. Returns `Ok(true)` when complete, `Ok(false)` to be
/// re-run next tick.
pub type Step = Box<dyn FnMut(&mut Frame<'_>) -> Result<bool, ScriptError>>;

/// An ordered list of steps with a cursor and a termination policy.
///
/// Chains live inside a `ScriptRunner`; build them through `Script`.
pub struct ActionChain {
    pub(crate) name: String,
    pub(crate) owner: Option<EntityId>,
    pub(crate) parent: Option<EntityId>,
    pub(crate) steps: Vec<Step>,
    /// Steps taken out by the runner for the current run.
    pub(crate) held: usize,
    pub(crate) cursor: usize,
    pub(crate) enabled: bool,
    pub(crate) channel: Channel,
    pub(crate) on_finished: OnFinished,
    /// Set when the chain is destroyed from inside its own tick.
    pub(crate) pending_destroy: bool,
    /// Index to continue at after the current step.
    pub(crate) jump: Option<usize>,
}

impl ActionChain {
    pub(crate) fn new(
        name: impl Into<String>,
        owner: Option<EntityId>,
        on_finished: OnFinished,
        channel: Channel,
    ) -> Self {
        Self {
            name: name.into(),
            owner,
            parent: None,
            steps: Vec::new(),
            held: 0,
            cursor: 0,
            enabled: true,
            channel,
            on_finished,
            pending_destroy: false,
            jump: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target whose lifetime bounds this chain, if any.
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    /// Organizational parent. Carries no ownership.
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Number of steps, counting those held by a run in progress.
    pub fn len(&self) -> usize {
        self.held + self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the step that runs next.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn on_finished(&self) -> OnFinished {
        self.on_finished
    }

    /// Whether the runner should tick this chain during `channel`.
    pub(crate) fn ticks_on(&self, channel: Channel) -> bool {
        self.enabled && !self.pending_destroy && self.channel == channel
    }
}

/// Run steps from the chain's cursor until one suspends or the list ends.
///
/// `steps` has been taken out of the running chain; anything appended to the
/// chain during the run is moved over before each step so it runs this tick.
/// Returns `Ok(true)` once the cursor reaches the end. A step that pauses or
/// destroys its own chain ends the run after it completes. A step error leaves
/// the cursor on the faulted step and propagates.
pub(crate) fn run(steps: &mut Vec<Step>, frame: &mut Frame<'_>) -> Result<bool, ScriptError> {
    let mut index = frame.own_cursor();
    loop {
        frame.take_appended(steps);
        if index >= steps.len() {
            break;
        }

        let complete = match (steps[index])(frame) {
            Ok(complete) => complete,
            Err(err) => {
                frame.set_own_cursor(index);
                return Err(err);
            }
        };

        if let Some(target) = frame.take_jump() {
            index = target;
        } else if complete {
            index += 1;
        } else {
            frame.set_own_cursor(index);
            return Ok(false);
        }
        if frame.own_halted() {
            frame.set_own_cursor(index);
            return Ok(false);
        }
    }

    frame.set_own_cursor(steps.len());
    Ok(true)
}
