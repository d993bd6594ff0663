use zap_script::{
    EntityId, InputEvent, RunnerConfig, Scene, ScriptFault, ScriptRunner,
};

/// The contract every tour scene fulfills.
pub trait Demo {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// Runner configuration. Called once before init.
    fn config(&self) -> RunnerConfig {
        RunnerConfig::default()
    }

    /// Spawn entities and author the scene's scripts.
    fn init(&mut self, ctx: &mut DemoContext);

    /// Host-side work after the scripts ran this frame.
    fn update(&mut self, _ctx: &mut DemoContext) {}
}

/// Mutable access to the scene and its scripts, passed to Demo::init and Demo::update.
pub struct DemoContext {
    pub scene: Scene,
    pub scripts: ScriptRunner,
    next_id: u32,
}

impl DemoContext {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            scene: Scene::new(),
            scripts: ScriptRunner::new(config),
            next_id: 1,
        }
    }

    /// Allocate a fresh entity id.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Headless host loop that wires a demo to its scene and scripts.
pub struct DemoRunner<D: Demo> {
    demo: D,
    ctx: DemoContext,
    initialized: bool,
    frames: u64,
    faults: Vec<ScriptFault>,
}

impl<D: Demo> DemoRunner<D> {
    pub fn new(demo: D) -> Self {
        let config = demo.config();
        Self::with_config(demo, config)
    }

    pub fn with_config(demo: D, config: RunnerConfig) -> Self {
        Self {
            demo,
            ctx: DemoContext::new(config),
            initialized: false,
            frames: 0,
            faults: Vec::new(),
        }
    }

    /// Initialize the demo. Call once after construction.
    pub fn init(&mut self) {
        self.demo.init(&mut self.ctx);
        self.initialized = true;
        log::info!("{}: {} scripts authored", self.demo.name(), self.ctx.scripts.len());
    }

    /// Push an input event; scripts see it on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.ctx.scripts.push_input(event);
    }

    /// Run one frame: tick every script, then let the demo react.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        let faults = self.ctx.scripts.frame(dt, &mut self.ctx.scene);
        self.faults.extend(faults);
        self.demo.update(&mut self.ctx);
        self.frames += 1;
    }

    /// Tick at a fixed `dt` until `seconds` of frame time have passed.
    pub fn run_for(&mut self, seconds: f32, dt: f32) {
        let frames = (seconds / dt).ceil() as u32;
        for _ in 0..frames {
            self.tick(dt);
        }
    }

    pub fn demo(&self) -> &D {
        &self.demo
    }

    pub fn ctx(&self) -> &DemoContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut DemoContext {
        &mut self.ctx
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Step faults collected so far.
    pub fn faults(&self) -> &[ScriptFault] {
        &self.faults
    }
}
