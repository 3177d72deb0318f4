use dropshadow::{
    build_render_buffer, AssetManifest, EngineContext, Game, GameConfig, GraphicRegistry,
    InputEvent, InputQueue, ProtocolLayout, RenderBuffer, RenderContext, FixedTimestep,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `light-demo`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::with_seed(config.seed),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Replace the named graphic registry from a manifest JSON string.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                self.ctx.graphics = GraphicRegistry::from_manifest(&manifest);
                log::info!("manifest loaded: {} graphics", self.ctx.graphics.len());
            }
            Err(e) => log::error!("failed to load manifest: {}", e),
        }
    }

    /// Run one frame tick: lights react to input, game updates, lights
    /// broadcast, then the frame is drawn into the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.dispatch_light_input(&self.input);

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
        }

        self.input.drain();

        self.ctx.update_lights(dt);

        build_render_buffer(&mut self.ctx.scene, &self.ctx.lights, &mut self.render_buffer);

        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }
        // Custom draws join the z order too.
        self.render_buffer.finish();

        if self.render_buffer.instances.len() > self.layout.max_instances {
            log::warn!(
                "frame has {} draws, only {} fit the shared buffer",
                self.render_buffer.instances.len(),
                self.layout.max_instances
            );
        }
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----
    // Counts are capped at the layout capacities. Instances are sorted by
    // ascending z, so a capped frame loses its topmost draws (casters before
    // their shadows).

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count().min(self.max_instances())
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.render_buffer.lines_ptr()
    }

    pub fn line_count(&self) -> u32 {
        self.render_buffer.line_count().min(self.max_lines())
    }

    pub fn materials_ptr(&self) -> *const f32 {
        self.render_buffer.materials_ptr()
    }

    pub fn material_count(&self) -> u32 {
        (self.render_buffer.materials.len() as u32).min(self.max_materials())
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        (self.ctx.events.len() as u32).min(self.max_events())
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_lines(&self) -> u32 {
        self.layout.max_lines as u32
    }

    pub fn max_materials(&self) -> u32 {
        self.layout.max_materials as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    /// Engine state, for hosts embedding the runner directly.
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }
}
