use chameleon_core::{
    EngineContext, FrameHeader, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer, RenderContext, WireEvent, HEADER_FLOATS,
};

/// Drives a `Game` from the browser's animation frame.
///
/// The web crate keeps one runner in a `thread_local!` and exposes free
/// functions through `#[wasm_bindgen]`, since wasm-bindgen cannot export
/// generic structs.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    config: GameConfig,
    layout: ProtocolLayout,
    /// Capacities and counts of the last frame, see `ProtocolLayout::write_header`.
    header: [f32; HEADER_FLOATS],
    initialized: bool,
    /// Sound ids of the last frame, one byte each.
    sound_buffer: Vec<u8>,
    /// Game events of the last frame in wire form.
    event_buffer: Vec<WireEvent>,
    frame_counter: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            event_buffer: Vec::with_capacity(config.max_events),
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            initialized: false,
            frame_counter: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.write_header();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance the clock by `dt_ms`, update once, then rebuild the render,
    /// sound and event buffers.
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.clock.advance(dt_ms as f64);
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();
        self.frame_counter += 1;

        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.event_buffer.clear();
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "dropping {} game events over capacity",
                self.ctx.events.len() - self.layout.max_events
            );
        }
        for event in self.ctx.events.iter().take(self.layout.max_events) {
            self.event_buffer.push(event.to_wire());
        }

        self.write_header();
    }

    fn write_header(&mut self) {
        let frame = FrameHeader {
            frame_counter: self.frame_counter,
            world_width: self.config.world_width,
            world_height: self.config.world_height,
            instance_count: self.render_buffer.instances.len(),
            sound_count: self.sound_buffer.len(),
            event_count: self.event_buffer.len(),
        };
        self.layout.write_header(&mut self.header, frame);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn now(&self) -> f64 {
        self.ctx.now()
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn game_events(&self) -> &[WireEvent] {
        &self.event_buffer
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chameleon_core::input::queue::keys;
    use chameleon_core::{ChameleonQuest, GameEvent, SoundEvent};

    fn runner() -> GameRunner<ChameleonQuest> {
        let mut runner = GameRunner::new(ChameleonQuest::default());
        runner.init();
        runner
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(ChameleonQuest::default());
        runner.tick(16.0);
        assert_eq!(runner.frame_counter(), 0);
        assert_eq!(runner.now(), 0.0);
    }

    #[test]
    fn shot_fills_sound_and_event_buffers() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
        runner.tick(16.0);

        assert_eq!(runner.sound_events_len(), 1);
        assert_eq!(runner.sound_buffer[0], SoundEvent::TONGUE_SHOOT.0 as u8);
        let kinds: Vec<f32> = runner.game_events().iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&GameEvent::KIND_TONGUE_SHOT));
        assert!(runner.instance_count() >= 3);

        runner.tick(16.0);
        assert_eq!(runner.sound_events_len(), 0);
        assert_eq!(runner.game_events_len(), 0);
    }

    #[test]
    fn clock_follows_ticks() {
        let mut runner = runner();
        for _ in 0..10 {
            runner.tick(20.0);
        }
        assert_eq!(runner.now(), 200.0);
        assert_eq!(runner.frame_counter(), 10);
    }

    #[test]
    fn input_is_consumed_once() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: keys::LEFT });
        runner.tick(16.0);
        runner.tick(16.0);
        // Held key keeps turning; the queued event itself is gone.
        assert_eq!(runner.game().chameleon().target_angle(), -10.0);
    }

    #[test]
    fn header_tracks_each_frame() {
        use chameleon_core::bridge::protocol::{
            HEADER_EVENT_COUNT, HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT, HEADER_MAX_INSTANCES,
            HEADER_SOUND_COUNT, HEADER_WORLD_WIDTH,
        };

        let mut runner = runner();
        assert_eq!(runner.header()[HEADER_MAX_INSTANCES], 256.0);
        assert_eq!(runner.header()[HEADER_WORLD_WIDTH], 1920.0);

        runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
        runner.tick(16.0);
        let header = *runner.header();
        assert_eq!(header[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(header[HEADER_SOUND_COUNT], 1.0);
        assert_eq!(header[HEADER_EVENT_COUNT], runner.game_events_len() as f32);
        assert_eq!(header[HEADER_INSTANCE_COUNT], runner.instance_count() as f32);

        runner.tick(16.0);
        assert_eq!(runner.header()[HEADER_FRAME_COUNTER], 2.0);
        assert_eq!(runner.header()[HEADER_SOUND_COUNT], 0.0);
    }

    #[test]
    fn capacities_come_from_config() {
        let runner = runner();
        assert_eq!(runner.max_instances(), 256);
        assert_eq!(runner.max_events(), 32);
        assert_eq!(runner.world_width(), 1920.0);
    }
}
