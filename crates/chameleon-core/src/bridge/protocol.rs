/// Shared buffer layout read by the browser.
///
/// Layout (all values f32 / 4 bytes):
/// ```text
/// [Header: 10 floats]
/// [Instances: max_instances × 8 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// The runner rewrites the header every frame; the browser derives the
/// section offsets from the capacities in it.

use crate::api::game::GameConfig;
use crate::api::types::WireEvent;
use crate::renderer::instance::RenderInstance;

pub const HEADER_FLOATS: usize = 10;

pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_WORLD_WIDTH: usize = 2;
pub const HEADER_WORLD_HEIGHT: usize = 3;
pub const HEADER_MAX_INSTANCES: usize = 4;
pub const HEADER_INSTANCE_COUNT: usize = 5;
pub const HEADER_MAX_SOUNDS: usize = 6;
pub const HEADER_SOUND_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;

pub const PROTOCOL_VERSION: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    pub instance_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_sounds: usize, max_events: usize) -> Self {
        let instance_data_offset = HEADER_FLOATS;
        let sound_data_offset = instance_data_offset + max_instances * RenderInstance::FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * WireEvent::FLOATS;

        Self {
            max_instances,
            max_sounds,
            max_events,
            instance_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_sounds, config.max_events)
    }

    /// Fill `header` with this layout's capacities and one frame's counts.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], frame: FrameHeader) {
        header[HEADER_FRAME_COUNTER] = frame.frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_WORLD_WIDTH] = frame.world_width;
        header[HEADER_WORLD_HEIGHT] = frame.world_height;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = frame.instance_count.min(self.max_instances) as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_SOUND_COUNT] = frame.sound_count.min(self.max_sounds) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = frame.event_count.min(self.max_events) as f32;
    }
}

/// Per-frame values written into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame_counter: u64,
    pub world_width: f32,
    pub world_height: f32,
    pub instance_count: usize,
    pub sound_count: usize,
    pub event_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_offsets() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.instance_data_offset, 10);
        assert_eq!(layout.sound_data_offset, 10 + 256 * 8);
        assert_eq!(layout.event_data_offset, 10 + 256 * 8 + 32);
        assert_eq!(layout.buffer_total_floats, 10 + 256 * 8 + 32 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn zero_capacities_leave_only_the_header() {
        let layout = ProtocolLayout::new(0, 0, 0);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS);
    }

    #[test]
    fn header_holds_capacities_and_clamped_counts() {
        let layout = ProtocolLayout::new(4, 2, 3);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_header(
            &mut header,
            FrameHeader {
                frame_counter: 7,
                world_width: 1920.0,
                world_height: 1080.0,
                instance_count: 3,
                sound_count: 5,
                event_count: 1,
            },
        );
        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_WORLD_HEIGHT], 1080.0);
        assert_eq!(header[HEADER_MAX_INSTANCES], 4.0);
        assert_eq!(header[HEADER_INSTANCE_COUNT], 3.0);
        assert_eq!(header[HEADER_SOUND_COUNT], 2.0);
        assert_eq!(header[HEADER_MAX_EVENTS], 3.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 1.0);
    }
}
