use bytemuck::{Pod, Zeroable};

/// What a render instance draws. Stored as `f32` in the instance so the
/// buffer stays a flat float array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SpriteKind {
    ChameleonHead = 1,
    /// Tongue body: positioned at the origin, `scale` is its length.
    TongueBody = 2,
    TongueTip = 3,
    QuestionCard = 4,
    AnswerCard = 5,
    /// Cooldown indicator around the head; `variant` is the remaining fraction.
    CooldownRing = 6,
}

impl SpriteKind {
    pub fn as_f32(self) -> f32 {
        self as u32 as f32
    }
}

/// Per-instance render data read by the browser renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// World-space size in game units.
    pub scale: f32,
    /// `SpriteKind` discriminant.
    pub sprite: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Sprite-specific variant: expression index, highlight flag, ring fill.
    pub variant: f32,
    /// Id the UI uses to look up labels (answer id, group id), 0 if none.
    pub tag: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(kind: SpriteKind, x: f32, y: f32, scale: f32) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            scale,
            sprite: kind.as_f32(),
            alpha: 1.0,
            variant: 0.0,
            tag: 0.0,
        }
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_variant(mut self, variant: f32) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = tag as f32;
        self
    }
}

/// Instances for one frame, capped at `max_instances`.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    max_instances: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            max_instances,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false once the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.max_instances {
            log::trace!("render buffer full, dropping instance");
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    /// The instances as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
