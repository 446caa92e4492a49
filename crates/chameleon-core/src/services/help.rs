/// Help charges for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpState {
    used: u32,
    max_per_level: u32,
}

impl HelpState {
    pub fn new(max_per_level: u32) -> Self {
        Self { used: 0, max_per_level }
    }

    /// Spend a charge. False when none are left.
    pub fn use_help(&mut self) -> bool {
        if self.used >= self.max_per_level {
            return false;
        }
        self.used += 1;
        true
    }

    /// Give back one charge spent on a help that had nothing to show.
    pub fn refund(&mut self) {
        self.used = self.used.saturating_sub(1);
    }

    pub fn remaining(&self) -> u32 {
        self.max_per_level - self.used
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}
