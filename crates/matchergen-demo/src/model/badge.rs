/// An access badge; exposes no accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    level: u8,
}

impl Badge {
    /// Creates a badge with the given clearance level.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self { level }
    }

    /// Consumes the badge, returning its level.
    #[must_use]
    pub fn into_level(self) -> u8 {
        self.level
    }

    #[allow(dead_code)]
    fn level(&self) -> u8 {
        self.level
    }
}
