use ftr_core::palette::{Color, ORANGE, YELLOW};
use glam::Vec3;

/// Ticks in one on/off cycle; the light is on for the first half.
pub const BLINK_PERIOD: u32 = 20;
/// Ticks a blinker keeps flashing after it is started.
pub const BLINK_DURATION: u32 = 100;
pub const IDLE_COLOR: Color = ORANGE;
pub const FLASH_COLOR: Color = YELLOW;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blinker {
    pub position: Vec3,
    pub color: Color,
    pub blinking: bool,
    pub blink_count: u32,
}

impl Blinker {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: IDLE_COLOR,
            blinking: false,
            blink_count: 0,
        }
    }

    /// Restart the flashing sequence from the beginning.
    pub fn start(&mut self) {
        self.blinking = true;
        self.blink_count = 0;
    }

    pub fn tick(&mut self) {
        if !self.blinking {
            return;
        }
        self.blink_count += 1;
        self.color = if self.blink_count % BLINK_PERIOD < BLINK_PERIOD / 2 {
            FLASH_COLOR
        } else {
            IDLE_COLOR
        };
        if self.blink_count >= BLINK_DURATION {
            self.blinking = false;
            self.blink_count = 0;
            self.color = IDLE_COLOR;
        }
    }
}
