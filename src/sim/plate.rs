//! Pressure plate: pressed while a ball sits on it

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressurePlate {
    pressed: bool,
}

impl PressurePlate {
    pub fn new(pressed: bool) -> Self {
        Self { pressed }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}
