//! Gate: blocks its cell unless held open by a same-dye pressure plate

use super::object::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gate {
    open: bool,
}

impl Gate {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn on_signal(&mut self, signal: Signal) {
        if let Signal::Pressed(pressed) = signal {
            self.open = pressed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_plate() {
        let mut gate = Gate::default();
        gate.on_signal(Signal::Pressed(true));
        assert!(gate.is_open());
        gate.on_signal(Signal::Turn);
        assert!(gate.is_open());
        gate.on_signal(Signal::Pressed(false));
        assert!(!gate.is_open());
    }
}
