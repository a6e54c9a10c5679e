//! Board objects and their capability dispatch
//!
//! Every object on the board is a `LevelObject`: common identity (id, cell, dye)
//! plus one concrete `ObjectKind`. Listener capabilities are fixed per kind, so
//! broadcasts dispatch with a single `match` instead of runtime type tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::arrow::Arrow;
use super::ball::Ball;
use super::gate::Gate;
use super::plate::PressurePlate;
use crate::consts::*;
use crate::dye::Dye;
use crate::geom::{Direction, GridPoint};

/// Stable handle of an object inside a `Level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Id carried by objects that have not been added to a level yet
    pub const UNASSIGNED: ObjectId = ObjectId(0);
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload of a dye-scoped broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Rotate arrows of the signalled dye
    Turn,
    /// Pressure plate of the signalled dye was pressed (true) or released (false)
    Pressed(bool),
}

/// Follow-up requested by a movement listener, applied by the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Redirect { ball: ObjectId, direction: Direction },
    Signal { dye: Dye, signal: Signal },
}

/// Target pedestal: marks the cell a ball of the same dye must rest on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pedestal;

/// Concrete object behaviour
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Ball(Ball),
    Arrow(Arrow),
    PressurePlate(PressurePlate),
    Pedestal(Pedestal),
    Gate(Gate),
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Ball(_) => "ball",
            ObjectKind::Arrow(_) => "arrow",
            ObjectKind::PressurePlate(_) => "pressure_plate",
            ObjectKind::Pedestal(_) => "pedestal",
            ObjectKind::Gate(_) => "gate",
        }
    }
}

/// An entity occupying one board cell
#[derive(Debug, Clone, PartialEq)]
pub struct LevelObject {
    id: ObjectId,
    position: GridPoint,
    dye: Dye,
    kind: ObjectKind,
}

impl LevelObject {
    pub fn new(position: GridPoint, dye: Dye, kind: ObjectKind) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            position,
            dye,
            kind,
        }
    }

    pub fn ball(position: GridPoint, dye: Dye) -> Self {
        Self::new(position, dye, ObjectKind::Ball(Ball::default()))
    }

    pub fn arrow(position: GridPoint, dye: Dye, arrow: Arrow) -> Self {
        Self::new(position, dye, ObjectKind::Arrow(arrow))
    }

    pub fn pressure_plate(position: GridPoint, dye: Dye) -> Self {
        Self::new(position, dye, ObjectKind::PressurePlate(PressurePlate::default()))
    }

    pub fn pedestal(position: GridPoint, dye: Dye) -> Self {
        Self::new(position, dye, ObjectKind::Pedestal(Pedestal))
    }

    pub fn gate(position: GridPoint, dye: Dye, open: bool) -> Self {
        Self::new(position, dye, ObjectKind::Gate(Gate::new(open)))
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: GridPoint) {
        self.position = position;
    }

    pub fn dye(&self) -> Dye {
        self.dye
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Initial placement order key (lower values are inserted first on restore)
    pub fn depth(&self) -> i32 {
        match self.kind {
            ObjectKind::Pedestal(_) => PEDESTAL_DEPTH,
            ObjectKind::PressurePlate(_) => PLATE_DEPTH,
            ObjectKind::Gate(_) => GATE_DEPTH,
            ObjectKind::Arrow(_) => ARROW_DEPTH,
            ObjectKind::Ball(_) => BALL_DEPTH,
        }
    }

    /// Whether this object lets a ball into `cell`
    pub fn is_passable(&self, cell: GridPoint) -> bool {
        match &self.kind {
            ObjectKind::Arrow(_) | ObjectKind::PressurePlate(_) | ObjectKind::Pedestal(_) => true,
            ObjectKind::Gate(gate) => gate.is_open() || cell != self.position,
            ObjectKind::Ball(_) => cell != self.position,
        }
    }

    pub fn is_movement_listener(&self) -> bool {
        matches!(
            self.kind,
            ObjectKind::Arrow(_) | ObjectKind::PressurePlate(_)
        )
    }

    pub fn is_signal_listener(&self) -> bool {
        matches!(self.kind, ObjectKind::Arrow(_) | ObjectKind::Gate(_))
    }

    pub(crate) fn ball_entered(&mut self, ball: ObjectId, cell: GridPoint) -> Option<Effect> {
        if cell != self.position {
            return None;
        }
        match &mut self.kind {
            ObjectKind::Arrow(arrow) => Some(Effect::Redirect {
                ball,
                direction: arrow.direction(),
            }),
            ObjectKind::PressurePlate(plate) => {
                plate.set_pressed(true);
                Some(Effect::Signal {
                    dye: self.dye,
                    signal: Signal::Pressed(true),
                })
            }
            _ => None,
        }
    }

    pub(crate) fn ball_left(&mut self, _ball: ObjectId, cell: GridPoint) -> Option<Effect> {
        if cell != self.position {
            return None;
        }
        match &mut self.kind {
            ObjectKind::PressurePlate(plate) => {
                plate.set_pressed(false);
                Some(Effect::Signal {
                    dye: self.dye,
                    signal: Signal::Pressed(false),
                })
            }
            _ => None,
        }
    }

    pub fn accepts(&self, dye: Dye, signal: Signal) -> bool {
        if dye != self.dye {
            return false;
        }
        match self.kind {
            ObjectKind::Arrow(_) => signal == Signal::Turn,
            ObjectKind::Gate(_) => matches!(signal, Signal::Pressed(_)),
            _ => false,
        }
    }

    pub(crate) fn on_signal(&mut self, signal: Signal) {
        match &mut self.kind {
            ObjectKind::Arrow(arrow) => arrow.on_signal(signal),
            ObjectKind::Gate(gate) => gate.on_signal(signal),
            _ => {}
        }
    }

    /// Editor tweak: arrows advance their facing by one step, others ignore it
    pub fn change_parameter(&mut self) {
        if let ObjectKind::Arrow(arrow) = &mut self.kind {
            arrow.change_parameter();
        }
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match &self.kind {
            ObjectKind::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub(crate) fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match &mut self.kind {
            ObjectKind::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_arrow(&self) -> Option<&Arrow> {
        match &self.kind {
            ObjectKind::Arrow(arrow) => Some(arrow),
            _ => None,
        }
    }

    pub fn as_plate(&self) -> Option<&PressurePlate> {
        match &self.kind {
            ObjectKind::PressurePlate(plate) => Some(plate),
            _ => None,
        }
    }

    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            ObjectKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    pub fn is_pedestal(&self) -> bool {
        matches!(self.kind, ObjectKind::Pedestal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_passability() {
        let ball = LevelObject::ball(GridPoint::new(1, 1), Dye::Red);
        assert!(!ball.is_passable(GridPoint::new(1, 1)));
        assert!(ball.is_passable(GridPoint::new(1, 2)));

        let plate = LevelObject::pressure_plate(GridPoint::new(1, 1), Dye::Red);
        assert!(plate.is_passable(GridPoint::new(1, 1)));

        let gate = LevelObject::gate(GridPoint::new(1, 1), Dye::Red, false);
        assert!(!gate.is_passable(GridPoint::new(1, 1)));
    }

    #[test]
    fn test_capabilities() {
        let arrow = LevelObject::arrow(
            GridPoint::new(0, 0),
            Dye::Green,
            Arrow::new(Direction::Top, 1).unwrap(),
        );
        assert!(arrow.is_movement_listener());
        assert!(arrow.is_signal_listener());
        assert!(arrow.accepts(Dye::Green, Signal::Turn));
        assert!(!arrow.accepts(Dye::Red, Signal::Turn));
        assert!(!arrow.accepts(Dye::Green, Signal::Pressed(true)));

        let pedestal = LevelObject::pedestal(GridPoint::new(0, 0), Dye::Green);
        assert!(!pedestal.is_movement_listener());
        assert!(!pedestal.is_signal_listener());
    }

    #[test]
    fn test_events_only_fire_on_own_cell() {
        let mut plate = LevelObject::pressure_plate(GridPoint::new(2, 2), Dye::Blue);
        assert_eq!(plate.ball_entered(ObjectId(1), GridPoint::new(2, 3)), None);
        assert_eq!(
            plate.ball_entered(ObjectId(1), GridPoint::new(2, 2)),
            Some(Effect::Signal {
                dye: Dye::Blue,
                signal: Signal::Pressed(true)
            })
        );
        assert!(plate.as_plate().unwrap().is_pressed());
    }
}
