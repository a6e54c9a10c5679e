//! Editor brushes: one prototype object per type, stamped onto cells

use super::level::Level;
use super::object::ObjectId;
use super::snapshot::ObjectSnapshot;
use crate::dye::Dye;
use crate::error::{Error, Result};
use crate::geom::{Direction, GridPoint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    prototype: ObjectSnapshot,
}

impl Brush {
    pub fn new(prototype: ObjectSnapshot) -> Self {
        Self { prototype }
    }

    /// Default brush for every object type
    pub fn palette() -> Vec<Brush> {
        let (column, row) = (0, 0);
        vec![
            Brush::new(ObjectSnapshot::Ball {
                dye: Dye::Red,
                column,
                row,
            }),
            Brush::new(ObjectSnapshot::Arrow {
                dye: Dye::Green,
                column,
                row,
                direction: Direction::Top,
                rotation_speed: 1,
            }),
            Brush::new(ObjectSnapshot::PressurePlate {
                dye: Dye::Blue,
                column,
                row,
                pressed: false,
            }),
            Brush::new(ObjectSnapshot::Pedestal {
                dye: Dye::Red,
                column,
                row,
            }),
            Brush::new(ObjectSnapshot::Gate {
                dye: Dye::Blue,
                column,
                row,
                open: false,
            }),
        ]
    }

    pub fn prototype(&self) -> &ObjectSnapshot {
        &self.prototype
    }

    /// Replace whatever sits at `cell` with a copy of the prototype
    pub fn paint(&self, level: &mut Level, cell: GridPoint) -> Result<ObjectId> {
        if !level.is_on_board(cell) {
            return Err(Error::OffBoard(cell));
        }
        let object = self.prototype.at(cell).build()?;
        Brush::erase(level, cell);
        Ok(level.add_object(object))
    }

    /// Remove every object at `cell`, returning how many were removed
    pub fn erase(level: &mut Level, cell: GridPoint) -> usize {
        let mut removed = 0;
        while level.remove_object_at(cell).is_some() {
            removed += 1;
        }
        removed
    }
}
