//! Plain-data snapshots of a level, used for save/restore and restart
//!
//! A snapshot shares no state with the level it was captured from. Restoring
//! builds a brand new `Level`, so a failed restore never touches a live one.

use serde::{Deserialize, Serialize};

use super::arrow::Arrow;
use super::ball::Ball;
use super::gate::Gate;
use super::level::Level;
use super::object::{LevelObject, ObjectKind, Pedestal};
use super::plate::PressurePlate;
use crate::dye::Dye;
use crate::error::{Error, Result};
use crate::geom::{Direction, GridPoint};

/// Snapshot of one board object, tagged by concrete type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectSnapshot {
    Ball {
        dye: Dye,
        column: i32,
        row: i32,
    },
    Arrow {
        dye: Dye,
        column: i32,
        row: i32,
        direction: Direction,
        rotation_speed: i32,
    },
    PressurePlate {
        dye: Dye,
        column: i32,
        row: i32,
        #[serde(default)]
        pressed: bool,
    },
    Pedestal {
        dye: Dye,
        column: i32,
        row: i32,
    },
    Gate {
        dye: Dye,
        column: i32,
        row: i32,
        #[serde(default)]
        open: bool,
    },
}

impl ObjectSnapshot {
    pub fn dye(&self) -> Dye {
        match *self {
            ObjectSnapshot::Ball { dye, .. }
            | ObjectSnapshot::Arrow { dye, .. }
            | ObjectSnapshot::PressurePlate { dye, .. }
            | ObjectSnapshot::Pedestal { dye, .. }
            | ObjectSnapshot::Gate { dye, .. } => dye,
        }
    }

    pub fn position(&self) -> GridPoint {
        match *self {
            ObjectSnapshot::Ball { column, row, .. }
            | ObjectSnapshot::Arrow { column, row, .. }
            | ObjectSnapshot::PressurePlate { column, row, .. }
            | ObjectSnapshot::Pedestal { column, row, .. }
            | ObjectSnapshot::Gate { column, row, .. } => GridPoint::new(column, row),
        }
    }

    /// Same snapshot moved to `cell`
    pub fn at(&self, cell: GridPoint) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            ObjectSnapshot::Ball { column, row, .. }
            | ObjectSnapshot::Arrow { column, row, .. }
            | ObjectSnapshot::PressurePlate { column, row, .. }
            | ObjectSnapshot::Pedestal { column, row, .. }
            | ObjectSnapshot::Gate { column, row, .. } => {
                *column = cell.column;
                *row = cell.row;
            }
        }
        moved
    }

    /// Construct the live object this snapshot describes
    pub fn build(&self) -> Result<LevelObject> {
        let position = self.position();
        let dye = self.dye();
        let kind = match *self {
            ObjectSnapshot::Ball { .. } => ObjectKind::Ball(Ball::default()),
            ObjectSnapshot::Arrow {
                direction,
                rotation_speed,
                ..
            } => ObjectKind::Arrow(Arrow::new(direction, rotation_speed)?),
            ObjectSnapshot::PressurePlate { pressed, .. } => {
                ObjectKind::PressurePlate(PressurePlate::new(pressed))
            }
            ObjectSnapshot::Pedestal { .. } => ObjectKind::Pedestal(Pedestal),
            ObjectSnapshot::Gate { open, .. } => ObjectKind::Gate(Gate::new(open)),
        };
        Ok(LevelObject::new(position, dye, kind))
    }
}

impl LevelObject {
    pub fn snapshot(&self) -> ObjectSnapshot {
        let GridPoint { column, row } = self.position();
        let dye = self.dye();
        match self.kind() {
            ObjectKind::Ball(_) => ObjectSnapshot::Ball { dye, column, row },
            ObjectKind::Arrow(arrow) => ObjectSnapshot::Arrow {
                dye,
                column,
                row,
                direction: arrow.direction(),
                rotation_speed: arrow.rotation_speed(),
            },
            ObjectKind::PressurePlate(plate) => ObjectSnapshot::PressurePlate {
                dye,
                column,
                row,
                pressed: plate.is_pressed(),
            },
            ObjectKind::Pedestal(_) => ObjectSnapshot::Pedestal { dye, column, row },
            ObjectKind::Gate(gate) => ObjectSnapshot::Gate {
                dye,
                column,
                row,
                open: gate.is_open(),
            },
        }
    }
}

/// Snapshot of a whole level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub columns: i32,
    pub rows: i32,
    /// `[column][row]`, true = passable terrain
    pub passable: Vec<Vec<bool>>,
    pub entry: GridPoint,
    pub exit: GridPoint,
    pub objects: Vec<ObjectSnapshot>,
}

impl LevelSnapshot {
    pub fn capture(level: &Level) -> Self {
        Self {
            columns: level.columns(),
            rows: level.rows(),
            passable: level.passable_mask().to_vec(),
            entry: level.entry(),
            exit: level.exit(),
            objects: level.objects().iter().map(LevelObject::snapshot).collect(),
        }
    }

    /// Build a fresh level. Objects are inserted ordered by depth; equal depths
    /// keep their captured order.
    pub fn restore(&self) -> Result<Level> {
        let mut level = Level::with_mask(
            self.columns,
            self.rows,
            self.entry,
            self.exit,
            self.passable.clone(),
        )?;

        let mut objects = Vec::with_capacity(self.objects.len());
        for snapshot in &self.objects {
            let object = snapshot.build()?;
            if !level.is_on_board(object.position()) {
                return Err(Error::OffBoard(object.position()));
            }
            objects.push(object);
        }
        objects.sort_by_key(LevelObject::depth);

        for object in objects {
            level.add_object(object);
        }
        Ok(level)
    }
}

impl Level {
    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot::capture(self)
    }

    pub fn from_snapshot(snapshot: &LevelSnapshot) -> Result<Level> {
        snapshot.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> Level {
        let mut level = Level::new(5, 4, GridPoint::new(0, 0), GridPoint::new(4, 3)).unwrap();
        level.set_passable(GridPoint::new(2, 2), false).unwrap();
        level.add_object(LevelObject::ball(GridPoint::new(1, 1), Dye::Red));
        level.add_object(LevelObject::arrow(
            GridPoint::new(3, 1),
            Dye::Green,
            Arrow::new(Direction::Left, 3).unwrap(),
        ));
        level.add_object(LevelObject::pedestal(GridPoint::new(1, 3), Dye::Red));
        level.add_object(LevelObject::pressure_plate(GridPoint::new(2, 1), Dye::Blue));
        level.add_object(LevelObject::gate(GridPoint::new(3, 3), Dye::Blue, true));
        level
    }

    #[test]
    fn test_round_trip_preserves_board() {
        let level = sample_level();
        let restored = level.snapshot().restore().unwrap();

        assert_eq!(restored.columns(), level.columns());
        assert_eq!(restored.rows(), level.rows());
        assert_eq!(restored.passable_mask(), level.passable_mask());
        assert_eq!(restored.entry(), level.entry());
        assert_eq!(restored.exit(), level.exit());

        let mut before: Vec<_> = level.objects().iter().map(LevelObject::snapshot).collect();
        let mut after: Vec<_> = restored.objects().iter().map(LevelObject::snapshot).collect();
        let key = |s: &ObjectSnapshot| (s.position().column, s.position().row);
        before.sort_by_key(key);
        after.sort_by_key(key);
        assert_eq!(before, after);
    }

    #[test]
    fn test_restore_orders_by_depth() {
        let level = sample_level();
        let restored = level.snapshot().restore().unwrap();
        let depths: Vec<i32> = restored.objects().iter().map(LevelObject::depth).collect();
        let mut sorted = depths.clone();
        sorted.sort();
        assert_eq!(depths, sorted);
        // Ball goes last even though it was added first
        assert!(restored.objects().last().unwrap().as_ball().is_some());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut level = sample_level();
        let snapshot = level.snapshot();
        level.set_passable(GridPoint::new(1, 2), false).unwrap();
        assert!(snapshot.passable[1][2]);
    }

    #[test]
    fn test_restore_rejects_malformed() {
        let mut snapshot = sample_level().snapshot();
        snapshot.passable.pop();
        assert!(matches!(snapshot.restore(), Err(Error::MaskMismatch { .. })));

        let mut snapshot = sample_level().snapshot();
        snapshot.objects.push(ObjectSnapshot::Ball {
            dye: Dye::Red,
            column: 9,
            row: 0,
        });
        assert!(matches!(snapshot.restore(), Err(Error::OffBoard(_))));

        let mut snapshot = sample_level().snapshot();
        snapshot.objects.push(ObjectSnapshot::Arrow {
            dye: Dye::Red,
            column: 1,
            row: 0,
            direction: Direction::None,
            rotation_speed: 1,
        });
        assert!(matches!(snapshot.restore(), Err(Error::NoneDirection)));

        let mut snapshot = sample_level().snapshot();
        snapshot.exit = snapshot.entry;
        assert!(matches!(
            snapshot.restore(),
            Err(Error::SameEntryAndExit(_))
        ));
    }

    #[test]
    fn test_restore_rejects_mask_smaller_than_declared() {
        let mut snapshot = sample_level().snapshot();
        snapshot.columns = 2_000_000_000;
        snapshot.rows = 2_000_000_000;
        snapshot.passable.clear();
        assert!(matches!(
            snapshot.restore(),
            Err(Error::MaskMismatch {
                found_columns: 0,
                found_rows: 0,
                ..
            })
        ));

        let mut snapshot = sample_level().snapshot();
        snapshot.columns = 3;
        snapshot.rows = 3;
        snapshot.passable = vec![vec![true; 2]; 2];
        snapshot.objects.clear();
        snapshot.exit = GridPoint::new(1, 1);
        assert!(matches!(snapshot.restore(), Err(Error::MaskMismatch { .. })));

        let mut snapshot = sample_level().snapshot();
        snapshot.passable[3].pop();
        assert!(matches!(snapshot.restore(), Err(Error::MaskMismatch { .. })));

        let mut snapshot = sample_level().snapshot();
        snapshot.columns = -5;
        assert!(matches!(
            snapshot.restore(),
            Err(Error::InvalidDimensions { columns: -5, .. })
        ));
    }

    #[test]
    fn test_tagged_json_shape() {
        let json = serde_json::to_value(ObjectSnapshot::Arrow {
            dye: Dye::Green,
            column: 1,
            row: 2,
            direction: Direction::Top,
            rotation_speed: 1,
        })
        .unwrap();
        assert_eq!(json["type"], "arrow");
        assert_eq!(json["direction"], "Top");

        let plate: ObjectSnapshot =
            serde_json::from_str(r#"{"type":"pressure_plate","dye":"Blue","column":0,"row":1}"#)
                .unwrap();
        assert_eq!(
            plate,
            ObjectSnapshot::PressurePlate {
                dye: Dye::Blue,
                column: 0,
                row: 1,
                pressed: false
            }
        );
    }
}
