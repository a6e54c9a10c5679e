//! Level: board geometry, object ownership, the action lock and event fan-out
//!
//! Only one ball may be in flight at a time. The lock is an explicit field
//! holding the id of the moving object, so listeners triggered during a slide
//! never have to resolve a second mover.

use super::ball::Ball;
use super::object::{Effect, LevelObject, ObjectId, Signal};
use crate::consts::MAX_EVENTS;
use crate::dye::Dye;
use crate::error::{Error, Result};
use crate::geom::{Direction, GridPoint};

/// Something that happened on the board, recorded for the render/telemetry layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    ActionStarted(ObjectId),
    ActionStopped(ObjectId),
    BallLeft { ball: ObjectId, cell: GridPoint },
    BallEntered { ball: ObjectId, cell: GridPoint },
    Signal { dye: Dye, signal: Signal },
    /// Ball stopped in front of `cell`; `wall` is true when the terrain blocked it
    HitObstacle {
        ball: ObjectId,
        cell: GridPoint,
        wall: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Level {
    columns: i32,
    rows: i32,
    /// Terrain passability, indexed `[column][row]`
    passable: Vec<Vec<bool>>,
    entry: GridPoint,
    exit: GridPoint,
    /// Insertion order is broadcast order
    objects: Vec<LevelObject>,
    /// Holder of the single-action lock
    action: Option<ObjectId>,
    events: Vec<LevelEvent>,
    next_id: u32,
}

impl Level {
    /// Create an empty level. Entry and exit cells start out impassable so balls
    /// cannot roll onto them.
    pub fn new(columns: i32, rows: i32, entry: GridPoint, exit: GridPoint) -> Result<Self> {
        if columns <= 0 || rows <= 0 {
            return Err(Error::InvalidDimensions { columns, rows });
        }
        if entry == exit {
            return Err(Error::SameEntryAndExit(entry));
        }
        let mask = vec![vec![true; rows as usize]; columns as usize];
        let mut level = Self::with_mask(columns, rows, entry, exit, mask)?;
        level.set_passable(entry, false)?;
        level.set_passable(exit, false)?;
        Ok(level)
    }

    /// Create an empty level over an existing terrain mask (`[column][row]`).
    /// The mask must already be `columns x rows`; nothing is allocated from the
    /// declared dimensions.
    pub fn with_mask(
        columns: i32,
        rows: i32,
        entry: GridPoint,
        exit: GridPoint,
        passable: Vec<Vec<bool>>,
    ) -> Result<Self> {
        if columns <= 0 || rows <= 0 {
            return Err(Error::InvalidDimensions { columns, rows });
        }
        if entry == exit {
            return Err(Error::SameEntryAndExit(entry));
        }
        if passable.len() != columns as usize
            || passable.iter().any(|column| column.len() != rows as usize)
        {
            return Err(Error::MaskMismatch {
                columns,
                rows,
                found_columns: passable.len(),
                found_rows: passable.first().map_or(0, Vec::len),
            });
        }
        let level = Self {
            columns,
            rows,
            passable,
            entry,
            exit,
            objects: Vec::new(),
            action: None,
            events: Vec::new(),
            next_id: 1,
        };
        for cell in [entry, exit] {
            if !level.is_on_board(cell) {
                return Err(Error::OffBoard(cell));
            }
        }
        Ok(level)
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn entry(&self) -> GridPoint {
        self.entry
    }

    pub fn exit(&self) -> GridPoint {
        self.exit
    }

    /// Terrain mask, `[column][row]`, true = passable
    pub fn passable_mask(&self) -> &[Vec<bool>] {
        &self.passable
    }

    // --- Spatial queries ---

    pub fn is_on_board(&self, cell: GridPoint) -> bool {
        cell.column >= 0 && cell.row >= 0 && cell.column < self.columns && cell.row < self.rows
    }

    /// Terrain passability; off-board cells are never passable
    pub fn is_passable(&self, cell: GridPoint) -> bool {
        self.is_on_board(cell) && self.passable[cell.column as usize][cell.row as usize]
    }

    pub fn set_passable(&mut self, cell: GridPoint, passable: bool) -> Result<()> {
        if !self.is_on_board(cell) {
            return Err(Error::OffBoard(cell));
        }
        self.passable[cell.column as usize][cell.row as usize] = passable;
        Ok(())
    }

    /// Flip terrain at `cell` (editor tap), returning the new value
    pub fn toggle_passable(&mut self, cell: GridPoint) -> Result<bool> {
        let passable = !self.is_passable(cell);
        self.set_passable(cell, passable)?;
        Ok(passable)
    }

    /// Passable terrain that every object also lets a ball into
    pub fn is_empty(&self, cell: GridPoint) -> bool {
        self.is_passable(cell) && self.objects.iter().all(|o| o.is_passable(cell))
    }

    /// Dye of the first pedestal at `cell`
    pub fn dye_at(&self, cell: GridPoint) -> Option<Dye> {
        self.objects
            .iter()
            .find(|o| o.position() == cell && o.is_pedestal())
            .map(LevelObject::dye)
    }

    // --- Object ownership ---

    /// Take ownership of `object` and append it to the broadcast order
    pub fn add_object(&mut self, mut object: LevelObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        object.set_id(id);
        self.objects.push(object);
        id
    }

    /// Remove an object; absent ids are ignored. Removing the lock holder
    /// releases the lock.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<LevelObject> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        if self.action == Some(id) {
            self.stop_action(id);
        }
        Some(self.objects.remove(index))
    }

    pub fn remove_object_at(&mut self, cell: GridPoint) -> Option<LevelObject> {
        let id = self.object_at(cell)?.id();
        self.remove_object(id)
    }

    /// Objects in insertion (broadcast) order
    pub fn objects(&self) -> &[LevelObject] {
        &self.objects
    }

    /// Objects in render order: by depth, ties kept in insertion order
    pub fn objects_by_depth(&self) -> Vec<&LevelObject> {
        let mut objects: Vec<&LevelObject> = self.objects.iter().collect();
        objects.sort_by_key(|o| o.depth());
        objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&LevelObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// First object (in insertion order) at `cell`
    pub fn object_at(&self, cell: GridPoint) -> Option<&LevelObject> {
        self.objects.iter().find(|o| o.position() == cell)
    }

    pub fn objects_at(&self, cell: GridPoint) -> impl Iterator<Item = &LevelObject> {
        self.objects.iter().filter(move |o| o.position() == cell)
    }

    pub fn balls(&self) -> impl Iterator<Item = &LevelObject> {
        self.objects.iter().filter(|o| o.as_ball().is_some())
    }

    /// Editor tweak of a single object (see `LevelObject::change_parameter`)
    pub fn change_parameter(&mut self, id: ObjectId) -> Result<()> {
        self.object_mut(id)?.change_parameter();
        Ok(())
    }

    pub fn set_ball_speed(&mut self, speed: f32) {
        for object in &mut self.objects {
            if let Some(ball) = object.as_ball_mut() {
                ball.set_speed(speed);
            }
        }
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut LevelObject> {
        self.objects
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(Error::UnknownObject(id))
    }

    fn ball_mut(&mut self, id: ObjectId) -> Result<&mut Ball> {
        self.object_mut(id)?
            .as_ball_mut()
            .ok_or(Error::NotABall(id))
    }

    pub fn ball(&self, id: ObjectId) -> Result<&Ball> {
        self.object(id)
            .ok_or(Error::UnknownObject(id))?
            .as_ball()
            .ok_or(Error::NotABall(id))
    }

    // --- Action lock ---

    /// Try to take the single-action lock. Returns false (and does nothing) if
    /// another action is already in flight.
    pub fn start_action(&mut self, requester: ObjectId) -> bool {
        if self.action.is_some() {
            return false;
        }
        self.before_action(requester);
        self.action = Some(requester);
        true
    }

    /// Release the lock if held; no-op otherwise
    pub fn stop_action(&mut self, requester: ObjectId) {
        if self.action.take().is_some() {
            self.after_action(requester);
        }
    }

    pub fn is_in_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn action_holder(&self) -> Option<ObjectId> {
        self.action
    }

    fn before_action(&mut self, requester: ObjectId) {
        log::trace!("action started by {}", requester);
        self.record(LevelEvent::ActionStarted(requester));
    }

    fn after_action(&mut self, requester: ObjectId) {
        log::trace!("action stopped by {}", requester);
        self.record(LevelEvent::ActionStopped(requester));
    }

    // --- Event fan-out ---

    /// Notify every movement listener that `ball` entered `cell`
    pub fn ball_entered(&mut self, ball: ObjectId, cell: GridPoint) -> Result<()> {
        self.record(LevelEvent::BallEntered { ball, cell });
        self.broadcast_movement(|object| object.ball_entered(ball, cell))
    }

    /// Notify every movement listener that `ball` left `cell`
    pub fn ball_left(&mut self, ball: ObjectId, cell: GridPoint) -> Result<()> {
        self.record(LevelEvent::BallLeft { ball, cell });
        self.broadcast_movement(|object| object.ball_left(ball, cell))
    }

    /// Every listener is notified even if applying an earlier effect failed;
    /// the first failure is returned afterwards.
    fn broadcast_movement(
        &mut self,
        mut notify: impl FnMut(&mut LevelObject) -> Option<Effect>,
    ) -> Result<()> {
        let mut first_error = None;
        for index in 0..self.objects.len() {
            if !self.objects[index].is_movement_listener() {
                continue;
            }
            let Some(effect) = notify(&mut self.objects[index]) else {
                continue;
            };
            if let Err(err) = self.apply(effect) {
                log::warn!("listener {} effect failed: {}", self.objects[index].id(), err);
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Broadcast a dye-scoped signal to every listener that accepts it
    pub fn change(&mut self, dye: Dye, signal: Signal) {
        log::debug!("signal {:?} on {}", signal, dye.as_str());
        self.record(LevelEvent::Signal { dye, signal });
        for object in &mut self.objects {
            if object.is_signal_listener() && object.accepts(dye, signal) {
                object.on_signal(signal);
            }
        }
    }

    fn apply(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::Redirect { ball, direction } => self.change_direction(ball, direction),
            Effect::Signal { dye, signal } => {
                self.change(dye, signal);
                Ok(())
            }
        }
    }

    /// Player tap on an object: arrows broadcast `Turn` on their dye.
    /// Returns whether anything was broadcast.
    pub fn activate(&mut self, id: ObjectId) -> Result<bool> {
        let object = self.object(id).ok_or(Error::UnknownObject(id))?;
        if object.as_arrow().is_none() {
            return Ok(false);
        }
        let dye = object.dye();
        self.change(dye, Signal::Turn);
        Ok(true)
    }

    // --- Ball motion ---

    /// Flick a resting ball. A moving ball, a blocked destination or a held lock
    /// make this a no-op returning `Ok(false)`.
    pub fn move_ball(&mut self, id: ObjectId, direction: Direction) -> Result<bool> {
        if direction.is_none() {
            return Err(Error::NoneDirection);
        }
        let object = self.object(id).ok_or(Error::UnknownObject(id))?;
        let ball = object.as_ball().ok_or(Error::NotABall(id))?;
        if ball.is_moving() {
            return Ok(false);
        }
        if !self.is_empty(object.position().step(direction)) {
            return Ok(false);
        }
        if !self.start_action(id) {
            return Ok(false);
        }
        self.ball_mut(id)?.start(direction);
        Ok(true)
    }

    /// Redirect a moving ball without stopping it
    pub fn change_direction(&mut self, id: ObjectId, direction: Direction) -> Result<()> {
        let ball = self.ball_mut(id)?;
        if !ball.is_moving() {
            return Err(Error::NotMoving(id));
        }
        if direction.is_none() {
            return Err(Error::NoneDirection);
        }
        ball.redirect(direction);
        Ok(())
    }

    /// Force a ball to rest and release the action lock if it holds it
    pub fn stop_ball(&mut self, id: ObjectId) -> Result<()> {
        self.ball_mut(id)?.halt();
        if self.action == Some(id) {
            self.stop_action(id);
        }
        Ok(())
    }

    /// A resting ball on a pedestal of its own dye
    pub fn is_in_hole(&self, id: ObjectId) -> bool {
        self.object(id).is_some_and(|object| {
            object.as_ball().is_some_and(|ball| !ball.is_moving())
                && self.dye_at(object.position()) == Some(object.dye())
        })
    }

    /// Every ball rests in its hole and nothing is moving
    pub fn is_solved(&self) -> bool {
        let mut balls = self.balls().peekable();
        balls.peek().is_some() && !self.is_in_action() && balls.all(|b| self.is_in_hole(b.id()))
    }

    /// Advance the in-flight ball by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        let Some(id) = self.action else {
            return Ok(());
        };
        let Some(ball) = self
            .objects
            .iter_mut()
            .find(|o| o.id() == id)
            .and_then(LevelObject::as_ball_mut)
        else {
            return Ok(());
        };
        if !ball.is_moving() {
            return Ok(());
        }
        ball.accumulate(dt);

        loop {
            let object = self.object_mut(id)?;
            let previous = object.position();
            let Some(step) = object.as_ball_mut().and_then(Ball::take_step) else {
                break;
            };
            let current = previous + step;
            object.set_position(current);

            self.ball_left(id, previous)?;
            self.ball_entered(id, current)?;

            let direction = self.ball(id)?.direction();
            if direction.is_none() {
                break;
            }
            let next = current.step(direction);
            if !self.is_empty(next) {
                self.hit_obstacle(id, next);
                self.stop_ball(id)?;
                break;
            }
        }
        Ok(())
    }

    fn hit_obstacle(&mut self, ball: ObjectId, cell: GridPoint) {
        let wall = !self.is_passable(cell);
        if wall {
            log::debug!("ball {} hits the wall at {}", ball, cell);
        } else {
            log::debug!("ball {} blocked by an object at {}", ball, cell);
        }
        self.record(LevelEvent::HitObstacle { ball, cell, wall });
    }

    // --- Events ---

    pub fn events(&self) -> &[LevelEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Append to the event log, dropping the oldest half once it is full
    fn record(&mut self, event: LevelEvent) {
        if self.events.len() >= MAX_EVENTS {
            self.events.drain(..MAX_EVENTS / 2);
        }
        self.events.push(event);
    }
}
