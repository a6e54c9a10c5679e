//! Game session: fixed timestep driver around a level, with restart

use crate::consts::{MAX_FRAME_DT, SIM_DT};
use crate::error::Result;
use crate::geom::Direction;
use crate::settings::Settings;
use crate::sim::{Level, LevelEvent, LevelSnapshot, ObjectId, TickInput, is_solvable, tick};

/// A level being played
#[derive(Debug)]
pub struct Game {
    level: Level,
    /// State the level is rebuilt from on restart
    initial: LevelSnapshot,
    settings: Settings,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    pub fn new(mut level: Level, settings: Settings) -> Self {
        level.set_ball_speed(settings.ball_speed);
        let initial = level.snapshot();
        Self {
            level,
            initial,
            settings,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    pub fn from_snapshot(snapshot: &LevelSnapshot, settings: Settings) -> Result<Self> {
        Ok(Self::new(snapshot.restore()?, settings))
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Queue a flick for the next tick
    pub fn queue_move(&mut self, ball: ObjectId, direction: Direction) {
        self.input.moves.push((ball, direction));
    }

    /// Queue a tap on an object for the next tick
    pub fn queue_activation(&mut self, object: ObjectId) {
        self.input.activations.push(object);
    }

    /// Run fixed ticks for `frame_dt` seconds of wall time, returning how many ran
    pub fn update(&mut self, frame_dt: f32) -> Result<u32> {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.settings.max_substeps {
            let result = tick(&mut self.level, &self.input, SIM_DT);
            // One-shot inputs are consumed by the first tick, even when it fails
            self.input.clear();
            result?;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        Ok(substeps)
    }

    /// Rebuild the level from its initial state
    pub fn restart(&mut self) -> Result<()> {
        let mut level = self.initial.restore()?;
        level.set_ball_speed(self.settings.ball_speed);
        self.level = level;
        self.accumulator = 0.0;
        self.input.clear();
        log::info!("Level restarted");
        Ok(())
    }

    /// Take the events produced since the last call. The level keeps only
    /// the most recent ones if nobody drains them.
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        self.level.drain_events()
    }

    pub fn is_solved(&self) -> bool {
        self.level.is_solved()
    }

    /// Editor warning: can the exit still be reached from the entry
    pub fn exit_reachable(&self) -> bool {
        is_solvable(&self.level)
    }
}
