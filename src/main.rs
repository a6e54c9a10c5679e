//! Don't Touch It headless runner
//!
//! Loads a level file (or builds a demo board), plays a scripted series of
//! flicks through the fixed timestep driver and logs what happens.

use dont_touch_it::sim::{Arrow, Level, LevelEvent, LevelObject};
use dont_touch_it::{Direction, Dye, Game, GridPoint, Result, Settings, persistence};

/// Frame time fed to the driver (60 fps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames to wait for each flick to settle
const SETTLE_FRAMES: u32 = 600;

fn demo_level() -> Result<Level> {
    let mut level = Level::new(7, 5, GridPoint::new(0, 0), GridPoint::new(6, 4))?;
    level.set_passable(GridPoint::new(3, 0), false)?;
    level.add_object(LevelObject::pedestal(GridPoint::new(5, 3), Dye::Red));
    level.add_object(LevelObject::arrow(
        GridPoint::new(5, 1),
        Dye::Green,
        Arrow::new(Direction::Top, 1)?,
    ));
    level.add_object(LevelObject::pressure_plate(GridPoint::new(2, 3), Dye::Blue));
    level.add_object(LevelObject::gate(GridPoint::new(4, 4), Dye::Blue, false));
    level.add_object(LevelObject::ball(GridPoint::new(1, 1), Dye::Red));
    Ok(level)
}

fn run() -> Result<()> {
    let settings = Settings::load("settings.json");
    let level = match std::env::args().nth(1) {
        Some(path) => persistence::load_level(path)?,
        None => demo_level()?,
    };
    let mut game = Game::new(level, settings);
    log::info!(
        "Exit reachable from entry: {}",
        if game.exit_reachable() { "yes" } else { "no" }
    );

    let Some(ball) = game.level().balls().next().map(LevelObject::id) else {
        log::warn!("Level has no balls");
        return Ok(());
    };

    for direction in [Direction::Right, Direction::Top, Direction::Left, Direction::Bottom] {
        game.queue_move(ball, direction);
        let mut frames = 0;
        loop {
            game.update(FRAME_DT)?;
            frames += 1;
            if !game.level().is_in_action() || frames >= SETTLE_FRAMES {
                break;
            }
        }
        for event in game.drain_events() {
            match event {
                LevelEvent::HitObstacle { cell, wall, .. } => {
                    log::info!("stopped before {} ({})", cell, if wall { "wall" } else { "object" })
                }
                LevelEvent::Signal { dye, signal } => {
                    log::info!("signal {:?} on {}", signal, dye.as_str())
                }
                other => log::debug!("{:?}", other),
            }
        }
        let position = game.level().object(ball).map(LevelObject::position);
        log::info!("flick {:?} -> ball at {:?}", direction, position);
        if game.is_solved() {
            log::info!("Solved!");
            break;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Don't Touch It (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
