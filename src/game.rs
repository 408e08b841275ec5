//! Frame-level game facade
//!
//! Owns the session, the live world and the knight, and runs one simulation
//! tick per rendered frame while the session is playing. Renderers, HUDs and
//! audio read from here; only the input layer drives it.

use glam::Vec2;

use crate::sim::{
    Enemy, GameEvent, GamePhase, Knight, KnightInput, Obstacle, Session, Terminal, TickInput,
    World, autopilot, tick,
};
use crate::tuning::Tuning;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub score_delta: u64,
    /// Set when the frame ended the session
    pub terminal: Option<Terminal>,
}

/// A running game
#[derive(Debug, Clone)]
pub struct Game {
    tuning: Tuning,
    seed: u64,
    /// Sessions started so far (varies the world seed per run)
    runs: u64,
    session: Session,
    world: World,
    knight: Knight,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let session = Session::new(tuning.session_seconds, tuning.knight_start);
        let knight = Knight::new(&tuning);
        Self {
            seed,
            runs: 0,
            session,
            world: World::new(seed),
            knight,
            tuning,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for scripted setups
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn knight(&self) -> &Knight {
        &self.knight
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.world.enemies()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.world.obstacles()
    }

    /// Fresh world and knight for a new run
    fn reset_world(&mut self) {
        self.runs += 1;
        let seed = self.seed.wrapping_add(self.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.world = World::new(seed);
        self.knight.reset(&self.tuning);
        log::debug!("World reset with seed {seed}");
    }

    pub fn start_game(&mut self) -> bool {
        let started = self.session.start_game();
        if started {
            self.reset_world();
        }
        started
    }

    pub fn restart_game(&mut self) -> bool {
        let restarted = self.session.restart_game();
        if restarted {
            self.reset_world();
        }
        restarted
    }

    pub fn go_to_menu(&mut self) -> bool {
        self.session.go_to_menu()
    }

    /// Teleport the knight (input layers that own movement themselves)
    pub fn set_knight_position(&mut self, pos: Vec2) {
        self.knight.pos = pos;
        self.session.set_knight_position(pos);
    }

    /// Buttons the demo autopilot would press this frame
    pub fn autopilot_input(&self) -> KnightInput {
        autopilot(&self.knight, &self.world, &self.tuning)
    }

    /// Advance one frame; does nothing unless playing
    pub fn frame(&mut self, dt: f32, input: &KnightInput) -> FrameReport {
        if !self.session.is_playing() {
            return FrameReport::default();
        }

        self.knight.update(input, dt, &self.tuning);
        self.session.set_knight_position(self.knight.pos);

        let report = tick(
            &mut self.world,
            &TickInput {
                knight_pos: self.knight.pos,
                knight_attacking: self.knight.is_attacking(),
                time_left: self.session.time_left(),
            },
            &self.tuning,
            dt,
        );

        self.session.add_score(report.score_delta);
        if let Some(time_left) = report.time_update {
            self.session.set_time_left(time_left);
        }
        match report.terminal {
            Some(Terminal::Victory) => {
                self.session.set_victory();
            }
            Some(Terminal::GameOver) => {
                self.session.end_game();
            }
            None => {}
        }

        FrameReport {
            events: report.events,
            score_delta: report.score_delta,
            terminal: report.terminal,
        }
    }
}
