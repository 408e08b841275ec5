//! Game session state machine
//!
//! ```text
//! Menu --start--> Playing --timer hits 0--> Victory
//!                    |
//!                    +--fatal collision--> GameOver
//! GameOver | Victory --restart--> Playing
//! Playing | GameOver | Victory --go_to_menu--> Menu
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{KNIGHT_START, SESSION_SECONDS};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Title screen
    Menu,
    /// Active gameplay
    Playing,
    /// Knight was hit
    GameOver,
    /// Knight survived the full countdown
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Score, countdown and knight position for one play-through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    phase: GamePhase,
    score: u64,
    time_left: u32,
    knight_position: Vec2,
    /// Countdown length restored on start/restart
    session_seconds: u32,
    /// Knight position restored on start/restart
    knight_start: Vec2,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SESSION_SECONDS, KNIGHT_START)
    }
}

impl Session {
    /// Create a session sitting at the menu
    pub fn new(session_seconds: u32, knight_start: Vec2) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            time_left: session_seconds,
            knight_position: knight_start,
            session_seconds,
            knight_start,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn knight_position(&self) -> Vec2 {
        self.knight_position
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Normalized progress through the countdown (0 at start, 1 at the end)
    pub fn progress(&self) -> f32 {
        super::tick::progress(self.time_left, self.session_seconds)
    }

    fn reset_and_play(&mut self) {
        self.score = 0;
        self.time_left = self.session_seconds;
        self.knight_position = self.knight_start;
        self.phase = GamePhase::Playing;
    }

    /// Menu -> Playing. Returns false if not at the menu.
    pub fn start_game(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("start_game ignored in {:?}", self.phase);
            return false;
        }
        self.reset_and_play();
        log::info!("Session started ({}s countdown)", self.time_left);
        true
    }

    /// GameOver | Victory -> Playing with a full reset
    pub fn restart_game(&mut self) -> bool {
        if !self.phase.is_terminal() {
            log::debug!("restart_game ignored in {:?}", self.phase);
            return false;
        }
        self.reset_and_play();
        log::info!("Session restarted");
        true
    }

    /// Any non-menu phase -> Menu
    pub fn go_to_menu(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            return false;
        }
        self.phase = GamePhase::Menu;
        log::info!("Returned to menu (score {})", self.score);
        true
    }

    /// Playing -> GameOver. Repeated calls are no-ops.
    pub fn end_game(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over with {} points, {}s left", self.score, self.time_left);
        true
    }

    /// Playing -> Victory
    pub fn set_victory(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Victory;
        log::info!("Victory with {} points", self.score);
        true
    }

    /// Add points; ignored outside of play
    pub fn add_score(&mut self, points: u64) {
        if self.is_playing() {
            self.score = self.score.saturating_add(points);
        }
    }

    pub fn set_time_left(&mut self, seconds: u32) {
        self.time_left = seconds;
    }

    pub fn set_knight_position(&mut self, pos: Vec2) {
        self.knight_position = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), 120);
        assert_eq!(session.knight_position(), Vec2::new(-6.0, 0.0));
    }

    #[test]
    fn test_start_from_menu_only() {
        let mut session = Session::default();
        assert!(session.start_game());
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(!session.start_game());
    }

    #[test]
    fn test_restart_resets_everything() {
        for terminal in [GamePhase::GameOver, GamePhase::Victory] {
            let mut session = Session::default();
            session.start_game();
            session.add_score(700);
            session.set_time_left(13);
            session.set_knight_position(Vec2::new(-6.0, 1.8));
            match terminal {
                GamePhase::GameOver => assert!(session.end_game()),
                _ => assert!(session.set_victory()),
            }
            assert_eq!(session.phase(), terminal);

            assert!(session.restart_game());
            assert_eq!(session.phase(), GamePhase::Playing);
            assert_eq!(session.score(), 0);
            assert_eq!(session.time_left(), 120);
            assert_eq!(session.knight_position(), Vec2::new(-6.0, 0.0));
        }
    }

    #[test]
    fn test_restart_needs_terminal_state() {
        let mut session = Session::default();
        assert!(!session.restart_game());
        session.start_game();
        assert!(!session.restart_game());
    }

    #[test]
    fn test_terminal_transitions_only_from_playing() {
        let mut session = Session::default();
        assert!(!session.end_game());
        assert!(!session.set_victory());

        session.start_game();
        assert!(session.end_game());
        assert!(!session.end_game());
        assert!(!session.set_victory());
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_go_to_menu() {
        let mut session = Session::default();
        assert!(!session.go_to_menu());

        session.start_game();
        assert!(session.go_to_menu());
        assert_eq!(session.phase(), GamePhase::Menu);

        session.start_game();
        session.set_victory();
        assert!(session.go_to_menu());
        assert_eq!(session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_score_only_accumulates_while_playing() {
        let mut session = Session::default();
        session.add_score(100);
        assert_eq!(session.score(), 0);

        session.start_game();
        session.add_score(100);
        session.add_score(300);
        assert_eq!(session.score(), 400);

        session.end_game();
        session.add_score(100);
        assert_eq!(session.score(), 400);
    }

    #[test]
    fn test_progress() {
        let mut session = Session::default();
        assert_eq!(session.progress(), 0.0);
        session.set_time_left(60);
        assert_eq!(session.progress(), 0.5);
        session.set_time_left(0);
        assert_eq!(session.progress(), 1.0);
    }
}
