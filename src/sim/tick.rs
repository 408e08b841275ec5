//! Per-frame simulation tick
//!
//! Advances the countdown, spawns enemies and obstacles, runs enemy AI,
//! scrolls everything left, resolves knight collisions and prunes entities
//! that have left the play field. The live collections are rebuilt each tick
//! and swapped into the world whole, so a reader between ticks never sees a
//! half-updated list.

use glam::Vec2;
use rand::Rng;

use super::ai::{AiContext, update_enemy};
use super::archetype::EnemyKind;
use super::collision::{Entity, collides};
use super::factory::{create_enemy, create_obstacle};
use super::state::{Enemy, GameEvent, Obstacle, World};
use crate::consts::{MAX_SPAWNS_PER_TICK, REFERENCE_ENEMY_SPEED};
use crate::tuning::Tuning;

/// What the tick needs from the rest of the game for one frame
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub knight_pos: Vec2,
    /// Knight is inside its sword-swing window
    pub knight_attacking: bool,
    /// Seconds left on the session countdown before this tick
    pub time_left: u32,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Victory,
    GameOver,
}

/// Everything a tick asks the session and collaborators to apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Points earned this tick
    pub score_delta: u64,
    /// New countdown value, if it changed
    pub time_update: Option<u32>,
    pub terminal: Option<Terminal>,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// Request game over; later requests in the same tick are redundant
    fn fatal(&mut self) {
        if self.terminal.is_none() {
            self.terminal = Some(Terminal::GameOver);
            self.events.push(GameEvent::KnightDamaged);
        }
    }
}

/// Advance the world by `dt` seconds
///
/// A non-positive, infinite or NaN `dt` is a no-op tick.
pub fn tick(world: &mut World, input: &TickInput, tuning: &Tuning, dt: f32) -> TickReport {
    let mut report = TickReport::default();
    if !(dt > 0.0 && dt.is_finite()) {
        return report;
    }

    world.clock += dt;

    // Countdown
    world.countdown_timer += dt;
    let seconds = world.countdown_timer.floor();
    world.countdown_timer -= seconds;
    let mut time_left = input.time_left;
    if seconds >= 1.0 {
        time_left = time_left.saturating_sub(seconds as u32);
        report.time_update = Some(time_left);
    }
    if time_left == 0 {
        log::info!("Countdown finished at t={:.2}s", world.clock);
        report.terminal = Some(Terminal::Victory);
        report.events.push(GameEvent::Victory);
        return report;
    }

    let mut next_enemies: Vec<Enemy> = world
        .enemies
        .iter()
        .filter(|e| !e.defeated)
        .cloned()
        .collect();
    let mut next_obstacles: Vec<Obstacle> = world.obstacles.clone();

    // Spawning, staged by the countdown as it stood when the tick began
    world.spawn_timer += dt;
    let attempts = (world.spawn_timer / tuning.spawn_interval).floor();
    world.spawn_timer = (world.spawn_timer - attempts * tuning.spawn_interval).max(0.0);
    let stage = progress(input.time_left, tuning.session_seconds);
    for _ in 0..(attempts as u32).min(MAX_SPAWNS_PER_TICK) {
        spawn(
            world,
            tuning,
            stage,
            &mut next_enemies,
            &mut next_obstacles,
            &mut report,
        );
    }

    let knight = Entity::new(input.knight_pos, tuning.knight_size);

    // Enemies: steer, scroll, fight
    let ai = AiContext {
        knight_pos: input.knight_pos,
        delta: dt,
        clock: world.clock,
        lane_limit: tuning.ai_lane_limit,
    };
    for enemy in &mut next_enemies {
        update_enemy(enemy, &ai);
        enemy.pos.x -= tuning.base_game_speed * enemy.speed / REFERENCE_ENEMY_SPEED * dt;

        if !collides(&knight, &*enemy) {
            continue;
        }
        if input.knight_attacking {
            if enemy.take_hit() {
                let points = tuning.score_per_health * enemy.max_health as u64;
                report.score_delta += points;
                report.events.push(GameEvent::EnemyDefeated {
                    id: enemy.id,
                    kind: enemy.kind,
                    points,
                });
                log::debug!("{} {} defeated (+{points})", enemy.kind, enemy.id);
            } else {
                report.events.push(GameEvent::EnemyHit { id: enemy.id });
            }
        } else {
            log::debug!("Knight hit by {} {}", enemy.kind, enemy.id);
            report.fatal();
        }
    }
    next_enemies.retain(|e| e.pos.x >= tuning.despawn_x);

    // Obstacles: scroll, always fatal on contact
    for obstacle in &mut next_obstacles {
        obstacle.pos.x -= tuning.base_game_speed * dt;
    }
    next_obstacles.retain(|o| o.pos.x >= tuning.despawn_x);
    if next_obstacles.iter().any(|o| collides(&knight, o)) {
        log::debug!("Knight ran into an obstacle");
        report.fatal();
    }

    world.enemies = next_enemies;
    world.obstacles = next_obstacles;

    report
}

/// Normalized countdown progress in [0, 1]
pub(crate) fn progress(time_left: u32, session_seconds: u32) -> f32 {
    let total = session_seconds.max(1) as f32;
    (total - time_left.min(session_seconds) as f32) / total
}

/// One spawn attempt at the spawn line
fn spawn(
    world: &mut World,
    tuning: &Tuning,
    progress: f32,
    enemies: &mut Vec<Enemy>,
    obstacles: &mut Vec<Obstacle>,
    report: &mut TickReport,
) {
    let roll: f32 = world.rng.random();
    let y = world.rng.random::<f32>() * 2.0 * tuning.spawn_y_range - tuning.spawn_y_range;
    let pos = Vec2::new(tuning.spawn_x, y);

    if roll < tuning.enemy_spawn_chance {
        let kind = choose_enemy_kind(&mut world.rng, progress, tuning);
        let enemy = create_enemy(world, kind, pos);
        log::debug!("Spawned {} {} at y={:.2}", kind, enemy.id, y);
        report.events.push(GameEvent::EnemySpawned { id: enemy.id, kind });
        enemies.push(enemy);
    } else {
        let obstacle = create_obstacle(world, pos, tuning.obstacle_size);
        log::debug!("Spawned obstacle {} at y={:.2}", obstacle.id, y);
        report.events.push(GameEvent::ObstacleSpawned { id: obstacle.id });
        obstacles.push(obstacle);
    }
}

/// Pick an archetype for a new enemy based on how far into the session we are
///
/// - early: 70% soldier, 20% archer, 10% any
/// - middle: any
/// - late: 40% berserker, 30% guard, 30% any
pub fn choose_enemy_kind<R: Rng>(rng: &mut R, progress: f32, tuning: &Tuning) -> EnemyKind {
    let roll: f32 = rng.random();
    let any = |rng: &mut R| EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];

    if progress < tuning.early_progress {
        if roll < 0.7 {
            EnemyKind::Soldier
        } else if roll < 0.9 {
            EnemyKind::Archer
        } else {
            any(rng)
        }
    } else if progress < tuning.late_progress {
        any(rng)
    } else if roll < 0.4 {
        EnemyKind::Berserker
    } else if roll < 0.7 {
        EnemyKind::Guard
    } else {
        any(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::Session;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Tuning with spawning pushed far out so tests control the field
    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_interval: 10_000.0,
            ..Default::default()
        }
    }

    fn input(knight: Vec2, attacking: bool) -> TickInput {
        TickInput {
            knight_pos: knight,
            knight_attacking: attacking,
            time_left: 120,
        }
    }

    /// Place an enemy directly on top of the knight
    fn enemy_on_knight(world: &mut World, kind: EnemyKind) -> Enemy {
        let enemy = create_enemy(world, kind, Vec2::new(-6.0, 0.0));
        world.push_enemy(enemy.clone());
        enemy
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut world = World::new(1);
        let tuning = Tuning::default();
        enemy_on_knight(&mut world, EnemyKind::Soldier);
        let before = world.enemies().to_vec();

        for dt in [0.0, -0.5, f32::NAN] {
            let report = tick(&mut world, &input(Vec2::new(-6.0, 0.0), false), &tuning, dt);
            assert_eq!(report, TickReport::default());
        }
        assert_eq!(world.enemies(), before.as_slice());
        assert_eq!(world.clock(), 0.0);
    }

    #[test]
    fn test_soldier_defeat_scores_100() {
        let mut world = World::new(1);
        let tuning = quiet_tuning();
        let soldier = enemy_on_knight(&mut world, EnemyKind::Soldier);

        let report = tick(&mut world, &input(Vec2::new(-6.0, 0.0), true), &tuning, 0.016);
        assert_eq!(report.score_delta, 100);
        assert_eq!(report.terminal, None);
        assert!(report.events.contains(&GameEvent::EnemyDefeated {
            id: soldier.id,
            kind: EnemyKind::Soldier,
            points: 100,
        }));

        let published = &world.enemies()[0];
        assert!(published.defeated);
        assert_eq!(published.health, 0);

        // Pruned on the next pass
        tick(&mut world, &input(Vec2::new(-6.0, 0.0), false), &tuning, 0.016);
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn test_guard_takes_three_hits_for_300() {
        let mut world = World::new(1);
        let tuning = quiet_tuning();
        enemy_on_knight(&mut world, EnemyKind::Guard);
        let knight = input(Vec2::new(-6.0, 0.0), true);

        let first = tick(&mut world, &knight, &tuning, 0.01);
        assert_eq!(first.score_delta, 0);
        assert!(matches!(first.events[..], [GameEvent::EnemyHit { .. }]));
        assert_eq!(world.enemies()[0].health, 2);

        let second = tick(&mut world, &knight, &tuning, 0.01);
        assert_eq!(second.score_delta, 0);
        assert_eq!(world.enemies()[0].health, 1);

        let third = tick(&mut world, &knight, &tuning, 0.01);
        assert_eq!(third.score_delta, 300);
        assert!(world.enemies()[0].defeated);
    }

    #[test]
    fn test_attacking_knight_is_immune_to_enemies() {
        let mut world = World::new(3);
        let tuning = quiet_tuning();
        for kind in EnemyKind::ALL {
            enemy_on_knight(&mut world, kind);
        }
        let report = tick(&mut world, &input(Vec2::new(-6.0, 0.0), true), &tuning, 0.016);
        assert_ne!(report.terminal, Some(Terminal::GameOver));
        assert!(!report.events.contains(&GameEvent::KnightDamaged));
    }

    #[test]
    fn test_enemy_contact_without_attack_is_fatal() {
        let mut world = World::new(3);
        let tuning = quiet_tuning();
        enemy_on_knight(&mut world, EnemyKind::Soldier);
        enemy_on_knight(&mut world, EnemyKind::Guard);

        let report = tick(&mut world, &input(Vec2::new(-6.0, 0.0), false), &tuning, 0.016);
        assert_eq!(report.terminal, Some(Terminal::GameOver));
        // Two colliding enemies still produce a single damage signal
        let damage = report
            .events
            .iter()
            .filter(|e| **e == GameEvent::KnightDamaged)
            .count();
        assert_eq!(damage, 1);
        // Nobody got hurt
        assert!(world.enemies().iter().all(|e| e.health == e.max_health));
    }

    #[test]
    fn test_defeated_enemy_is_harmless() {
        let mut world = World::new(3);
        let tuning = quiet_tuning();
        let mut enemy = create_enemy(&mut world, EnemyKind::Soldier, Vec2::new(-6.0, 0.0));
        enemy.health = 0;
        enemy.defeated = true;
        world.push_enemy(enemy);

        let report = tick(&mut world, &input(Vec2::new(-6.0, 0.0), false), &tuning, 0.016);
        assert_eq!(report.terminal, None);
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn test_obstacle_is_fatal_even_when_attacking() {
        for attacking in [false, true] {
            let mut world = World::new(5);
            let tuning = quiet_tuning();
            let obstacle = create_obstacle(&mut world, Vec2::new(-6.0, 0.0), tuning.obstacle_size);
            world.push_obstacle(obstacle);

            let report = tick(&mut world, &input(Vec2::new(-6.0, 0.0), attacking), &tuning, 0.016);
            assert_eq!(report.terminal, Some(Terminal::GameOver));
            assert!(report.events.contains(&GameEvent::KnightDamaged));
        }
    }

    #[test]
    fn test_horizontal_scroll_rates() {
        let mut world = World::new(5);
        let tuning = quiet_tuning();
        let berserker = create_enemy(&mut world, EnemyKind::Berserker, Vec2::new(10.0, 0.0));
        let obstacle = create_obstacle(&mut world, Vec2::new(10.0, 0.0), tuning.obstacle_size);
        world.push_enemy(berserker);
        world.push_obstacle(obstacle);

        // Knight far away and level with the berserker so it holds its row
        tick(&mut world, &input(Vec2::new(-6.0, 0.0), false), &tuning, 0.5);

        // 2.0 * 3.5 / 2.5 * 0.5
        assert!((world.enemies()[0].pos.x - (10.0 - 1.4)).abs() < 1e-5);
        // 2.0 * 0.5
        assert!((world.obstacles()[0].pos.x - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_offscreen_entities_are_pruned() {
        let mut world = World::new(5);
        let tuning = quiet_tuning();
        let soldier = create_enemy(&mut world, EnemyKind::Soldier, Vec2::new(-9.95, 2.5));
        let keeper = create_enemy(&mut world, EnemyKind::Guard, Vec2::new(-5.0, -2.8));
        let obstacle = create_obstacle(&mut world, Vec2::new(-9.95, -2.5), tuning.obstacle_size);
        world.push_enemy(soldier);
        world.push_enemy(keeper.clone());
        world.push_obstacle(obstacle);

        // Knight well above the lanes so nothing collides
        tick(&mut world, &input(Vec2::new(-6.0, 10.0), false), &tuning, 0.1);

        assert_eq!(world.enemies().len(), 1);
        assert_eq!(world.enemies()[0].id, keeper.id);
        assert!(world.obstacles().is_empty());
        assert!(world.enemies().iter().all(|e| e.pos.x >= -10.0));
    }

    #[test]
    fn test_spawn_every_interval() {
        let mut world = World::new(11);
        let tuning = Tuning::default();
        let far = input(Vec2::new(-6.0, 10.0), false);

        let report = tick(&mut world, &far, &tuning, 1.5);
        assert!(world.enemies().is_empty() && world.obstacles().is_empty());
        assert!(report.events.is_empty());

        let report = tick(&mut world, &TickInput { time_left: 119, ..far }, &tuning, 0.5);
        assert_eq!(world.enemies().len() + world.obstacles().len(), 1);
        assert_eq!(report.events.len(), 1);

        let spawned_x = world
            .enemies()
            .iter()
            .map(|e| e.pos.x)
            .chain(world.obstacles().iter().map(|o| o.pos.x))
            .next()
            .unwrap();
        // Spawned at x = 15, then scrolled for this tick
        assert!(spawned_x < 15.0 && spawned_x > 13.0);
        let spawned_y = world
            .enemies()
            .iter()
            .map(|e| e.pos.y)
            .chain(world.obstacles().iter().map(|o| o.pos.y))
            .next()
            .unwrap();
        assert!(spawned_y.abs() <= tuning.spawn_y_range);
    }

    #[test]
    fn test_non_finite_delta_is_noop() {
        let mut world = World::new(4);
        let tuning = Tuning::default();
        let report = tick(&mut world, &input(Vec2::new(-6.0, 10.0), false), &tuning, f32::INFINITY);
        assert_eq!(report, TickReport::default());
        assert_eq!(world.clock(), 0.0);
    }

    #[test]
    fn test_huge_delta_ends_countdown_in_one_tick() {
        let mut world = World::new(4);
        let tuning = Tuning::default();
        let report = tick(&mut world, &input(Vec2::new(-6.0, 10.0), false), &tuning, 1e8);
        assert_eq!(report.time_update, Some(0));
        assert_eq!(report.terminal, Some(Terminal::Victory));
    }

    #[test]
    fn test_huge_delta_bounds_spawn_attempts() {
        let mut world = World::new(4);
        let tuning = Tuning::default();
        let far = TickInput {
            time_left: u32::MAX,
            ..input(Vec2::new(-6.0, 10.0), false)
        };
        let report = tick(&mut world, &far, &tuning, 1e8);
        assert_eq!(report.time_update, Some(u32::MAX - 100_000_000));
        assert_eq!(report.terminal, None);
        assert_eq!(report.events.len(), MAX_SPAWNS_PER_TICK as usize);
        // Everything scrolled straight past the despawn line
        assert!(world.enemies().is_empty() && world.obstacles().is_empty());
    }

    #[test]
    fn test_spawn_split_between_enemies_and_obstacles() {
        let mut world = World::new(21);
        let tuning = Tuning::default();
        let mut enemies = Vec::new();
        let mut obstacles = Vec::new();
        let mut report = TickReport::default();
        let samples = 10_000;
        for _ in 0..samples {
            spawn(&mut world, &tuning, 0.5, &mut enemies, &mut obstacles, &mut report);
        }

        assert_eq!(enemies.len() + obstacles.len(), samples);
        let enemy_rate = enemies.len() as f32 / samples as f32;
        assert!((enemy_rate - 0.6).abs() < 0.02, "enemy rate {enemy_rate}");

        let ys = enemies.iter().map(|e| e.pos).chain(obstacles.iter().map(|o| o.pos));
        for pos in ys {
            assert_eq!(pos.x, tuning.spawn_x);
            assert!(pos.y.abs() <= tuning.spawn_y_range);
        }
    }

    #[test]
    fn test_spawn_stage_uses_countdown_before_tick() {
        // Crossing from 37 to 36 seconds moves past the late threshold, but
        // the spawn still rolls from the mid-game table
        let tuning = Tuning {
            spawn_interval: 1.0,
            enemy_spawn_chance: 1.0,
            ..Default::default()
        };
        assert!(progress(37, 120) < tuning.late_progress);
        assert!(progress(36, 120) >= tuning.late_progress);

        let mut mid = 0;
        let samples = 2_000;
        for seed in 0..samples {
            let mut world = World::new(seed);
            let far = TickInput {
                time_left: 37,
                ..input(Vec2::new(-6.0, 10.0), false)
            };
            let report = tick(&mut world, &far, &tuning, 1.0);
            assert_eq!(report.time_update, Some(36));
            if world
                .enemies()
                .iter()
                .any(|e| matches!(e.kind, EnemyKind::Soldier | EnemyKind::Archer))
            {
                mid += 1;
            }
        }
        // Mid-game soldiers/archers show up half the time; late game only 15%
        let rate = mid as f32 / samples as f32;
        assert!((rate - 0.5).abs() < 0.05, "soldier/archer rate {rate}");
    }

    #[test]
    fn test_countdown_steps_once_per_second() {
        let mut world = World::new(2);
        let tuning = quiet_tuning();
        let mut time_left = 120;

        let mut updates = Vec::new();
        for _ in 0..10 {
            let report = tick(
                &mut world,
                &TickInput {
                    knight_pos: Vec2::new(-6.0, 10.0),
                    knight_attacking: false,
                    time_left,
                },
                &tuning,
                0.25,
            );
            if let Some(t) = report.time_update {
                time_left = t;
                updates.push(t);
            }
        }
        assert_eq!(updates, vec![119, 118]);
        assert_eq!(time_left, 118);
    }

    #[test]
    fn test_full_countdown_reaches_victory() {
        let mut world = World::new(2);
        let tuning = Tuning::default();
        let mut session = Session::default();
        session.start_game();

        // Knight parked outside every lane; spawning stays on
        let knight = Vec2::new(-6.0, 10.0);
        let mut ticks = 0;
        while session.is_playing() {
            let report = tick(
                &mut world,
                &TickInput {
                    knight_pos: knight,
                    knight_attacking: false,
                    time_left: session.time_left(),
                },
                &tuning,
                0.25,
            );
            if let Some(t) = report.time_update {
                session.set_time_left(t);
            }
            match report.terminal {
                Some(Terminal::Victory) => {
                    session.set_victory();
                }
                Some(Terminal::GameOver) => {
                    session.end_game();
                }
                None => {}
            }
            ticks += 1;
            assert!(ticks <= 480, "countdown overran");
        }

        assert_eq!(ticks, 480);
        assert_eq!(session.phase(), crate::sim::session::GamePhase::Victory);
        assert_eq!(session.time_left(), 0);
    }

    #[test]
    fn test_victory_short_circuits_the_tick() {
        let mut world = World::new(2);
        let tuning = Tuning::default();
        let obstacle = create_obstacle(&mut world, Vec2::new(-6.0, 0.0), tuning.obstacle_size);
        world.push_obstacle(obstacle);

        let report = tick(
            &mut world,
            &TickInput {
                knight_pos: Vec2::new(-6.0, 0.0),
                knight_attacking: false,
                time_left: 1,
            },
            &tuning,
            1.0,
        );
        assert_eq!(report.time_update, Some(0));
        assert_eq!(report.terminal, Some(Terminal::Victory));
        assert_eq!(report.events, vec![GameEvent::Victory]);
        // Nothing moved
        assert_eq!(world.obstacles()[0].pos.x, -6.0);
    }

    #[test]
    fn test_early_game_distribution() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let samples = 20_000;
        let mut soldiers = 0;
        let mut archers = 0;
        for _ in 0..samples {
            match choose_enemy_kind(&mut rng, 0.0, &tuning) {
                EnemyKind::Soldier => soldiers += 1,
                EnemyKind::Archer => archers += 1,
                _ => {}
            }
        }
        let soldier_rate = soldiers as f32 / samples as f32;
        let archer_rate = archers as f32 / samples as f32;
        // 70% + a quarter of the 10% "any" bucket, likewise 20% + 2.5%
        assert!((soldier_rate - 0.725).abs() < 0.02, "soldier rate {soldier_rate}");
        assert!((archer_rate - 0.225).abs() < 0.02, "archer rate {archer_rate}");
    }

    #[test]
    fn test_mid_game_is_uniform() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let samples = 20_000;
        let mut counts = [0usize; 4];
        for _ in 0..samples {
            counts[choose_enemy_kind(&mut rng, 0.5, &tuning).index() as usize] += 1;
        }
        for (kind, count) in EnemyKind::ALL.iter().zip(counts) {
            let rate = count as f32 / samples as f32;
            assert!((rate - 0.25).abs() < 0.02, "{kind} rate {rate}");
        }
    }

    #[test]
    fn test_late_game_favours_tough_enemies() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let samples = 20_000;
        let tough = (0..samples)
            .map(|_| choose_enemy_kind(&mut rng, 0.9, &tuning))
            .filter(|k| matches!(k, EnemyKind::Berserker | EnemyKind::Guard))
            .count();
        // 40% + 30% + half of the 30% "any" bucket
        let rate = tough as f32 / samples as f32;
        assert!((rate - 0.85).abs() < 0.02, "tough rate {rate}");
    }

    #[test]
    fn test_same_seed_same_run() {
        let tuning = Tuning::default();
        let mut a = World::new(99);
        let mut b = World::new(99);
        let far = input(Vec2::new(-6.0, 10.0), false);
        for _ in 0..600 {
            tick(&mut a, &far, &tuning, 1.0 / 60.0);
            tick(&mut b, &far, &tuning, 1.0 / 60.0);
        }
        assert_eq!(a.enemies(), b.enemies());
        assert_eq!(a.obstacles(), b.obstacles());
        assert!(!a.enemies().is_empty() || !a.obstacles().is_empty());
    }
}
