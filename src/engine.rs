/// The level engine: owns the four actor populations and runs the
/// fixed-tick simulation step.
///
/// Each tick executes, in strict order: spawn, advance, enemy fire,
/// population snapshot, penetration, three collision passes, sweep,
/// kill/score accounting, snapshot publication, termination check.
/// All randomness is drawn from the injected `rng`, so a seeded
/// generator makes whole runs reproducible.

use rand::Rng;

use crate::actors;
use crate::entities::{Actor, ActorKind, BossStatus, LevelId, LevelOutcome, Snapshot, Sprite};
use crate::levels;

pub const SCREEN_WIDTH: f64 = 1300.0;
pub const SCREEN_HEIGHT: f64 = 750.0;

/// Enemies never spawn below this margin above the bottom edge.
const SCREEN_HEIGHT_ADJUSTMENT: f64 = 150.0;

const SCORE_PER_KILL: u32 = 100;

pub struct LevelEngine {
    pub level: LevelId,
    pub screen_width: f64,
    pub screen_height: f64,
    pub enemy_maximum_y: f64,

    // Population lists. An actor lives in exactly one list; lists are
    // mutated only inside `tick` and by the user-fire command.
    pub friendly: Vec<Actor>,
    pub enemies: Vec<Actor>,
    pub user_projectiles: Vec<Actor>,
    pub enemy_projectiles: Vec<Actor>,

    pub score: u32,
    pub kill_count: u32,
    pub enemy_count: usize,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
    pub finished: Option<LevelOutcome>,

    published: Snapshot,
}

impl LevelEngine {
    pub fn new(level: LevelId, player_health: i32, score: u32) -> Self {
        LevelEngine {
            level,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            enemy_maximum_y: SCREEN_HEIGHT - SCREEN_HEIGHT_ADJUSTMENT,
            friendly: vec![actors::user(player_health)],
            enemies: Vec::new(),
            user_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            score,
            kill_count: 0,
            enemy_count: 0,
            boss_spawned: false,
            boss_defeated: false,
            finished: None,
            published: Snapshot::empty(),
        }
    }

    // ── User commands ────────────────────────────────────────────────────────

    pub fn user_move_up(&mut self) {
        self.steer(-1);
    }

    pub fn user_move_down(&mut self) {
        self.steer(1);
    }

    pub fn user_halt(&mut self) {
        self.steer(0);
    }

    /// Spawn one user projectile immediately, at the fixed forward
    /// offset from the plane.
    pub fn user_fire(&mut self) {
        if self.finished.is_some() {
            return;
        }
        if let Some(plane) = self.user() {
            let projectile = actors::user_projectile_for(plane);
            self.user_projectiles.push(projectile);
        }
    }

    fn steer(&mut self, multiplier: i32) {
        if self.finished.is_some() {
            return;
        }
        if let Some(plane) = self.user_mut() {
            plane.steer = multiplier;
        }
    }

    pub fn user(&self) -> Option<&Actor> {
        self.friendly.iter().find(|a| a.kind == ActorKind::User)
    }

    fn user_mut(&mut self) -> Option<&mut Actor> {
        self.friendly.iter_mut().find(|a| a.kind == ActorKind::User)
    }

    /// True once the user plane has been destroyed and swept.
    pub fn user_destroyed(&self) -> bool {
        self.user().is_none()
    }

    /// The last published snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.published
    }

    // ── The tick ─────────────────────────────────────────────────────────────

    /// Advance the simulation by one tick.  Returns the level outcome on
    /// the tick that terminates the level; a finished engine ignores
    /// further ticks and keeps reporting its outcome.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Option<LevelOutcome> {
        if self.finished.is_some() {
            return self.finished;
        }

        levels::spawn_enemy_units(self, rng);
        self.update_actors(rng);
        self.generate_enemy_fire(rng);
        self.enemy_count = self.enemies.len();
        self.handle_enemy_penetration();
        handle_collisions(&mut self.user_projectiles, &mut self.enemies);
        handle_collisions(&mut self.enemy_projectiles, &mut self.friendly);
        handle_collisions(&mut self.friendly, &mut self.enemies);
        self.remove_destroyed_actors();
        self.update_kill_count();

        let outcome = levels::check_if_game_over(self);
        self.finished = outcome;
        self.publish(outcome);
        outcome
    }

    fn update_actors(&mut self, rng: &mut impl Rng) {
        for a in &mut self.friendly {
            actors::update_actor(a, rng);
        }
        for a in &mut self.enemies {
            actors::update_actor(a, rng);
        }
        for a in &mut self.user_projectiles {
            actors::update_actor(a, rng);
        }
        for a in &mut self.enemy_projectiles {
            actors::update_actor(a, rng);
        }
    }

    fn generate_enemy_fire(&mut self, rng: &mut impl Rng) {
        for enemy in &mut self.enemies {
            if enemy.destroyed {
                continue;
            }
            if let Some(projectile) = actors::fire(enemy, rng) {
                self.enemy_projectiles.push(projectile);
            }
        }
    }

    /// An enemy whose total horizontal travel exceeds the screen width
    /// has breached the defense line: the user takes one hit and the
    /// enemy is destroyed, independent of the collision passes.
    fn handle_enemy_penetration(&mut self) {
        let screen_width = self.screen_width;
        let mut breaches = 0;
        for enemy in &mut self.enemies {
            if (enemy.x - enemy.spawn_x).abs() > screen_width {
                breaches += 1;
                actors::destroy(enemy);
            }
        }
        for _ in 0..breaches {
            if let Some(plane) = self.user_mut() {
                actors::take_damage(plane);
            }
        }
    }

    /// Compacting sweep: drop every destroyed actor from every list.
    /// Projectiles that have left the screen are dropped here as well.
    fn remove_destroyed_actors(&mut self) {
        let screen_width = self.screen_width;
        let mut boss_down = false;
        self.enemies.retain(|a| {
            if a.destroyed && a.kind == ActorKind::Boss {
                boss_down = true;
            }
            !a.destroyed
        });
        if boss_down {
            self.boss_defeated = true;
        }
        self.friendly.retain(|a| !a.destroyed);
        self.user_projectiles
            .retain(|a| !a.destroyed && a.x <= screen_width);
        self.enemy_projectiles.retain(|a| {
            let (w, _) = actors::size(a.kind);
            !a.destroyed && a.x + w >= 0.0
        });
    }

    /// Kills credited this tick = enemy count before the collision
    /// passes minus the count after the sweep.
    fn update_kill_count(&mut self) {
        let kills = self.enemy_count.saturating_sub(self.enemies.len());
        for _ in 0..kills {
            self.kill_count += 1;
            self.score += SCORE_PER_KILL;
        }
    }

    fn publish(&mut self, outcome: Option<LevelOutcome>) {
        let hearts = self.user().map(|u| u.health).unwrap_or(0);
        let boss = self
            .enemies
            .iter()
            .find(|a| a.kind == ActorKind::Boss)
            .and_then(|a| {
                a.boss.as_ref().map(|b| BossStatus {
                    health: a.health,
                    shielded: b.shielded,
                })
            });
        let mut sprites = Vec::new();
        for list in [
            &self.friendly,
            &self.enemies,
            &self.user_projectiles,
            &self.enemy_projectiles,
        ] {
            for a in list {
                sprites.push(Sprite {
                    kind: a.kind,
                    x: a.x,
                    y: a.y,
                });
            }
        }
        self.published = Snapshot {
            hearts,
            score: self.score,
            kills: self.kill_count,
            boss,
            sprites,
            outcome,
        };
    }
}

/// One collision pass between two populations: every intersecting pair
/// damages both members.  Damage is mutual and unconditional; actors
/// already destroyed this tick still take part until the sweep.
fn handle_collisions(lhs: &mut [Actor], rhs: &mut [Actor]) {
    for a in lhs.iter_mut() {
        for b in rhs.iter_mut() {
            if actors::intersects(a, b) {
                actors::take_damage(a);
                actors::take_damage(b);
            }
        }
    }
}
