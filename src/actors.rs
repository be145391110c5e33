/// Per-variant actor behavior: spawn constructors, movement, firing,
/// damage, and the bounding-box rule.
///
/// Every function takes a mutable reference to the actor it operates on
/// (and, where needed, an RNG handle); no actor reaches into another's
/// state.  Randomness always comes through the injected `rng` so tests
/// stay deterministic with a seeded generator.

use rand::Rng;

use crate::boss;
use crate::entities::{Actor, ActorKind, BossState};

// ── User plane ───────────────────────────────────────────────────────────────

const USER_START_X: f64 = 5.0;
const USER_START_Y: f64 = 300.0;
const USER_Y_UPPER_BOUND: f64 = -40.0;
const USER_Y_LOWER_BOUND: f64 = 600.0;
const USER_VERTICAL_VELOCITY: f64 = 8.0;
const USER_PROJECTILE_X: f64 = 110.0;
const USER_PROJECTILE_Y_OFFSET: f64 = 20.0;

// ── Enemy plane ──────────────────────────────────────────────────────────────

const ENEMY_HORIZONTAL_VELOCITY: f64 = -6.0;
const ENEMY_INITIAL_HEALTH: i32 = 1;
const ENEMY_FIRE_RATE: f64 = 0.01;
const ENEMY_PROJECTILE_X_OFFSET: f64 = -100.0;
const ENEMY_PROJECTILE_Y_OFFSET: f64 = 50.0;

// ── Projectiles ──────────────────────────────────────────────────────────────

const USER_PROJECTILE_VELOCITY: f64 = 15.0;
const ENEMY_PROJECTILE_VELOCITY: f64 = -10.0;
const BOSS_PROJECTILE_VELOCITY: f64 = -15.0;
const BOSS_PROJECTILE_X: f64 = 950.0;

/// Fixed visual size (width, height) per variant, in world units.
pub fn size(kind: ActorKind) -> (f64, f64) {
    match kind {
        ActorKind::User => (150.0, 150.0),
        ActorKind::Enemy => (150.0, 150.0),
        ActorKind::Boss => (300.0, 300.0),
        ActorKind::UserProjectile => (125.0, 125.0),
        ActorKind::EnemyProjectile => (50.0, 50.0),
        ActorKind::BossProjectile => (75.0, 75.0),
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn actor(kind: ActorKind, x: f64, y: f64, health: i32) -> Actor {
    Actor {
        kind,
        x,
        y,
        spawn_x: x,
        health,
        steer: 0,
        destroyed: false,
        boss: None,
    }
}

pub fn user(health: i32) -> Actor {
    actor(ActorKind::User, USER_START_X, USER_START_Y, health)
}

pub fn enemy(x: f64, y: f64) -> Actor {
    actor(ActorKind::Enemy, x, y, ENEMY_INITIAL_HEALTH)
}

/// The boss starts with its move pattern shuffled and its fire cooldown
/// already satisfied.
pub fn boss(rng: &mut impl Rng) -> Actor {
    let mut b = actor(
        ActorKind::Boss,
        boss::START_X,
        boss::START_Y,
        boss::INITIAL_HEALTH,
    );
    b.boss = Some(BossState::new(rng));
    b
}

pub fn user_projectile(y: f64) -> Actor {
    actor(ActorKind::UserProjectile, USER_PROJECTILE_X, y, 0)
}

pub fn enemy_projectile(x: f64, y: f64) -> Actor {
    actor(ActorKind::EnemyProjectile, x, y, 0)
}

pub fn boss_projectile(y: f64) -> Actor {
    actor(ActorKind::BossProjectile, BOSS_PROJECTILE_X, y, 0)
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Advance one actor by one tick: position plus any secondary behavior
/// (the boss also updates its shield and fire cooldown here).
pub fn update_actor(a: &mut Actor, rng: &mut impl Rng) {
    match a.kind {
        ActorKind::User => {
            if a.steer != 0 {
                let candidate = a.y + USER_VERTICAL_VELOCITY * a.steer as f64;
                // Revert rather than clamp: an overshooting move is dropped whole.
                if candidate >= USER_Y_UPPER_BOUND && candidate <= USER_Y_LOWER_BOUND {
                    a.y = candidate;
                }
            }
        }
        ActorKind::Enemy => a.x += ENEMY_HORIZONTAL_VELOCITY,
        ActorKind::Boss => boss::update(a, rng),
        ActorKind::UserProjectile => a.x += USER_PROJECTILE_VELOCITY,
        ActorKind::EnemyProjectile => a.x += ENEMY_PROJECTILE_VELOCITY,
        ActorKind::BossProjectile => a.x += BOSS_PROJECTILE_VELOCITY,
    }
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// Spawn position of a fresh user projectile, relative to the plane.
pub fn user_projectile_for(plane: &Actor) -> Actor {
    user_projectile(plane.y + USER_PROJECTILE_Y_OFFSET)
}

/// Let an enemy-side actor attempt to fire.  Returns the new projectile,
/// or `None` when the actor holds fire this tick.
pub fn fire(a: &mut Actor, rng: &mut impl Rng) -> Option<Actor> {
    match a.kind {
        ActorKind::Enemy => {
            if rng.gen_bool(ENEMY_FIRE_RATE) {
                Some(enemy_projectile(
                    a.x + ENEMY_PROJECTILE_X_OFFSET,
                    a.y + ENEMY_PROJECTILE_Y_OFFSET,
                ))
            } else {
                None
            }
        }
        ActorKind::Boss => boss::fire(a, rng),
        _ => None,
    }
}

// ── Damage ───────────────────────────────────────────────────────────────────

/// Apply one hit.  Planes lose one health point and are destroyed at
/// zero; projectiles are destroyed outright; a shielded boss absorbs
/// the hit entirely.
pub fn take_damage(a: &mut Actor) {
    match a.kind {
        ActorKind::User | ActorKind::Enemy => hit_plane(a),
        ActorKind::Boss => {
            let shielded = a.boss.as_ref().map(|b| b.shielded).unwrap_or(false);
            if !shielded {
                hit_plane(a);
            }
        }
        ActorKind::UserProjectile
        | ActorKind::EnemyProjectile
        | ActorKind::BossProjectile => destroy(a),
    }
}

fn hit_plane(a: &mut Actor) {
    if a.health > 0 {
        a.health -= 1;
    }
    if a.health == 0 {
        destroy(a);
    }
}

/// Idempotent.
pub fn destroy(a: &mut Actor) {
    a.destroyed = true;
}

// ── Bounding boxes ───────────────────────────────────────────────────────────

/// Axis-aligned bounding box: (x, y, width, height).
pub fn bounds(a: &Actor) -> (f64, f64, f64, f64) {
    let (w, h) = size(a.kind);
    (a.x, a.y, w, h)
}

/// Strict overlap; boxes that merely touch along an edge do not collide.
pub fn intersects(a: &Actor, b: &Actor) -> bool {
    let (ax, ay, aw, ah) = bounds(a);
    let (bx, by, bw, bh) = bounds(b);
    ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
}
