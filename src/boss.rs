/// The boss behavior state machine: pattern-driven vertical movement,
/// probabilistic shield activation with a fixed duration, and a fire
/// cooldown.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::actors;
use crate::entities::{Actor, BossState};

pub const START_X: f64 = 1000.0;
pub const START_Y: f64 = 400.0;
pub const INITIAL_HEALTH: i32 = 20;

const VERTICAL_VELOCITY: i32 = 8;
const MOVE_FREQUENCY_PER_CYCLE: usize = 5;
const MAX_TICKS_WITH_SAME_MOVE: u32 = 10;
const Y_UPPER_BOUND: f64 = -100.0;
const Y_LOWER_BOUND: f64 = 475.0;

const SHIELD_PROBABILITY: f64 = 0.002;
const MAX_TICKS_WITH_SHIELD: u32 = 500;

const FIRE_RATE: f64 = 0.1;
const FIRE_COOLDOWN_TICKS: u32 = 30;
const PROJECTILE_Y_OFFSET: f64 = 75.0;

impl BossState {
    /// Fresh boss state: five copies each of {+v, −v, 0}, shuffled once.
    /// The fire cooldown starts satisfied.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut pattern = [0i32; 15];
        for cycle in 0..MOVE_FREQUENCY_PER_CYCLE {
            pattern[cycle * 3] = VERTICAL_VELOCITY;
            pattern[cycle * 3 + 1] = -VERTICAL_VELOCITY;
            // pattern[cycle * 3 + 2] stays 0
        }
        pattern.shuffle(rng);
        BossState {
            move_pattern: pattern,
            move_index: 0,
            same_move_run: 0,
            shielded: false,
            shield_frames: 0,
            fire_cooldown: FIRE_COOLDOWN_TICKS,
        }
    }

    /// Serve the next vertical velocity.
    ///
    /// The value at `move_index` is returned for ten consecutive ticks;
    /// on the tenth serve the whole pattern is reshuffled, the run
    /// counter resets and the index advances (wrapping).  The reshuffle
    /// and advance take effect on the *next* call.
    pub fn next_move(&mut self, rng: &mut impl Rng) -> i32 {
        let mv = self.move_pattern[self.move_index];
        self.same_move_run += 1;
        if self.same_move_run == MAX_TICKS_WITH_SAME_MOVE {
            self.move_pattern.shuffle(rng);
            self.same_move_run = 0;
            self.move_index += 1;
        }
        if self.move_index == self.move_pattern.len() {
            self.move_index = 0;
        }
        mv
    }

    /// One tick of shield bookkeeping.  While up, the shield counts
    /// frames and drops unconditionally at the limit; while down, a
    /// 0.2% draw may raise it, resetting the frame counter.
    pub fn update_shield(&mut self, rng: &mut impl Rng) {
        if self.shielded {
            self.shield_frames += 1;
            if self.shield_frames >= MAX_TICKS_WITH_SHIELD {
                self.shielded = false;
            }
        } else if rng.gen_bool(SHIELD_PROBABILITY) {
            self.shielded = true;
            self.shield_frames = 0;
        }
    }
}

/// Full per-tick boss update: position, then shield, then cooldown.
pub fn update(a: &mut Actor, rng: &mut impl Rng) {
    if let Some(mut state) = a.boss.take() {
        let candidate = a.y + state.next_move(rng) as f64;
        if candidate >= Y_UPPER_BOUND && candidate <= Y_LOWER_BOUND {
            a.y = candidate;
        }
        state.update_shield(rng);
        state.fire_cooldown += 1;
        a.boss = Some(state);
    }
}

/// Fire only once the cooldown is satisfied and a 10% draw passes;
/// firing resets the cooldown.
pub fn fire(a: &mut Actor, rng: &mut impl Rng) -> Option<Actor> {
    let y = a.y;
    if let Some(state) = a.boss.as_mut() {
        if state.fire_cooldown >= FIRE_COOLDOWN_TICKS && rng.gen_bool(FIRE_RATE) {
            state.fire_cooldown = 0;
            return Some(actors::boss_projectile(y + PROJECTILE_Y_OFFSET));
        }
    }
    None
}
