/// Level policies and the level sequencer.
///
/// Each `LevelId` maps to a spawn policy and a termination policy; the
/// engine calls back into both every tick.  The sequencer owns the
/// current engine and serializes level transitions: the first requested
/// transition wins, later requests arriving before it is applied are
/// dropped.

use rand::Rng;

use crate::actors;
use crate::engine::LevelEngine;
use crate::entities::{LevelId, LevelOutcome};

pub const PLAYER_INITIAL_HEALTH: i32 = 5;

const LEVEL_ONE_TOTAL_ENEMIES: usize = 5;
const LEVEL_ONE_KILLS_TO_ADVANCE: u32 = 10;
const LEVEL_ONE_SPAWN_PROBABILITY: f64 = 0.20;

/// Build the engine for a level.  The score is carried in from the
/// previous level; a fresh run starts at zero.
pub fn engine_for(level: LevelId, score: u32) -> LevelEngine {
    LevelEngine::new(level, PLAYER_INITIAL_HEALTH, score)
}

/// Per-tick spawning.  Level one refills toward its enemy cap with an
/// independent 20% draw per vacant slot; level two spawns the boss once
/// and never again.
pub fn spawn_enemy_units(engine: &mut LevelEngine, rng: &mut impl Rng) {
    match engine.level {
        LevelId::One => {
            for _ in engine.enemies.len()..LEVEL_ONE_TOTAL_ENEMIES {
                if rng.gen_bool(LEVEL_ONE_SPAWN_PROBABILITY) {
                    let y = rng.gen_range(0.0..engine.enemy_maximum_y);
                    engine.enemies.push(actors::enemy(engine.screen_width, y));
                }
            }
        }
        LevelId::Two => {
            if engine.enemies.is_empty() && !engine.boss_spawned && !engine.boss_defeated {
                engine.enemies.push(actors::boss(rng));
                engine.boss_spawned = true;
            }
        }
    }
}

/// Termination policy, evaluated after the sweep.  Losing the user
/// plane ends the run on any level; level one advances at the kill
/// target, level two is won when the boss goes down.
pub fn check_if_game_over(engine: &LevelEngine) -> Option<LevelOutcome> {
    if engine.user_destroyed() {
        return Some(LevelOutcome::Lose);
    }
    match engine.level {
        LevelId::One => {
            if engine.kill_count >= LEVEL_ONE_KILLS_TO_ADVANCE {
                Some(LevelOutcome::Advance(LevelId::Two))
            } else {
                None
            }
        }
        LevelId::Two => {
            if engine.boss_defeated {
                Some(LevelOutcome::Win)
            } else {
                None
            }
        }
    }
}

// ── Sequencer ────────────────────────────────────────────────────────────────

/// Owns the active engine and applies level transitions between ticks.
///
/// `request` only records the target; the swap happens in
/// `apply_pending` so a transition can never interrupt a tick.  While a
/// request is pending, further requests are dropped.
pub struct Sequencer {
    engine: LevelEngine,
    pending: Option<LevelId>,
}

impl Sequencer {
    pub fn new() -> Self {
        Sequencer {
            engine: engine_for(LevelId::One, 0),
            pending: None,
        }
    }

    pub fn engine(&self) -> &LevelEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LevelEngine {
        &mut self.engine
    }

    /// Record a transition request.  Dropped if another request is
    /// already pending.
    pub fn request(&mut self, target: LevelId) {
        if self.pending.is_none() {
            self.pending = Some(target);
        }
    }

    /// Swap in the engine for the pending level, carrying the score
    /// forward.  Returns whether a swap happened.
    pub fn apply_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(target) => {
                self.engine = engine_for(target, self.engine.score);
                true
            }
            None => false,
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Sequencer::new()
    }
}
