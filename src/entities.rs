/// All simulation entity types. Pure data, no logic.

/// Behavior tag for every actor in the simulation.
///
/// Movement, firing and damage rules are dispatched on this tag in
/// `actors`; there is no inheritance hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorKind {
    User,
    Enemy,
    Boss,
    UserProjectile,
    EnemyProjectile,
    BossProjectile,
}

/// Identifier of a playable level, resolved to an engine by the
/// registry in `levels`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelId {
    One,
    Two,
}

/// Terminal result of a tick: advance to another level, or end the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    Advance(LevelId),
    Win,
    Lose,
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// Extra state carried only by the boss actor.
///
/// `move_pattern` holds five copies each of {+8, −8, 0}, shuffled; the
/// same index is served for ten consecutive ticks before the whole
/// pattern is reshuffled and the index advances (see `boss`).
#[derive(Clone, Debug)]
pub struct BossState {
    pub move_pattern: [i32; 15],
    pub move_index: usize,
    pub same_move_run: u32,
    pub shielded: bool,
    pub shield_frames: u32,
    pub fire_cooldown: u32,
}

/// A flat actor record.
///
/// Position is the top-left corner of the actor's bounding box in world
/// units.  `spawn_x` is kept so the engine can measure how far an enemy
/// has traveled from its spawn point (the penetration check).  `steer`
/// is the vertical velocity multiplier and only meaningful for the user
/// plane; `boss` is only populated for the boss.
#[derive(Clone, Debug)]
pub struct Actor {
    pub kind: ActorKind,
    pub x: f64,
    pub y: f64,
    pub spawn_x: f64,
    pub health: i32,
    pub steer: i32,
    pub destroyed: bool,
    pub boss: Option<BossState>,
}

// ── Published state ───────────────────────────────────────────────────────────

/// Drawable view of one actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: ActorKind,
    pub x: f64,
    pub y: f64,
}

/// Boss HUD data: remaining health and whether the shield is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossStatus {
    pub health: i32,
    pub shielded: bool,
}

/// Everything the presentation layer may observe.
///
/// Built once per tick, after all damage and sweeping is done; the
/// display never sees mid-tick state.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub hearts: i32,
    pub score: u32,
    pub kills: u32,
    pub boss: Option<BossStatus>,
    pub sprites: Vec<Sprite>,
    pub outcome: Option<LevelOutcome>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Snapshot {
            hearts: 0,
            score: 0,
            kills: 0,
            boss: None,
            sprites: Vec::new(),
            outcome: None,
        }
    }
}
