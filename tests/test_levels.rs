use sky_battle::actors;
use sky_battle::entities::{ActorKind, LevelId, LevelOutcome};
use sky_battle::levels::{engine_for, Sequencer};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[test]
fn engine_for_seeds_level_and_score() {
    let engine = engine_for(LevelId::Two, 250);
    assert_eq!(engine.level, LevelId::Two);
    assert_eq!(engine.score, 250);
    assert_eq!(engine.user().unwrap().health, 5);
}

// ── Level one — spawning ──────────────────────────────────────────────────────

#[test]
fn level_one_spawns_within_cap_and_bounds() {
    let mut engine = engine_for(LevelId::One, 0);
    let mut rng = seeded_rng();
    for _ in 0..50 {
        engine.tick(&mut rng);
        assert!(engine.enemies.len() <= 5);
        for e in &engine.enemies {
            assert_eq!(e.kind, ActorKind::Enemy);
            assert_eq!(e.spawn_x, 1300.0);
            assert!(e.y >= 0.0 && e.y < 600.0); // below the HUD margin
        }
    }
    assert!(engine.finished.is_none());
}

// ── Level one — advance at the kill target ────────────────────────────────────

#[test]
fn level_one_advances_after_ten_kills() {
    let mut engine = engine_for(LevelId::One, 0);
    let mut rng = seeded_rng();

    // One scripted kill per tick: an enemy and a user projectile placed
    // on top of each other, far from anything the spawner produces.
    for tick in 0..10 {
        engine.enemies.push(actors::enemy(400.0, 100.0));
        let mut p = actors::user_projectile(100.0);
        p.x = 400.0;
        engine.user_projectiles.push(p);

        let outcome = engine.tick(&mut rng);
        if tick < 9 {
            assert_eq!(outcome, None);
        } else {
            assert_eq!(outcome, Some(LevelOutcome::Advance(LevelId::Two)));
        }
    }

    assert_eq!(engine.kill_count, 10);
    assert_eq!(engine.score, 1000);
}

// ── Level one — loss ──────────────────────────────────────────────────────────

#[test]
fn level_one_lost_when_enemies_breach_the_line() {
    let mut engine = engine_for(LevelId::One, 0);

    // Five penetrating enemies in one tick drain all five hearts.
    for i in 0..5 {
        let mut e = actors::enemy(0.0, 100.0 * i as f64);
        e.x = 1400.0;
        engine.enemies.push(e);
    }

    let outcome = engine.tick(&mut seeded_rng());
    assert_eq!(outcome, Some(LevelOutcome::Lose));
    assert!(engine.user_destroyed());

    // A finished engine stops simulating entirely.
    let frozen = engine.snapshot().clone();
    assert_eq!(engine.tick(&mut seeded_rng()), Some(LevelOutcome::Lose));
    assert_eq!(engine.snapshot(), &frozen);
}

// ── Level two — boss lifecycle ────────────────────────────────────────────────

#[test]
fn level_two_spawns_the_boss_exactly_once() {
    let mut engine = engine_for(LevelId::Two, 0);
    let mut rng = seeded_rng();

    engine.tick(&mut rng);
    assert_eq!(engine.enemies.len(), 1);
    assert_eq!(engine.enemies[0].kind, ActorKind::Boss);
    assert!(engine.boss_spawned);

    engine.tick(&mut rng);
    assert_eq!(engine.enemies.len(), 1); // no respawn
}

#[test]
fn level_two_won_when_the_boss_falls() {
    let mut engine = engine_for(LevelId::Two, 500);
    let mut rng = seeded_rng();
    engine.tick(&mut rng); // spawns the boss

    let boss = &mut engine.enemies[0];
    if let Some(state) = boss.boss.as_mut() {
        state.shielded = false;
    }
    for _ in 0..20 {
        actors::take_damage(boss);
    }
    assert!(boss.destroyed);

    let outcome = engine.tick(&mut rng);
    assert_eq!(outcome, Some(LevelOutcome::Win));
    assert!(engine.boss_defeated);
    assert_eq!(engine.score, 600); // carried 500 + boss kill
    assert_eq!(engine.snapshot().outcome, Some(LevelOutcome::Win));
    assert!(engine.snapshot().boss.is_none());

    // No respawn after the boss is down.
    assert_eq!(engine.tick(&mut rng), Some(LevelOutcome::Win));
    assert!(engine.enemies.is_empty());
}

#[test]
fn level_two_lost_when_the_user_falls() {
    let mut engine = engine_for(LevelId::Two, 0);
    let mut rng = seeded_rng();
    engine.tick(&mut rng); // spawns the boss

    engine.friendly[0].health = 1;
    engine
        .enemy_projectiles
        .push(actors::enemy_projectile(50.0, 300.0));

    let outcome = engine.tick(&mut rng);
    assert_eq!(outcome, Some(LevelOutcome::Lose));
    assert!(engine.user_destroyed());
}

// ── Sequencer ─────────────────────────────────────────────────────────────────

#[test]
fn sequencer_starts_on_level_one() {
    let seq = Sequencer::new();
    assert_eq!(seq.engine().level, LevelId::One);
    assert_eq!(seq.engine().score, 0);
}

#[test]
fn sequencer_applies_a_pending_transition() {
    let mut seq = Sequencer::new();
    seq.engine_mut().score = 777;
    seq.request(LevelId::Two);

    assert!(seq.apply_pending());
    assert_eq!(seq.engine().level, LevelId::Two);
    assert_eq!(seq.engine().score, 777); // score carries across levels
    assert_eq!(seq.engine().user().unwrap().health, 5); // fresh plane
}

#[test]
fn sequencer_drops_requests_while_one_is_pending() {
    let mut seq = Sequencer::new();
    seq.request(LevelId::Two);
    seq.request(LevelId::One); // dropped; the first request wins

    assert!(seq.apply_pending());
    assert_eq!(seq.engine().level, LevelId::Two);
}

#[test]
fn sequencer_is_idle_without_a_request() {
    let mut seq = Sequencer::new();
    assert!(!seq.apply_pending());
    assert_eq!(seq.engine().level, LevelId::One);
}
