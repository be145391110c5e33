use sky_battle::actors::*;
use sky_battle::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Constructors ──────────────────────────────────────────────────────────────

#[test]
fn user_spawns_at_start_position() {
    let u = user(5);
    assert_eq!(u.kind, ActorKind::User);
    assert_eq!(u.x, 5.0);
    assert_eq!(u.y, 300.0);
    assert_eq!(u.health, 5);
    assert!(!u.destroyed);
}

#[test]
fn enemy_records_spawn_x() {
    let e = enemy(1300.0, 200.0);
    assert_eq!(e.kind, ActorKind::Enemy);
    assert_eq!(e.spawn_x, 1300.0);
    assert_eq!(e.health, 1);
}

#[test]
fn boss_carries_state_and_health() {
    let b = boss(&mut seeded_rng());
    assert_eq!(b.kind, ActorKind::Boss);
    assert_eq!(b.x, 1000.0);
    assert_eq!(b.y, 400.0);
    assert_eq!(b.health, 20);
    assert!(b.boss.is_some());
}

#[test]
fn plain_actors_have_no_boss_state() {
    assert!(user(5).boss.is_none());
    assert!(enemy(1300.0, 0.0).boss.is_none());
    assert!(user_projectile(100.0).boss.is_none());
}

// ── User movement ─────────────────────────────────────────────────────────────

#[test]
fn user_moves_up_by_velocity() {
    let mut u = user(5);
    u.steer = -1;
    update_actor(&mut u, &mut seeded_rng());
    assert_eq!(u.y, 292.0); // 300 - 8
}

#[test]
fn user_moves_down_by_velocity() {
    let mut u = user(5);
    u.steer = 1;
    update_actor(&mut u, &mut seeded_rng());
    assert_eq!(u.y, 308.0); // 300 + 8
}

#[test]
fn user_halted_does_not_move() {
    let mut u = user(5);
    u.steer = 0;
    update_actor(&mut u, &mut seeded_rng());
    assert_eq!(u.y, 300.0);
}

#[test]
fn user_reverts_overshoot_at_upper_bound() {
    let mut u = user(5);
    u.y = -35.0;
    u.steer = -1;
    update_actor(&mut u, &mut seeded_rng());
    assert_eq!(u.y, -35.0); // -43 would overshoot -40; move dropped whole
}

#[test]
fn user_reverts_overshoot_at_lower_bound() {
    let mut u = user(5);
    u.y = 598.0;
    u.steer = 1;
    update_actor(&mut u, &mut seeded_rng());
    assert_eq!(u.y, 598.0); // 606 > 600
}

#[test]
fn user_moves_exactly_onto_bound() {
    let mut u = user(5);
    u.y = -32.0;
    u.steer = -1;
    update_actor(&mut u, &mut seeded_rng());
    assert_eq!(u.y, -40.0); // lands exactly on the bound, kept
}

// ── Other movement ────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_left() {
    let mut e = enemy(1300.0, 200.0);
    update_actor(&mut e, &mut seeded_rng());
    assert_eq!(e.x, 1294.0); // -6 per tick
    assert_eq!(e.spawn_x, 1300.0); // spawn point unchanged
}

#[test]
fn user_projectile_moves_right() {
    let mut p = user_projectile(100.0);
    update_actor(&mut p, &mut seeded_rng());
    assert_eq!(p.x, 125.0); // 110 + 15
}

#[test]
fn enemy_projectile_moves_left() {
    let mut p = enemy_projectile(500.0, 100.0);
    update_actor(&mut p, &mut seeded_rng());
    assert_eq!(p.x, 490.0); // -10 per tick
}

#[test]
fn boss_projectile_moves_left_fast() {
    let mut p = boss_projectile(100.0);
    update_actor(&mut p, &mut seeded_rng());
    assert_eq!(p.x, 935.0); // 950 - 15
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn user_projectile_spawn_offsets() {
    let u = user(5);
    let p = user_projectile_for(&u);
    assert_eq!(p.kind, ActorKind::UserProjectile);
    assert_eq!(p.x, 110.0);
    assert_eq!(p.y, 320.0); // plane.y + 20
}

#[test]
fn enemy_fire_offsets() {
    let mut e = enemy(1300.0, 200.0);
    let mut rng = seeded_rng();
    // 1% per tick; with a seeded generator the first success is deterministic
    let mut fired = None;
    for _ in 0..5000 {
        if let Some(p) = fire(&mut e, &mut rng) {
            fired = Some(p);
            break;
        }
    }
    let p = fired.unwrap();
    assert_eq!(p.kind, ActorKind::EnemyProjectile);
    assert_eq!(p.x, 1200.0); // enemy.x - 100
    assert_eq!(p.y, 250.0); // enemy.y + 50
}

#[test]
fn user_actors_never_fire_through_fire() {
    let mut u = user(5);
    let mut p = user_projectile(100.0);
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        assert!(fire(&mut u, &mut rng).is_none());
        assert!(fire(&mut p, &mut rng).is_none());
    }
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn enemy_destroyed_by_single_hit() {
    let mut e = enemy(1300.0, 200.0);
    take_damage(&mut e);
    assert_eq!(e.health, 0);
    assert!(e.destroyed);
}

#[test]
fn user_survives_hits_until_zero() {
    let mut u = user(5);
    for expected in (0..5).rev() {
        take_damage(&mut u);
        assert_eq!(u.health, expected);
    }
    assert!(u.destroyed);
}

#[test]
fn health_saturates_at_zero() {
    let mut e = enemy(1300.0, 200.0);
    take_damage(&mut e);
    take_damage(&mut e); // second hit in the same tick
    assert_eq!(e.health, 0); // never negative
    assert!(e.destroyed);
}

#[test]
fn projectiles_destroyed_outright() {
    let mut p = user_projectile(100.0);
    take_damage(&mut p);
    assert!(p.destroyed);
}

#[test]
fn shielded_boss_absorbs_hit() {
    let mut b = boss(&mut seeded_rng());
    if let Some(state) = b.boss.as_mut() {
        state.shielded = true;
    }
    take_damage(&mut b);
    assert_eq!(b.health, 20);
    assert!(!b.destroyed);
}

#[test]
fn unshielded_boss_takes_hit() {
    let mut b = boss(&mut seeded_rng());
    if let Some(state) = b.boss.as_mut() {
        state.shielded = false;
    }
    take_damage(&mut b);
    assert_eq!(b.health, 19);
    assert!(!b.destroyed);
}

#[test]
fn destroy_is_idempotent() {
    let mut e = enemy(1300.0, 200.0);
    destroy(&mut e);
    destroy(&mut e);
    assert!(e.destroyed);
}

// ── Bounding boxes ────────────────────────────────────────────────────────────

#[test]
fn overlapping_boxes_intersect() {
    let a = enemy(100.0, 100.0); // 150×150 box
    let b = enemy(200.0, 200.0);
    assert!(intersects(&a, &b));
    assert!(intersects(&b, &a));
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = enemy(100.0, 100.0); // right edge at 250
    let b = enemy(250.0, 100.0);
    assert!(!intersects(&a, &b));
}

#[test]
fn separated_boxes_do_not_intersect() {
    let a = enemy(100.0, 100.0);
    let b = enemy(500.0, 500.0);
    assert!(!intersects(&a, &b));
}

#[test]
fn box_sizes_per_kind() {
    assert_eq!(size(ActorKind::User), (150.0, 150.0));
    assert_eq!(size(ActorKind::Boss), (300.0, 300.0));
    assert_eq!(size(ActorKind::UserProjectile), (125.0, 125.0));
    assert_eq!(size(ActorKind::EnemyProjectile), (50.0, 50.0));
    assert_eq!(size(ActorKind::BossProjectile), (75.0, 75.0));
}
