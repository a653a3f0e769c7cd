use bevy::prelude::{KeyCode, Vec2, Vec3};
use rs_utils::{CursorGrab, SceneConfig};

use crate::collider::{Collider, ColliderRegistry, ModelBounds, Placement, build};
use crate::collision::{COLLISION_EPS, max_penetration, resolve};
use crate::context::SimContext;
use crate::display::DisplayPhase;
use crate::interaction::InteractionMode;
use crate::physics::{MovementParams, integrate};
use crate::settings::SimSettings;
use crate::types::{InputIntent, PlayerState};

const DT: f32 = 1.0 / 60.0;

fn empty_room() -> SimContext {
    SimContext::new(SimSettings::default(), ColliderRegistry::default())
}

fn default_room() -> SimContext {
    SimContext::from_config(&SceneConfig::default())
}

fn press(ctx: &mut SimContext, key: KeyCode) {
    ctx.on_key_down(key);
    ctx.on_key_up(key);
}

fn run(ctx: &mut SimContext, ticks: usize, dt: f32) {
    for _ in 0..ticks {
        ctx.tick(dt);
    }
}

/// Grounded, in front of the seat and inside its capture radius.
fn beside_seat() -> SimContext {
    let mut ctx = default_room();
    let mut player = PlayerState::spawn(Vec3::new(1.6, 0.5, -2.2), 0.5);
    player.grounded = true;
    ctx.set_player(player);
    ctx.tick(DT);
    assert!(ctx.near_seat());
    ctx
}

fn seated() -> SimContext {
    let mut ctx = beside_seat();
    press(&mut ctx, KeyCode::KeyE);
    ctx.tick(DT);
    run(&mut ctx, 8, 0.1);
    assert_eq!(ctx.mode(), InteractionMode::Seated);
    ctx
}

#[test]
fn walk_forward_one_second() {
    let mut ctx = empty_room();
    let start = ctx.player().position;
    ctx.on_key_down(KeyCode::KeyW);
    run(&mut ctx, 60, DT);

    let end = ctx.player().position;
    let horizontal = Vec2::new(end.x - start.x, end.z - start.z);
    assert!((horizontal.length() - 3.0).abs() < 1e-3);
    assert!(end.x.abs() < 1e-5);
    assert!(end.z < start.z);
    assert_eq!(end.y, 0.5);
    assert!(ctx.player().grounded);
}

#[test]
fn running_scales_speed() {
    let mut ctx = empty_room();
    let start = ctx.player().position;
    ctx.on_key_down(KeyCode::KeyW);
    ctx.on_key_down(KeyCode::ShiftLeft);
    run(&mut ctx, 60, DT);
    let travelled = (ctx.player().position - start).with_y(0.0).length();
    assert!((travelled - 3.0 * 1.9).abs() < 1e-3);
}

#[test]
fn sphere_is_pushed_out_of_box_face() {
    let boxes = [Collider::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0))];
    let pos = resolve(Vec3::new(1.3, 1.0, 0.0), 0.5, &boxes);
    assert!((pos.x - (1.0 + 0.5 + COLLISION_EPS)).abs() < 1e-5);
    assert_eq!(pos.y, 1.0);
    assert_eq!(pos.z, 0.0);
}

#[test]
fn centre_inside_box_is_lifted_onto_top() {
    let boxes = [Collider::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0))];
    let pos = resolve(Vec3::new(0.2, 0.4, -0.3), 0.5, &boxes);
    assert!((pos.y - (1.0 + 0.5 + COLLISION_EPS)).abs() < 1e-5);
    assert_eq!(pos.x, 0.2);
    assert_eq!(pos.z, -0.3);
}

#[test]
fn clear_positions_are_untouched() {
    let boxes = [Collider::new(Vec3::new(1.0, 0.0, -1.0), Vec3::new(2.0, 2.0, 1.0))];
    let tentative = Vec3::new(-3.0, 0.5, 0.0);
    assert_eq!(resolve(tentative, 0.5, &boxes), tentative);
}

#[test]
fn degenerate_colliders_are_ignored() {
    let boxes = [
        Collider::new(Vec3::ZERO, Vec3::ZERO),
        Collider::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, 2.0, 2.0)),
        Collider::new(Vec3::splat(f32::NAN), Vec3::ONE),
    ];
    let tentative = Vec3::new(0.1, 0.2, 0.1);
    assert_eq!(resolve(tentative, 0.5, &boxes), tentative);
    assert_eq!(max_penetration(tentative, 0.5, &boxes), 0.0);
}

#[test]
fn built_collider_honours_centre_offset_and_scale() {
    let bounds = ModelBounds {
        center: Vec3::new(0.0, 1.0, 0.0),
        size: Vec3::splat(2.0),
    };
    let placement = Placement {
        translation: Vec3::new(5.0, 0.0, 0.0),
        scale: Vec3::splat(0.5),
    };
    let collider = build(bounds, placement);
    assert!((collider.min - Vec3::new(4.5, 0.0, -0.5)).length() < 1e-6);
    assert!((collider.max - Vec3::new(5.5, 1.0, 0.5)).length() < 1e-6);
}

#[test]
fn zero_size_built_collider_never_collides() {
    let flat = build(ModelBounds::floor_anchored(Vec3::ZERO), Placement::at(Vec3::ZERO));
    let squashed = build(
        ModelBounds::floor_anchored(Vec3::splat(2.0)),
        Placement {
            translation: Vec3::ZERO,
            scale: Vec3::new(1.0, 0.0, 1.0),
        },
    );
    let boxes = [flat, squashed];
    assert!(boxes.iter().all(Collider::is_degenerate));
    for tentative in [Vec3::ZERO, Vec3::new(0.2, 0.1, -0.3)] {
        assert_eq!(resolve(tentative, 0.5, &boxes), tentative);
    }
}

#[test]
fn resolution_depends_on_collider_order() {
    // Two walls closer together than the player is wide.
    let left = Collider::new(Vec3::new(-1.0, 0.0, -5.0), Vec3::new(0.0, 2.0, 5.0));
    let right = Collider::new(Vec3::new(0.8, 0.0, -5.0), Vec3::new(2.0, 2.0, 5.0));
    let tentative = Vec3::new(0.3, 1.0, 0.0);

    let a = resolve(tentative, 0.5, &[left, right]);
    let b = resolve(tentative, 0.5, &[right, left]);
    assert!((a.x - b.x).abs() > 0.1);

    // Whatever came last is always cleared.
    assert!(max_penetration(a, 0.5, &[right]) <= 0.0);
    assert!(max_penetration(b, 0.5, &[left]) <= 0.0);
}

#[test]
fn walking_into_a_wall_never_penetrates() {
    let mut ctx = default_room();
    let mut player = PlayerState::spawn(Vec3::new(4.0, 0.5, -3.0), 0.5);
    player.grounded = true;
    ctx.set_player(player);
    ctx.on_key_down(KeyCode::KeyW);
    ctx.on_key_down(KeyCode::ShiftLeft);

    for _ in 0..120 {
        ctx.tick(DT);
        let p = ctx.player();
        assert!(max_penetration(p.position, p.radius, ctx.colliders().all()) <= 1e-4);
    }
    // Wall face at z = -4.5.
    assert!((ctx.player().position.z - (-4.5 + 0.5 + COLLISION_EPS)).abs() < 1e-3);
}

#[test]
fn landing_on_a_box_comes_to_rest() {
    let boxes = ColliderRegistry::new(vec![Collider::from_center_size(
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(2.0, 1.0, 2.0),
    )]);
    let mut ctx = SimContext::new(SimSettings::default(), boxes);
    ctx.set_player(PlayerState::spawn(Vec3::new(0.0, 3.0, 0.0), 0.5));
    run(&mut ctx, 120, DT);

    let p = ctx.player();
    assert!((p.position.y - (1.0 + 0.5 + COLLISION_EPS)).abs() < 1e-3);
    assert_eq!(p.velocity.y, 0.0);
}

#[test]
fn jump_only_from_the_ground() {
    let params = MovementParams::default();
    let intent = InputIntent {
        jump_held: true,
        ..Default::default()
    };

    let mut grounded = PlayerState::spawn(Vec3::new(0.0, 0.5, 0.0), 0.5);
    grounded.grounded = true;
    let next = integrate(&grounded, &intent, Vec3::NEG_Z, DT, &params);
    assert_eq!(next.velocity.y, params.jump_speed);
    assert!(!next.grounded);

    let airborne = PlayerState::spawn(Vec3::new(0.0, 2.0, 0.0), 0.5);
    let next = integrate(&airborne, &intent, Vec3::NEG_Z, DT, &params);
    assert!((next.velocity.y - params.gravity * DT).abs() < 1e-6);
    assert!(!next.grounded);
}

#[test]
fn jump_leaves_and_returns_to_the_floor() {
    let mut ctx = empty_room();
    run(&mut ctx, 60, DT);
    assert!(ctx.player().grounded);

    ctx.on_key_down(KeyCode::Space);
    ctx.tick(DT);
    ctx.on_key_up(KeyCode::Space);
    let mut peak: f32 = 0.0;
    for _ in 0..120 {
        ctx.tick(DT);
        peak = peak.max(ctx.player().position.y);
    }
    // v^2 / 2g above the resting height.
    assert!((peak - (0.5 + 4.2 * 4.2 / (2.0 * 9.8))).abs() < 0.1);
    assert_eq!(ctx.player().position.y, 0.5);
}

#[test]
fn sit_requires_proximity() {
    let mut ctx = default_room();
    run(&mut ctx, 30, DT);
    press(&mut ctx, KeyCode::KeyE);
    ctx.tick(DT);
    assert_eq!(ctx.mode(), InteractionMode::FreeRoam);
}

#[test]
fn sit_transition_reports_and_captures() {
    let mut ctx = beside_seat();
    press(&mut ctx, KeyCode::KeyE);
    let outcome = ctx.tick(DT);
    assert_eq!(
        outcome.transition,
        Some((InteractionMode::FreeRoam, InteractionMode::SitTransition))
    );
    assert!(!ctx.snapshot().near_seat);
}

#[test]
fn sit_completes_for_any_split_of_the_duration() {
    let splits: [&[f32]; 3] = [
        &[0.1; 7],
        &[DT; 42],
        &[0.25, 0.05, 0.3, 0.1],
    ];
    for split in splits {
        let mut ctx = beside_seat();
        ctx.camera_mut().yaw = 0.4;
        ctx.camera_mut().pitch = -0.1;
        press(&mut ctx, KeyCode::KeyE);
        ctx.tick(DT);

        let (last, rest) = split.split_last().unwrap();
        for dt in rest {
            ctx.tick(*dt);
            assert_eq!(ctx.mode(), InteractionMode::SitTransition);
        }
        ctx.tick(*last);

        assert_eq!(ctx.mode(), InteractionMode::Seated);
        assert_eq!(ctx.player().position, ctx.settings().seat_offset());
        assert_eq!(ctx.camera().yaw, 0.4);
        assert_eq!(ctx.camera().pitch, -0.1);
    }
}

#[test]
fn sit_transition_sways_and_ignores_input() {
    let mut ctx = beside_seat();
    press(&mut ctx, KeyCode::KeyE);
    ctx.tick(DT);
    run(&mut ctx, 3, 0.1);
    assert!(ctx.camera().yaw > 0.0);

    press(&mut ctx, KeyCode::KeyN);
    press(&mut ctx, KeyCode::KeyF);
    press(&mut ctx, KeyCode::KeyP);
    ctx.tick(0.1);
    assert_eq!(ctx.mode(), InteractionMode::SitTransition);
    assert_eq!(ctx.display().phase, DisplayPhase::Off);

    assert!(!ctx.look(Vec2::new(50.0, 0.0)));
}

#[test]
fn seated_position_is_pinned() {
    let mut ctx = seated();
    ctx.on_key_down(KeyCode::KeyW);
    ctx.on_key_down(KeyCode::Space);
    run(&mut ctx, 30, DT);
    assert_eq!(ctx.player().position, ctx.settings().seat_offset());
    assert_eq!(ctx.player().velocity, Vec3::ZERO);
}

#[test]
fn seated_camera_eases_toward_the_seat_eye() {
    let mut ctx = seated();
    let eye = ctx.settings().seat_offset() + Vec3::Y * ctx.settings().seated_eye_offset;
    let start = Vec3::new(1.6, 1.9, 2.0);
    ctx.camera_mut().position = start;
    ctx.tick(DT);

    let expected = start.lerp(eye, 0.9);
    assert!((ctx.camera().position - expected).length() < 1e-5);
    assert!((ctx.camera().position - Vec3::new(1.6, 1.0, -2.5)).length() < 1e-5);
    assert!((ctx.camera().position - eye).length() > 0.1);

    run(&mut ctx, 30, DT);
    assert!((ctx.camera().position - eye).length() < 1e-4);
}

#[test]
fn display_powers_on_while_focused() {
    let mut ctx = seated();
    press(&mut ctx, KeyCode::KeyF);
    ctx.tick(DT);
    assert_eq!(ctx.mode(), InteractionMode::Focused);

    press(&mut ctx, KeyCode::KeyP);
    ctx.tick(DT);
    assert_eq!(ctx.display().phase, DisplayPhase::PoweringOn);
    run(&mut ctx, 72, DT);
    assert_eq!(ctx.display().phase, DisplayPhase::On);

    press(&mut ctx, KeyCode::KeyF);
    ctx.tick(DT);
    assert_eq!(ctx.mode(), InteractionMode::Seated);
    assert_eq!(ctx.display().phase, DisplayPhase::On);
}

#[test]
fn display_powers_on_after_full_duration() {
    let mut ctx = seated();
    press(&mut ctx, KeyCode::KeyP);
    ctx.tick(DT);
    assert_eq!(ctx.display().phase, DisplayPhase::PoweringOn);
    assert_eq!(ctx.display().timer, 0.0);

    run(&mut ctx, 71, DT);
    assert_eq!(ctx.display().phase, DisplayPhase::PoweringOn);
    ctx.tick(DT);
    assert_eq!(ctx.display().phase, DisplayPhase::On);

    press(&mut ctx, KeyCode::KeyP);
    ctx.tick(DT);
    assert_eq!(ctx.display().phase, DisplayPhase::Off);
}

#[test]
fn standing_cancels_power_on() {
    let mut ctx = seated();
    press(&mut ctx, KeyCode::KeyP);
    ctx.tick(DT);
    run(&mut ctx, 60, DT);
    assert_eq!(ctx.display().phase, DisplayPhase::PoweringOn);

    press(&mut ctx, KeyCode::KeyN);
    let outcome = ctx.tick(DT);
    assert_eq!(
        outcome.transition,
        Some((InteractionMode::Seated, InteractionMode::FreeRoam))
    );
    assert_eq!(ctx.display().phase, DisplayPhase::Off);
    assert_eq!(
        ctx.player().position,
        ctx.settings().seat_offset() + ctx.settings().stand_offset
    );
    assert_eq!(ctx.player().velocity, Vec3::ZERO);

    for _ in 0..120 {
        ctx.tick(DT);
        assert_ne!(ctx.display().phase, DisplayPhase::On);
    }
}

#[test]
fn power_is_ignored_away_from_the_seat() {
    let mut ctx = default_room();
    press(&mut ctx, KeyCode::KeyP);
    run(&mut ctx, 120, DT);
    assert_eq!(ctx.display().phase, DisplayPhase::Off);
}

#[test]
fn focus_narrows_fov_and_blocks_standing() {
    let mut ctx = seated();
    assert_eq!(ctx.camera().fov_deg, 75.0);

    press(&mut ctx, KeyCode::KeyF);
    let outcome = ctx.tick(DT);
    assert_eq!(ctx.mode(), InteractionMode::Focused);
    assert_eq!(outcome.cursor, Some(CursorGrab::Release));
    assert_eq!(ctx.camera().fov_deg, 12.0);
    assert_eq!(ctx.camera().look_target, Some(ctx.settings().focus_target));

    let before = *ctx.player();
    press(&mut ctx, KeyCode::KeyN);
    let outcome = ctx.tick(DT);
    assert_eq!(ctx.mode(), InteractionMode::Focused);
    assert_eq!(outcome.transition, None);
    assert_eq!(*ctx.player(), before);
}

#[test]
fn leaving_focus_keeps_the_view_direction() {
    let mut ctx = seated();
    press(&mut ctx, KeyCode::KeyF);
    run(&mut ctx, 10, DT);
    let focused_forward = ctx.camera().forward();

    press(&mut ctx, KeyCode::KeyF);
    let outcome = ctx.tick(DT);
    assert_eq!(ctx.mode(), InteractionMode::Seated);
    assert_eq!(outcome.cursor, Some(CursorGrab::Capture));
    assert_eq!(ctx.camera().fov_deg, 75.0);
    assert_eq!(ctx.camera().look_target, None);
    assert!((ctx.camera().forward() - focused_forward).length() < 1e-3);
}

#[test]
fn focus_is_ignored_while_walking() {
    let mut ctx = default_room();
    press(&mut ctx, KeyCode::KeyF);
    let outcome = ctx.tick(DT);
    assert_eq!(ctx.mode(), InteractionMode::FreeRoam);
    assert_eq!(outcome.cursor, None);
}

#[test]
fn mouse_look_needs_pointer_lock() {
    let mut ctx = default_room();
    assert!(!ctx.look(Vec2::new(100.0, 0.0)));
    assert_eq!(ctx.camera().yaw, 0.0);

    ctx.set_pointer_locked(true);
    assert!(ctx.look(Vec2::new(100.0, 0.0)));
    assert!((ctx.camera().yaw - (-0.2)).abs() < 1e-6);
}

#[test]
fn mouse_look_is_blocked_while_focused() {
    let mut ctx = seated();
    ctx.set_pointer_locked(true);
    assert!(ctx.look(Vec2::new(10.0, 0.0)));

    press(&mut ctx, KeyCode::KeyF);
    ctx.tick(DT);
    assert!(!ctx.look(Vec2::new(10.0, 0.0)));
}

#[test]
fn footsteps_follow_movement_and_mode() {
    let mut ctx = empty_room();
    assert!(!ctx.footstep_cue().playing);

    ctx.on_key_down(KeyCode::KeyW);
    let walk = ctx.footstep_cue();
    assert!(walk.playing);
    assert_eq!(walk.volume, 0.7);
    assert_eq!(walk.playback_rate, 1.0);

    ctx.on_key_down(KeyCode::ShiftLeft);
    let sprint = ctx.footstep_cue();
    assert_eq!(sprint.volume, 1.0);
    assert_eq!(sprint.playback_rate, 1.6);

    let mut ctx = seated();
    ctx.on_key_down(KeyCode::KeyW);
    assert!(!ctx.footstep_cue().playing);
}

#[test]
fn non_finite_dt_is_a_no_op_step() {
    let mut ctx = empty_room();
    run(&mut ctx, 60, DT);
    let before = *ctx.player();
    ctx.on_key_down(KeyCode::KeyW);
    ctx.tick(f32::NAN);
    ctx.tick(-1.0);
    assert_eq!(ctx.player().position, before.position);
    assert!(ctx.player().position.is_finite());
}

#[test]
fn determinism() {
    fn script(ctx: &mut SimContext, i: usize) {
        match i {
            0 => ctx.on_key_down(KeyCode::KeyW),
            15 => ctx.on_key_down(KeyCode::ShiftLeft),
            30 => ctx.on_key_down(KeyCode::Space),
            34 => ctx.on_key_up(KeyCode::Space),
            50 => ctx.on_key_down(KeyCode::KeyA),
            80 => ctx.on_key_up(KeyCode::KeyW),
            100 => ctx.on_key_down(KeyCode::KeyS),
            _ => {}
        }
        if i % 7 == 0 {
            ctx.set_pointer_locked(true);
            ctx.look(Vec2::new(13.0, -4.0));
        }
    }

    let mut a = default_room();
    let mut b = default_room();
    for i in 0..200 {
        script(&mut a, i);
        script(&mut b, i);
        let dt = if i % 3 == 0 { DT } else { 1.0 / 144.0 };
        a.tick(dt);
        b.tick(dt);
    }
    assert_eq!(a.player(), b.player());
    assert_eq!(a.camera(), b.camera());
    assert_eq!(a.snapshot(), b.snapshot());
}
