// Host-side tests for the animation driver: scheduling, stop semantics,
// damping and last-value-wins input.

mod common;

use common::*;
use glam::{Vec2, Vec3};
use starfield_core::driver::parallax_target;
use starfield_core::*;

fn running(cfg: BackgroundConfig) -> Background<MockHost> {
    let mut bg = Background::with_seed(MockHost::new(800, 600), cfg, 17).unwrap();
    assert_eq!(bg.mount().unwrap(), MountOutcome::Running);
    bg
}

#[test]
fn each_tick_schedules_exactly_one_more() {
    let mut bg = running(small_config());
    assert_eq!(bg.host().pending_frames(), 1);
    for i in 0..5 {
        assert_eq!(pump(&mut bg, i as f64 * 16.0), 1);
        assert_eq!(bg.host().pending_frames(), 1);
    }
    assert_eq!(bg.ticks(), 5);
    assert_eq!(bg.host().probe.renders.get(), 5);
}

#[test]
fn no_render_after_stop_returns() {
    let mut bg = running(small_config());
    run_frames(&mut bg, 0.0, 4);
    let probe = bg.host().probe.clone();
    let renders = probe.renders.get();
    assert_eq!(renders, 4);

    assert!(bg.unmount());
    assert_eq!(bg.host().pending_frames(), 0);

    run_frames(&mut bg, 100.0, 10);
    assert_eq!(probe.renders.get(), renders);
}

#[test]
fn tick_already_dispatched_before_stop_does_nothing() {
    let mut bg = running(small_config());
    run_frames(&mut bg, 0.0, 2);
    let probe = bg.host().probe.clone();

    // the display has already picked up the callback when the page unmounts
    let in_flight = bg.host_mut().take_pending();
    assert_eq!(in_flight.len(), 1);
    bg.unmount();
    for handle in in_flight {
        bg.on_frame(handle, 64.0);
    }

    assert_eq!(probe.renders.get(), 2);
    assert_eq!(bg.host().pending_frames(), 0);
    assert_eq!(bg.state(), LifecycleState::Unmounted);
}

#[test]
fn driver_stop_is_idempotent() {
    let mut host = MockHost::new(10, 10);
    let mut driver: AnimationDriver<u32> = AnimationDriver::default();
    driver.start(&mut host).unwrap();
    assert!(driver.is_live());
    assert!(driver.has_pending());

    assert!(driver.stop(&mut host));
    assert!(!driver.stop(&mut host));
    assert!(!driver.is_live());
    assert_eq!(host.pending_frames(), 0);
    let cancels = host.probe.journal().iter().filter(|e| *e == "cancel").count();
    assert_eq!(cancels, 1);
}

#[test]
fn driver_does_not_double_schedule() {
    let mut host = MockHost::new(10, 10);
    let mut driver: AnimationDriver<u32> = AnimationDriver::default();
    driver.start(&mut host).unwrap();
    driver.start(&mut host).unwrap();
    driver.reschedule(&mut host).unwrap();
    assert_eq!(host.pending_frames(), 1);
    let handle = host.take_pending()[0];
    assert!(!driver.begin_frame(handle + 1));
    assert!(driver.has_pending());
    assert!(driver.begin_frame(handle));
    assert!(!driver.has_pending());
    assert!(!driver.begin_frame(handle));
}

#[test]
fn tick_from_before_a_remount_does_not_start_a_second_chain() {
    let mut bg = running(small_config());
    run_frames(&mut bg, 0.0, 2);

    let stale = bg.host_mut().take_pending();
    assert_eq!(stale.len(), 1);
    bg.unmount();
    assert_eq!(bg.mount().unwrap(), MountOutcome::Running);
    assert_eq!(bg.host().pending_frames(), 1);

    for handle in stale {
        bg.on_frame(handle, 40.0);
    }
    assert_eq!(bg.host().pending_frames(), 1);
    assert_eq!(bg.ticks(), 0);

    for i in 1..=3u64 {
        assert_eq!(pump(&mut bg, 40.0 + i as f64 * 16.0), 1);
        assert_eq!(bg.host().pending_frames(), 1);
        assert_eq!(bg.ticks(), i);
    }
}

#[test]
fn camera_moves_by_damped_fraction_of_the_gap() {
    let cfg = small_config();
    let damping = cfg.parallax.damping;
    let mut bg = running(cfg.clone());
    bg.on_pointer_move(800.0, 0.0); // top-right corner
    let target = parallax_target(bg.scene().unwrap().home_eye(), bg.input(), &cfg);

    let mut prev = bg.scene().unwrap().camera.eye;
    for i in 0..50 {
        pump(&mut bg, i as f64 * 16.0);
        let eye = bg.scene().unwrap().camera.eye;
        let moved = (eye - prev).length();
        let gap = (target - prev).length();
        assert!(moved <= damping * gap + 1e-5, "moved {moved} with gap {gap}");
        assert!((target - eye).length() <= gap + 1e-5);
        prev = eye;
    }
    assert!(prev.x > 0.0 && prev.y > 0.0);
}

#[test]
fn camera_converges_toward_target_without_overshoot() {
    let cfg = small_config();
    let mut bg = running(cfg.clone());
    bg.on_pointer_move(0.0, 600.0); // bottom-left corner
    let target = parallax_target(bg.scene().unwrap().home_eye(), bg.input(), &cfg);
    run_frames(&mut bg, 0.0, 600);
    let eye = bg.scene().unwrap().camera.eye;
    assert!((eye - target).length() < 0.01);
    assert!(eye.x >= target.x - 1e-4);
}

#[test]
fn last_pointer_event_wins_within_a_tick() {
    let mut a = running(small_config());
    let mut b = running(small_config());

    a.on_pointer_move(100.0, 100.0);
    a.on_pointer_move(700.0, 500.0);
    b.on_pointer_move(700.0, 500.0);
    assert_eq!(a.input(), b.input());

    pump(&mut a, 16.0);
    pump(&mut b, 16.0);
    let ea = a.scene().unwrap().camera.eye;
    let eb = b.scene().unwrap().camera.eye;
    assert_eq!(ea, eb);
    let ra: Vec<Vec2> = a.scene().unwrap().layers().iter().map(|l| l.transform.rotation).collect();
    let rb: Vec<Vec2> = b.scene().unwrap().layers().iter().map(|l| l.transform.rotation).collect();
    assert_eq!(ra, rb);
}

#[test]
fn scroll_pulls_camera_down() {
    let cfg = small_config();
    let mut bg = running(cfg);
    bg.on_scroll(400.0);
    bg.on_scroll(800.0);
    assert_eq!(bg.input().scroll_y, 800.0);
    run_frames(&mut bg, 0.0, 30);
    assert!(bg.scene().unwrap().camera.eye.y < 0.0);
}

#[test]
fn pointer_is_normalized_to_unit_square() {
    let mut bg = running(small_config());
    bg.on_pointer_move(400.0, 300.0);
    assert_eq!(bg.input().pointer, Vec2::ZERO);
    bg.on_pointer_move(0.0, 0.0);
    assert_eq!(bg.input().pointer, Vec2::new(-1.0, 1.0));
    bg.on_pointer_move(5000.0, -50.0);
    assert_eq!(bg.input().pointer, Vec2::new(1.0, 1.0));
    bg.on_pointer_move(f32::NAN, 10.0);
    assert_eq!(bg.input().pointer, Vec2::new(1.0, 1.0));
}

#[test]
fn layers_rotate_at_their_own_rate() {
    let cfg = small_config();
    let mut bg = running(cfg.clone());
    run_frames(&mut bg, 0.0, 10);
    let layers = bg.scene().unwrap().layers();
    for (layer, desc) in layers.iter().zip(&cfg.layers) {
        let expected = desc.spin * 10.0;
        assert!((layer.transform.rotation - expected).length() < 1e-5);
    }
    assert!(layers[0].transform.rotation.y < layers[2].transform.rotation.y);
}

#[test]
fn horizontal_pointer_turns_layers_about_y() {
    let mut bg = running(BackgroundConfig::preset(Preset::Experience));
    bg.on_pointer_move(800.0, 300.0); // right edge, vertical centre
    pump(&mut bg, 16.0);
    let rotation = bg.scene().unwrap().layers()[0].transform.rotation;
    assert!((rotation - Vec2::new(0.0005, 0.0015)).length() < 1e-7, "{rotation}");

    bg.on_pointer_move(400.0, 0.0); // top edge, horizontal centre
    pump(&mut bg, 32.0);
    let rotation = bg.scene().unwrap().layers()[0].transform.rotation;
    assert!((rotation - Vec2::new(0.0013, 0.0025)).length() < 1e-7, "{rotation}");
}

#[test]
fn drift_bobs_layers_vertically() {
    let cfg = small_config();
    let drift = cfg.drift.unwrap();
    let mut bg = running(cfg);
    let t = 1234.0;
    pump(&mut bg, t);
    let expected = ((t * drift.frequency_per_ms).sin() as f32) * drift.amplitude;
    for layer in bg.scene().unwrap().layers() {
        assert!((layer.transform.offset.y - expected).abs() < 1e-6);
        assert!(layer.transform.offset.y.abs() <= drift.amplitude);
    }
}

#[test]
fn static_preset_keeps_camera_home() {
    let mut bg = running(BackgroundConfig::preset(Preset::About));
    bg.on_pointer_move(10.0, 10.0);
    run_frames(&mut bg, 0.0, 20);
    assert_eq!(bg.scene().unwrap().camera.eye, Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn meteors_spawn_fall_and_expire() {
    let mut cfg = BackgroundConfig::preset(Preset::Home);
    cfg.layers[0].count = 10;
    let meteor = cfg.meteors.unwrap();
    let mut bg = running(cfg);

    pump(&mut bg, 0.0);
    assert_eq!(bg.scene().unwrap().meteors().unwrap().meteors().len(), 0);

    pump(&mut bg, meteor.spawn_interval_ms);
    let shower = bg.scene().unwrap().meteors().unwrap();
    assert_eq!(shower.meteors().len(), 1);
    let y0 = shower.meteors()[0].position.y;

    pump(&mut bg, meteor.spawn_interval_ms + 400.0);
    let shower = bg.scene().unwrap().meteors().unwrap();
    assert!(shower.meteors()[0].position.y < y0);

    // past the longest lifetime every early meteor is gone, and the pool never overflows
    let mut t = meteor.spawn_interval_ms + 400.0;
    while t < meteor.spawn_interval_ms + meteor.max_lifetime_ms + 1.0 {
        t += 16.0;
        pump(&mut bg, t);
        let n = bg.scene().unwrap().meteors().unwrap().meteors().len();
        assert!(n <= meteor.capacity);
    }
    let shower = bg.scene().unwrap().meteors().unwrap();
    assert!(shower
        .meteors()
        .iter()
        .all(|m| m.spawned_ms > meteor.spawn_interval_ms));
    assert_eq!(bg.host().probe.last_transients.get(), shower.meteors().len());
}

#[test]
fn meteor_backlog_is_dropped_after_a_long_pause() {
    let cfg = MeteorConfig::default();
    let mut shower = MeteorShower::new(cfg);
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(4);
    shower.update(0.0, &mut rng);
    shower.update(60_000.0, &mut rng);
    assert_eq!(shower.meteors().len(), 1);
}
