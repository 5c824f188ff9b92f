use super::*;
use crate::config::options::SpeedTier;
use crate::foundation::core::ViewportSize;
use crate::host::headless::HeadlessHost;
use crate::render::recording::RecordingSurface;
use crate::render::surface::Blur;

fn seeded() -> WaveOptions {
    WaveOptions {
        seed: Some(42),
        ..WaveOptions::default()
    }
}

fn mounted(size: ViewportSize) -> (WavyBackground<RecordingSurface>, HeadlessHost) {
    let mut host = HeadlessHost::new(size);
    let mut bg = WavyBackground::with_canvas(seeded(), RecordingSurface::new()).unwrap();
    bg.mount(&mut host);
    (bg, host)
}

fn pump(bg: &mut WavyBackground<RecordingSurface>, host: &mut HeadlessHost) -> usize {
    let mut painted = 0;
    for handle in host.take_pending_frames() {
        if bg.on_frame(handle, host).is_some() {
            painted += 1;
        }
    }
    painted
}

#[test]
fn new_rejects_invalid_options() {
    let err = WavyBackground::<RecordingSurface>::new(WaveOptions {
        wave_opacity: Some(1.5),
        ..WaveOptions::default()
    });
    assert!(err.is_err());
}

#[test]
fn mount_draws_first_frame_synchronously_and_requests_next() {
    let (bg, host) = mounted(ViewportSize::new(64, 32));
    assert!(bg.is_running());
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.resize_listeners(), 1);
    assert_eq!(bg.time(), SpeedTier::Fast.increment());
    assert_eq!(bg.noise_seed(), 42);

    let canvas = bg.canvas().unwrap();
    assert_eq!(canvas.fills().count(), 1);
    assert_eq!(canvas.strokes().count(), 5);
    assert_eq!(canvas.filter(), Some(Blur::new(10.0)));
    assert_eq!(bg.surface_state().size(), ViewportSize::new(64, 32));
}

#[test]
fn each_frame_repaints_and_reschedules() {
    let (mut bg, mut host) = mounted(ViewportSize::new(40, 40));
    for _ in 0..3 {
        assert_eq!(pump(&mut bg, &mut host), 1);
        assert_eq!(host.pending_frames(), 1);
    }
    assert_eq!(bg.canvas().unwrap().strokes().count(), 5 * 4);
    assert!((bg.time() - 4.0 * 0.002).abs() < 1e-12);
}

#[test]
fn stale_handles_are_ignored() {
    let (mut bg, mut host) = mounted(ViewportSize::new(40, 40));
    let first = host.take_pending_frames()[0];
    assert!(bg.on_frame(first, &mut host).is_some());
    assert!(bg.on_frame(first, &mut host).is_none());
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn unmount_cancels_pending_frame_and_releases_listener() {
    let (mut bg, mut host) = mounted(ViewportSize::new(40, 40));
    let LoopState::Running(handle) = bg.loop_state() else {
        panic!("expected a running loop");
    };

    bg.unmount(&mut host);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.resize_listeners(), 0);
    assert_eq!(bg.loop_state(), LoopState::Stopped);
    assert!(!bg.is_mounted());

    let draws = bg.canvas().unwrap().calls().len();
    assert!(bg.on_frame(handle, &mut host).is_none());
    assert_eq!(bg.canvas().unwrap().calls().len(), draws);
    assert_eq!(host.pending_frames(), 0);
}

#[test]
fn remount_replaces_subscription_and_frame_request() {
    let (mut bg, mut host) = mounted(ViewportSize::new(40, 40));
    let first_listener = bg.resize_listener();
    bg.mount(&mut host);

    assert_eq!(host.resize_listeners(), 1);
    assert_eq!(host.pending_frames(), 1);
    assert_ne!(bg.resize_listener(), first_listener);
    assert_eq!(bg.time(), 0.002);
}

#[test]
fn resize_updates_dimensions_and_reapplies_filter() {
    let (mut bg, mut host) = mounted(ViewportSize::new(100, 50));
    bg.canvas_mut().unwrap().clear_calls();

    let listeners = host.set_viewport(Some(ViewportSize::new(300, 80)));
    assert_eq!(listeners.len(), 1);
    assert!(bg.on_resize(listeners[0], &mut host));

    let canvas = bg.canvas().unwrap();
    assert_eq!(canvas.resize_count(), 1);
    assert_eq!(canvas.size(), ViewportSize::new(300, 80));
    assert_eq!(canvas.filter(), Some(Blur::new(10.0)));
    assert!(bg.surface_state().blur_active);
}

#[test]
fn resize_for_foreign_listener_is_ignored() {
    let (mut bg, mut host) = mounted(ViewportSize::new(100, 50));
    let other = host.subscribe_resize();
    host.set_viewport(Some(ViewportSize::new(10, 10)));
    assert!(!bg.on_resize(other.id(), &mut host));
    assert_eq!(bg.surface_state().size(), ViewportSize::new(100, 50));
}

#[test]
fn missing_viewport_skips_resize() {
    let (mut bg, mut host) = mounted(ViewportSize::new(100, 50));
    let listeners = host.set_viewport(None);
    assert!(!bg.on_resize(listeners[0], &mut host));
    assert_eq!(bg.surface_state().size(), ViewportSize::new(100, 50));
    assert!(bg.is_running());
}

#[test]
fn missing_canvas_stalls_until_resize() {
    let (mut bg, mut host) = mounted(ViewportSize::new(30, 30));
    let canvas = bg.detach_canvas();
    assert!(canvas.is_some());

    assert_eq!(pump(&mut bg, &mut host), 0);
    assert_eq!(bg.loop_state(), LoopState::Stalled);
    assert_eq!(host.pending_frames(), 0);

    bg.attach_canvas(RecordingSurface::new());
    let listeners = host.set_viewport(Some(ViewportSize::new(30, 30)));
    assert!(bg.on_resize(listeners[0], &mut host));
    assert!(bg.is_running());
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(bg.canvas().unwrap().strokes().count(), 5);
}

#[test]
fn mount_without_canvas_is_a_silent_stall() {
    let mut host = HeadlessHost::new(ViewportSize::new(30, 30));
    let mut bg = WavyBackground::<RecordingSurface>::new(seeded()).unwrap();
    bg.mount(&mut host);
    assert_eq!(bg.loop_state(), LoopState::Stalled);
    assert!(bg.is_mounted());
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.resize_listeners(), 1);
}
