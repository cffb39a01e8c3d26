use fireworks_canvas::audio_engine::SilentAudio;
use fireworks_canvas::fireworks::FireworksTestHelpers;
use fireworks_canvas::physic_engine::config::{BoundariesUpdate, MouseOptionsUpdate};
use fireworks_canvas::physic_engine::{OptionsUpdate, Vec2};
use fireworks_canvas::renderer_engine::{Canvas2D, CompositeOperation, DrawCommand, RecordingCanvas};
use fireworks_canvas::window_engine::PointerState;
use fireworks_canvas::{DrainOutcome, Fireworks, FireworksOptions};

mod helpers;
use helpers::{LoggingAudio, FRAME_MS};

const MAX_FRAMES: usize = 10_000;

fn controller(seed: u64) -> Fireworks<RecordingCanvas, SilentAudio> {
    Fireworks::with_seed(
        RecordingCanvas::new(800, 600),
        SilentAudio,
        FireworksOptions::default(),
        seed,
    )
}

/// Fait tourner l'horloge de l'hôte jusqu'à l'arrêt; retourne le nombre de frames.
fn run_until_stopped<F>(fw: &mut Fireworks<RecordingCanvas, SilentAudio>, mut each: F) -> usize
where
    F: FnMut(&Fireworks<RecordingCanvas, SilentAudio>),
{
    let mut clock = 0.0;
    let mut frames = 0;
    while fw.is_running() {
        fw.on_animation_frame(clock);
        if let Some(canvas) = fw.canvas_mut() {
            canvas.commands.clear();
        }
        each(&*fw);
        clock += FRAME_MS;
        frames += 1;
        assert!(frames < MAX_FRAMES, "animation never drained");
    }
    frames
}

#[test]
fn test_construction_syncs_boundaries_with_canvas() {
    let fw = controller(1);
    let b = fw.current_options().boundaries;
    assert_eq!((b.width, b.height), (800.0, 600.0));
    assert_eq!(fw.engine().size(), Vec2::new(800.0, 600.0));
    assert!(!fw.is_running());
}

#[test]
fn test_launch_runs_until_everything_faded() {
    let mut fw = controller(2);
    fw.launch(3);
    assert!(fw.is_running());
    assert_eq!(fw.engine().traces_count(), 3);

    let rx = fw.wait_stop(false);
    let mut max_traces = 0;
    run_until_stopped(&mut fw, |fw| {
        max_traces = max_traces.max(fw.engine().traces_count());
        // tant que l'animation tourne, il reste quelque chose à dessiner
        if fw.is_running() {
            assert!(!fw.engine().is_idle());
        }
    });

    assert_eq!(max_traces, 3, "no automatic launch while draining");
    assert!(fw.engine().is_idle());
    assert!(!fw.is_draining());
    assert_eq!(rx.try_recv(), Ok(DrainOutcome::Drained));
    assert!(fw.canvas().is_some());
}

#[test]
fn test_wait_stop_while_stopped_resolves_immediately() {
    let mut fw = controller(3);
    let rx = fw.wait_stop(true);
    assert_eq!(rx.try_recv(), Ok(DrainOutcome::Drained));
    assert!(fw.canvas().is_some());
}

#[test]
fn test_wait_stop_with_dispose_drops_canvas() {
    let mut fw = controller(4);
    fw.start();
    fw.launch(1);
    let rx = fw.wait_stop(true);
    run_until_stopped(&mut fw, |_| {});
    assert_eq!(rx.try_recv(), Ok(DrainOutcome::Drained));
    assert!(fw.canvas().is_none());
}

#[test]
fn test_explicit_stop_cancels_drain() {
    let mut fw = controller(5);
    fw.launch(1);
    let rx = fw.wait_stop(false);
    assert!(rx.try_recv().is_err());

    fw.stop(false);
    assert_eq!(rx.try_recv(), Ok(DrainOutcome::Cancelled));
    assert!(!fw.is_running());
    assert!(fw.engine().is_idle());
    assert!(fw.canvas().is_some());
}

#[test]
fn test_stop_dispose_releases_canvas() {
    let mut fw = controller(6);
    fw.start();
    fw.stop(true);
    assert!(fw.canvas().is_none());

    // sans surface, tout reste sûr
    fw.start();
    fw.render();
    assert!(!fw.on_animation_frame(0.0));
    fw.clear();
    fw.update_size(Some(320), Some(200));
    assert_eq!(fw.engine().size(), Vec2::new(320.0, 200.0));
}

#[test]
fn test_pause_keeps_entities() {
    let mut fw = controller(7);
    fw.launch(2);
    fw.pause();
    assert!(!fw.is_running());

    for i in 0..10 {
        assert!(!fw.on_animation_frame(i as f64 * FRAME_MS));
    }
    assert_eq!(fw.engine().traces_count(), 2);
    assert!(fw.is_draining());

    fw.pause();
    assert!(fw.is_running());
    assert_eq!(fw.engine().traces_count(), 2);
}

#[test]
fn test_clear_leaves_only_the_fade() {
    let mut fw = controller(8);
    fw.start();
    fw.force_next_launch();
    fw.render();
    assert_eq!(fw.engine().traces_count(), 1);

    fw.clear();
    assert!(fw.engine().is_idle());
    let canvas = fw.canvas_mut().unwrap();
    assert_eq!(canvas.take_commands().last(), Some(&DrawCommand::Clear));

    fw.scheduler_mut().reset_tick();
    fw.render();
    let commands = fw.canvas_mut().unwrap().take_commands();
    assert_eq!(commands.len(), 3);
    assert_eq!(
        commands[0],
        DrawCommand::Composite(CompositeOperation::DestinationOut)
    );
    assert_eq!(commands[2], DrawCommand::Composite(CompositeOperation::Lighter));
}

#[test]
fn test_scheduler_drives_automatic_launches() {
    let mut fw = controller(9);
    fw.update_options(OptionsUpdate {
        delay: Some(fireworks_canvas::physic_engine::MinMax::new(1, 1)),
        ..Default::default()
    });
    fw.start();

    // première frame : ancrage de l'horloge, rien n'est rendu
    assert!(!fw.on_animation_frame(0.0));
    assert!(!fw.on_animation_frame(FRAME_MS * 0.5));
    // tick += 16.67 * 30 * π / 1000 ≈ 1.57 > 1
    assert!(fw.on_animation_frame(FRAME_MS));
    assert_eq!(fw.engine().traces_count(), 1);
    assert_eq!(fw.scheduler().tick(), 0.0);
}

#[test]
fn test_update_size_resizes_canvas_and_boundaries() {
    let mut fw = controller(10);
    fw.update_size(Some(1024), None);

    let canvas = fw.canvas().unwrap();
    assert_eq!(canvas.size(), Vec2::new(1024.0, 600.0));
    assert!(canvas.commands.contains(&DrawCommand::Resize {
        width: 1024,
        height: 600
    }));
    let b = fw.current_options().boundaries;
    assert_eq!((b.width, b.height), (1024.0, 600.0));
    assert_eq!(fw.engine().size(), Vec2::new(1024.0, 600.0));

    fw.update_boundaries(BoundariesUpdate {
        x: Some(10.0),
        ..Default::default()
    });
    let b = fw.current_options().boundaries;
    assert_eq!(b.x, 10.0);
    assert_eq!(b.y, 50.0);
    assert_eq!(b.width, 1024.0);
}

#[test]
fn test_pointer_click_launches_toward_pointer() {
    let mut fw = controller(11);
    fw.update_options(OptionsUpdate {
        mouse: Some(MouseOptionsUpdate {
            click: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    });
    assert_eq!(fw.current_options().mouse.max, 1);
    fw.start();
    fw.pointer_down(200.0, 150.0);

    fw.render();
    assert_eq!(fw.engine().traces_count(), 1);
    let trace = fw.engine().traces().next().unwrap();
    assert_eq!(trace.target(), Vec2::new(200.0, 150.0));

    // mouse.max = 1 : pas de seconde fusée tant que la première vole
    fw.render();
    assert_eq!(fw.engine().traces_count(), 1);

    fw.pointer_up();
    assert!(!fw.mouse().is_active());
}

#[test]
fn test_detached_controller_is_safe() {
    let mut fw: Fireworks<RecordingCanvas, LoggingAudio> =
        Fireworks::detached(LoggingAudio::default(), FireworksOptions::default());
    fw.start();
    fw.render();
    fw.on_animation_frame(0.0);
    fw.on_animation_frame(FRAME_MS);
    fw.launch(2);
    assert_eq!(fw.engine().traces_count(), 2);
    fw.clear();
    fw.pause();
    fw.stop(true);
    assert!(!fw.is_running());
    assert_eq!(fw.audio().count(), 0);

    fw.mount_canvas(RecordingCanvas::new(640, 480));
    assert_eq!(fw.current_options().boundaries.width, 640.0);
}
