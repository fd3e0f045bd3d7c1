use tapback::animation::{Angle, Playback, TrackSet};
use tapback::prelude::*;
use tapback::reaction::reaction_tracks;

fn approx(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

#[test]
fn test_negative_time_clamps_to_start() {
    let mut playback = Playback::new();
    let handle = playback.start(reaction_tracks(), 0.0);
    let start = playback.sample(handle, 0.0);
    assert_eq!(start, Some(AnimationValues::REST));
    for t in [-0.001, -0.5, -10.0] {
        assert_eq!(playback.sample(handle, t), start);
    }
}

#[test]
fn test_rests_at_final_keyframes_after_the_end() {
    let tracks = reaction_tracks();
    let total = tracks.duration();
    for extra in [0.0, 0.01, 1.0, 100.0] {
        assert_eq!(tracks.sample(total + extra), AnimationValues::REST);
    }
    // Timed tracks reach their last keyframe at their own end
    assert_eq!(
        tracks.angle.sample(tracks.angle.duration()),
        tracks.angle.final_value()
    );
    assert_eq!(
        tracks.vertical_stretch.sample(tracks.vertical_stretch.duration() + 0.5),
        1.0
    );
}

#[test]
fn test_sampling_is_pure() {
    let mut playback = Playback::new();
    let handle = playback.start(reaction_tracks(), 0.0);
    for i in 0..200 {
        let t = i as f32 * 0.0137;
        assert_eq!(playback.sample(handle, t), playback.sample(handle, t));
    }
}

#[test]
fn test_triggering_one_reaction_leaves_others_alone() {
    let mut bar = ReactionBar::new();
    bar.tap(Reaction::Heart);

    for i in 0..=120 {
        bar.frame(i as f32 / 60.0);
        assert_eq!(bar.view(Reaction::Thumb).values(), AnimationValues::REST);
        assert_eq!(bar.view(Reaction::Clap).values(), AnimationValues::REST);
    }
    assert_eq!(bar.view(Reaction::Thumb).phase(), PlaybackPhase::Idle);
}

#[test]
fn test_scale_is_one_at_end_of_linear_phase() {
    let mut bar = ReactionBar::new();
    bar.tap(Reaction::Clap);
    bar.frame(0.0);
    bar.frame(0.36);
    assert_eq!(bar.view(Reaction::Clap).values().scale, 1.0);

    // The spring phase lifts it afterwards
    bar.frame(0.7);
    assert!(bar.view(Reaction::Clap).values().scale > 1.0);
}

#[test]
fn test_angle_wiggle_extrema() {
    let angle = reaction_tracks().angle;
    let extrema = [(0.58, 0.0), (0.705, 16.0), (0.83, -16.0), (0.955, 16.0), (1.08, 0.0)];

    for (t, degrees) in extrema {
        assert!(
            approx(angle.sample(t).as_degrees(), degrees, 1e-3),
            "angle at {t} was {}",
            angle.sample(t)
        );
    }

    // Peaks are local extrema
    for (t, degrees) in &extrema[1..4] {
        let peak = angle.sample(*t).as_degrees().abs();
        assert!(angle.sample(t - 0.02).as_degrees().abs() < peak);
        assert!(angle.sample(t + 0.02).as_degrees().abs() < peak);
        assert_eq!(angle.sample(*t).as_degrees().signum(), degrees.signum());
    }

    // Still during the lead-in
    assert_eq!(angle.sample(0.3), Angle::ZERO);
}

#[test]
fn test_retrigger_restarts_every_track() {
    let mut bar = ReactionBar::new();
    bar.tap(Reaction::Heart);
    bar.frame(0.0);
    bar.frame(0.8);

    let first = bar.view(Reaction::Heart).handle().expect("playing");
    assert_ne!(bar.view(Reaction::Heart).values(), AnimationValues::REST);

    bar.view(Reaction::Heart).trigger();
    bar.frame(0.9);

    let view = bar.view(Reaction::Heart);
    let second = view.handle().expect("still playing");
    assert!(second.generation() > first.generation());
    assert_eq!(view.elapsed(0.9), Some(0.0));
    assert_eq!(view.values(), AnimationValues::REST);

    // The superseded run samples nothing
    assert_eq!(view.playback().sample(first, 0.1), None);
    assert!(view.playback().is_finished(first, 0.1));
}

#[test]
fn test_selection_change_retriggers() {
    let mut bar = ReactionBar::new();
    bar.tap(Reaction::Heart);
    bar.frame(0.0);
    let first = bar.view(Reaction::Heart).handle().expect("playing");

    bar.tap(Reaction::Clap);
    bar.tap(Reaction::Heart);
    bar.frame(0.5);

    let second = bar.view(Reaction::Heart).handle().expect("playing");
    assert_ne!(first, second);
    assert_eq!(bar.view(Reaction::Heart).elapsed(0.5), Some(0.0));
    assert_eq!(bar.view(Reaction::Clap).phase(), PlaybackPhase::Playing);
}

#[test]
fn test_finished_exactly_at_longest_track() {
    let mut playback = Playback::new();
    let handle = playback.start(reaction_tracks(), 0.0);
    let tracks = playback.tracks().expect("running").clone();

    let longest = tracks
        .angle
        .duration()
        .max(tracks.vertical_stretch.duration())
        .max(tracks.scale.duration())
        .max(tracks.vertical_translation.duration());
    assert_eq!(tracks.duration(), longest);

    let mut t = 0.0;
    while t < longest {
        assert!(!playback.is_finished(handle, t), "finished early at {t}");
        t += 0.01;
    }
    assert!(!playback.is_finished(handle, longest - 1e-4));
    assert!(playback.is_finished(handle, longest));
    assert!(playback.is_finished(handle, longest + 1.0));
}

#[test]
fn test_view_goes_idle_when_finished() {
    let mut bar = ReactionBar::new();
    bar.tap(Reaction::Heart);

    let mut frames = 0;
    let mut now = 0.0;
    while bar.frame(now).is_animating() {
        frames += 1;
        now = frames as f32 / 60.0;
        assert!(frames < 60 * 15, "animation never finished");
    }
    assert_eq!(bar.view(Reaction::Heart).phase(), PlaybackPhase::Idle);
    assert_eq!(bar.view(Reaction::Heart).values(), AnimationValues::REST);
}

#[test]
fn test_app_exports_frames() {
    let dir = std::env::temp_dir().join(format!("tapback-frames-{}", std::process::id()));

    let summary = App::new()
        .frame_rate(10)
        .duration_secs(0.5)
        .scale_factor(1.0)
        .output_dir(&dir)
        .on_update(|bar, now| {
            if now == 0.0 {
                bar.tap(Reaction::Heart);
            }
        })
        .run()
        .expect("run succeeds");

    assert_eq!(summary.frames, 6);
    assert!(summary.animating_frames >= 5);
    assert!(!summary.exported.is_empty());
    assert_eq!(summary.exported[0], dir.join("frame_0000.png"));
    for path in &summary.exported {
        assert!(path.exists(), "{} missing", path.display());
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_app_without_output_dir_writes_nothing() {
    let summary = App::new()
        .frame_rate(30)
        .duration_secs(1.0)
        .run()
        .expect("run succeeds");

    assert_eq!(summary.frames, 31);
    assert_eq!(summary.animating_frames, 0);
    assert!(summary.painted_frames >= 1);
    assert!(summary.exported.is_empty());
}
