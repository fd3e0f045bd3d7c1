use tapback::animation::{Angle, Keyframes as _, SpringConfig, TrackSet};
use tapback::Keyframes;

#[derive(Clone, Copy, Debug, PartialEq, Keyframes)]
struct Pose {
    opacity: f32,
    tilt: Angle,
}

const REST: Pose = Pose {
    opacity: 0.0,
    tilt: Angle::ZERO,
};

#[test]
fn test_tracks_start_at_initial_values() {
    let pose = Pose {
        opacity: 0.5,
        tilt: Angle::ZERO,
    };
    let tracks = pose.tracks();
    assert_eq!(tracks.opacity.initial(), 0.5);
    assert_eq!(tracks.duration(), 0.0);
    assert_eq!(tracks.sample(0.0), pose);
    assert_eq!(tracks.sample(3.0), pose);
}

#[test]
fn test_fields_are_sampled_in_lockstep() {
    let mut tracks = PoseTracks::new(&REST);
    tracks.opacity = tracks.opacity.linear(1.0, 1.0);
    tracks.tilt = tracks.tilt.cubic(Angle::degrees(90.0), 2.0);

    assert_eq!(tracks.duration(), 2.0);

    let quarter = tracks.sample(0.5);
    assert!((quarter.opacity - 0.5).abs() < 1e-6);
    assert!(quarter.tilt.as_degrees() < 45.0);

    let half = tracks.sample(1.0);
    assert_eq!(half.opacity, 1.0);
    assert!((half.tilt.as_degrees() - 45.0).abs() < 1e-3);

    assert!(!tracks.is_finished(1.9));
    assert!(tracks.is_finished(2.0));
}

#[test]
fn test_inherit_velocity_is_per_field() {
    let mut first = REST.tracks();
    first.opacity = first.opacity.spring(1.0, SpringConfig::BOUNCY);

    let mut second = REST.tracks();
    second.opacity = second.opacity.spring(1.0, SpringConfig::BOUNCY);
    second.inherit_velocity(&first, 0.1);

    assert!(second.opacity.initial_velocity() > 0.0);
    assert_eq!(second.tilt.initial_velocity(), 0.0);
}

#[test]
fn test_generated_tracks_are_cloneable() {
    let mut tracks = REST.tracks();
    tracks.opacity = tracks.opacity.linear(1.0, 0.25);
    let copy = tracks.clone();
    assert_eq!(copy.sample(0.125), tracks.sample(0.125));
}
