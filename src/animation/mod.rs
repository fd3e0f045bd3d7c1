//! Keyframe animation.
//!
//! A [`KeyframeTrack`] animates one value through a sequence of keyframes,
//! each reached by a timed curve ([`TimingFunction`]) or a damped spring
//! ([`SpringConfig`]). A [`TrackSet`] groups tracks that animate the fields
//! of one struct in lockstep, and [`Playback`] owns the run currently in
//! flight, handing out generation-stamped [`PlaybackHandle`]s.

mod angle;
mod animatable;
mod keyframe;
mod playback;
mod spring;
mod timing;
mod track;

pub use angle::Angle;
pub use animatable::Animatable;
pub use keyframe::{Keyframe, KeyframeCurve};
pub use playback::{Playback, PlaybackHandle};
pub use spring::{SpringConfig, SpringMotion};
pub use timing::TimingFunction;
pub use track::{KeyframeTrack, Keyframes, TrackSet};
