use tapback_macros::Keyframes;

use crate::animation::{Angle, Keyframes as _, SpringConfig};
use crate::transform::Transform;

/// Instantaneous transform parameters of one reaction glyph
#[derive(Clone, Copy, Debug, PartialEq, Keyframes)]
pub struct AnimationValues {
    pub scale: f32,
    pub vertical_stretch: f32,
    pub vertical_translation: f32,
    pub angle: Angle,
}

impl AnimationValues {
    /// The glyph at rest
    pub const REST: AnimationValues = AnimationValues {
        scale: 1.0,
        vertical_stretch: 1.0,
        vertical_translation: 0.0,
        angle: Angle::ZERO,
    };

    /// Transform of the glyph about its own center.
    ///
    /// Rotation is applied first, then the (possibly anisotropic) scale, then
    /// the vertical offset. Use [`Transform::around`] to pin it to a point.
    pub fn transform(&self) -> Transform {
        Transform::translate(0.0, self.vertical_translation)
            .then(&Transform::scale_xy(
                self.scale,
                self.scale * self.vertical_stretch,
            ))
            .then(&Transform::rotate(self.angle.as_radians()))
    }
}

impl Default for AnimationValues {
    fn default() -> Self {
        Self::REST
    }
}

/// The tap animation every reaction plays.
///
/// Four tracks run side by side from the resting values: a wiggle, a
/// squash-and-stretch, a bouncy pop and a bouncy hop.
pub fn reaction_tracks() -> AnimationValuesTracks {
    let mut tracks = AnimationValues::REST.tracks();

    tracks.angle = tracks
        .angle
        .cubic(Angle::ZERO, 0.58)
        .cubic(Angle::degrees(16.0), 0.125)
        .cubic(Angle::degrees(-16.0), 0.125)
        .cubic(Angle::degrees(16.0), 0.125)
        .cubic(Angle::ZERO, 0.125);

    tracks.vertical_stretch = tracks
        .vertical_stretch
        .cubic(1.0, 0.1)
        .cubic(0.6, 0.15)
        .cubic(1.5, 0.1)
        .cubic(1.05, 0.15)
        .cubic(1.0, 0.88)
        .cubic(0.8, 0.1)
        .cubic(1.04, 0.4)
        .cubic(1.0, 0.22);

    tracks.scale = tracks
        .scale
        .linear(1.0, 0.36)
        .spring_for(1.5, 0.8, SpringConfig::BOUNCY)
        .spring(1.0, SpringConfig::BOUNCY);

    tracks.vertical_translation = tracks
        .vertical_translation
        .linear(0.0, 0.1)
        .spring_for(20.0, 0.15, SpringConfig::BOUNCY)
        .spring_for(-60.0, 1.0, SpringConfig::BOUNCY)
        .spring(0.0, SpringConfig::BOUNCY);

    tracks
}
