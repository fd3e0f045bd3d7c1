use super::Angle;

/// Trait for types that can be driven by a keyframe track.
///
/// Tracks animate a single scalar. Implementors project themselves onto that
/// scalar and back, so the interpolation and spring math only ever deals in `f32`.
pub trait Animatable: Copy + PartialEq + std::fmt::Debug + 'static {
    /// The scalar the track animates
    fn to_scalar(self) -> f32;

    /// Rebuild a value from the track scalar
    fn from_scalar(scalar: f32) -> Self;

    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can exceed [0, 1] range for overshoot effects
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        let from = from.to_scalar();
        let to = to.to_scalar();
        Self::from_scalar(from + (to - from) * t)
    }
}

impl Animatable for f32 {
    fn to_scalar(self) -> f32 {
        self
    }

    fn from_scalar(scalar: f32) -> Self {
        scalar
    }
}

impl Animatable for f64 {
    fn to_scalar(self) -> f32 {
        self as f32
    }

    fn from_scalar(scalar: f32) -> Self {
        scalar as f64
    }
}

/// Angles animate in degrees so keyframes read the way they are authored.
impl Animatable for Angle {
    fn to_scalar(self) -> f32 {
        self.as_degrees()
    }

    fn from_scalar(scalar: f32) -> Self {
        Angle::degrees(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(0.0, 10.0, 1.0), 10.0);
        // Overshoot
        assert_eq!(f32::lerp(0.0, 10.0, 1.5), 15.0);
    }

    #[test]
    fn test_angle_lerp_in_degrees() {
        let mid = Angle::lerp(Angle::degrees(-16.0), Angle::degrees(16.0), 0.25);
        assert!((mid.as_degrees() - (-8.0)).abs() < 1e-4);
    }

    #[test]
    fn test_f64_round_trips_through_scalar() {
        assert_eq!(f64::from_scalar(0.5f64.to_scalar()), 0.5);
    }
}
