use super::{Animatable, SpringConfig, TimingFunction};

/// How a keyframe travels from the previous value to its own
#[derive(Clone, Debug)]
pub enum KeyframeCurve {
    /// Fixed-duration interpolation shaped by a timing function
    Timed(TimingFunction),
    /// Damped spring pulling toward the keyframe value
    Spring(SpringConfig),
}

/// A target value reached at a point in a track's timeline.
///
/// Timed keyframes always carry a duration. Spring keyframes may leave it
/// out, in which case the segment lasts until the spring settles.
#[derive(Clone, Debug)]
pub struct Keyframe<T: Animatable> {
    pub value: T,
    pub duration: Option<f32>,
    pub curve: KeyframeCurve,
}

impl<T: Animatable> Keyframe<T> {
    /// Constant-speed interpolation to `value` over `duration` seconds
    pub fn linear(value: T, duration: f32) -> Self {
        Self::eased(value, duration, TimingFunction::Linear)
    }

    /// Cubic ease-in-out interpolation to `value` over `duration` seconds
    pub fn cubic(value: T, duration: f32) -> Self {
        Self::eased(value, duration, TimingFunction::EaseInOut)
    }

    pub fn eased(value: T, duration: f32, timing: TimingFunction) -> Self {
        Self {
            value,
            duration: Some(duration),
            curve: KeyframeCurve::Timed(timing),
        }
    }

    /// Spring toward `value`, lasting until the spring settles
    pub fn spring(value: T, config: SpringConfig) -> Self {
        Self {
            value,
            duration: None,
            curve: KeyframeCurve::Spring(config),
        }
    }

    /// Spring toward `value`, handing over to the next keyframe after
    /// `duration` seconds whether or not the spring has settled
    pub fn spring_for(value: T, duration: f32, config: SpringConfig) -> Self {
        Self {
            value,
            duration: Some(duration),
            curve: KeyframeCurve::Spring(config),
        }
    }

    pub fn is_spring(&self) -> bool {
        matches!(self.curve, KeyframeCurve::Spring(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let cubic = Keyframe::cubic(16.0f32, 0.125);
        assert_eq!(cubic.duration, Some(0.125));
        assert!(matches!(
            cubic.curve,
            KeyframeCurve::Timed(TimingFunction::EaseInOut)
        ));

        let settle = Keyframe::spring(1.0f32, SpringConfig::BOUNCY);
        assert_eq!(settle.duration, None);
        assert!(settle.is_spring());

        let nominal = Keyframe::spring_for(1.5f32, 0.8, SpringConfig::BOUNCY);
        assert_eq!(nominal.duration, Some(0.8));
        assert!(!Keyframe::linear(0.0f32, 0.1).is_spring());
    }
}
