use super::{Animatable, Keyframe, KeyframeCurve, SpringConfig, SpringMotion, TimingFunction};

/// A keyframe segment resolved onto the track timeline
#[derive(Clone, Debug)]
struct Segment {
    /// Offset of the segment from the start of the track, in seconds
    start: f32,
    duration: f32,
    from: f32,
    to: f32,
    curve: SegmentCurve,
    /// Spring segment that runs until it settles
    settles: bool,
}

#[derive(Clone, Debug)]
enum SegmentCurve {
    Timed(TimingFunction),
    Spring(SpringMotion),
}

impl Segment {
    fn value_at(&self, local: f32) -> f32 {
        match &self.curve {
            SegmentCurve::Timed(timing) => {
                let progress = if self.duration <= 0.0 {
                    1.0
                } else {
                    (local / self.duration).clamp(0.0, 1.0)
                };
                let eased = timing.evaluate(progress);
                if eased == 1.0 {
                    self.to
                } else {
                    self.from + (self.to - self.from) * eased
                }
            }
            SegmentCurve::Spring(motion) => motion.position(local),
        }
    }

    fn velocity_at(&self, local: f32) -> f32 {
        match &self.curve {
            SegmentCurve::Timed(_) => {
                if self.duration <= 0.0 {
                    return 0.0;
                }
                let h = (self.duration * 1e-3).max(1e-5);
                let a = (local - h).max(0.0);
                let b = (local + h).min(self.duration);
                if b <= a {
                    0.0
                } else {
                    (self.value_at(b) - self.value_at(a)) / (b - a)
                }
            }
            SegmentCurve::Spring(motion) => motion.velocity(local),
        }
    }

    fn end_value(&self) -> f32 {
        if self.settles {
            self.to
        } else {
            self.value_at(self.duration)
        }
    }
}

/// An independent timeline animating one value through a sequence of keyframes.
///
/// Keyframes play strictly in order, each one starting from wherever the
/// previous one left off. Springs also inherit the velocity of whatever came
/// before them, so a spring that is cut short hands its momentum on.
///
/// The track is resolved eagerly as keyframes are added, so sampling is a
/// pure lookup: the same elapsed time always yields the same value.
///
/// ```
/// use tapback::animation::{KeyframeTrack, SpringConfig};
///
/// let scale = KeyframeTrack::new(1.0f32)
///     .linear(1.0, 0.36)
///     .spring_for(1.5, 0.8, SpringConfig::BOUNCY)
///     .spring(1.0, SpringConfig::BOUNCY);
///
/// assert_eq!(scale.sample(0.36), 1.0);
/// assert_eq!(scale.sample(scale.duration()), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct KeyframeTrack<T: Animatable> {
    initial: T,
    initial_velocity: f32,
    keyframes: Vec<Keyframe<T>>,
    segments: Vec<Segment>,
    duration: f32,
}

impl<T: Animatable> KeyframeTrack<T> {
    /// An empty track resting at `initial`
    pub fn new(initial: T) -> Self {
        Self {
            initial,
            initial_velocity: 0.0,
            keyframes: Vec::new(),
            segments: Vec::new(),
            duration: 0.0,
        }
    }

    /// Append a keyframe
    pub fn push(mut self, keyframe: Keyframe<T>) -> Self {
        self.keyframes.push(keyframe);
        self.resolve();
        self
    }

    pub fn linear(self, value: T, duration: f32) -> Self {
        self.push(Keyframe::linear(value, duration))
    }

    pub fn cubic(self, value: T, duration: f32) -> Self {
        self.push(Keyframe::cubic(value, duration))
    }

    pub fn eased(self, value: T, duration: f32, timing: TimingFunction) -> Self {
        self.push(Keyframe::eased(value, duration, timing))
    }

    pub fn spring(self, value: T, config: SpringConfig) -> Self {
        self.push(Keyframe::spring(value, config))
    }

    pub fn spring_for(self, value: T, duration: f32, config: SpringConfig) -> Self {
        self.push(Keyframe::spring_for(value, duration, config))
    }

    pub fn initial(&self) -> T {
        self.initial
    }

    pub fn initial_velocity(&self) -> f32 {
        self.initial_velocity
    }

    /// Set the velocity the track starts with. Only a leading spring keyframe
    /// responds to it; timed keyframes always start from rest.
    pub fn set_initial_velocity(&mut self, velocity: f32) {
        self.initial_velocity = velocity;
        self.resolve();
    }

    /// Start with the momentum `previous` had at `elapsed`.
    pub fn inherit_velocity(&mut self, previous: &Self, elapsed: f32) {
        self.set_initial_velocity(previous.velocity(elapsed));
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    /// Total length of the track, including the settle time of a trailing spring
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Time at which each keyframe is reached
    pub fn keyframe_times(&self) -> Vec<f32> {
        self.segments
            .iter()
            .map(|segment| segment.start + segment.duration)
            .collect()
    }

    /// Value the track rests at once it has finished
    pub fn final_value(&self) -> T {
        T::from_scalar(self.final_scalar())
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.duration
    }

    /// Value at `elapsed` seconds into the track. Times before the start clamp
    /// to the start, times past the end clamp to the final value.
    pub fn sample(&self, elapsed: f32) -> T {
        T::from_scalar(self.sample_scalar(elapsed))
    }

    /// Scalar value at `elapsed` seconds into the track
    pub fn sample_scalar(&self, elapsed: f32) -> f32 {
        let elapsed = elapsed.max(0.0);
        if elapsed >= self.duration {
            return self.final_scalar();
        }
        match self.segment_at(elapsed) {
            Some(segment) => segment.value_at(elapsed - segment.start),
            None => self.initial.to_scalar(),
        }
    }

    /// Rate of change of the track scalar at `elapsed`, in units per second
    pub fn velocity(&self, elapsed: f32) -> f32 {
        let elapsed = elapsed.max(0.0);
        if elapsed >= self.duration {
            return 0.0;
        }
        match self.segment_at(elapsed) {
            Some(segment) => segment.velocity_at(elapsed - segment.start),
            None => 0.0,
        }
    }

    fn final_scalar(&self) -> f32 {
        self.segments
            .last()
            .map(Segment::end_value)
            .unwrap_or_else(|| self.initial.to_scalar())
    }

    fn segment_at(&self, elapsed: f32) -> Option<&Segment> {
        let index = self
            .segments
            .partition_point(|segment| segment.start <= elapsed);
        index.checked_sub(1).map(|i| &self.segments[i])
    }

    /// Lay keyframes out end to end, threading position and velocity through
    fn resolve(&mut self) {
        let mut segments = Vec::with_capacity(self.keyframes.len());
        let mut start = 0.0;
        let mut value = self.initial.to_scalar();
        let mut velocity = self.initial_velocity;

        for keyframe in &self.keyframes {
            let to = keyframe.value.to_scalar();
            let segment = match &keyframe.curve {
                KeyframeCurve::Timed(timing) => Segment {
                    start,
                    duration: keyframe.duration.unwrap_or(0.0).max(0.0),
                    from: value,
                    to,
                    curve: SegmentCurve::Timed(timing.clone()),
                    settles: false,
                },
                KeyframeCurve::Spring(config) => {
                    let motion = SpringMotion::new(value, to, velocity, *config);
                    let (duration, settles) = match keyframe.duration {
                        Some(duration) => (duration.max(0.0), false),
                        None => (motion.settle_duration(), true),
                    };
                    Segment {
                        start,
                        duration,
                        from: value,
                        to,
                        curve: SegmentCurve::Spring(motion),
                        settles,
                    }
                }
            };

            value = segment.end_value();
            velocity = if segment.settles {
                0.0
            } else {
                segment.velocity_at(segment.duration)
            };
            start += segment.duration;
            segments.push(segment);
        }

        self.segments = segments;
        self.duration = start;
    }
}

/// A set of tracks that animate the fields of one value type in lockstep.
///
/// Usually generated with `#[derive(Keyframes)]`.
pub trait TrackSet: Clone {
    type Values;

    /// Every track sampled at the same elapsed time
    fn sample(&self, elapsed: f32) -> Self::Values;

    /// Length of the longest track
    fn duration(&self) -> f32;

    fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.duration()
    }

    /// Seed every track with the velocity its counterpart in `previous` had at `elapsed`
    fn inherit_velocity(&mut self, previous: &Self, elapsed: f32);
}

/// Values that can hand out a track set starting from themselves
pub trait Keyframes: Sized {
    type Tracks: TrackSet<Values = Self>;

    fn tracks(&self) -> Self::Tracks;
}
