use super::TrackSet;

/// Identifies one run of a [`Playback`].
///
/// Every call to [`Playback::start`] bumps the playback's generation, so a
/// handle from a superseded run no longer samples anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaybackHandle {
    generation: u64,
}

impl PlaybackHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Run<S> {
    tracks: S,
    /// Frame time at which the run started, in seconds
    started_at: f32,
}

/// Owns the in-flight run of a track set.
///
/// Starting a new run replaces the old one immediately; there is no queue.
/// The replacement restarts every track at t = 0 from its own initial
/// values. Only velocity carries over, and only into tracks that open with a
/// spring.
pub struct Playback<S: TrackSet> {
    run: Option<Run<S>>,
    generation: u64,
}

impl<S: TrackSet> Playback<S> {
    pub fn new() -> Self {
        Self {
            run: None,
            generation: 0,
        }
    }

    /// Begin playing `tracks` from time zero, superseding any run in flight.
    ///
    /// `now` is the caller's frame clock in seconds; it is only used to work
    /// out how far the superseded run had got.
    pub fn start(&mut self, mut tracks: S, now: f32) -> PlaybackHandle {
        if let Some(previous) = &self.run {
            let elapsed = (now - previous.started_at).max(0.0);
            if !previous.tracks.is_finished(elapsed) {
                tracks.inherit_velocity(&previous.tracks, elapsed);
                log::debug!(
                    "Superseding playback generation {} at {:.3}s",
                    self.generation,
                    elapsed
                );
            }
        }

        self.generation += 1;
        self.run = Some(Run {
            tracks,
            started_at: now,
        });

        PlaybackHandle {
            generation: self.generation,
        }
    }

    /// Drop the current run. Outstanding handles become stale.
    pub fn stop(&mut self) {
        if self.run.take().is_some() {
            self.generation += 1;
        }
    }

    /// Handle of the current run, if any
    pub fn handle(&self) -> Option<PlaybackHandle> {
        self.run.as_ref().map(|_| PlaybackHandle {
            generation: self.generation,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, handle: PlaybackHandle) -> bool {
        self.run.is_some() && handle.generation == self.generation
    }

    /// Seconds the run behind `handle` has been playing at frame time `now`
    pub fn elapsed(&self, handle: PlaybackHandle, now: f32) -> Option<f32> {
        self.current(handle).map(|run| now - run.started_at)
    }

    /// Composed values of every track at `elapsed` seconds into the run.
    ///
    /// Pure: sampling the same time twice gives the same values. Returns
    /// `None` if `handle` belongs to a superseded run.
    pub fn sample(&self, handle: PlaybackHandle, elapsed: f32) -> Option<S::Values> {
        self.current(handle).map(|run| run.tracks.sample(elapsed))
    }

    /// Whether every track of the run has reached its last keyframe and any
    /// trailing spring has settled. Superseded runs count as finished.
    pub fn is_finished(&self, handle: PlaybackHandle, elapsed: f32) -> bool {
        self.current(handle)
            .map_or(true, |run| run.tracks.is_finished(elapsed))
    }

    /// Track set of the current run
    pub fn tracks(&self) -> Option<&S> {
        self.run.as_ref().map(|run| &run.tracks)
    }

    fn current(&self, handle: PlaybackHandle) -> Option<&Run<S>> {
        self.run
            .as_ref()
            .filter(|_| handle.generation == self.generation)
    }
}

impl<S: TrackSet> Default for Playback<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{KeyframeTrack, SpringConfig};

    #[derive(Clone)]
    struct Single(KeyframeTrack<f32>);

    impl TrackSet for Single {
        type Values = f32;

        fn sample(&self, elapsed: f32) -> f32 {
            self.0.sample(elapsed)
        }

        fn duration(&self) -> f32 {
            self.0.duration()
        }

        fn inherit_velocity(&mut self, previous: &Self, elapsed: f32) {
            self.0.inherit_velocity(&previous.0, elapsed);
        }
    }

    fn ramp() -> Single {
        Single(KeyframeTrack::new(0.0).linear(10.0, 1.0))
    }

    #[test]
    fn test_start_issues_new_generation() {
        let mut playback = Playback::new();
        assert!(playback.handle().is_none());

        let first = playback.start(ramp(), 0.0);
        let second = playback.start(ramp(), 0.5);
        assert_ne!(first, second);
        assert!(!playback.is_current(first));
        assert!(playback.is_current(second));
        assert_eq!(playback.handle(), Some(second));
    }

    #[test]
    fn test_stale_handle_samples_nothing() {
        let mut playback = Playback::new();
        let first = playback.start(ramp(), 0.0);
        assert_eq!(playback.sample(first, 0.5), Some(5.0));

        let second = playback.start(ramp(), 0.5);
        assert_eq!(playback.sample(first, 0.5), None);
        assert!(playback.is_finished(first, 0.0));
        assert_eq!(playback.sample(second, 0.0), Some(0.0));
    }

    #[test]
    fn test_restart_rewinds_elapsed_time() {
        let mut playback = Playback::new();
        let first = playback.start(ramp(), 2.0);
        assert_eq!(playback.elapsed(first, 2.5), Some(0.5));

        let second = playback.start(ramp(), 2.5);
        assert_eq!(playback.elapsed(second, 2.5), Some(0.0));
        assert_eq!(playback.sample(second, 0.0), Some(0.0));
    }

    #[test]
    fn test_is_finished_at_track_end() {
        let mut playback = Playback::new();
        let handle = playback.start(ramp(), 0.0);
        assert!(!playback.is_finished(handle, 0.999));
        assert!(playback.is_finished(handle, 1.0));
        assert!(playback.is_finished(handle, 3.0));
    }

    #[test]
    fn test_restart_carries_velocity_into_leading_spring() {
        let mut playback = Playback::new();
        playback.start(ramp(), 0.0);

        let settle = Single(KeyframeTrack::new(0.0).spring(0.0, SpringConfig::BOUNCY));
        let handle = playback.start(settle, 0.5);
        let tracks = playback.tracks().expect("run in flight");
        assert!((tracks.0.initial_velocity() - 10.0).abs() < 0.1);
        assert_eq!(playback.sample(handle, 0.0), Some(0.0));
        assert!(playback.sample(handle, 0.05).unwrap_or_default() > 0.0);
    }

    #[test]
    fn test_stop_invalidates_handle() {
        let mut playback = Playback::new();
        let handle = playback.start(ramp(), 0.0);
        playback.stop();
        assert!(playback.handle().is_none());
        assert_eq!(playback.sample(handle, 0.5), None);
    }
}
