use std::sync::atomic::{AtomicU64, Ordering};

use super::values::{reaction_tracks, AnimationValues, AnimationValuesTracks};
use super::Reaction;
use crate::animation::{Playback, PlaybackHandle};
use crate::color::Color;
use crate::reactive::{create_effect, ChangeFlags, Effect, ReadSignal, Signal};
use crate::transform::Transform;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Marker whose change tells a view to restart its animation.
///
/// Tokens are unique for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriggerToken(u64);

impl TriggerToken {
    pub fn fresh() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Playing,
}

/// One reaction glyph and the animation it plays when tapped.
///
/// The view watches the bar's selection. Whenever the selection changes to
/// this view's reaction it stores a fresh [`TriggerToken`], and the next
/// [`frame`](Self::frame) restarts the animation from t = 0.
pub struct ReactionView {
    reaction: Reaction,
    trigger: Signal<Option<TriggerToken>>,
    seen: Option<TriggerToken>,
    playback: Playback<AnimationValuesTracks>,
    handle: Option<PlaybackHandle>,
    values: AnimationValues,
    _effect: Effect,
}

impl ReactionView {
    pub fn new(reaction: Reaction, selection: ReadSignal<Option<Reaction>>) -> Self {
        let trigger = Signal::new(None);

        let effect = {
            let trigger = trigger.clone();
            let mut first_run = true;
            create_effect(move || {
                let selected = selection.get();
                // Only changes count, the initial selection stays still
                if std::mem::take(&mut first_run) {
                    return;
                }
                if selected == Some(reaction) {
                    log::debug!("{} selected, issuing trigger", reaction);
                    trigger.set(Some(TriggerToken::fresh()));
                }
            })
        };

        Self {
            reaction,
            trigger,
            seen: None,
            playback: Playback::new(),
            handle: None,
            values: AnimationValues::REST,
            _effect: effect,
        }
    }

    pub fn reaction(&self) -> Reaction {
        self.reaction
    }

    pub fn color(&self) -> Color {
        self.reaction.color()
    }

    /// Restart the animation on the next frame, regardless of the selection
    pub fn trigger(&self) {
        self.trigger.set(Some(TriggerToken::fresh()));
    }

    /// Most recent trigger token, if the view was ever triggered
    pub fn token(&self) -> Option<TriggerToken> {
        self.trigger.get_untracked()
    }

    /// Values sampled on the last frame
    pub fn values(&self) -> AnimationValues {
        self.values
    }

    pub fn transform(&self) -> Transform {
        self.values.transform()
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.handle.is_some() {
            PlaybackPhase::Playing
        } else {
            PlaybackPhase::Idle
        }
    }

    /// Handle of the run in flight
    pub fn handle(&self) -> Option<PlaybackHandle> {
        self.handle
    }

    pub fn playback(&self) -> &Playback<AnimationValuesTracks> {
        &self.playback
    }

    /// Seconds into the current run at frame time `now`
    pub fn elapsed(&self, now: f32) -> Option<f32> {
        self.handle
            .and_then(|handle| self.playback.elapsed(handle, now))
    }

    /// Advance to frame time `now` (seconds).
    ///
    /// Picks up a new trigger token, samples every track at one elapsed time
    /// and returns to idle once the run has finished.
    pub fn frame(&mut self, now: f32) -> ChangeFlags {
        let mut flags = ChangeFlags::empty();

        let token = self.trigger.get_untracked();
        if token != self.seen {
            self.seen = token;
            if token.is_some() {
                self.restart(now);
            }
        }

        let Some(handle) = self.handle else {
            return flags;
        };
        let Some(elapsed) = self.playback.elapsed(handle, now) else {
            self.handle = None;
            return flags;
        };

        if let Some(values) = self.playback.sample(handle, elapsed) {
            if values != self.values {
                self.values = values;
                flags |= ChangeFlags::NEEDS_PAINT;
            }
        }

        if self.playback.is_finished(handle, elapsed) {
            log::debug!("{} finished after {:.3}s", self.reaction, elapsed);
            self.handle = None;
        } else {
            flags |= ChangeFlags::ANIMATING;
        }

        flags
    }

    fn restart(&mut self, now: f32) {
        let handle = self.playback.start(reaction_tracks(), now);
        log::debug!(
            "{} playing generation {} from {:.3}s",
            self.reaction,
            handle.generation(),
            now
        );
        self.handle = Some(handle);
    }
}

impl std::fmt::Debug for ReactionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionView")
            .field("reaction", &self.reaction)
            .field("phase", &self.phase())
            .field("values", &self.values)
            .finish()
    }
}
