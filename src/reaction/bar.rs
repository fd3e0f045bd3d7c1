use super::{PlaybackPhase, Reaction, ReactionView};
use crate::layout::BarLayout;
use crate::reactive::{ChangeFlags, ReadSignal, Signal};

/// The capsule of reactions and the selection they share.
pub struct ReactionBar {
    selection: Signal<Option<Reaction>>,
    views: Vec<ReactionView>,
    layout: BarLayout,
}

impl ReactionBar {
    /// A bar with every reaction and the thumbs-up selected
    pub fn new() -> Self {
        let selection = Signal::new(Some(Reaction::Thumb));
        let views = Reaction::ALL
            .into_iter()
            .map(|reaction| ReactionView::new(reaction, selection.read_only()))
            .collect();

        Self {
            selection,
            views,
            layout: BarLayout::new(),
        }
    }

    /// Select `reaction`. Selecting the reaction that is already selected
    /// does nothing.
    pub fn tap(&self, reaction: Reaction) {
        log::debug!("Tapped {}", reaction);
        self.selection.set(Some(reaction));
    }

    /// Tap whatever reaction sits under `(x, y)` in canvas coordinates
    pub fn tap_at(&self, x: f32, y: f32) -> Option<Reaction> {
        match self.layout.hit_test(x, y) {
            Some(reaction) => {
                self.tap(reaction);
                Some(reaction)
            }
            None => {
                log::warn!("Ignoring tap at ({:.1}, {:.1}) outside the bar", x, y);
                None
            }
        }
    }

    /// Advance every view to frame time `now`
    pub fn frame(&mut self, now: f32) -> ChangeFlags {
        self.views
            .iter_mut()
            .fold(ChangeFlags::empty(), |flags, view| flags | view.frame(now))
    }

    pub fn selection(&self) -> Option<Reaction> {
        self.selection.get_untracked()
    }

    pub fn selection_signal(&self) -> ReadSignal<Option<Reaction>> {
        self.selection.read_only()
    }

    pub fn views(&self) -> &[ReactionView] {
        &self.views
    }

    pub fn view(&self, reaction: Reaction) -> &ReactionView {
        &self.views[reaction.index()]
    }

    pub fn view_mut(&mut self, reaction: Reaction) -> &mut ReactionView {
        &mut self.views[reaction.index()]
    }

    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    /// Whether any view is mid-animation
    pub fn is_animating(&self) -> bool {
        self.views
            .iter()
            .any(|view| view.phase() == PlaybackPhase::Playing)
    }
}

impl Default for ReactionBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::AnimationValues;

    #[test]
    fn test_starts_with_thumb_selected_and_still() {
        let mut bar = ReactionBar::new();
        assert_eq!(bar.selection(), Some(Reaction::Thumb));
        assert!(!bar.frame(0.0).is_animating());
        for view in bar.views() {
            assert_eq!(view.phase(), PlaybackPhase::Idle);
            assert_eq!(view.values(), AnimationValues::REST);
        }
    }

    #[test]
    fn test_tap_animates_only_the_tapped_view() {
        let mut bar = ReactionBar::new();
        bar.tap(Reaction::Heart);
        assert!(bar.frame(0.0).is_animating());
        bar.frame(0.7);

        assert_eq!(bar.view(Reaction::Heart).phase(), PlaybackPhase::Playing);
        assert_ne!(bar.view(Reaction::Heart).values(), AnimationValues::REST);
        assert_eq!(bar.view(Reaction::Thumb).values(), AnimationValues::REST);
        assert_eq!(bar.view(Reaction::Clap).values(), AnimationValues::REST);
    }

    #[test]
    fn test_retapping_selected_reaction_is_noop() {
        let mut bar = ReactionBar::new();
        bar.tap(Reaction::Thumb);
        bar.frame(0.0);
        assert_eq!(bar.view(Reaction::Thumb).phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn test_tap_at_hits_cells() {
        let mut bar = ReactionBar::new();
        let (x, y) = bar.layout().cell(Reaction::Clap).center();
        assert_eq!(bar.tap_at(x, y), Some(Reaction::Clap));
        assert_eq!(bar.tap_at(-5.0, -5.0), None);
        assert_eq!(bar.selection(), Some(Reaction::Clap));
        bar.frame(0.0);
        assert!(bar.is_animating());
    }
}
