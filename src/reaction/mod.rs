//! The reaction catalog and the views that animate it.

mod bar;
mod values;
mod view;

pub use bar::ReactionBar;
pub use values::{reaction_tracks, AnimationValues, AnimationValuesTracks};
pub use view::{PlaybackPhase, ReactionView, TriggerToken};

use std::fmt;

use crate::color::Color;

/// One of the reactions a user can tap
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reaction {
    Thumb,
    Heart,
    Clap,
}

impl Reaction {
    /// Every reaction, in display order
    pub const ALL: [Reaction; 3] = [Reaction::Thumb, Reaction::Heart, Reaction::Clap];

    pub fn all() -> [Reaction; 3] {
        Self::ALL
    }

    /// Position in [`Reaction::ALL`]
    pub fn index(self) -> usize {
        match self {
            Reaction::Thumb => 0,
            Reaction::Heart => 1,
            Reaction::Clap => 2,
        }
    }

    /// Symbol name of the reaction's icon
    pub fn icon(self) -> &'static str {
        match self {
            Reaction::Thumb => "hand.thumbsup.fill",
            Reaction::Heart => "heart.fill",
            Reaction::Clap => "hands.clap.fill",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Reaction::Thumb => Color::BLUE,
            Reaction::Heart => Color::RED,
            Reaction::Clap => Color::PURPLE,
        }
    }

    /// Stable identity, the icon name
    pub fn id(self) -> &'static str {
        self.icon()
    }

    /// The icon as a 24x24 SVG document, filled with the reaction color
    pub fn glyph_svg(self) -> String {
        let color = self.color().to_hex_string();
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="{color}" stroke="{color}" stroke-width="0">{body}</svg>"#,
            color = color,
            body = self.glyph_body()
        )
    }

    fn glyph_body(self) -> &'static str {
        match self {
            Reaction::Thumb => {
                r#"<path d="M1 21h4V9H1v12zm22-11c0-1.1-.9-2-2-2h-6.31l.95-4.57.03-.32c0-.41-.17-.79-.44-1.06L14.17 1 7.59 7.59C7.22 7.95 7 8.45 7 9v10c0 1.1.9 2 2 2h9c.83 0 1.54-.5 1.84-1.22l3.02-7.05c.09-.23.14-.47.14-.73v-2z"/>"#
            }
            Reaction::Heart => {
                r#"<path d="M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z"/>"#
            }
            Reaction::Clap => {
                r#"<rect x="4.5" y="7" width="8" height="15" rx="4" transform="rotate(-18 8.5 14.5)"/><rect x="11.5" y="7" width="8" height="15" rx="4" transform="rotate(18 15.5 14.5)"/><path d="M12 1v3M6.5 2.5l1.5 2.5M17.5 2.5L16 5" fill="none" stroke-width="1.5" stroke-linecap="round"/>"#
            }
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.icon())
    }
}
