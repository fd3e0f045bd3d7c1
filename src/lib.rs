//! A reaction bar animated by keyframe tracks.
//!
//! Tapping a reaction plays four tracks at once: a wiggle, a
//! squash-and-stretch, a bouncy pop and a bouncy hop. Tracks mix linear,
//! cubic and spring keyframes. The bar is driven frame by frame and
//! rasterized in software.
//!
//! ```no_run
//! use tapback::prelude::*;
//!
//! let summary = App::new()
//!     .duration_secs(3.0)
//!     .output_dir("frames")
//!     .on_update(|bar, now| {
//!         if now == 0.5 {
//!             bar.tap(Reaction::Heart);
//!         }
//!     })
//!     .run()?;
//! println!("{} frames written", summary.exported.len());
//! # Ok::<(), tapback::renderer::RenderError>(())
//! ```

extern crate self as tapback;

pub mod animation;
pub mod color;
pub mod layout;
pub mod reaction;
pub mod reactive;
pub mod renderer;
pub mod transform;

pub use tapback_macros::Keyframes;

use std::path::PathBuf;
use std::time::Duration;

use reaction::ReactionBar;
use reactive::take_frame_request;
use renderer::{save_png, RenderError, Renderer};

pub mod prelude {
    pub use crate::animation::{
        Angle, Animatable, Keyframe, KeyframeCurve, KeyframeTrack, Keyframes, Playback,
        PlaybackHandle, SpringConfig, TimingFunction, TrackSet,
    };
    pub use crate::color::Color;
    pub use crate::reaction::{
        AnimationValues, PlaybackPhase, Reaction, ReactionBar, ReactionView, TriggerToken,
    };
    pub use crate::reactive::{
        batch, create_effect, create_signal, ChangeFlags, Effect, ReadSignal, Signal,
        WriteSignal,
    };
    pub use crate::transform::Transform;
    pub use crate::{App, AppConfig, RunSummary};
}

pub struct AppConfig {
    /// Frames per second of the frame clock
    pub frame_rate: u32,
    /// Seconds of frame time to run for
    pub duration_secs: f32,
    /// Where to write `frame_NNNN.png` files. Nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    /// Device pixels per logical pixel
    pub scale_factor: f32,
    /// Sleep one frame interval between frames
    pub realtime: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            duration_secs: 3.0,
            output_dir: None,
            scale_factor: 2.0,
            realtime: false,
        }
    }
}

/// A callback that gets called each frame before the bar is advanced.
/// Receives the bar and the frame time in seconds.
pub type UpdateCallback = Box<dyn FnMut(&mut ReactionBar, f32)>;

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Frames driven, including frame zero
    pub frames: u32,
    /// Frames with at least one animation in flight
    pub animating_frames: u32,
    /// Frames whose output changed
    pub painted_frames: u32,
    /// Files written, in frame order
    pub exported: Vec<PathBuf>,
}

pub struct App {
    config: AppConfig,
    on_update: Option<UpdateCallback>,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            on_update: None,
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            on_update: None,
        }
    }

    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.config.frame_rate = frame_rate;
        self
    }

    pub fn duration_secs(mut self, duration_secs: f32) -> Self {
        self.config.duration_secs = duration_secs;
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(output_dir.into());
        self
    }

    pub fn scale_factor(mut self, scale_factor: f32) -> Self {
        self.config.scale_factor = scale_factor;
        self
    }

    pub fn realtime(mut self, realtime: bool) -> Self {
        self.config.realtime = realtime;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Set a callback that gets called each frame before the bar advances.
    /// Use it to script taps.
    ///
    /// # Example
    /// ```ignore
    /// App::new()
    ///     .on_update(|bar, now| {
    ///         if (now - 1.0).abs() < 1e-3 {
    ///             bar.tap(Reaction::Clap);
    ///         }
    ///     })
    ///     .run()?;
    /// ```
    pub fn on_update<F: FnMut(&mut ReactionBar, f32) + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Drive the bar from t = 0 to the configured duration.
    ///
    /// Frame `i` runs at `i / frame_rate` seconds. Frames whose output
    /// changed are exported when an output directory is set.
    pub fn run(mut self) -> Result<RunSummary, RenderError> {
        let _ = env_logger::try_init();

        let frame_rate = self.config.frame_rate.max(1);
        let last_frame = (self.config.duration_secs.max(0.0) * frame_rate as f32).round() as u32;
        let interval = Duration::from_secs_f32(1.0 / frame_rate as f32);

        log::info!(
            "Running {} frames at {} fps, scale {}",
            last_frame + 1,
            frame_rate,
            self.config.scale_factor
        );

        let mut bar = ReactionBar::new();
        let renderer = Renderer::new(self.config.scale_factor)?;
        let mut summary = RunSummary::default();

        // Frame zero always paints
        let _ = take_frame_request();

        for index in 0..=last_frame {
            let now = index as f32 / frame_rate as f32;

            if let Some(ref mut callback) = self.on_update {
                callback(&mut bar, now);
            }

            let flags = bar.frame(now);
            let requested = take_frame_request();

            summary.frames += 1;
            if flags.is_animating() {
                summary.animating_frames += 1;
            }

            if index == 0 || requested || flags.needs_paint() {
                summary.painted_frames += 1;
                if let Some(dir) = &self.config.output_dir {
                    let pixmap = renderer.render(&bar)?;
                    let path = dir.join(format!("frame_{:04}.png", index));
                    save_png(&pixmap, &path)?;
                    summary.exported.push(path);
                }
            }

            if self.config.realtime {
                std::thread::sleep(interval);
            }
        }

        log::info!(
            "Finished: {} frames, {} animating, {} painted, {} exported",
            summary.frames,
            summary.animating_frames,
            summary.painted_frames,
            summary.exported.len()
        );

        Ok(summary)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
