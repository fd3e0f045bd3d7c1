use std::sync::atomic::{AtomicBool, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Flags describing what a frame changed
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// Visual output changed and needs repainting
        const NEEDS_PAINT = 0b01;
        /// An animation is still running; keep producing frames
        const ANIMATING   = 0b10;
    }
}

impl ChangeFlags {
    pub fn needs_paint(&self) -> bool {
        self.contains(ChangeFlags::NEEDS_PAINT)
    }

    pub fn is_animating(&self) -> bool {
        self.contains(ChangeFlags::ANIMATING)
    }
}

/// Global flag to indicate a frame is requested
static FRAME_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Request that the frame loop process a frame
pub fn request_frame() {
    FRAME_REQUESTED.store(true, Ordering::Relaxed);
}

/// Check if a frame has been requested and clear the flag
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.swap(false, Ordering::Relaxed)
}
