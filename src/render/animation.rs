//! Frame cycling for animated images
//!
//! The driver is a cancellable handle: it is either scheduled with a frame
//! sequence or cancelled. The app only subscribes to the frame timer while
//! the driver is scheduled, and ticks that arrive after a cancel are ignored.

use std::time::Duration;

use crate::state::data::{Extent, RenderedFrame};

/// A finite, restartable sequence of frames shown at a fixed interval
#[derive(Debug, Clone)]
pub struct FrameSequence {
    pub frames: Vec<RenderedFrame>,
    pub delay: Duration,
}

impl FrameSequence {
    /// Natural size of the animation (frames share the first frame's size)
    pub fn extent(&self) -> Extent {
        self.frames
            .first()
            .map(|frame| Extent {
                width: frame.bitmap.width,
                height: frame.bitmap.height,
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
enum Schedule {
    Scheduled {
        sequence: FrameSequence,
        frame_index: usize,
    },
    #[default]
    Cancelled,
}

#[derive(Debug, Default)]
pub struct AnimationDriver {
    schedule: Schedule,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show frame 0 and begin cycling.
    ///
    /// Must only be called after `cancel`; a second live driver would mean
    /// two timers fighting over the canvas.
    pub fn start(&mut self, sequence: FrameSequence) {
        debug_assert!(
            !self.is_scheduled(),
            "animation started while another one is still scheduled"
        );
        if sequence.frames.is_empty() {
            self.schedule = Schedule::Cancelled;
            return;
        }

        tracing::debug!(
            "▶️  Animation started: {} frames every {:?}",
            sequence.frames.len(),
            sequence.delay
        );
        self.schedule = Schedule::Scheduled {
            sequence,
            frame_index: 0,
        };
    }

    /// Advance to the next frame, wrapping around at the end.
    /// Returns false when nothing is scheduled.
    pub fn tick(&mut self) -> bool {
        match &mut self.schedule {
            Schedule::Scheduled {
                sequence,
                frame_index,
            } => {
                *frame_index = (*frame_index + 1) % sequence.frames.len();
                true
            }
            Schedule::Cancelled => false,
        }
    }

    /// Stop cycling and release the frames
    pub fn cancel(&mut self) {
        if self.is_scheduled() {
            tracing::debug!("⏹️  Animation cancelled");
        }
        self.schedule = Schedule::Cancelled;
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.schedule, Schedule::Scheduled { .. })
    }

    pub fn frame_index(&self) -> Option<usize> {
        match &self.schedule {
            Schedule::Scheduled { frame_index, .. } => Some(*frame_index),
            Schedule::Cancelled => None,
        }
    }

    pub fn current_frame(&self) -> Option<&RenderedFrame> {
        match &self.schedule {
            Schedule::Scheduled {
                sequence,
                frame_index,
            } => sequence.frames.get(*frame_index),
            Schedule::Cancelled => None,
        }
    }

    pub fn delay(&self) -> Option<Duration> {
        match &self.schedule {
            Schedule::Scheduled { sequence, .. } => Some(sequence.delay),
            Schedule::Cancelled => None,
        }
    }

    pub fn extent(&self) -> Option<Extent> {
        match &self.schedule {
            Schedule::Scheduled { sequence, .. } => Some(sequence.extent()),
            Schedule::Cancelled => None,
        }
    }
}
