//! Frame scheduling
//!
//! The game asks its host for "the next frame" and gets back a handle it can
//! cancel. A browser host would back this with `requestAnimationFrame`; tests
//! and the headless runner use `ManualScheduler` and step frames themselves.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Opaque ticket for one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// Display-synchronised frame source
pub trait FrameScheduler {
    /// Request one more frame; the host later delivers it with this handle
    fn schedule_next_frame(&mut self) -> FrameHandle;
    /// Withdraw a request; cancelling a delivered or unknown handle is a no-op
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler that queues requests until the caller takes them
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: VecDeque<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest requested frame, removed from the queue
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }

    /// Number of frames requested and not yet taken or cancelled
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.queue.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.retain(|h| *h != handle);
    }
}
