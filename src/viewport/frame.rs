//! Per-frame task queue for deferred fits and animation ticks.

use crate::animation::driver::TickHandle;

/// Work deferred to the next animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameTask {
    /// Retry fitting the extent once the viewport has a size.
    Fit,
    /// Advance the moving marker.
    Animate(TickHandle),
}

/// Tasks waiting for the host's next animation frame, in request order.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    tasks: Vec<FrameTask>,
}

impl FrameQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task`; a task already queued is not duplicated.
    pub fn request(&mut self, task: FrameTask) -> bool {
        if self.tasks.contains(&task) {
            return false;
        }
        self.tasks.push(task);
        true
    }

    /// Drop `task` if it is queued.
    pub fn cancel(&mut self, task: FrameTask) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| *t != task);
        self.tasks.len() != before
    }

    /// Take every queued task; tasks requested while running them wait for the following frame.
    pub fn take(&mut self) -> Vec<FrameTask> {
        std::mem::take(&mut self.tasks)
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Whether `task` is queued.
    pub fn contains(&self, task: FrameTask) -> bool {
        self.tasks.contains(&task)
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Return `true` when no frame is needed.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
