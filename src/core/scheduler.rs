//! "Run before next repaint" queue and the session ids that cancel stale work.

use std::collections::VecDeque;
use std::fmt;

/// Identifier of one animation session
///
/// Ids only grow; a task whose id differs from the live one is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(u64);

impl SessionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One pending tick, tagged with the session that queued it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTask {
    pub session: SessionId,
}

impl FrameTask {
    pub fn new(session: SessionId) -> Self {
        Self { session }
    }

    pub fn is_current(&self, current: Option<SessionId>) -> bool {
        current == Some(self.session)
    }
}

/// FIFO of tasks waiting for the next repaint
///
/// `take_ready` drains everything queued so far; tasks requested while that
/// batch runs wait for the following frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<FrameTask>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, task: FrameTask) {
        self.pending.push_back(task);
    }

    /// Tasks due this frame, in the order they were requested
    pub fn take_ready(&mut self) -> VecDeque<FrameTask> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_increase() {
        let first = SessionId::default().next();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.get(), 2);
        assert_eq!(second.to_string(), "#2");
    }

    #[test]
    fn task_compares_against_live_session() {
        let a = SessionId::default().next();
        let task = FrameTask::new(a);
        assert!(task.is_current(Some(a)));
        assert!(!task.is_current(Some(a.next())));
        assert!(!task.is_current(None));
    }

    #[test]
    fn queue_is_fifo() {
        let a = SessionId::default().next();
        let b = a.next();
        let mut queue = FrameQueue::new();
        queue.request(FrameTask::new(a));
        queue.request(FrameTask::new(b));

        let ready: Vec<_> = queue.take_ready().into_iter().map(|t| t.session).collect();
        assert_eq!(ready, vec![a, b]);
        assert!(queue.is_empty());
    }

    #[test]
    fn requests_during_a_frame_wait_for_the_next() {
        let a = SessionId::default().next();
        let mut queue = FrameQueue::new();
        queue.request(FrameTask::new(a));

        let ready = queue.take_ready();
        for task in ready {
            queue.request(task);
        }
        assert_eq!(queue.len(), 1);
    }
}
