//! FIFO queues connecting a program to its host.

use std::collections::VecDeque;

use crate::error::RuntimeError;

/// A first-in first-out queue. Written at the tail, read from the head.
#[derive(Clone, Debug)]
pub struct Queue<T> {
    buffer: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self {
            buffer: VecDeque::new(),
        }
    }
}

impl<T: Clone> Queue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, item: T) {
        self.buffer.push_back(item);
    }

    /// Take the oldest item.
    pub fn read(&mut self) -> Result<T, RuntimeError> {
        self.buffer.pop_front().ok_or(RuntimeError::EmptyQueue)
    }

    /// Take every queued item, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        self.buffer.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Copy of the queued items, oldest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.buffer.iter().cloned().collect()
    }
}
