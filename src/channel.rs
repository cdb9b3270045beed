//! Command line handoff between an input context and the render loop
//!
//! The transport may be serviced from an interrupt handler or another task
//! while the loop renders. Lines cross that boundary through a bounded queue
//! guarded by a `critical-section` mutex; the loop drains at most one line per
//! tick.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::{Deque, String};

/// Longest accepted command line, in bytes
pub const COMMAND_LINE_CAPACITY: usize = 32;

/// One assembled input line
pub type CommandLine = String<COMMAND_LINE_CAPACITY>;

/// Returned when the queue has no free slot; carries the rejected value back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Bounded queue shared by a producer and the loop
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow_ref_mut(cs)
                .push_back(value)
                .map_err(TrySendError)
        })
    }

    /// Oldest queued value, if any
    pub fn try_receive(&self) -> Option<T> {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything still queued
    pub fn clear(&self) {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).clear());
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// Consumer handle, owned by the scheduler
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Option<T> {
        self.channel.try_receive()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

pub type CommandChannel<const SIZE: usize> = Channel<CommandLine, SIZE>;
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, CommandLine, SIZE>;
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, CommandLine, SIZE>;
