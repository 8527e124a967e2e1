//! Bounded mailbox between the configuration context and the render loop.
//!
//! Senders may live in interrupt handlers or radio callbacks; the receiver is
//! drained by the render loop at the start of every tick. Synchronization is a
//! short `critical-section` around a `heapless::Deque`, so the mailbox can be
//! placed in a `static` on targets without an allocator.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when the mailbox is full. Carries the rejected message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxFull<T>(pub T);

/// Fixed-capacity multi-sender queue
pub struct Mailbox<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Mailbox<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> MailboxSender<'_, T, SIZE> {
        MailboxSender { mailbox: self }
    }

    pub const fn receiver(&self) -> MailboxReceiver<'_, T, SIZE> {
        MailboxReceiver { mailbox: self }
    }

    /// Queue a message, handing it back if there is no room
    pub fn try_send(&self, message: T) -> Result<(), MailboxFull<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(message).map_err(MailboxFull)
        })
    }

    /// Take the oldest message, if any
    pub fn try_receive(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued messages
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Mailbox<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`Mailbox`]
pub struct MailboxSender<'a, T, const SIZE: usize> {
    mailbox: &'a Mailbox<T, SIZE>,
}

// Not derived: derive would require `T: Copy`
impl<T, const SIZE: usize> Clone for MailboxSender<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for MailboxSender<'_, T, SIZE> {}

impl<T, const SIZE: usize> MailboxSender<'_, T, SIZE> {
    pub fn try_send(&self, message: T) -> Result<(), MailboxFull<T>> {
        self.mailbox.try_send(message)
    }
}

/// Receiving half of a [`Mailbox`]
pub struct MailboxReceiver<'a, T, const SIZE: usize> {
    mailbox: &'a Mailbox<T, SIZE>,
}

impl<T, const SIZE: usize> Clone for MailboxReceiver<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for MailboxReceiver<'_, T, SIZE> {}

impl<'a, T, const SIZE: usize> MailboxReceiver<'a, T, SIZE> {
    pub fn try_receive(&self) -> Option<T> {
        self.mailbox.try_receive()
    }

    /// Iterate over everything queued right now, oldest first
    pub fn drain(&self) -> Drain<'a, T, SIZE> {
        Drain {
            mailbox: self.mailbox,
        }
    }
}

/// Iterator returned by [`MailboxReceiver::drain`]
pub struct Drain<'a, T, const SIZE: usize> {
    mailbox: &'a Mailbox<T, SIZE>,
}

impl<T, const SIZE: usize> Iterator for Drain<'_, T, SIZE> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.mailbox.try_receive()
    }
}
