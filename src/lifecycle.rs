// Ownership helpers for the mounted overlay.
//
// Kept free of web-sys types so host tests can `include!` this file.

/// Identifies one occupant of a [`Slot`]. A ticket from an evicted
/// occupant never matches again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Holds at most one live value. Installing evicts the previous occupant,
/// and every handle refers to its occupant through a ticket.
pub struct Slot<T> {
    current: Option<(Ticket, T)>,
    next: u64,
}

impl<T> Slot<T> {
    pub const fn new() -> Self {
        Self {
            current: None,
            next: 0,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref().map(|(_, value)| value)
    }

    /// Remove whatever is installed, regardless of ticket.
    pub fn evict(&mut self) -> Option<T> {
        self.current.take().map(|(_, value)| value)
    }

    /// Install `value`, handing back the displaced occupant so the caller
    /// can tear it down outside any borrow of the slot.
    pub fn install(&mut self, value: T) -> (Ticket, Option<T>) {
        let ticket = Ticket(self.next);
        self.next += 1;
        let displaced = self.current.replace((ticket, value)).map(|(_, v)| v);
        (ticket, displaced)
    }

    pub fn get(&self, ticket: Ticket) -> Option<&T> {
        match &self.current {
            Some((t, value)) if *t == ticket => Some(value),
            _ => None,
        }
    }

    /// Remove the occupant only if `ticket` still names it.
    pub fn take(&mut self, ticket: Ticket) -> Option<T> {
        if self.get(ticket).is_some() {
            self.evict()
        } else {
            None
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Undo steps run newest first, exactly once: on `run` or on drop.
///
/// A half-finished mount drops its `Cleanup` on the error path, which takes
/// already-appended canvases back out of the page.
#[derive(Default)]
pub struct Cleanup {
    steps: Vec<Box<dyn FnOnce()>>,
}

impl Cleanup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&mut self, step: impl FnOnce() + 'static) {
        self.steps.push(Box::new(step));
    }

    pub fn run(&mut self) {
        while let Some(step) = self.steps.pop() {
            step();
        }
    }
}

impl Drop for Cleanup {
    fn drop(&mut self) {
        self.run();
    }
}
