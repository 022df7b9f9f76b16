//! Deferred-ownership carriers for grammar actions.
//!
//! A grammar action often builds an owned node before the overall parse is
//! known to succeed. Nodes go into a [`NodePool`] arena and rules pass around
//! copyable [`Envelope`] index handles; "opening" an envelope takes the node
//! back out. Opening an envelope that is empty (already opened, or
//! constructed empty) clears a caller-provided success flag instead of
//! returning an error: alternation must stay cheap, so this path never
//! allocates and never panics.

/// A handle to a not-yet-committed node in a [`NodePool`].
///
/// Copying an envelope copies the handle, not the node; all copies refer to
/// the same slot, and the slot yields its node exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Envelope {
    index: usize,
}

impl Envelope {
    /// An envelope that was never filled; opening it always fails.
    #[must_use]
    pub const fn empty() -> Self {
        Self { index: usize::MAX }
    }
}

/// Arena of constructed-but-uncommitted nodes.
#[derive(Debug)]
pub struct NodePool<T> {
    slots: Vec<Option<T>>,
}

impl<T> NodePool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Builds the node into the pool and returns its envelope.
    pub fn construct(&mut self, node: T) -> Envelope {
        self.slots.push(Some(node));
        Envelope {
            index: self.slots.len() - 1,
        }
    }

    /// Opens an envelope, yielding its node.
    ///
    /// If the envelope is empty — previously opened, or constructed empty —
    /// `pass` is set to `false` and `None` is returned. `pass` is left
    /// untouched on success so a chain of opens can share one flag.
    pub fn open(&mut self, envelope: Envelope, pass: &mut bool) -> Option<T> {
        match self.slots.get_mut(envelope.index).and_then(Option::take) {
            Some(node) => Some(node),
            None => {
                *pass = false;
                None
            }
        }
    }

    /// Number of slots ever constructed (opened or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing was ever constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}
