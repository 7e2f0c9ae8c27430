//! Slot store: a fixed array of optional elements addressed by slot index.

/// Index of a slot in `[0, capacity)`.
///
/// Stored as 32 bits. `u32::MAX` is reserved as the "no slot" sentinel inside
/// link records and never names a real slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SlotId(u32);

impl SlotId {
    pub(crate) const NIL: SlotId = SlotId(u32::MAX);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        Self(index as u32)
    }

    #[inline]
    pub(crate) fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// `None` for the sentinel.
    #[inline]
    pub(crate) fn get(self) -> Option<SlotId> {
        (!self.is_nil()).then_some(self)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        debug_assert!(!self.is_nil());
        self.0 as usize
    }
}

/// Fixed-size element storage. The length never changes after construction.
#[derive(Clone)]
pub(crate) struct SlotStore<T> {
    values: Vec<Option<T>>,
}

impl<T> SlotStore<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        let mut values = Vec::with_capacity(capacity);
        values.resize_with(capacity, || None);
        Self { values }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub(crate) fn is_occupied(&self, slot: SlotId) -> bool {
        self.values[slot.index()].is_some()
    }

    /// First empty slot in index order.
    ///
    /// Callers check `is_full` beforehand; a `None` here means the occupancy
    /// count and the store disagree.
    pub(crate) fn allocate_free_slot(&self) -> Option<SlotId> {
        self.values
            .iter()
            .position(Option::is_none)
            .map(SlotId::new)
    }

    #[inline]
    pub(crate) fn value(&self, slot: SlotId) -> &T {
        self.values[slot.index()]
            .as_ref()
            .expect("navigated slot must be occupied")
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, slot: SlotId) -> &mut T {
        self.values[slot.index()]
            .as_mut()
            .expect("navigated slot must be occupied")
    }

    /// Store into an empty slot.
    pub(crate) fn put(&mut self, slot: SlotId, value: T) {
        let previous = self.values[slot.index()].replace(value);
        debug_assert!(previous.is_none(), "slot {} already occupied", slot.index());
    }

    /// Swap the element of an occupied slot, returning the old one.
    pub(crate) fn replace(&mut self, slot: SlotId, value: T) -> T {
        self.values[slot.index()]
            .replace(value)
            .expect("replaced slot must be occupied")
    }

    /// Empty an occupied slot, returning its element.
    pub(crate) fn take(&mut self, slot: SlotId) -> T {
        self.values[slot.index()]
            .take()
            .expect("freed slot must be occupied")
    }

    pub(crate) fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = None);
    }
}
