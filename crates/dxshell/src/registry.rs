use std::fmt;

/// Index of a window in the registry. Stable for the lifetime of the window
/// and never handed out again afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowIndex(pub usize);

impl fmt::Display for WindowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A flat table of windows plus the notion of the "active" one.
///
/// Removed windows leave an empty slot behind so that the indices of the
/// remaining windows don't shift. The expected number of windows is small, so
/// lookups other than by index are linear scans.
pub struct Registry<W> {
    slots: Vec<Option<W>>,
    active: Option<WindowIndex>,
}

impl<W> Default for Registry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Registry<W> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            active: None,
        }
    }

    /// Appends a window. Does not change the active window.
    pub fn insert(&mut self, window: W) -> WindowIndex {
        self.slots.push(Some(window));
        WindowIndex(self.slots.len() - 1)
    }

    /// Removes the window at `index` and returns it.
    ///
    /// The active index is left as is, even when it pointed at the removed
    /// window.
    pub fn remove(&mut self, index: WindowIndex) -> Option<W> {
        let Some(slot) = self.slots.get_mut(index.0) else {
            log::warn!("remove: invalid window index {index}");
            return None;
        };
        slot.take()
    }

    /// Makes `index` the active window. Returns false (and logs) if there is no
    /// window at that index.
    pub fn set_active(&mut self, index: WindowIndex) -> bool {
        if self.contains(index) {
            self.active = Some(index);
            true
        } else {
            log::warn!("set_active: invalid window index {index}");
            false
        }
    }

    /// The last index passed to a successful [`Registry::set_active`].
    #[must_use]
    pub fn active(&self) -> Option<WindowIndex> {
        self.active
    }

    /// Looks up `index`, or the active window when `index` is `None`.
    #[must_use]
    pub fn get(&self, index: Option<WindowIndex>) -> Option<&W> {
        let index = index.or(self.active)?;
        self.slots.get(index.0)?.as_ref()
    }

    pub fn get_mut(&mut self, index: Option<WindowIndex>) -> Option<&mut W> {
        let index = index.or(self.active)?;
        self.slots.get_mut(index.0)?.as_mut()
    }

    #[must_use]
    pub fn contains(&self, index: WindowIndex) -> bool {
        matches!(self.slots.get(index.0), Some(Some(_)))
    }

    /// Index of the first live window matching `predicate`.
    pub fn position(&self, mut predicate: impl FnMut(&W) -> bool) -> Option<WindowIndex> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().map_or(false, &mut predicate))
            .map(WindowIndex)
    }

    /// Indices of all live windows, in ascending order.
    ///
    /// This is a snapshot so that the registry may be modified while the
    /// indices are being visited.
    #[must_use]
    pub fn indices(&self) -> Vec<WindowIndex> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| WindowIndex(i))
            .collect()
    }

    /// Number of live windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Removes every window in index order.
    pub fn drain(&mut self) -> impl Iterator<Item = (WindowIndex, W)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.take().map(|w| (WindowIndex(i), w)))
    }
}
