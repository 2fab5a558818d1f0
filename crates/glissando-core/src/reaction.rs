/// Remembers the last value it was shown and reports changes.
///
/// This is how derived state is watched: the owner samples a cell once per
/// event or frame and feeds the sample to [`Reaction::observe`]. Redundant
/// samples of an unchanged value are swallowed here, so call sites never
/// compare values themselves.
#[derive(Debug, Clone)]
pub struct Reaction<T> {
    last: Option<T>,
}

impl<T> Default for Reaction<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> Reaction<T> {
    /// Starts with `initial` as the remembered value, so observing it again
    /// is not a change.
    pub fn new(initial: T) -> Self {
        Self {
            last: Some(initial),
        }
    }

    /// Records `value` and returns the previous value if it differs.
    ///
    /// The first observation of an empty reaction reports a change with no
    /// previous value.
    pub fn observe(&mut self, value: T) -> Option<Option<T>> {
        if self.last.as_ref() == Some(&value) {
            return None;
        }
        Some(self.last.replace(value))
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    /// Overwrites the remembered value without reporting a change.
    pub fn reset(&mut self, value: T) {
        self.last = Some(value);
    }
}
