use std::fmt;

/// Number of frames an animation runs before it completes.
pub enum FrameLimit {
    /// Never completes; advances one frame per accepted tick.
    Unbounded,
    /// Fixed frame count supplied by the caller, replaceable on reset.
    Fixed(u64),
    /// Re-evaluated on every tick, e.g. to follow a collection whose
    /// length changes while the animation is running.
    Dynamic(Box<dyn Fn() -> u64>),
}

impl FrameLimit {
    #[must_use]
    pub fn dynamic(limit: impl Fn() -> u64 + 'static) -> Self {
        Self::Dynamic(Box::new(limit))
    }

    /// Current limit, `None` when unbounded.
    #[must_use]
    pub fn resolve(&self) -> Option<u64> {
        match self {
            Self::Unbounded => None,
            Self::Fixed(limit) => Some(*limit),
            Self::Dynamic(limit) => Some(limit()),
        }
    }

    /// Returns `true` when the limit comes from the caller rather than
    /// being computed by the animation itself.
    #[must_use]
    pub fn is_external(&self) -> bool {
        !matches!(self, Self::Dynamic(_))
    }
}

impl Default for FrameLimit {
    fn default() -> Self {
        Self::Unbounded
    }
}

impl From<u64> for FrameLimit {
    fn from(limit: u64) -> Self {
        Self::Fixed(limit)
    }
}

impl From<Option<u64>> for FrameLimit {
    fn from(limit: Option<u64>) -> Self {
        limit.map_or(Self::Unbounded, Self::Fixed)
    }
}

impl fmt::Debug for FrameLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("Unbounded"),
            Self::Fixed(limit) => f.debug_tuple("Fixed").field(limit).finish(),
            Self::Dynamic(limit) => f.debug_tuple("Dynamic").field(&limit()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::FrameLimit;

    #[test]
    fn dynamic_limit_is_evaluated_on_every_resolve() {
        let len = Rc::new(Cell::new(3_u64));
        let tracked = Rc::clone(&len);
        let limit = FrameLimit::dynamic(move || tracked.get());

        assert_eq!(limit.resolve(), Some(3));
        len.set(7);
        assert_eq!(limit.resolve(), Some(7));
        assert!(!limit.is_external());
    }

    #[test]
    fn conversions_pick_fixed_or_unbounded() {
        assert_eq!(FrameLimit::from(5_u64).resolve(), Some(5));
        assert_eq!(FrameLimit::from(None::<u64>).resolve(), None);
        assert!(FrameLimit::default().is_external());
    }
}
