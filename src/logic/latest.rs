use parking_lot::Mutex;

/// Tag handed out when a request is issued against a [`LatestRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTag(u64);

impl RequestTag {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Slot<T> {
    issued: u64,
    value: T,
}

/// Single-slot register keeping the value produced by the most recently
/// issued request.
///
/// Every request takes a tag from [`issue`](Self::issue) before it starts.
/// Its result is stored only if no newer tag was issued in the meantime,
/// whatever order the responses arrive in. Issuing and applying share one
/// lock, so a stale result can never land after a fresher one.
#[derive(Debug)]
pub struct LatestRequest<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> LatestRequest<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slot: Mutex::new(Slot {
                issued: 0,
                value: initial,
            }),
        }
    }

    /// Supersede every outstanding request.
    pub fn issue(&self) -> RequestTag {
        let mut slot = self.slot.lock();
        slot.issued += 1;
        RequestTag(slot.issued)
    }

    pub fn is_current(&self, tag: RequestTag) -> bool {
        self.slot.lock().issued == tag.0
    }

    /// Store `value` if `tag` is still the latest; returns whether it was.
    pub fn apply(&self, tag: RequestTag, value: T) -> bool {
        let mut slot = self.slot.lock();
        if slot.issued != tag.0 {
            return false;
        }
        slot.value = value;
        true
    }

    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.lock().value)
    }
}

impl<T: Clone> LatestRequest<T> {
    pub fn snapshot(&self) -> T {
        self.slot.lock().value.clone()
    }
}

impl<T: Default> Default for LatestRequest<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
