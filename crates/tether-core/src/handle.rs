use std::fmt;

/// Opaque identifier for a top-level window.
///
/// Wraps the pointer-sized value of a native handle so it can't be mixed
/// up with process ids or pixel values. The OS may invalidate a handle at
/// any time (or hand the same value to a new window), so holding one says
/// nothing about whether the window still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(usize);

impl WindowHandle {
    /// Wraps a raw native handle value.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw native handle value.
    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_hex() {
        assert_eq!(WindowHandle::from_raw(0x1A2B).to_string(), "0x1A2B");
    }

    #[test]
    fn raw_round_trips() {
        let handle = WindowHandle::from_raw(42);
        assert_eq!(handle.raw(), 42);
    }
}
