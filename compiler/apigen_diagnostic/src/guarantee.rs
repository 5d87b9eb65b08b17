use std::fmt;

/// Proof that at least one error diagnostic was emitted.
///
/// Only the queue can mint one, so holding an `ErrorGuaranteed` means the
/// failure has already been reported.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) const fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Mint a guarantee from an error count reported elsewhere.
    pub fn from_error_count(count: usize) -> Option<Self> {
        if count > 0 {
            Some(Self::new())
        } else {
            None
        }
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}
