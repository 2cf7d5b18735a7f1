//! Conditional rules for [`Chain::when`](super::Chain::when).

use std::fmt;

/// A predicate with the message recorded when it fails.
pub struct Then<'a, T> {
    predicate: Box<dyn Fn(&T) -> bool + 'a>,
    message: String,
}

impl<'a, T> Then<'a, T> {
    /// Creates a conditional rule.
    pub fn new<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        Self {
            predicate: Box::new(predicate),
            message: message.into(),
        }
    }

    /// Message recorded on failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluates the predicate.
    pub fn test(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Fn(&T) -> bool + 'a>, String) {
        (self.predicate, self.message)
    }
}

impl<T> fmt::Debug for Then<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Then")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Shorthand for [`Then::new`].
pub fn then<'a, T, F>(predicate: F, message: impl Into<String>) -> Then<'a, T>
where
    F: Fn(&T) -> bool + 'a,
{
    Then::new(predicate, message)
}
