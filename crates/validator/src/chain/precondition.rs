//! Leading precondition of a chain.
//!
//! Every chain starts with exactly one precondition. It decides whether a
//! missing value is acceptable and is fatal on failure in both modes.

use super::Chain;
use crate::rules::predicates::{is_blank, is_trimmed_empty};

/// A chain that still needs its precondition.
///
/// Resolving it (e.g. [`required`](Self::required) or
/// [`optional`](Self::optional)) yields the [`Chain`].
#[derive(Debug)]
pub struct PreCondition<'n, T> {
    chain: Chain<'n, T>,
}

impl<'n, T> PreCondition<'n, T> {
    pub(crate) fn new(chain: Chain<'n, T>) -> Self {
        Self { chain }
    }

    /// Fails a missing value.
    pub fn must_not_be_null(self) -> Chain<'n, T> {
        self.fatal(false, |_| true, None, "mustNotBeNull")
    }

    /// [`must_not_be_null`](Self::must_not_be_null) with an explicit message.
    pub fn must_not_be_null_with(self, message: &str) -> Chain<'n, T> {
        self.fatal(false, |_| true, Some(message), "mustNotBeNull")
    }

    /// Fails a missing value only when `condition` holds; otherwise a
    /// missing value is valid.
    pub fn must_not_be_null_when(self, condition: bool) -> Chain<'n, T> {
        self.fatal(!condition, |_| true, None, "mustNotBeNull")
    }

    /// [`must_not_be_null_when`](Self::must_not_be_null_when) with an
    /// explicit message.
    pub fn must_not_be_null_when_with(self, condition: bool, message: &str) -> Chain<'n, T> {
        self.fatal(!condition, |_| true, Some(message), "mustNotBeNull")
    }

    /// A missing value passes every rule.
    pub fn can_be_null(mut self) -> Chain<'n, T> {
        self.chain.set_null_is_valid(true);
        self.chain
    }

    /// Same as [`can_be_null`](Self::can_be_null).
    pub fn optional(self) -> Chain<'n, T> {
        self.can_be_null()
    }

    /// Skips the whole chain unless `validate` is `true`.
    #[must_use = "a precondition must be resolved into a chain"]
    pub fn validate_when(mut self, validate: bool) -> Self {
        self.chain.set_ignore(!validate);
        self
    }

    pub(crate) fn fatal<F>(
        mut self,
        null_is_valid: bool,
        predicate: F,
        message: Option<&str>,
        descriptor: &str,
    ) -> Chain<'n, T>
    where
        F: FnOnce(&T) -> bool,
    {
        self.chain.set_null_is_valid(null_is_valid);
        self.chain.must_fatally_rule(predicate, message, descriptor)
    }
}

impl<'n> PreCondition<'n, String> {
    /// Fails a missing, empty or whitespace-only value.
    ///
    /// `""`, `" "` and a missing value fail; `"bob"` and `"  bob  "` pass.
    pub fn must_not_be_blank(self) -> Chain<'n, String> {
        self.fatal(false, |s| !is_blank(s), None, "mustNotBeBlank")
    }

    /// [`must_not_be_blank`](Self::must_not_be_blank) with an explicit message.
    pub fn must_not_be_blank_with(self, message: &str) -> Chain<'n, String> {
        self.fatal(false, |s| !is_blank(s), Some(message), "mustNotBeBlank")
    }

    /// Fails a missing value and one made only of whitespace or control
    /// characters.
    pub fn required(self) -> Chain<'n, String> {
        self.fatal(false, is_required, None, "required")
    }

    /// [`required`](Self::required) with an explicit message.
    pub fn required_with(self, message: &str) -> Chain<'n, String> {
        self.fatal(false, is_required, Some(message), "required")
    }

    /// Fails a missing value and one made only of whitespace. Control
    /// characters count as content.
    pub fn required_loose(self) -> Chain<'n, String> {
        self.fatal(false, |s| !is_blank(s), None, "requiredLoose")
    }

    /// [`required_loose`](Self::required_loose) with an explicit message.
    pub fn required_loose_with(self, message: &str) -> Chain<'n, String> {
        self.fatal(false, |s| !is_blank(s), Some(message), "requiredLoose")
    }
}

#[allow(clippy::ptr_arg)]
fn is_required(s: &String) -> bool {
    !is_blank(s) && !is_trimmed_empty(s)
}
