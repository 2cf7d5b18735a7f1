//! The per-value rule chain.
//!
//! A [`Chain`] owns one value and applies rules to it in call order. Whether
//! a rule runs is decided by a single guard:
//!
//! ```text
//! evaluate = !stopped && !ignore && !(value is None && null_is_valid)
//! ```
//!
//! A failed rule records its message in the sink and stops the chain when
//! the chain runs Note-First or when the rule is fatal. Once stopped, no
//! further predicate runs and nothing else is recorded.
//!
//! Chains are created through [`Mode`] (or [`NoteFirstValidator`] /
//! [`NoteAllValidator`]), which hand out a [`PreCondition`] that must be
//! resolved into the chain first.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldnote_validator::prelude::*;
//!
//! let mut note = FieldNote::new();
//! NoteAllValidator::valid(Some("15abc".to_string()), "age", &mut note)
//!     .required()
//!     .is_integer()
//!     .min(18);
//! assert_eq!(note.len(), 2);
//! ```

mod entry;
mod precondition;
mod then;

use std::fmt;

pub use entry::{Mode, NoteAllValidator, NoteFirstValidator};
pub use precondition::PreCondition;
pub use then::{Then, then};

use crate::foundation::{Validated, ValidationError};
use crate::note::Note;
use crate::note::format::render_message;

// ============================================================================
// CONVERSION
// ============================================================================

/// Result of a conversion step in [`Chain::must_convert`].
///
/// `None` and `Err` both mean the conversion failed.
pub trait Conversion {
    /// Converted value type.
    type Output;

    /// Returns the converted value, or `None` on failure.
    fn into_converted(self) -> Option<Self::Output>;
}

impl<U> Conversion for Option<U> {
    type Output = U;

    fn into_converted(self) -> Option<U> {
        self
    }
}

impl<U, E> Conversion for Result<U, E> {
    type Output = U;

    fn into_converted(self) -> Option<U> {
        self.ok()
    }
}

// ============================================================================
// CHAIN
// ============================================================================

/// Rule chain over one value.
///
/// `'n` is the borrow of the caller's sink. A chain without a sink is
/// *detached*: its first failure stops it and is read back through
/// [`finish`](Self::finish) or [`into_result`](Self::into_result).
pub struct Chain<'n, T> {
    field_name: Option<String>,
    value: Option<T>,
    note: Option<&'n mut dyn Note>,
    stopped: bool,
    null_is_valid: bool,
    ignore: bool,
    fail_on_first: bool,
    rules: Vec<String>,
    failures: Vec<String>,
}

impl<'n, T> Chain<'n, T> {
    pub(crate) fn new(
        field_name: Option<String>,
        value: Option<T>,
        note: Option<&'n mut dyn Note>,
        fail_on_first: bool,
    ) -> Self {
        Self {
            field_name,
            value,
            note,
            stopped: false,
            null_is_valid: false,
            ignore: false,
            fail_on_first,
            rules: Vec::new(),
            failures: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------------

    /// Fails the value when `predicate` returns `false`. `message` is
    /// recorded as-is.
    ///
    /// A missing value fails every rule unless the precondition allowed it.
    pub fn must<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        if self.check_failure(predicate) {
            self.mark_failed(message.into(), false);
        }
        self
    }

    /// Like [`must`](Self::must) for a named rule.
    ///
    /// `descriptor` is `name[;arg...]`; it is kept in the rule trail and
    /// drives message formatting. Without `message`, the sink's custom
    /// template for the rule name or a built-in default is used.
    pub fn must_rule<F>(mut self, predicate: F, message: Option<&str>, descriptor: &str) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        self.rules.push(descriptor.to_owned());
        if self.check_failure(predicate) {
            let text = self.render(message, descriptor);
            self.mark_failed(text, false);
        }
        self
    }

    /// Like [`must`](Self::must), but a failure always stops the chain.
    pub fn must_fatally<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        if self.check_failure(predicate) {
            self.mark_failed(message.into(), true);
        }
        self
    }

    /// Like [`must_rule`](Self::must_rule), but a failure always stops the
    /// chain.
    pub fn must_fatally_rule<F>(mut self, predicate: F, message: Option<&str>, descriptor: &str) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        self.rules.push(descriptor.to_owned());
        if self.check_failure(predicate) {
            let text = self.render(message, descriptor);
            self.mark_failed(text, true);
        }
        self
    }

    /// Converts the value into another type and continues with a chain over
    /// the result.
    ///
    /// `convert` may return `Option<U>` or `Result<U, E>`; `None` and `Err`
    /// record `message` and stop the chain. When the guard does not hold the
    /// new chain carries no value and nothing is recorded. Flags, field name,
    /// sink and rule trail are carried over.
    ///
    /// ```rust,ignore
    /// let chain = NoteAllValidator::valid(Some("42".to_string()), "age", &mut note)
    ///     .required()
    ///     .must_convert(|s| s.parse::<i64>(), "age must be a number")
    ///     .min(18);
    /// ```
    pub fn must_convert<F, R>(mut self, convert: F, message: impl Into<String>) -> Chain<'n, R::Output>
    where
        F: FnOnce(T) -> R,
        R: Conversion,
    {
        let converted = if self.should_evaluate() {
            let converted = self.value.take().and_then(|value| convert(value).into_converted());
            if converted.is_none() {
                self.mark_failed(message.into(), true);
            }
            converted
        } else {
            None
        };
        self.retype(converted)
    }

    /// Applies each [`Then`] as [`must`](Self::must) when `condition` holds.
    pub fn when<'a, I>(mut self, condition: bool, thens: I) -> Self
    where
        I: IntoIterator<Item = Then<'a, T>>,
        T: 'a,
    {
        if condition {
            for rule in thens {
                let (predicate, message) = rule.into_parts();
                self = self.must(|value| predicate(value), message);
            }
        }
        self
    }

    /// Applies each [`Then`] when the guard holds and `predicate` matches
    /// the value.
    pub fn when_matches<'a, F, I>(self, predicate: F, thens: I) -> Self
    where
        F: FnOnce(&T) -> bool,
        I: IntoIterator<Item = Then<'a, T>>,
        T: 'a,
    {
        let matched = self.should_evaluate() && self.value.as_ref().is_some_and(predicate);
        self.when(matched, thens)
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// Returns `true` once the chain no longer evaluates rules.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Returns `true` while the chain can still evaluate rules.
    pub fn is_active(&self) -> bool {
        !self.stopped
    }

    /// Returns `true` if the chain has no sink.
    pub fn is_detached(&self) -> bool {
        self.note.is_none()
    }

    /// Returns `true` if this chain skips every rule.
    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    /// Returns `true` if a missing value passes every rule.
    pub fn null_is_valid(&self) -> bool {
        self.null_is_valid
    }

    /// Descriptors of the named rules applied so far.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Messages this chain recorded, in order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// The current value.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The field being validated.
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// Consumes the chain, returning the value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Consumes the chain into `Valid(value)` or `Invalid(messages)`.
    pub fn finish(self) -> Validated<Option<T>> {
        if self.failures.is_empty() {
            Validated::Valid(self.value)
        } else {
            Validated::Invalid(self.failures)
        }
    }

    /// Consumes the chain, turning its first failure into an error.
    pub fn into_result(self) -> Result<Option<T>, ValidationError> {
        match self.failures.into_iter().next() {
            Some(message) => Err(ValidationError::new(self.field_name.as_deref(), message)),
            None => Ok(self.value),
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    pub(crate) fn set_null_is_valid(&mut self, null_is_valid: bool) {
        self.null_is_valid = null_is_valid;
    }

    pub(crate) fn set_ignore(&mut self, ignore: bool) {
        self.ignore = ignore;
    }

    fn should_evaluate(&self) -> bool {
        !self.stopped && !self.ignore && !(self.value.is_none() && self.null_is_valid)
    }

    fn check_failure<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&T) -> bool,
    {
        self.should_evaluate() && !self.value.as_ref().is_some_and(predicate)
    }

    fn render(&self, message: Option<&str>, descriptor: &str) -> String {
        render_message(self.note.as_deref(), self.field_name.as_deref(), message, descriptor)
    }

    fn mark_failed(&mut self, message: String, fatal: bool) {
        tracing::trace!(
            field = self.field_name.as_deref().unwrap_or_default(),
            %message,
            fatal,
            "rule failed"
        );
        if let Some(note) = self.note.as_deref_mut() {
            note.add_message(self.field_name.as_deref(), message.clone());
        }
        self.failures.push(message);

        if fatal || self.fail_on_first || self.note.is_none() {
            self.stop();
        }
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            tracing::debug!(
                field = self.field_name.as_deref().unwrap_or_default(),
                rules = self.rules.len(),
                failures = self.failures.len(),
                "validation chain stopped"
            );
        }
    }

    fn retype<U>(self, value: Option<U>) -> Chain<'n, U> {
        Chain {
            field_name: self.field_name,
            value,
            note: self.note,
            stopped: self.stopped,
            null_is_valid: self.null_is_valid,
            ignore: self.ignore,
            fail_on_first: self.fail_on_first,
            rules: self.rules,
            failures: self.failures,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("field_name", &self.field_name)
            .field("value", &self.value)
            .field("detached", &self.note.is_none())
            .field("stopped", &self.stopped)
            .field("null_is_valid", &self.null_is_valid)
            .field("ignore", &self.ignore)
            .field("fail_on_first", &self.fail_on_first)
            .field("rules", &self.rules)
            .field("failures", &self.failures)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{FieldNote, FlatNote, NoteConfig};
    use pretty_assertions::assert_eq;

    fn positive(v: &i32) -> bool {
        *v > 0
    }

    #[test]
    fn note_first_stops_at_first_failure() {
        let mut note = FlatNote::new();
        let chain = Chain::new(None, Some(-1), Some(&mut note), true)
            .must(positive, "not positive")
            .must(|v| *v > 10, "too small");
        assert!(chain.is_stopped());
        drop(chain);
        assert_eq!(note.as_slice(), ["not positive"]);
    }

    #[test]
    fn note_all_continues_until_fatal() {
        let mut note = FlatNote::new();
        let chain = Chain::new(None, Some(-1), Some(&mut note), false)
            .must(positive, "not positive")
            .must(|v| *v > 10, "too small")
            .must_fatally(|v| *v == 0, "not zero")
            .must(|_| false, "never recorded");
        assert!(chain.is_stopped());
        assert_eq!(chain.failures().len(), 3);
        drop(chain);
        assert_eq!(note.as_slice(), ["not positive", "too small", "not zero"]);
    }

    #[test]
    fn missing_value_fails_unless_null_is_valid() {
        let chain = Chain::<i32>::new(None, None, None, false).must(positive, "required");
        assert_eq!(chain.failures(), ["required"]);

        let mut chain = Chain::<i32>::new(None, None, None, false);
        chain.set_null_is_valid(true);
        let chain = chain.must(positive, "required");
        assert!(chain.failures().is_empty());
        assert!(chain.is_active());
    }

    #[test]
    fn ignored_chain_evaluates_nothing() {
        let mut chain = Chain::new(None, Some(1), None, true);
        chain.set_ignore(true);
        let chain = chain.must(|_| panic!("must not run"), "x");
        assert!(chain.is_ignored());
        assert!(chain.finish().is_valid());
    }

    #[test]
    fn detached_chain_stops_on_first_failure() {
        let chain = Chain::new(Some("age".into()), Some(5), None, false)
            .must(|v| *v > 10, "too small")
            .must(|v| *v > 20, "way too small");
        assert!(chain.is_detached());
        let error = chain.into_result().unwrap_err();
        assert_eq!(error.to_string(), "Validation error: too small");
        assert_eq!(error.field.as_deref(), Some("age"));
    }

    #[test]
    fn convert_retypes_and_keeps_flags() {
        let mut note = FlatNote::new();
        let chain = Chain::new(None, Some("42".to_string()), Some(&mut note), false)
            .must_convert(|s| s.parse::<i32>(), "not a number")
            .must(|v| *v == 42, "not 42");
        assert_eq!(chain.value(), Some(&42));
        assert!(chain.is_active());
    }

    #[test]
    fn failed_convert_stops_even_in_note_all() {
        let mut note = FlatNote::new();
        let chain = Chain::new(None, Some("abc".to_string()), Some(&mut note), false)
            .must_convert(|s| s.parse::<i32>().ok(), "not a number")
            .must(|_| false, "unreachable");
        assert!(chain.is_stopped());
        assert_eq!(chain.value(), None);
        drop(chain);
        assert_eq!(note.as_slice(), ["not a number"]);
    }

    #[test]
    fn convert_on_stopped_chain_records_nothing() {
        let mut note = FlatNote::new();
        let chain = Chain::new(None, Some("abc".to_string()), Some(&mut note), true)
            .must(|_| false, "first")
            .must_convert(|s| s.parse::<i32>().ok(), "not a number");
        assert_eq!(chain.failures(), ["first"]);
    }

    #[test]
    fn when_applies_thens_conditionally() {
        let mut note = FlatNote::new();
        let chain = Chain::new(None, Some(5), Some(&mut note), false)
            .when(false, [then(|_: &i32| false, "skipped")])
            .when(true, [then(|v: &i32| *v > 10, "too small"), then(|v: &i32| *v % 2 == 0, "odd")])
            .when_matches(|v| *v == 5, [then(|_: &i32| false, "is five")])
            .when_matches(|v| *v == 6, [then(|_: &i32| false, "is six")]);
        assert_eq!(chain.failures(), ["too small", "odd", "is five"]);
    }

    #[test]
    fn rule_descriptors_are_formatted() {
        let mut note = FieldNote::with_config(NoteConfig::new().with_field_placeholder("{field}"));
        let chain = Chain::new(Some("user_name".into()), Some("x".to_string()), Some(&mut note), false)
            .must_rule(|s| s.len() >= 2, Some("{field} needs %s+ chars"), "minLength;2")
            .must_rule(|s| s.len() >= 3, None, "minLength;3");
        assert_eq!(chain.rules(), ["minLength;2", "minLength;3"]);
        drop(chain);
        assert_eq!(
            note.field("user_name"),
            Some(
                &[
                    "User name needs 2+ chars".to_string(),
                    "User name must be at least 3 characters long".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn finish_reports_valid_value() {
        let outcome = Chain::new(None, Some(3), None, true).must(positive, "x").finish();
        assert_eq!(outcome, Validated::Valid(Some(3)));
    }
}
