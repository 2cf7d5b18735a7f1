//! Name-to-operation registry for rule specs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::DispatchError;
use super::spec::{ArgKind, ArgValue, RuleArg, RuleSpec};
use crate::chain::Chain;

// ============================================================================
// SIGNATURES
// ============================================================================

/// Argument shape an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// Exactly these kinds, in order.
    Fixed(&'static [ArgKind]),
    /// One or more arguments of one kind.
    Repeated(ArgKind),
    /// One or more arguments read as text.
    Text,
    /// A string delimiter followed by any arguments.
    DelimiterThenText,
}

impl Signature {
    /// No arguments.
    pub const NONE: Self = Self::Fixed(&[]);

    /// Whether `args` match this signature.
    ///
    /// The exact pass (`widen == false`) requires identical kinds; the
    /// widening pass also lets [`ArgKind::fits`] promote numbers and lets
    /// [`Text`](Self::Text) take numeric tokens.
    pub fn accepts(&self, args: &[RuleArg], widen: bool) -> bool {
        match *self {
            Self::Fixed(kinds) => {
                args.len() == kinds.len()
                    && args.iter().zip(kinds).all(|(arg, &kind)| arg.kind().fits(kind, widen))
            }
            Self::Repeated(kind) => {
                !args.is_empty() && args.iter().all(|arg| arg.kind().fits(kind, widen))
            }
            Self::Text => !args.is_empty() && (widen || args.iter().all(|arg| arg.kind() == ArgKind::Str)),
            Self::DelimiterThenText => args.first().is_some_and(|arg| arg.kind() == ArgKind::Str),
        }
    }
}

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Typed view over the arguments of a resolved rule.
///
/// Accessors assume the operation's [`Signature`] has been checked; a
/// missing or differently typed argument reads as the type's default.
#[derive(Debug, Clone, Copy)]
pub struct RuleArgs<'a> {
    args: &'a [RuleArg],
}

impl<'a> RuleArgs<'a> {
    pub fn new(args: &'a [RuleArg]) -> Self {
        Self { args }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a RuleArg> {
        self.args.get(index)
    }

    fn value(&self, index: usize) -> ArgValue {
        self.get(index).map_or(ArgValue::Str, RuleArg::value)
    }

    pub fn int(&self, index: usize) -> i32 {
        match self.value(index) {
            ArgValue::Int(v) => v,
            _ => 0,
        }
    }

    pub fn long(&self, index: usize) -> i64 {
        match self.value(index) {
            ArgValue::Int(v) => i64::from(v),
            ArgValue::Long(v) => v,
            _ => 0,
        }
    }

    pub fn float(&self, index: usize) -> f32 {
        match self.value(index) {
            ArgValue::Int(v) => v as f32,
            ArgValue::Float(v) => v,
            _ => 0.0,
        }
    }

    pub fn double(&self, index: usize) -> f64 {
        match self.value(index) {
            ArgValue::Int(v) => f64::from(v),
            ArgValue::Long(v) => v as f64,
            ArgValue::Float(v) => f64::from(v),
            ArgValue::Double(v) => v,
            ArgValue::Str => 0.0,
        }
    }

    /// Integer argument as a size; negative values read as `0`.
    pub fn count(&self, index: usize) -> usize {
        usize::try_from(self.long(index)).unwrap_or(0)
    }

    /// Argument as written in the rule text.
    pub fn text(&self, index: usize) -> &'a str {
        self.get(index).map_or("", RuleArg::as_text)
    }

    /// Every argument from `from` on, as written.
    pub fn texts(&self, from: usize) -> Vec<&'a str> {
        self.texts_between(from, self.len())
    }

    /// Arguments in `from..to` as written; empty when the range is.
    pub fn texts_between(&self, from: usize, to: usize) -> Vec<&'a str> {
        self.args
            .get(from..to.min(self.len()))
            .unwrap_or_default()
            .iter()
            .map(RuleArg::as_text)
            .collect()
    }

    pub fn ints(&self) -> Vec<i32> {
        (0..self.len()).map(|i| self.int(i)).collect()
    }

    pub fn longs(&self) -> Vec<i64> {
        (0..self.len()).map(|i| self.long(i)).collect()
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Chain step run for a resolved rule.
pub type RuleFn<T> = Arc<dyn for<'n, 'a> Fn(Chain<'n, T>, RuleArgs<'a>) -> Chain<'n, T> + Send + Sync>;

/// One overload of a rule: its argument shape and the step it runs.
pub struct Operation<T> {
    pub signature: Signature,
    pub apply: RuleFn<T>,
}

impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        Self {
            signature: self.signature,
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A rule spec bound to the operation that runs it.
pub struct ResolvedRule<T> {
    spec: RuleSpec,
    operation: Operation<T>,
}

impl<T> ResolvedRule<T> {
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    pub fn signature(&self) -> Signature {
        self.operation.signature
    }

    /// Runs the rule on `chain`.
    pub fn apply<'n>(&self, chain: Chain<'n, T>) -> Chain<'n, T> {
        (self.operation.apply)(chain, RuleArgs::new(&self.spec.args))
    }
}

impl<T> Clone for ResolvedRule<T> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            operation: self.operation.clone(),
        }
    }
}

impl<T> fmt::Debug for ResolvedRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRule")
            .field("spec", &self.spec)
            .field("signature", &self.operation.signature)
            .finish()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Rules available to chains over `T`, keyed by name.
///
/// A name may carry several overloads. [`resolve`](Self::resolve) picks the
/// first overload whose signature matches exactly, then the first that
/// matches after widening.
///
/// ```rust,ignore
/// let mut registry = RuleRegistry::<i32>::new();
/// registry.register("even", Signature::NONE, |chain, _| chain.must_rule(|v| v % 2 == 0, None, "even"));
/// let rule = registry.resolve(&RuleSpec::new("even"))?;
/// ```
pub struct RuleRegistry<T> {
    operations: HashMap<String, Vec<Operation<T>>>,
}

impl<T> RuleRegistry<T> {
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Adds an overload for `name`. Overloads are tried in registration
    /// order.
    pub fn register<F>(&mut self, name: impl Into<String>, signature: Signature, apply: F)
    where
        F: for<'n, 'a> Fn(Chain<'n, T>, RuleArgs<'a>) -> Chain<'n, T> + Send + Sync + 'static,
    {
        self.operations.entry(name.into()).or_default().push(Operation {
            signature,
            apply: Arc::new(apply),
        });
    }

    /// Binds `spec` to a matching operation.
    pub fn resolve(&self, spec: &RuleSpec) -> Result<ResolvedRule<T>, DispatchError> {
        let overloads = self
            .operations
            .get(&spec.name)
            .ok_or_else(|| DispatchError::UnknownRule {
                name: spec.name.clone(),
            })?;

        let operation = [false, true]
            .into_iter()
            .find_map(|widen| {
                overloads
                    .iter()
                    .find(|op| op.signature.accepts(&spec.args, widen))
            })
            .ok_or_else(|| DispatchError::SignatureMismatch {
                name: spec.name.clone(),
                args: spec.arg_kinds(),
            })?;

        Ok(ResolvedRule {
            spec: spec.clone(),
            operation: operation.clone(),
        })
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<T> Default for RuleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RuleRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rule_names())
            .finish()
    }
}
