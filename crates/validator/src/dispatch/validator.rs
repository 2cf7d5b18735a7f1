//! Validators built from rule text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::builtin::{Precondition, RuleTarget};
use super::error::{DispatchError, RuleError, RuleSpecError};
use super::registry::{ResolvedRule, RuleRegistry};
use super::spec::{DEFAULT_ARG_DELIMITER, DEFAULT_RULE_DELIMITER, RuleSpec, RuleSpecParser};
use crate::chain::{Chain, Mode, PreCondition};
use crate::foundation::Validated;
use crate::note::Note;

/// What to do with a rule spec that does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedRules {
    /// Log it, keep it in [`Validator::unresolved`] and skip it.
    #[default]
    Ignore,
    /// Fail construction with the [`DispatchError`].
    Reject,
}

/// Settings for building a [`Validator`] from text.
///
/// ```rust,ignore
/// let config: ValidatorConfig = serde_json::from_str(r#"{ "rule_delimiter": "|", "unresolved": "reject" }"#)?;
/// let validator = Validator::<String>::from_config("required|email", &config)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub rule_delimiter: String,
    pub arg_delimiter: String,
    pub unresolved: UnresolvedRules,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_delimiters(mut self, rule: impl Into<String>, arg: impl Into<String>) -> Self {
        self.rule_delimiter = rule.into();
        self.arg_delimiter = arg.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_unresolved(mut self, unresolved: UnresolvedRules) -> Self {
        self.unresolved = unresolved;
        self
    }

    /// Parser for the configured delimiters.
    pub fn parser(&self) -> Result<RuleSpecParser, RuleSpecError> {
        RuleSpecParser::new(self.rule_delimiter.as_str(), self.arg_delimiter.as_str())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            rule_delimiter: DEFAULT_RULE_DELIMITER.to_owned(),
            arg_delimiter: DEFAULT_ARG_DELIMITER.to_owned(),
            unresolved: UnresolvedRules::default(),
        }
    }
}

/// A rule list resolved once and run against any number of values.
///
/// The precondition comes from `required` (or else `requiredLoose`, or
/// else optional) and always runs first. The other rules run in the order
/// they were declared.
///
/// ```rust,ignore
/// let validator = Validator::<String>::parse("required, isInteger, length;2;12")?;
/// let mut note = FieldNote::new();
/// validator.check(Some("abcdefghijk".into()), "code", &mut note);
/// assert_eq!(note.field("code").map(<[String]>::len), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct Validator<T = String> {
    precondition: Precondition,
    rules: Vec<ResolvedRule<T>>,
    unresolved: Vec<DispatchError>,
}

impl<T> Validator<T> {
    /// Resolves `specs` against `registry`.
    pub fn with_registry(
        registry: &RuleRegistry<T>,
        specs: impl IntoIterator<Item = RuleSpec>,
        policy: UnresolvedRules,
    ) -> Result<Self, DispatchError> {
        let specs: Vec<RuleSpec> = specs.into_iter().collect();
        let precondition = Precondition::from_names(specs.iter().map(|spec| spec.name.as_str()));

        let mut rules = Vec::with_capacity(specs.len());
        let mut unresolved = Vec::new();
        for spec in specs
            .iter()
            .filter(|spec| !Precondition::is_precondition_rule(&spec.name))
        {
            match registry.resolve(spec) {
                Ok(rule) => rules.push(rule),
                Err(error) if policy == UnresolvedRules::Reject => return Err(error),
                Err(error) => {
                    tracing::warn!(rule = %spec, %error, "skipping unresolved rule");
                    unresolved.push(error);
                }
            }
        }

        Ok(Self {
            precondition,
            rules,
            unresolved,
        })
    }

    pub fn precondition(&self) -> Precondition {
        self.precondition
    }

    /// Resolved rules in run order, without the precondition.
    pub fn rules(&self) -> &[ResolvedRule<T>] {
        &self.rules
    }

    /// Rules skipped under [`UnresolvedRules::Ignore`].
    pub fn unresolved(&self) -> &[DispatchError] {
        &self.unresolved
    }

    /// Runs every rule on a chain whose precondition is already resolved.
    pub fn apply_rules<'n>(&self, chain: Chain<'n, T>) -> Chain<'n, T> {
        self.rules.iter().fold(chain, |chain, rule| rule.apply(chain))
    }
}

impl<T: RuleTarget> Validator<T> {
    /// Resolves `specs` against the built-in registry for `T`.
    pub fn new(
        specs: impl IntoIterator<Item = RuleSpec>,
        unresolved: UnresolvedRules,
    ) -> Result<Self, DispatchError> {
        Self::with_registry(T::registry(), specs, unresolved)
    }

    /// Parses `text` with the default delimiters, skipping unresolved rules.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        Self::from_config(text, &ValidatorConfig::default())
    }

    pub fn from_config(text: &str, config: &ValidatorConfig) -> Result<Self, RuleError> {
        let parser = config.parser()?;
        Ok(Self::new(parser.parse(text), config.unresolved)?)
    }

    /// Applies the precondition to `pre`, then every rule.
    pub fn invoke_check<'n>(&self, pre: PreCondition<'n, T>) -> Chain<'n, T> {
        self.apply_rules(T::apply_precondition(pre, self.precondition))
    }

    /// Runs Note-First: the first failure is the only one recorded.
    pub fn check<'n>(&self, value: Option<T>, field: &str, note: &'n mut dyn Note) -> Chain<'n, T> {
        self.invoke_check(Mode::NoteFirst.valid(value, field, note))
    }

    /// Runs Note-All: every ordinary failure is recorded.
    pub fn check_all<'n>(&self, value: Option<T>, field: &str, note: &'n mut dyn Note) -> Chain<'n, T> {
        self.invoke_check(Mode::NoteAll.valid(value, field, note))
    }

    /// Runs without a sink and returns the outcome.
    pub fn check_detached(&self, value: Option<T>) -> Validated<Option<T>> {
        self.invoke_check(Mode::NoteFirst.valid_detached(value)).finish()
    }
}

impl Validator<String> {
    /// [`check`](Self::check) over `input[field]`.
    pub fn check_map<'n>(
        &self,
        input: &HashMap<String, String>,
        field: &str,
        note: &'n mut dyn Note,
    ) -> Chain<'n, String> {
        self.invoke_check(Mode::NoteFirst.valid_from_map(input, field, note))
    }

    /// [`check_all`](Self::check_all) over `input[field]`.
    pub fn check_all_map<'n>(
        &self,
        input: &HashMap<String, String>,
        field: &str,
        note: &'n mut dyn Note,
    ) -> Chain<'n, String> {
        self.invoke_check(Mode::NoteAll.valid_from_map(input, field, note))
    }
}
