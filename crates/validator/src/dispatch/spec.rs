//! Parsed rule specifications.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::RuleSpecError;
use crate::note::format::descriptor;
use crate::rules::predicates::is_parsable;

/// Default separator between rules.
pub const DEFAULT_RULE_DELIMITER: &str = ", ";
/// Default separator between a rule name and its arguments.
pub const DEFAULT_ARG_DELIMITER: &str = ";";

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Typed value of a rule argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    /// Not numeric; the argument's raw text is its value.
    Str,
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl ArgValue {
    /// Types a raw token.
    ///
    /// Plain decimal tokens become numbers: a fraction of up to 7 digits
    /// gives [`Float`](Self::Float), a longer one [`Double`](Self::Double).
    /// Integral tokens of up to 10 characters give [`Int`](Self::Int),
    /// longer ones [`Long`](Self::Long); a value that overflows its type
    /// moves to the next wider one. Anything else stays a string.
    ///
    /// ```rust,ignore
    /// assert_eq!(ArgValue::parse("12"), ArgValue::Int(12));
    /// assert_eq!(ArgValue::parse("3000000000"), ArgValue::Long(3_000_000_000));
    /// assert_eq!(ArgValue::parse("1.5"), ArgValue::Float(1.5));
    /// assert_eq!(ArgValue::parse("1.2345678"), ArgValue::Double(1.2345678));
    /// assert_eq!(ArgValue::parse("http"), ArgValue::Str);
    /// ```
    pub fn parse(token: &str) -> Self {
        if !is_parsable(token) {
            return Self::Str;
        }
        let typed = match token.split_once('.') {
            Some((_, fraction)) if fraction.len() <= 7 => token.parse().ok().map(Self::Float),
            Some(_) => token.parse().ok().map(Self::Double),
            None if token.len() <= 10 => token
                .parse()
                .map(Self::Int)
                .or_else(|_| token.parse().map(Self::Long))
                .ok(),
            None => token.parse().ok().map(Self::Long),
        };
        typed.unwrap_or(Self::Str)
    }

    /// Reads `token` as exactly `kind`.
    fn parse_as(token: &str, kind: ArgKind) -> Option<Self> {
        match kind {
            ArgKind::Str => Some(Self::Str),
            ArgKind::Int => token.parse().ok().map(Self::Int),
            ArgKind::Long => token.parse().ok().map(Self::Long),
            ArgKind::Float => token.parse().ok().map(Self::Float),
            ArgKind::Double => token.parse().ok().map(Self::Double),
        }
    }

    pub fn kind(self) -> ArgKind {
        match self {
            Self::Str => ArgKind::Str,
            Self::Int(_) => ArgKind::Int,
            Self::Long(_) => ArgKind::Long,
            Self::Float(_) => ArgKind::Float,
            Self::Double(_) => ArgKind::Double,
        }
    }
}

/// One rule argument: the token as written plus its typed value.
///
/// Text-reading rules and descriptors always see the token as written, so
/// `startWith;007` checks for the prefix `"007"` even though the token also
/// types as [`ArgValue::Int`].
///
/// Serialized as the bare token when typing it again gives the same kind,
/// and as `{ "raw": .., "kind": .. }` otherwise. Deserialization accepts
/// both shapes and plain JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArgRepr", into = "ArgRepr")]
pub struct RuleArg {
    raw: String,
    value: ArgValue,
}

impl RuleArg {
    /// Keeps `token` and types it with [`ArgValue::parse`].
    pub fn parse(token: &str) -> Self {
        Self {
            raw: token.to_owned(),
            value: ArgValue::parse(token),
        }
    }

    /// Reads `raw` as exactly `kind`.
    pub fn typed(raw: impl Into<String>, kind: ArgKind) -> Result<Self, RuleSpecError> {
        let raw = raw.into();
        match ArgValue::parse_as(&raw, kind) {
            Some(value) => Ok(Self { raw, value }),
            None => Err(RuleSpecError::InvalidArgument { raw, kind }),
        }
    }

    /// A text argument, never typed as a number.
    pub fn string(text: impl Into<String>) -> Self {
        Self {
            raw: text.into(),
            value: ArgValue::Str,
        }
    }

    pub fn int(value: i32) -> Self {
        Self {
            raw: value.to_string(),
            value: ArgValue::Int(value),
        }
    }

    pub fn long(value: i64) -> Self {
        Self {
            raw: value.to_string(),
            value: ArgValue::Long(value),
        }
    }

    pub fn float(value: f32) -> Self {
        Self {
            raw: value.to_string(),
            value: ArgValue::Float(value),
        }
    }

    pub fn double(value: f64) -> Self {
        Self {
            raw: value.to_string(),
            value: ArgValue::Double(value),
        }
    }

    pub fn value(&self) -> ArgValue {
        self.value
    }

    pub fn kind(&self) -> ArgKind {
        self.value.kind()
    }

    /// The token as written.
    pub fn as_text(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RuleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ArgRepr {
    Token(String),
    Number(serde_json::Number),
    Typed { raw: String, kind: ArgKind },
}

impl TryFrom<ArgRepr> for RuleArg {
    type Error = RuleSpecError;

    fn try_from(repr: ArgRepr) -> Result<Self, Self::Error> {
        match repr {
            ArgRepr::Token(token) => Ok(Self::parse(&token)),
            ArgRepr::Number(number) => Ok(Self::parse(&number.to_string())),
            ArgRepr::Typed { raw, kind } => Self::typed(raw, kind),
        }
    }
}

impl From<RuleArg> for ArgRepr {
    fn from(arg: RuleArg) -> Self {
        if ArgValue::parse(&arg.raw).kind() == arg.kind() {
            Self::Token(arg.raw)
        } else {
            Self::Typed {
                kind: arg.kind(),
                raw: arg.raw,
            }
        }
    }
}

/// Kind of a [`RuleArg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    #[serde(rename = "string")]
    Str,
    Int,
    Long,
    Float,
    Double,
}

impl ArgKind {
    /// Whether an argument of kind `self` can stand in for `target`.
    ///
    /// With `widen`, `Int` also fits `Long` and `Double`, and `Float`
    /// fits `Double`.
    pub fn fits(self, target: ArgKind, widen: bool) -> bool {
        self == target
            || (widen
                && matches!(
                    (self, target),
                    (Self::Int, Self::Long) | (Self::Int, Self::Double) | (Self::Float, Self::Double)
                ))
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        })
    }
}

// ============================================================================
// SPECS
// ============================================================================

/// One rule invocation: a name and its typed arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    #[serde(default)]
    pub args: SmallVec<[RuleArg; 4]>,
}

impl RuleSpec {
    /// A rule without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: SmallVec::new(),
        }
    }

    /// Appends an argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_arg(mut self, arg: RuleArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Kinds of the arguments, in order.
    pub fn arg_kinds(&self) -> Vec<ArgKind> {
        self.args.iter().map(RuleArg::kind).collect()
    }

    /// `name;arg;...` form used for message formatting, arguments as
    /// written.
    pub fn descriptor(&self) -> String {
        descriptor(&self.name, self.args.iter().map(RuleArg::as_text))
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// Splits rule text like `"required, isInteger, length;2;12"` into
/// [`RuleSpec`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpecParser {
    rule_delimiter: String,
    arg_delimiter: String,
}

impl RuleSpecParser {
    /// Builds a parser; both delimiters must be non-empty and distinct.
    pub fn new(
        rule_delimiter: impl Into<String>,
        arg_delimiter: impl Into<String>,
    ) -> Result<Self, RuleSpecError> {
        let rule_delimiter = rule_delimiter.into();
        let arg_delimiter = arg_delimiter.into();
        if rule_delimiter.is_empty() {
            return Err(RuleSpecError::EmptyRuleDelimiter);
        }
        if arg_delimiter.is_empty() {
            return Err(RuleSpecError::EmptyArgDelimiter);
        }
        if rule_delimiter == arg_delimiter {
            return Err(RuleSpecError::SameDelimiters {
                delimiter: rule_delimiter,
            });
        }
        Ok(Self {
            rule_delimiter,
            arg_delimiter,
        })
    }

    pub fn rule_delimiter(&self) -> &str {
        &self.rule_delimiter
    }

    pub fn arg_delimiter(&self) -> &str {
        &self.arg_delimiter
    }

    /// Parses `text` in declaration order.
    ///
    /// Blank segments are skipped. A rule named twice keeps its first
    /// position and takes the later arguments.
    pub fn parse(&self, text: &str) -> Vec<RuleSpec> {
        let mut specs: Vec<RuleSpec> = Vec::new();
        for segment in text.split(self.rule_delimiter.as_str()) {
            let mut parts = segment.split(self.arg_delimiter.as_str());
            let name = parts.next().unwrap_or_default().trim();
            if name.is_empty() {
                continue;
            }
            let args = parts.map(RuleArg::parse).collect();
            match specs.iter_mut().find(|spec| spec.name == name) {
                Some(existing) => existing.args = args,
                None => specs.push(RuleSpec {
                    name: name.to_owned(),
                    args,
                }),
            }
        }
        specs
    }
}

impl Default for RuleSpecParser {
    fn default() -> Self {
        Self {
            rule_delimiter: DEFAULT_RULE_DELIMITER.to_owned(),
            arg_delimiter: DEFAULT_ARG_DELIMITER.to_owned(),
        }
    }
}

/// Parses `text` with the default delimiters.
pub fn parse_rules(text: &str) -> Vec<RuleSpec> {
    RuleSpecParser::default().parse(text)
}
