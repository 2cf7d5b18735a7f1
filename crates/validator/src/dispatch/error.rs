use super::spec::ArgKind;

/// Invalid [`RuleSpecParser`](super::RuleSpecParser) configuration or rule
/// argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleSpecError {
    #[error("rule delimiter must not be empty")]
    EmptyRuleDelimiter,

    #[error("argument delimiter must not be empty")]
    EmptyArgDelimiter,

    /// Rule and argument delimiters are the same string.
    #[error("rule and argument delimiters are both `{delimiter}`")]
    SameDelimiters { delimiter: String },

    /// An argument's text does not read as its declared kind.
    #[error("argument `{raw}` is not a valid {kind}")]
    InvalidArgument { raw: String, kind: ArgKind },
}

/// A rule spec that no registered operation can run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No operation is registered under the name.
    #[error("unknown rule `{name}`")]
    UnknownRule { name: String },

    /// Operations exist under the name, but none accepts these arguments.
    #[error("no `{name}` rule accepts arguments ({})", kinds(.args))]
    SignatureMismatch { name: String, args: Vec<ArgKind> },
}

fn kinds(args: &[ArgKind]) -> String {
    args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl DispatchError {
    /// Name of the rule that failed to resolve.
    pub fn rule(&self) -> &str {
        match self {
            Self::UnknownRule { name } | Self::SignatureMismatch { name, .. } => name,
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownRule { .. } => "RULE_UNKNOWN",
            Self::SignatureMismatch { .. } => "RULE_SIGNATURE_MISMATCH",
        }
    }
}

/// Error building a [`Validator`](super::Validator) from rule text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error(transparent)]
    Spec(#[from] RuleSpecError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl RuleError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Spec(_) => "spec",
            Self::Dispatch(_) => "dispatch",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Spec(RuleSpecError::InvalidArgument { .. }) => "RULE_SPEC_ARGUMENT",
            Self::Spec(_) => "RULE_SPEC_DELIMITER",
            Self::Dispatch(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_and_codes() {
        let err = DispatchError::SignatureMismatch {
            name: "length".into(),
            args: vec![ArgKind::Str, ArgKind::Int],
        };
        assert_eq!(err.to_string(), "no `length` rule accepts arguments (string, int)");
        assert_eq!(err.rule(), "length");

        let err = RuleError::from(err);
        assert_eq!(err.code(), "RULE_SIGNATURE_MISMATCH");
        assert_eq!(err.category(), "dispatch");

        let err = RuleError::from(RuleSpecError::SameDelimiters { delimiter: ";".into() });
        assert_eq!(err.to_string(), "rule and argument delimiters are both `;`");
        assert_eq!(err.code(), "RULE_SPEC_DELIMITER");

        let err = RuleError::from(RuleSpecError::InvalidArgument {
            raw: "x".into(),
            kind: ArgKind::Double,
        });
        assert_eq!(err.to_string(), "argument `x` is not a valid double");
        assert_eq!(err.code(), "RULE_SPEC_ARGUMENT");
    }
}
