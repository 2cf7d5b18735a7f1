//! Rule chains driven from text.
//!
//! Rule text such as `"required, isInteger, length;2;12"` is parsed into
//! [`RuleSpec`]s, each resolved once against a [`RuleRegistry`] into a
//! typed operation, and run on a chain by a [`Validator`]:
//!
//! ```rust,ignore
//! use fieldnote_validator::prelude::*;
//!
//! let validator = Validator::<String>::parse("required, isInteger, min;18")?;
//! let mut note = FieldNote::new();
//! validator.check_all(Some("15abc".into()), "age", &mut note);
//! assert_eq!(note.len(), 2);
//! ```
//!
//! Built-in registries exist for `String`, `i32` and `i64` chains. Other
//! value types plug in by implementing [`RuleTarget`], or by building a
//! [`RuleRegistry`] and passing it to [`Validator::with_registry`].

mod builtin;
mod error;
mod registry;
mod spec;
mod validator;

pub use builtin::{Precondition, RuleTarget};
pub use error::{DispatchError, RuleError, RuleSpecError};
pub use registry::{Operation, ResolvedRule, RuleArgs, RuleFn, RuleRegistry, Signature};
pub use spec::{
    ArgKind, ArgValue, DEFAULT_ARG_DELIMITER, DEFAULT_RULE_DELIMITER, RuleArg, RuleSpec, RuleSpecParser,
    parse_rules,
};
pub use validator::{UnresolvedRules, Validator, ValidatorConfig};
