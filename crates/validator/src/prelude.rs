//! Prelude module for convenient imports.
//!
//! `use fieldnote_validator::prelude::*;` brings in the entry points, the
//! sinks and the rule-text dispatcher.

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{Validated, ValidationError, ValidationResult};

// ============================================================================
// CHAINS
// ============================================================================

pub use crate::chain::{
    Chain, Conversion, Mode, NoteAllValidator, NoteFirstValidator, PreCondition, Then, then,
};

// ============================================================================
// SINKS
// ============================================================================

pub use crate::note::{FieldNote, FlatNote, Messages, Note, NoteConfig, SharedNote};

// ============================================================================
// DISPATCH
// ============================================================================

pub use crate::dispatch::{
    DispatchError, Precondition, RuleArg, RuleError, RuleRegistry, RuleSpec, RuleSpecError,
    RuleSpecParser, RuleTarget, Signature, UnresolvedRules, Validator, ValidatorConfig,
    parse_rules,
};
