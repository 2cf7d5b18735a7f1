//! # fieldnote-validator
//!
//! Rule chains over single values, with messages collected per field.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldnote_validator::prelude::*;
//!
//! let mut note = FieldNote::with_placeholder("{field}");
//! NoteAllValidator::valid(Some("15abc".to_string()), "user_age", &mut note)
//!     .required()
//!     .is_integer()
//!     .min(18);
//! assert_eq!(note.field("user_age").map(<[String]>::len), Some(2));
//! ```
//!
//! ## Modes
//!
//! - **Note-First** ([`NoteFirstValidator`](chain::NoteFirstValidator)): the
//!   first failure stops the chain.
//! - **Note-All** ([`NoteAllValidator`](chain::NoteAllValidator)): every
//!   failure is recorded; only fatal rules (the precondition,
//!   [`must_fatally`](chain::Chain::must_fatally), a failed
//!   [`must_convert`](chain::Chain::must_convert)) stop the chain.
//!
//! ## Rule Text
//!
//! [`Validator`](dispatch::Validator) builds the same chains from text like
//! `"required, isInteger, length;2;12"`, resolved through a
//! [`RuleRegistry`](dispatch::RuleRegistry).
//!
//! ## Features
//!
//! - `network` (default): the `url` rule
//! - `temporal` (default): date and time rules

pub mod chain;
pub mod dispatch;
pub mod foundation;
pub mod note;
pub mod prelude;
pub mod rules;
