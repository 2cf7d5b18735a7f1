//! Built-in rules.
//!
//! [`predicates`] holds the plain string checks. The named chain rules
//! (`chain.email()`, `chain.min(18)`, ...) are inherent methods on
//! [`Chain`](crate::chain::Chain) defined in this module's submodules.

mod numeric;
pub mod predicates;
mod string;
#[cfg(feature = "temporal")]
pub mod temporal;
