//! Built-in rule tables for string and integer chains.
//!
//! Rule names follow the camelCase names used in rule text
//! (`"isInteger"`, `"minLength;3"`, `"separateByInArray;,;a;b;end"`).

use std::sync::LazyLock;

use super::registry::{RuleRegistry, Signature};
use super::spec::ArgKind::{Double, Float, Int, Long, Str};
use crate::chain::{Chain, PreCondition};

/// Precondition selected from rule text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// `required`
    Required,
    /// `requiredLoose`
    RequiredLoose,
    /// No precondition rule; a missing value is valid.
    #[default]
    Optional,
}

impl Precondition {
    /// Rule names that select a precondition instead of running as rules.
    pub const RULE_NAMES: [&'static str; 3] = ["required", "requiredLoose", "optional"];

    /// `required` wins over `requiredLoose`; without either the value is
    /// optional.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().fold(Self::Optional, |current, name| match (current, name) {
            (_, "required") => Self::Required,
            (Self::Optional, "requiredLoose") => Self::RequiredLoose,
            (current, _) => current,
        })
    }

    pub fn is_precondition_rule(name: &str) -> bool {
        Self::RULE_NAMES.contains(&name)
    }
}

/// Value type a [`Validator`](super::Validator) can drive.
pub trait RuleTarget: Sized + 'static {
    /// Rules resolvable for this type.
    fn registry() -> &'static RuleRegistry<Self>;

    /// Resolves `pre` with the dispatch-level precondition.
    fn apply_precondition<'n>(pre: PreCondition<'n, Self>, precondition: Precondition) -> Chain<'n, Self>;
}

impl RuleTarget for String {
    fn registry() -> &'static RuleRegistry<Self> {
        &STRING_RULES
    }

    fn apply_precondition<'n>(pre: PreCondition<'n, Self>, precondition: Precondition) -> Chain<'n, Self> {
        match precondition {
            Precondition::Required => pre.required(),
            Precondition::RequiredLoose => pre.required_loose(),
            Precondition::Optional => pre.optional(),
        }
    }
}

macro_rules! integer_target {
    ($($ty:ty => $rules:ident),*) => {
        $(
            impl RuleTarget for $ty {
                fn registry() -> &'static RuleRegistry<Self> {
                    &$rules
                }

                fn apply_precondition<'n>(
                    pre: PreCondition<'n, Self>,
                    precondition: Precondition,
                ) -> Chain<'n, Self> {
                    match precondition {
                        Precondition::Required | Precondition::RequiredLoose => {
                            pre.fatal(false, |_| true, None, "required")
                        }
                        Precondition::Optional => pre.can_be_null(),
                    }
                }
            }
        )*
    };
}

integer_target!(i32 => I32_RULES, i64 => I64_RULES);

// ============================================================================
// STRING TABLE
// ============================================================================

macro_rules! unit_rules {
    ($registry:ident; $($name:literal => $method:ident),* $(,)?) => {
        $(
            $registry.register($name, Signature::NONE, |chain, _| chain.$method());
        )*
    };
}

static STRING_RULES: LazyLock<RuleRegistry<String>> = LazyLock::new(string_rules);

fn string_rules() -> RuleRegistry<String> {
    let mut registry = RuleRegistry::new();
    register_content_rules(&mut registry);
    register_format_rules(&mut registry);
    register_number_rules(&mut registry);
    register_list_rules(&mut registry);
    #[cfg(feature = "temporal")]
    register_temporal_rules(&mut registry);
    registry
}

fn register_content_rules(registry: &mut RuleRegistry<String>) {
    registry.register("length", Signature::Fixed(&[Int, Int]), |chain, args| {
        chain.length(args.count(0), args.count(1))
    });
    registry.register("minLength", Signature::Fixed(&[Int]), |chain, args| {
        chain.min_length(args.count(0))
    });
    registry.register("maxLength", Signature::Fixed(&[Int]), |chain, args| {
        chain.max_length(args.count(0))
    });
    registry.register("regex", Signature::Text, |chain, args| chain.regex(args.text(0)));
    registry.register("hasChar", Signature::Text, |chain, args| chain.has_char(args.text(0)));
    registry.register("startWith", Signature::Text, |chain, args| chain.start_with(args.text(0)));
    registry.register("endWith", Signature::Text, |chain, args| chain.end_with(args.text(0)));

    unit_rules!(registry;
        "digit" => digit,
        "letter" => letter,
        "hasDigit" => has_digit,
        "hasLetter" => has_letter,
        "alphaNum" => alpha_num,
        "alphaNumSpace" => alpha_num_space,
        "alphaNumLowerCase" => alpha_num_lower_case,
        "alphaNumSpaceLowerCase" => alpha_num_space_lower_case,
        "alphaNumUpperCase" => alpha_num_upper_case,
        "alphaNumSpaceUpperCase" => alpha_num_space_upper_case,
        "alphaNumDash" => alpha_num_dash,
        "alphaNumDashSpace" => alpha_num_dash_space,
        "alphaNumUnderscore" => alpha_num_underscore,
        "alphaNumUnderscoreSpace" => alpha_num_underscore_space,
        "alphaNumQuoteSpace" => alpha_num_quote_space,
        "alphaNumQuoteDashSpace" => alpha_num_quote_dash_space,
        "alphaQuoteSpace" => alpha_quote_space,
        "alphaQuoteDashSpace" => alpha_quote_dash_space,
        "allLowerCase" => all_lower_case,
        "allUpperCase" => all_upper_case,
        "passwordSimple" => password_simple,
    );
    registry.register("passwordSimple", Signature::Fixed(&[Int, Int]), |chain, args| {
        chain.password_simple_between(args.count(0), args.count(1))
    });
}

fn register_format_rules(registry: &mut RuleRegistry<String>) {
    unit_rules!(registry;
        "creditCard" => credit_card,
        "ccVisa" => cc_visa,
        "ccMaster" => cc_master,
        "ccAmericanExpress" => cc_american_express,
        "ccDinersClub" => cc_diners_club,
        "ccDiscover" => cc_discover,
        "ccJcb" => cc_jcb,
        "email" => email,
        "ipv4" => ipv4,
        "hostName" => host_name,
        "serverName" => server_name,
        "subdomain" => subdomain,
        "domain" => domain,
        "colorHex" => color_hex,
        "time24Hour" => time_24_hour,
    );
    registry.register("subdomain", Signature::Fixed(&[Int]), |chain, args| {
        chain.subdomain_levels(args.count(0))
    });

    #[cfg(feature = "network")]
    {
        unit_rules!(registry; "url" => url);
        registry.register("url", Signature::Repeated(Str), |chain, args| {
            chain.url_with_schemes(&args.texts(0))
        });
    }
}

fn register_number_rules(registry: &mut RuleRegistry<String>) {
    unit_rules!(registry;
        "isNumber" => is_number,
        "isInteger" => is_integer,
        "isUInteger" => is_u_integer,
        "isLong" => is_long,
        "isULong" => is_u_long,
        "isFloat" => is_float,
        "isDouble" => is_double,
        "isBoolean" => is_boolean,
    );
    registry.register("isFloat", Signature::Fixed(&[Int]), |chain, args| {
        chain.is_float_with(args.count(0))
    });
    registry.register("isDouble", Signature::Fixed(&[Int]), |chain, args| {
        chain.is_double_with(args.count(0))
    });

    registry.register("min", Signature::Fixed(&[Int]), |chain, args| chain.min(args.int(0)));
    registry.register("min", Signature::Fixed(&[Long]), |chain, args| chain.min(args.long(0)));
    registry.register("min", Signature::Fixed(&[Float]), |chain, args| chain.min(args.float(0)));
    registry.register("min", Signature::Fixed(&[Double]), |chain, args| chain.min(args.double(0)));
    registry.register("max", Signature::Fixed(&[Int]), |chain, args| chain.max(args.int(0)));
    registry.register("max", Signature::Fixed(&[Long]), |chain, args| chain.max(args.long(0)));
    registry.register("max", Signature::Fixed(&[Float]), |chain, args| chain.max(args.float(0)));
    registry.register("max", Signature::Fixed(&[Double]), |chain, args| chain.max(args.double(0)));
}

fn register_list_rules(registry: &mut RuleRegistry<String>) {
    registry.register("inArray", Signature::Repeated(Int), |chain, args| {
        chain.in_int_array(&args.ints())
    });
    registry.register("inArray", Signature::Text, |chain, args| chain.in_array(&args.texts(0)));
    registry.register("notInArray", Signature::Repeated(Int), |chain, args| {
        chain.not_in_int_array(&args.ints())
    });
    registry.register("notInArray", Signature::Text, |chain, args| {
        chain.not_in_array(&args.texts(0))
    });

    registry.register("separateBy", Signature::Fixed(&[Str]), |chain, args| {
        chain.separate_by(args.text(0))
    });
    registry.register("separateBy", Signature::Fixed(&[Str, Int, Int]), |chain, args| {
        chain.separate_by_sized(args.text(0), args.count(1), args.count(2))
    });
    // The trailing argument is not an item.
    registry.register("separateByInArray", Signature::DelimiterThenText, |chain, args| {
        let items = args.texts_between(1, args.len().saturating_sub(1));
        chain.separate_by_in_array(args.text(0), &items)
    });
}

#[cfg(feature = "temporal")]
fn register_temporal_rules(registry: &mut RuleRegistry<String>) {
    macro_rules! format_rules {
        ($($name:literal => $method:ident),* $(,)?) => {
            $(
                registry.register($name, Signature::NONE, |chain, _| chain.$method(None));
                registry.register($name, Signature::Fixed(&[Str]), |chain, args| {
                    chain.$method(Some(args.text(0)))
                });
            )*
        };
    }
    macro_rules! compare_rules {
        ($($name:literal => $method:ident),* $(,)?) => {
            $(
                registry.register($name, Signature::Fixed(&[Str]), |chain, args| {
                    chain.$method(args.text(0), None)
                });
                registry.register($name, Signature::Fixed(&[Str, Str]), |chain, args| {
                    chain.$method(args.text(0), Some(args.text(1)))
                });
            )*
        };
    }
    macro_rules! between_rules {
        ($($name:literal => $method:ident),* $(,)?) => {
            $(
                registry.register($name, Signature::Fixed(&[Str, Str]), |chain, args| {
                    chain.$method(args.text(0), args.text(1), None)
                });
                registry.register($name, Signature::Fixed(&[Str, Str, Str]), |chain, args| {
                    chain.$method(args.text(0), args.text(1), Some(args.text(2)))
                });
            )*
        };
    }

    format_rules!(
        "dateFormat" => date_format,
        "timeFormat" => time_format,
        "dateTimeFormat" => date_time_format,
    );
    compare_rules!(
        "dateBefore" => date_before,
        "dateBeforeMonth" => date_before_month,
        "dateBeforeYear" => date_before_year,
        "dateAfter" => date_after,
        "dateAfterMonth" => date_after_month,
        "dateAfterYear" => date_after_year,
        "dateEq" => date_eq,
        "dateEqMonth" => date_eq_month,
        "dateEqYear" => date_eq_year,
        "timeBefore" => time_before,
        "timeBeforeMinute" => time_before_minute,
        "timeBeforeHour" => time_before_hour,
        "timeAfter" => time_after,
        "timeAfterMinute" => time_after_minute,
        "timeAfterHour" => time_after_hour,
        "timeEq" => time_eq,
        "timeEqMinute" => time_eq_minute,
        "timeEqHour" => time_eq_hour,
        "dateTimeBefore" => date_time_before,
        "dateTimeBeforeWeek" => date_time_before_week,
        "dateTimeBeforeMonth" => date_time_before_month,
        "dateTimeBeforeYear" => date_time_before_year,
        "dateTimeAfter" => date_time_after,
        "dateTimeAfterWeek" => date_time_after_week,
        "dateTimeAfterMonth" => date_time_after_month,
        "dateTimeAfterYear" => date_time_after_year,
        "dateTimeEq" => date_time_eq,
        "dateTimeEqWeek" => date_time_eq_week,
        "dateTimeEqMonth" => date_time_eq_month,
        "dateTimeEqYear" => date_time_eq_year,
    );
    between_rules!(
        "dateBetween" => date_between,
        "timeBetween" => time_between,
        "dateTimeBetween" => date_time_between,
    );
}

// ============================================================================
// INTEGER TABLES
// ============================================================================

macro_rules! integer_rules {
    ($ty:ty, $kind:ident, $get:ident, $all:ident) => {{
        let mut registry = RuleRegistry::<$ty>::new();
        registry.register("min", Signature::Fixed(&[$kind]), |chain, args| chain.min(args.$get(0)));
        registry.register("max", Signature::Fixed(&[$kind]), |chain, args| chain.max(args.$get(0)));
        registry.register("between", Signature::Fixed(&[$kind, $kind]), |chain, args| {
            chain.between(args.$get(0), args.$get(1))
        });
        registry.register("inArray", Signature::Repeated($kind), |chain, args| {
            chain.in_array(&args.$all())
        });
        registry.register("notInArray", Signature::Repeated($kind), |chain, args| {
            chain.not_in_array(&args.$all())
        });
        registry
    }};
}

static I32_RULES: LazyLock<RuleRegistry<i32>> = LazyLock::new(|| integer_rules!(i32, Int, int, ints));
static I64_RULES: LazyLock<RuleRegistry<i64>> = LazyLock::new(|| integer_rules!(i64, Long, long, longs));
