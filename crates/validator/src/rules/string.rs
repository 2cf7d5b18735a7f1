//! Named rules for string chains.
//!
//! Each method applies one predicate from [`predicates`] through
//! [`Chain::must_rule`] with a `name;arg...` descriptor, so messages come
//! from the sink's custom templates or the built-in defaults. Use
//! [`Chain::must_rule`] directly to pass an explicit message.

use std::fmt::Display;
use std::str::FromStr;

use crate::chain::Chain;
use crate::note::format::descriptor;
use crate::rules::predicates;

macro_rules! string_rules {
    ($($(#[$meta:meta])* $method:ident => $rule:literal, $predicate:path;)*) => {
        impl<'n> Chain<'n, String> {
            $(
                $(#[$meta])*
                pub fn $method(self) -> Self {
                    self.must_rule(|s| $predicate(s), None, $rule)
                }
            )*
        }
    };
}

string_rules! {
    /// ASCII digits only.
    digit => "digit", predicates::digit;
    /// ASCII letters only.
    letter => "letter", predicates::letter;
    /// At least one ASCII digit.
    has_digit => "hasDigit", predicates::has_digit;
    /// At least one ASCII letter.
    has_letter => "hasLetter", predicates::has_letter;
    alpha_num => "alphaNum", predicates::alpha_num;
    alpha_num_space => "alphaNumSpace", predicates::alpha_num_space;
    alpha_num_lower_case => "alphaNumLowerCase", predicates::alpha_num_lower_case;
    alpha_num_space_lower_case => "alphaNumSpaceLowerCase", predicates::alpha_num_space_lower_case;
    alpha_num_upper_case => "alphaNumUpperCase", predicates::alpha_num_upper_case;
    alpha_num_space_upper_case => "alphaNumSpaceUpperCase", predicates::alpha_num_space_upper_case;
    alpha_num_dash => "alphaNumDash", predicates::alpha_num_dash;
    alpha_num_dash_space => "alphaNumDashSpace", predicates::alpha_num_dash_space;
    alpha_num_underscore => "alphaNumUnderscore", predicates::alpha_num_underscore;
    alpha_num_underscore_space => "alphaNumUnderscoreSpace", predicates::alpha_num_underscore_space;
    alpha_num_quote_space => "alphaNumQuoteSpace", predicates::alpha_num_quote_space;
    alpha_num_quote_dash_space => "alphaNumQuoteDashSpace", predicates::alpha_num_quote_dash_space;
    alpha_quote_space => "alphaQuoteSpace", predicates::alpha_quote_space;
    alpha_quote_dash_space => "alphaQuoteDashSpace", predicates::alpha_quote_dash_space;
    all_lower_case => "allLowerCase", predicates::all_lower_case;
    all_upper_case => "allUpperCase", predicates::all_upper_case;
    credit_card => "creditCard", predicates::credit_card;
    cc_visa => "ccVisa", predicates::cc_visa;
    cc_master => "ccMaster", predicates::cc_master;
    cc_american_express => "ccAmericanExpress", predicates::cc_american_express;
    cc_diners_club => "ccDinersClub", predicates::cc_diners_club;
    cc_discover => "ccDiscover", predicates::cc_discover;
    cc_jcb => "ccJcb", predicates::cc_jcb;
    email => "email", predicates::email;
    ipv4 => "ipv4", predicates::ipv4;
    /// RFC 952 host name.
    host_name => "hostName", predicates::host_name;
    /// Host name starting with a letter.
    server_name => "serverName", predicates::server_name;
    domain => "domain", predicates::domain;
    /// `#rgb` or `#rrggbb`.
    color_hex => "colorHex", predicates::color_hex;
    /// Plain decimal number, see [`predicates::is_parsable`].
    is_number => "isNumber", predicates::is_number;
    is_integer => "isInteger", predicates::is_integer;
    is_u_integer => "isUInteger", predicates::is_u_integer;
    is_long => "isLong", predicates::is_long;
    is_u_long => "isULong", predicates::is_u_long;
    is_float => "isFloat", predicates::is_float;
    is_double => "isDouble", predicates::is_double;
    is_boolean => "isBoolean", predicates::is_boolean;
    time_24_hour => "time24Hour", predicates::time_24_hour;
}

impl<'n> Chain<'n, String> {
    /// Between `min` and `max` characters.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.must_rule(
            move |s| predicates::length(s, min, max),
            None,
            &format!("length;{min};{max}"),
        )
    }

    /// At least `min` characters.
    pub fn min_length(self, min: usize) -> Self {
        self.must_rule(move |s| predicates::within_min(s, min), None, &format!("minLength;{min}"))
    }

    /// At most `max` characters.
    pub fn max_length(self, max: usize) -> Self {
        self.must_rule(move |s| predicates::within_max(s, max), None, &format!("maxLength;{max}"))
    }

    /// Whole value matches `pattern`.
    pub fn regex(self, pattern: &str) -> Self {
        self.must_rule(|s| predicates::regex(s, pattern), None, &descriptor("regex", [pattern]))
    }

    pub fn has_char(self, needle: &str) -> Self {
        self.must_rule(|s| s.contains(needle), None, &descriptor("hasChar", [needle]))
    }

    pub fn start_with(self, prefix: &str) -> Self {
        self.must_rule(|s| s.starts_with(prefix), None, &descriptor("startWith", [prefix]))
    }

    pub fn end_with(self, suffix: &str) -> Self {
        self.must_rule(|s| s.ends_with(suffix), None, &descriptor("endWith", [suffix]))
    }

    /// 6 to 32 ASCII letters, digits or punctuation marks.
    pub fn password_simple(self) -> Self {
        let (min, max) = predicates::PASSWORD_SIMPLE_BOUNDS;
        self.password_simple_between(min, max)
    }

    /// `min` to `max` ASCII letters, digits or punctuation marks.
    pub fn password_simple_between(self, min: usize, max: usize) -> Self {
        self.must_rule(
            move |s| predicates::password_simple(s, min, max),
            None,
            &format!("passwordSimple;{min};{max}"),
        )
    }

    /// `http` or `https` URL with a host.
    #[cfg(feature = "network")]
    pub fn url(self) -> Self {
        self.must_rule(|s| predicates::url(s, &predicates::DEFAULT_URL_SCHEMES), None, "url")
    }

    /// URL with a host and one of `schemes`.
    #[cfg(feature = "network")]
    pub fn url_with_schemes<S: AsRef<str>>(self, schemes: &[S]) -> Self {
        let rule = descriptor("url", schemes);
        self.must_rule(|s| predicates::url(s, schemes), None, &rule)
    }

    /// Subdomain with up to one extra level (`a.b.example`).
    pub fn subdomain(self) -> Self {
        self.subdomain_levels(1)
    }

    /// Subdomain with up to `levels` extra levels.
    pub fn subdomain_levels(self, levels: usize) -> Self {
        self.must_rule(
            move |s| predicates::subdomain(s, levels),
            None,
            &format!("subdomain;{levels}"),
        )
    }

    /// Float with at most `decimals` fraction digits.
    pub fn is_float_with(self, decimals: usize) -> Self {
        self.must_rule(
            move |s| predicates::is_float_with(s, decimals),
            None,
            &format!("isFloat;{decimals}"),
        )
    }

    /// Double with at most `decimals` fraction digits.
    pub fn is_double_with(self, decimals: usize) -> Self {
        self.must_rule(
            move |s| predicates::is_double_with(s, decimals),
            None,
            &format!("isDouble;{decimals}"),
        )
    }

    /// Parses as `N` and is at least `min`; unparsable values fail.
    ///
    /// ```rust,ignore
    /// chain.min(18)        // i32
    /// chain.min(2.5_f64)   // f64
    /// ```
    pub fn min<N>(self, min: N) -> Self
    where
        N: FromStr + PartialOrd + Display + Copy,
    {
        self.must_rule(move |s| predicates::min(s, min), None, &format!("min;{min}"))
    }

    /// Parses as `N` and is at most `max`; unparsable values fail.
    pub fn max<N>(self, max: N) -> Self
    where
        N: FromStr + PartialOrd + Display + Copy,
    {
        self.must_rule(move |s| predicates::max(s, max), None, &format!("max;{max}"))
    }

    /// Equal to one of `items`.
    pub fn in_array<S: AsRef<str>>(self, items: &[S]) -> Self {
        self.must_rule(|s| predicates::in_array(s, items), None, "inArray")
    }

    /// Equal to none of `items`.
    pub fn not_in_array<S: AsRef<str>>(self, items: &[S]) -> Self {
        self.must_rule(|s| predicates::not_in_array(s, items), None, "notInArray")
    }

    /// An integer contained in `items`.
    pub fn in_int_array(self, items: &[i32]) -> Self {
        self.must_rule(|s| predicates::in_int_array(s, items), None, "inArray")
    }

    /// An integer not contained in `items`.
    pub fn not_in_int_array(self, items: &[i32]) -> Self {
        self.must_rule(|s| predicates::not_in_int_array(s, items), None, "notInArray")
    }

    /// A non-empty `delimiter`-separated list.
    pub fn separate_by(self, delimiter: &str) -> Self {
        self.must_rule(
            |s| predicates::separate_by(s, delimiter, 0, 0),
            None,
            &descriptor("separateBy", [delimiter]),
        )
    }

    /// A `delimiter`-separated list of `min..=max` items.
    pub fn separate_by_sized(self, delimiter: &str, min: usize, max: usize) -> Self {
        self.must_rule(
            |s| predicates::separate_by(s, delimiter, min, max),
            None,
            &descriptor("separateBy", [delimiter, min.to_string().as_str(), max.to_string().as_str()]),
        )
    }

    /// A `delimiter`-separated list whose items all belong to `items`.
    pub fn separate_by_in_array<S: AsRef<str>>(self, delimiter: &str, items: &[S]) -> Self {
        self.separate_by_in_array_sized(delimiter, items, 0, 0)
    }

    /// Like [`separate_by_in_array`](Self::separate_by_in_array) with
    /// `min..=max` items.
    pub fn separate_by_in_array_sized<S: AsRef<str>>(
        self,
        delimiter: &str,
        items: &[S],
        min: usize,
        max: usize,
    ) -> Self {
        self.must_rule(
            |s| predicates::separate_by_in_array(s, delimiter, items, min, max),
            None,
            &descriptor("separateByInArray", [delimiter]),
        )
    }
}
