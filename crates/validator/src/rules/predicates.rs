//! Pure string predicates.
//!
//! Every function takes the value as `&str`, returns `bool` and never panics
//! on malformed input: parse failures simply return `false`. Lengths are
//! counted in characters. Character classes are ASCII unless noted.

use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// PATTERNS
// ============================================================================

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9_!#$%&'*+\-/=?^`{|}~]+\.)*[A-Za-z0-9_!#$%&'*+\-/=?^`{|}~]+@((((([a-z0-9][a-z0-9\-]{0,62}[a-z0-9])|[a-z])\.)+[a-z]{2,6})|([0-9]{1,3}\.){3}[0-9]{1,3}(:[0-9]{1,5})?)$",
    )
    .unwrap()
});

static DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+([\-.][a-z0-9]+)*\.[a-z]{2,6}$").unwrap());

static TIME_24_HOUR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

static CC_VISA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^4[0-9]{12}(?:[0-9]{3})?$").unwrap());
static CC_MASTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^5[1-5][0-9]{14}$").unwrap());
static CC_AMEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^3[47][0-9]{13}$").unwrap());
static CC_DINERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$").unwrap());
static CC_DISCOVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^6(?:011|5[0-9]{2})[0-9]{3,}$").unwrap());
static CC_JCB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:2131|1800|35[0-9]{3})[0-9]{3,}$").unwrap());

/// Default length bounds of [`password_simple`].
pub const PASSWORD_SIMPLE_BOUNDS: (usize, usize) = (6, 32);

// ============================================================================
// PRESENCE
// ============================================================================

/// Empty or made only of whitespace.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Empty after trimming whitespace and control characters.
pub fn is_trimmed_empty(s: &str) -> bool {
    s.chars().all(|c| c <= ' ' || c.is_whitespace())
}

/// A plain decimal number: optional leading `-`, digits, at most one `.`,
/// not ending in `.`.
///
/// ```rust,ignore
/// assert!(is_parsable("-12.5"));
/// assert!(is_parsable(".5"));
/// assert!(!is_parsable("5."));
/// assert!(!is_parsable("1e3"));
/// ```
pub fn is_parsable(s: &str) -> bool {
    if s.is_empty() || s.ends_with('.') {
        return false;
    }
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1
}

// ============================================================================
// LENGTH
// ============================================================================

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// At most `max` characters.
pub fn within_max(s: &str, max: usize) -> bool {
    char_len(s) <= max
}

/// At least `min` characters.
pub fn within_min(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

/// Between `min` and `max` characters, inclusive.
pub fn length(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&char_len(s))
}

// ============================================================================
// CONTENT
// ============================================================================

/// Whole-string match of `pattern`. An invalid pattern never matches.
pub fn regex(s: &str, pattern: &str) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(s),
        Err(error) => {
            tracing::warn!(%pattern, %error, "invalid regex rule");
            false
        }
    }
}

fn only(s: &str, allowed: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(allowed)
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Non-empty, ASCII digits only.
pub fn digit(s: &str) -> bool {
    only(s, |c| c.is_ascii_digit())
}

/// Non-empty, ASCII letters only.
pub fn letter(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphabetic())
}

/// Contains an ASCII digit.
pub fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// Contains an ASCII letter.
pub fn has_letter(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphabetic())
}

pub fn alpha_num(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric())
}

pub fn alpha_num_space(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric() || is_space(c))
}

pub fn alpha_num_lower_case(s: &str) -> bool {
    only(s, |c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

pub fn alpha_num_space_lower_case(s: &str) -> bool {
    only(s, |c| c.is_ascii_lowercase() || c.is_ascii_digit() || is_space(c))
}

pub fn alpha_num_upper_case(s: &str) -> bool {
    only(s, |c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub fn alpha_num_space_upper_case(s: &str) -> bool {
    only(s, |c| c.is_ascii_uppercase() || c.is_ascii_digit() || is_space(c))
}

pub fn alpha_num_dash(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric() || c == '-')
}

pub fn alpha_num_dash_space(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric() || c == '-' || is_space(c))
}

pub fn alpha_num_underscore(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn alpha_num_underscore_space(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric() || c == '_' || is_space(c))
}

pub fn alpha_num_quote_space(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric() || c == '\'' || is_space(c))
}

pub fn alpha_num_quote_dash_space(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphanumeric() || c == '\'' || c == '-' || is_space(c))
}

pub fn alpha_quote_space(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphabetic() || c == '\'' || is_space(c))
}

pub fn alpha_quote_dash_space(s: &str) -> bool {
    only(s, |c| c.is_ascii_alphabetic() || c == '\'' || c == '-' || is_space(c))
}

/// Unchanged by lower-casing.
pub fn all_lower_case(s: &str) -> bool {
    s == s.to_lowercase()
}

/// Unchanged by upper-casing.
pub fn all_upper_case(s: &str) -> bool {
    s == s.to_uppercase()
}

/// `min..=max` characters, each an ASCII letter, digit or punctuation mark.
pub fn password_simple(s: &str, min: usize, max: usize) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c.is_ascii_punctuation()) && length(s, min, max)
}

// ============================================================================
// CARDS
// ============================================================================

/// Any of the supported card number formats.
pub fn credit_card(s: &str) -> bool {
    [&CC_VISA, &CC_MASTER, &CC_AMEX, &CC_DINERS, &CC_DISCOVER, &CC_JCB]
        .iter()
        .any(|re| re.is_match(s))
}

pub fn cc_visa(s: &str) -> bool {
    CC_VISA.is_match(s)
}

pub fn cc_master(s: &str) -> bool {
    CC_MASTER.is_match(s)
}

pub fn cc_american_express(s: &str) -> bool {
    CC_AMEX.is_match(s)
}

pub fn cc_diners_club(s: &str) -> bool {
    CC_DINERS.is_match(s)
}

pub fn cc_discover(s: &str) -> bool {
    CC_DISCOVER.is_match(s)
}

pub fn cc_jcb(s: &str) -> bool {
    CC_JCB.is_match(s)
}

// ============================================================================
// NETWORK
// ============================================================================

/// E-mail address; rejects `--` and `-.` anywhere.
pub fn email(s: &str) -> bool {
    !s.contains("--") && !s.contains("-.") && EMAIL_REGEX.is_match(s)
}

/// Absolute URL with a host and one of `schemes` (case-insensitive).
#[cfg(feature = "network")]
pub fn url<S: AsRef<str>>(s: &str, schemes: &[S]) -> bool {
    ::url::Url::parse(s).is_ok_and(|parsed| {
        parsed.host_str().is_some_and(|host| !host.is_empty())
            && schemes
                .iter()
                .any(|scheme| scheme.as_ref().eq_ignore_ascii_case(parsed.scheme()))
    })
}

/// Schemes accepted by [`url`] when none are given.
pub const DEFAULT_URL_SCHEMES: [&str; 2] = ["http", "https"];

/// Dotted-quad IPv4 address without leading zeros.
pub fn ipv4(s: &str) -> bool {
    Ipv4Addr::from_str(s).is_ok()
}

/// Label of 1..=63 alphanumerics with single inner hyphens.
fn host_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    bytes.len() <= 63
        && first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        && !label.contains("--")
}

/// Host name per RFC 952: dot-separated labels, optional trailing dot, at
/// most 255 characters.
pub fn host_name(s: &str) -> bool {
    let name = s.strip_suffix('.').unwrap_or(s);
    (1..=255).contains(&s.len()) && name.split('.').all(host_label)
}

/// Like [`host_name`], but must start with a letter and has no trailing dot.
pub fn server_name(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic()) && s.split('.').all(host_label)
}

/// `a.b.c` style name with between 2 and `levels + 2` dots; parts are
/// ASCII alphanumerics and dashes.
pub fn subdomain(s: &str, levels: usize) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    let dots = parts.len() - 1;
    (2..=levels.saturating_add(2)).contains(&dots) && parts.iter().all(|part| alpha_num_dash(part))
}

/// Lower-case domain with a 2..=6 letter top-level label.
pub fn domain(s: &str) -> bool {
    DOMAIN_REGEX.is_match(s)
}

/// `#` followed by 3 to 6 hex digits.
pub fn color_hex(s: &str) -> bool {
    s.strip_prefix('#')
        .is_some_and(|hex| (3..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

// ============================================================================
// NUMBERS
// ============================================================================

/// See [`is_parsable`].
pub fn is_number(s: &str) -> bool {
    is_parsable(s)
}

/// Parses as a signed 32-bit integer.
pub fn is_integer(s: &str) -> bool {
    s.parse::<i32>().is_ok()
}

/// Parses as an unsigned 32-bit integer.
pub fn is_u_integer(s: &str) -> bool {
    s.parse::<u32>().is_ok()
}

/// Parses as a signed 64-bit integer.
pub fn is_long(s: &str) -> bool {
    s.parse::<i64>().is_ok()
}

/// Parses as an unsigned 64-bit integer.
pub fn is_u_long(s: &str) -> bool {
    s.parse::<u64>().is_ok()
}

/// Parses as a single-precision float.
pub fn is_float(s: &str) -> bool {
    s.trim().parse::<f32>().is_ok()
}

/// Parses as a double-precision float.
pub fn is_double(s: &str) -> bool {
    s.trim().parse::<f64>().is_ok()
}

/// Plain decimal with at most `decimals` digits after the point.
fn decimal_places(s: &str, decimals: usize) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
        && fraction.len() <= decimals
}

/// Single-precision float with at most `decimals` fraction digits.
pub fn is_float_with(s: &str, decimals: usize) -> bool {
    is_float(s) && decimal_places(s, decimals)
}

/// Double-precision float with at most `decimals` fraction digits.
pub fn is_double_with(s: &str, decimals: usize) -> bool {
    is_double(s) && decimal_places(s, decimals)
}

/// `true`/`false`, lower case.
pub fn is_boolean(s: &str) -> bool {
    matches!(s, "true" | "false")
}

/// Parses as `N` and is at least `min`.
pub fn min<N: FromStr + PartialOrd>(s: &str, min: N) -> bool {
    s.trim().parse::<N>().is_ok_and(|value| value >= min)
}

/// Parses as `N` and is at most `max`.
pub fn max<N: FromStr + PartialOrd>(s: &str, max: N) -> bool {
    s.trim().parse::<N>().is_ok_and(|value| value <= max)
}

// ============================================================================
// MEMBERSHIP
// ============================================================================

/// Equal to one of `items`.
pub fn in_array<S: AsRef<str>>(s: &str, items: &[S]) -> bool {
    items.iter().any(|item| item.as_ref() == s)
}

/// Equal to none of `items`.
pub fn not_in_array<S: AsRef<str>>(s: &str, items: &[S]) -> bool {
    !in_array(s, items)
}

/// Parses as an integer contained in `items`.
pub fn in_int_array(s: &str, items: &[i32]) -> bool {
    s.parse::<i32>().is_ok_and(|value| items.contains(&value))
}

/// Parses as an integer not contained in `items`. Non-integers fail.
pub fn not_in_int_array(s: &str, items: &[i32]) -> bool {
    s.parse::<i32>().is_ok_and(|value| !items.contains(&value))
}

// ============================================================================
// LISTS
// ============================================================================

/// Splits on a literal delimiter, dropping trailing empty parts.
fn split_list<'a>(s: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![s];
    }
    let mut parts: Vec<&str> = s.split(delimiter).collect();
    if parts.len() > 1 {
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
    }
    parts
}

/// A `delimiter`-separated list with `min..=max` items; `0, 0` only asks
/// for at least one item.
pub fn separate_by(s: &str, delimiter: &str, min: usize, max: usize) -> bool {
    let count = split_list(s, delimiter).len();
    if min == 0 && max == 0 {
        count > 0
    } else {
        (min..=max).contains(&count)
    }
}

/// Like [`separate_by`], and every item is one of `items`.
pub fn separate_by_in_array<S: AsRef<str>>(
    s: &str,
    delimiter: &str,
    items: &[S],
    min: usize,
    max: usize,
) -> bool {
    separate_by(s, delimiter, min, max)
        && split_list(s, delimiter)
            .into_iter()
            .all(|part| in_array(part, items))
}

// ============================================================================
// TIME OF DAY
// ============================================================================

/// `H:MM` or `HH:MM`, 24-hour clock.
pub fn time_24_hour(s: &str) -> bool {
    TIME_24_HOUR_REGEX.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true)]
    #[case("  \t", true)]
    #[case(" a ", false)]
    fn blank(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_blank(input), expected);
    }

    #[rstest]
    #[case("12", true)]
    #[case("-12.50", true)]
    #[case(".5", true)]
    #[case("5.", false)]
    #[case("-", false)]
    #[case("1.2.3", false)]
    #[case("1e3", false)]
    #[case("", false)]
    fn parsable(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_parsable(input), expected);
    }

    #[test]
    fn lengths_count_characters() {
        assert!(length("héllo", 5, 5));
        assert!(within_max("abc", 3));
        assert!(!within_min("ab", 3));
    }

    #[test]
    fn regex_rule_matches_whole_value() {
        assert!(regex("abc", "[a-z]+"));
        assert!(!regex("abc1", "[a-z]+"));
        assert!(!regex("abc", "("));
    }

    #[test]
    fn character_classes() {
        assert!(alpha_num("abc123"));
        assert!(!alpha_num(""));
        assert!(!alpha_num("abc 123"));
        assert!(alpha_num_space("abc 123"));
        assert!(alpha_num_dash("a-b"));
        assert!(alpha_num_underscore("a_b"));
        assert!(alpha_quote_dash_space("O'Neil-Smith Jr"));
        assert!(!alpha_num_lower_case("Abc"));
        assert!(digit("0123"));
        assert!(!letter("ab1"));
        assert!(has_digit("a1"));
        assert!(all_upper_case("ABC 1"));
    }

    #[test]
    fn passwords() {
        let (min, max) = PASSWORD_SIMPLE_BOUNDS;
        assert!(password_simple("s3cret!", min, max));
        assert!(!password_simple("short", min, max));
        assert!(!password_simple("has space", min, max));
    }

    #[test]
    fn cards() {
        assert!(cc_visa("4111111111111111"));
        assert!(cc_master("5500000000000004"));
        assert!(cc_american_express("340000000000009"));
        assert!(credit_card("6011000000000004"));
        assert!(!credit_card("1234"));
    }

    #[rstest]
    #[case("john@example.com", true)]
    #[case("john.doe+tag@mail.example.org", true)]
    #[case("john@127.0.0.1", true)]
    #[case("john--doe@example.com", false)]
    #[case("john@exa-.com", false)]
    #[case("john@", false)]
    fn emails(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(email(input), expected);
    }

    #[cfg(feature = "network")]
    #[test]
    fn urls() {
        assert!(url("https://example.com/path", &DEFAULT_URL_SCHEMES));
        assert!(!url("ftp://example.com", &DEFAULT_URL_SCHEMES));
        assert!(url("FTP://example.com", &["ftp"]));
        assert!(!url("not a url", &DEFAULT_URL_SCHEMES));
    }

    #[test]
    fn hosts() {
        assert!(ipv4("192.168.0.1"));
        assert!(!ipv4("192x168x0x1"));
        assert!(!ipv4("256.1.1.1"));
        assert!(host_name("example.com."));
        assert!(host_name("1example.com"));
        assert!(!host_name("-bad.com"));
        assert!(!host_name("a--b.com"));
        assert!(server_name("web-01.example.com"));
        assert!(!server_name("1web.example.com"));
        assert!(subdomain("a.b.example", 1));
        assert!(!subdomain("example.com", 1));
        assert!(!subdomain("a.b.c.d.example", 1));
        assert!(subdomain("a.b.c.d.example", usize::MAX));
        assert!(!subdomain("example.com", usize::MAX));
        assert!(domain("example.co.uk"));
        assert!(!domain("Example.com"));
        assert!(color_hex("#ff0000"));
        assert!(color_hex("#f00"));
        assert!(!color_hex("ff0000"));
        assert!(!color_hex("#ff00000"));
    }

    #[test]
    fn numbers() {
        assert!(is_integer("-15"));
        assert!(!is_integer("15abc"));
        assert!(!is_integer("9999999999"));
        assert!(is_long("9999999999"));
        assert!(!is_u_integer("-1"));
        assert!(is_float_with("3.14", 2));
        assert!(!is_float_with("3.141", 2));
        assert!(is_double_with("-10", 0));
        assert!(min("18", 18));
        assert!(!min("17", 18));
        assert!(!min("abc", 18));
        assert!(max("2.5", 3.0_f64));
        assert!(is_boolean("true"));
        assert!(!is_boolean("True"));
    }

    #[test]
    fn membership() {
        assert!(in_array("b", &["a", "b"]));
        assert!(not_in_array("c", &["a", "b"]));
        assert!(in_int_array("2", &[1, 2]));
        assert!(!in_int_array("x", &[1, 2]));
        assert!(!not_in_int_array("x", &[1, 2]));
    }

    #[test]
    fn delimited_lists() {
        assert!(separate_by("a,b,c", ",", 0, 0));
        assert!(separate_by("a,b,c", ",", 2, 3));
        assert!(!separate_by("a,b,c,d", ",", 2, 3));
        assert!(separate_by("a|b", "|", 2, 2));
        assert!(separate_by_in_array("red,blue", ",", &["red", "blue", "green"], 0, 0));
        assert!(!separate_by_in_array("red,pink", ",", &["red", "blue"], 0, 0));
        assert!(!separate_by(",,", ",", 0, 0));
    }

    #[test]
    fn time_of_day() {
        assert!(time_24_hour("9:30"));
        assert!(time_24_hour("23:59"));
        assert!(!time_24_hour("24:00"));
    }
}
