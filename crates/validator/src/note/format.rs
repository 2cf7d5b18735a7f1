//! Message formatting for failed rules.
//!
//! A failed rule carries a descriptor of the form `name[;arg1;arg2...]`,
//! built with [`descriptor`] so that `;` and `\` inside an argument survive.
//! [`render_message`] turns the descriptor, the caller's message (if any) and
//! the sink's configuration into the final text:
//!
//! 1. the rule name selects a custom template when no message was given
//! 2. the field name is normalized when the sink asks for it
//!    ([`Note::should_convert_field_name`])
//! 3. the placeholder token is replaced by the (normalized) field name
//! 4. positional arguments fill `%s`-style specifiers
//!
//! Without any template a built-in default for the rule name is used.

use std::fmt::Write as _;

use super::Note;

/// Field name shown when a chain validates an unnamed value.
pub const UNNAMED_FIELD: &str = "Value";

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Joins a rule name and its arguments into `name;arg;...`.
///
/// `;` and `\` inside an argument are escaped with a backslash.
///
/// ```rust,ignore
/// assert_eq!(descriptor("length", ["2", "12"]), "length;2;12");
/// assert_eq!(descriptor("hasChar", [";"]), r"hasChar;\;");
/// ```
pub fn descriptor<I>(rule: &str, args: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = rule.to_owned();
    for arg in args {
        out.push(';');
        for c in arg.as_ref().chars() {
            if matches!(c, ';' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out
}

/// Splits a descriptor into the rule name and its arguments.
///
/// `\;` and `\\` unescape; any other backslash is kept as is, so
/// hand-written descriptors like `regex;\d+` read back unchanged.
pub fn split_descriptor(descriptor: &str) -> (String, Vec<String>) {
    let mut segments = vec![String::new()];
    let mut chars = descriptor.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some(';' | '\\')) => {
                if let (Some(segment), Some(escaped)) = (segments.last_mut(), chars.next()) {
                    segment.push(escaped);
                }
            }
            ';' => segments.push(String::new()),
            _ => {
                if let Some(segment) = segments.last_mut() {
                    segment.push(c);
                }
            }
        }
    }
    let rule = segments.remove(0);
    (rule, segments)
}

// ============================================================================
// FIELD NAMES
// ============================================================================

/// Turns an identifier into a human-readable label.
///
/// ```rust,ignore
/// assert_eq!(normalize_field_name("id"), "ID");
/// assert_eq!(normalize_field_name("user_name"), "User name");
/// assert_eq!(normalize_field_name("firstNameId"), "First name ID");
/// ```
pub fn normalize_field_name(field: &str) -> String {
    if field == "id" {
        return "ID".to_owned();
    }

    let spaced = if field.contains('_') {
        field.replace('_', " ")
    } else if field.chars().any(char::is_uppercase) {
        split_camel_case(field).join(" ").to_lowercase()
    } else {
        field.to_owned()
    };

    capitalize(&uppercase_trailing_id(&spaced))
}

/// A trailing `" id"` becomes `" ID"`.
fn uppercase_trailing_id(text: &str) -> String {
    match text.strip_suffix(" id") {
        Some(head) => format!("{head} ID"),
        None => text.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Upper,
    Lower,
    Digit,
    Space,
    Other,
}

impl CharKind {
    fn of(c: char) -> Self {
        if c.is_uppercase() {
            Self::Upper
        } else if c.is_lowercase() {
            Self::Lower
        } else if c.is_numeric() {
            Self::Digit
        } else if c.is_whitespace() {
            Self::Space
        } else {
            Self::Other
        }
    }
}

/// Splits on character-kind boundaries, keeping an upper-case letter with the
/// lower-case run that follows it.
///
/// `"userName"` gives `["user", "Name"]`, `"ASFRules"` gives `["ASF", "Rules"]`
/// and `"page2Title"` gives `["page", "2", "Title"]`.
pub fn split_camel_case(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let Some(&(_, first)) = chars.first() else {
        return Vec::new();
    };

    let mut parts = Vec::new();
    let mut token_start = 0;
    let mut current = CharKind::of(first);

    for window in chars.windows(2) {
        let (prev_pos, _) = window[0];
        let (pos, c) = window[1];
        let kind = CharKind::of(c);
        if kind == current {
            continue;
        }
        if kind == CharKind::Lower && current == CharKind::Upper {
            if prev_pos != token_start {
                parts.push(&text[token_start..prev_pos]);
                token_start = prev_pos;
            }
        } else {
            parts.push(&text[token_start..pos]);
            token_start = pos;
        }
        current = kind;
    }
    parts.push(&text[token_start..]);
    parts
}

/// Upper-cases the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// POSITIONAL ARGUMENTS
// ============================================================================

/// Fills `%s`-style specifiers with `args`, in order.
///
/// Supported: `%%`, `%n`, explicit indices (`%2$s`), the `-` flag, a width and
/// a precision (which truncates). Every conversion letter renders the
/// argument as text. A specifier without a matching argument is kept verbatim.
pub fn format_positional(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next_arg = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let spec = &rest[pos + 1..];

        let Some(parsed) = Specifier::parse(spec) else {
            out.push('%');
            rest = spec;
            continue;
        };
        let raw = &rest[pos..=pos + parsed.consumed];
        rest = &spec[parsed.consumed..];

        match parsed.conversion {
            '%' => out.push('%'),
            'n' => out.push('\n'),
            _ => {
                let index = parsed.index.unwrap_or_else(|| {
                    next_arg += 1;
                    next_arg
                });
                match index.checked_sub(1).and_then(|i| args.get(i)) {
                    Some(arg) => parsed.render(arg, &mut out),
                    None => out.push_str(raw),
                }
            }
        }
    }

    out.push_str(rest);
    out
}

#[derive(Debug)]
struct Specifier {
    index: Option<usize>,
    left_align: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
    /// Bytes after the `%`, conversion letter included.
    consumed: usize,
}

impl Specifier {
    fn parse(spec: &str) -> Option<Self> {
        let bytes = spec.as_bytes();
        let mut i = 0;

        let digits = |from: usize| {
            let end = bytes[from..]
                .iter()
                .position(|b| !b.is_ascii_digit())
                .map_or(bytes.len(), |n| from + n);
            (spec[from..end].parse::<usize>().ok(), end)
        };

        let mut index = None;
        let (leading, after) = digits(0);
        if leading.is_some() && bytes.get(after) == Some(&b'$') {
            index = leading;
            i = after + 1;
        }

        let mut left_align = false;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => left_align = true,
                b'#' | b'+' | b' ' | b'0' | b',' | b'(' => {}
                _ => break,
            }
            i += 1;
        }

        let (width, after) = digits(i);
        i = after;

        let mut precision = None;
        if bytes.get(i) == Some(&b'.') {
            let (value, after) = digits(i + 1);
            precision = value;
            i = after;
        }

        let conversion = spec[i..].chars().next()?;
        if !conversion.is_ascii_alphabetic() && conversion != '%' {
            return None;
        }

        Some(Self {
            index,
            left_align,
            width,
            precision,
            conversion,
            consumed: i + conversion.len_utf8(),
        })
    }

    fn render(&self, arg: &str, out: &mut String) {
        let text: String = match self.precision {
            Some(limit) if matches!(self.conversion, 's' | 'S') => arg.chars().take(limit).collect(),
            _ => arg.to_owned(),
        };
        let text = if self.conversion == 'S' {
            text.to_uppercase()
        } else {
            text
        };
        let width = self.width.unwrap_or(0);
        let _ = if self.left_align {
            write!(out, "{text:<width$}")
        } else {
            write!(out, "{text:>width$}")
        };
    }
}

// ============================================================================
// DEFAULT MESSAGES
// ============================================================================

/// Built-in template for a rule, with the display field name already in place.
///
/// `arity` is the number of positional arguments the descriptor carries; a few
/// rules read differently with and without arguments.
pub fn default_message(rule: &str, field: &str, arity: usize) -> String {
    let tail = match (rule, arity) {
        ("required" | "requiredLoose", _) => "is required",
        ("mustNotBeNull", _) => "must not be null",
        ("mustNotBeBlank", _) => "must not be blank",
        ("length", _) => "must be between %s and %s characters long",
        ("minLength", _) => "must be at least %s characters long",
        ("maxLength", _) => "must be at most %s characters long",
        ("regex", _) => "has an invalid format",
        ("hasChar", _) => "must contain %s",
        ("startWith", _) => "must start with %s",
        ("endWith", _) => "must end with %s",
        ("digit", _) => "must contain only digits",
        ("letter", _) => "must contain only letters",
        ("hasDigit", _) => "must contain at least one digit",
        ("hasLetter", _) => "must contain at least one letter",
        ("alphaNum", _) => "must contain only letters and digits",
        ("alphaNumSpace", _) => "must contain only letters, digits and spaces",
        ("alphaNumLowerCase" | "alphaNumSpaceLowerCase", _) => {
            "must contain only lower-case letters and digits"
        }
        ("alphaNumUpperCase" | "alphaNumSpaceUpperCase", _) => {
            "must contain only upper-case letters and digits"
        }
        ("alphaNumDash" | "alphaNumDashSpace", _) => {
            "must contain only letters, digits and dashes"
        }
        ("alphaNumUnderscore" | "alphaNumUnderscoreSpace", _) => {
            "must contain only letters, digits and underscores"
        }
        (
            "alphaNumQuoteSpace" | "alphaNumQuoteDashSpace" | "alphaQuoteSpace"
            | "alphaQuoteDashSpace",
            _,
        ) => "contains invalid characters",
        ("allLowerCase", _) => "must be all lower case",
        ("allUpperCase", _) => "must be all upper case",
        ("passwordSimple", 0) => "is not a valid password",
        ("passwordSimple", _) => {
            "must be %s to %s characters of letters, digits or punctuation"
        }
        ("creditCard", _) => "must be a valid credit card number",
        ("ccVisa", _) => "must be a valid Visa card number",
        ("ccMaster", _) => "must be a valid Mastercard number",
        ("ccAmericanExpress", _) => "must be a valid American Express card number",
        ("ccDinersClub", _) => "must be a valid Diners Club card number",
        ("ccDiscover", _) => "must be a valid Discover card number",
        ("ccJcb", _) => "must be a valid JCB card number",
        ("email", _) => "must be a valid email address",
        ("url", _) => "must be a valid URL",
        ("ipv4", _) => "must be a valid IPv4 address",
        ("hostName", _) => "must be a valid host name",
        ("serverName", _) => "must be a valid server name",
        ("subdomain", _) => "must be a valid subdomain",
        ("domain", _) => "must be a valid domain",
        ("colorHex", _) => "must be a hex colour code",
        ("isNumber", _) => "must be a number",
        ("isInteger" | "isLong", _) => "must be an integer",
        ("isUInteger" | "isULong", _) => "must be a non-negative integer",
        ("isFloat" | "isDouble", 0) => "must be a decimal number",
        ("isFloat" | "isDouble", _) => "must be a number with at most %s decimal places",
        ("isBoolean", _) => "must be true or false",
        ("time24Hour", _) => "must be a 24-hour time",
        ("min", _) => "must be at least %s",
        ("max", _) => "must be at most %s",
        ("between", _) => "must be between %s and %s",
        ("inArray", _) => "must be one of the allowed values",
        ("notInArray", _) => "must not be one of the disallowed values",
        ("separateBy", 1) => "must be a list separated by '%s'",
        ("separateBy", _) => "must be a list of %2$s to %3$s items separated by '%1$s'",
        ("separateByInArray", _) => "must be a '%s'-separated list of allowed values",
        ("dateFormat" | "timeFormat" | "dateTimeFormat", 0) => "has an invalid format",
        ("dateFormat", _) => "must be a date in the format %s",
        ("timeFormat", _) => "must be a time in the format %s",
        ("dateTimeFormat", _) => "must be a date and time in the format %s",
        ("dateBefore" | "timeBefore" | "dateTimeBefore", _) => "must be before %s",
        ("dateBeforeMonth" | "dateTimeBeforeMonth", _) => "must be in a month before %s",
        ("dateTimeBeforeWeek", _) => "must be in a week before %s",
        ("dateBeforeYear" | "dateTimeBeforeYear", _) => "must be in a year before %s",
        ("timeBeforeMinute" | "timeBeforeHour", _) => "must be before %s",
        ("dateAfter" | "timeAfter" | "dateTimeAfter", _) => "must be after %s",
        ("dateAfterMonth" | "dateTimeAfterMonth", _) => "must be in a month after %s",
        ("dateTimeAfterWeek", _) => "must be in a week after %s",
        ("dateAfterYear" | "dateTimeAfterYear", _) => "must be in a year after %s",
        ("timeAfterMinute" | "timeAfterHour", _) => "must be after %s",
        ("dateEq" | "timeEq" | "dateTimeEq", _) => "must be %s",
        ("dateEqMonth" | "dateTimeEqMonth", _) => "must be in the same month as %s",
        ("dateTimeEqWeek", _) => "must be in the same week as %s",
        ("dateEqYear" | "dateTimeEqYear", _) => "must be in the same year as %s",
        ("timeEqMinute" | "timeEqHour", _) => "must be %s",
        ("dateBetween" | "timeBetween" | "dateTimeBetween", _) => "must be between %s and %s",
        _ => "is not valid",
    };
    format!("{field} {tail}")
}

// ============================================================================
// RENDERING
// ============================================================================

/// Produces the message recorded for a failed rule.
///
/// `note` is `None` for a detached chain; it then contributes neither a
/// placeholder nor custom messages.
pub fn render_message(
    note: Option<&dyn Note>,
    field: Option<&str>,
    message: Option<&str>,
    descriptor: &str,
) -> String {
    let (rule, args) = split_descriptor(descriptor);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let rule = rule.as_str();

    let placeholder = note.and_then(Note::convert_field_name);
    let convert = note.is_some_and(|note| note.should_convert_field_name());
    let display = match (field, convert) {
        (Some(name), true) => normalize_field_name(name),
        (Some(name), false) => name.to_owned(),
        (None, _) => UNNAMED_FIELD.to_owned(),
    };
    // The field text goes through positional formatting together with the
    // template, so a literal `%` must survive it.
    let display = if args.is_empty() {
        display
    } else {
        display.replace('%', "%%")
    };

    let template = message.map(str::to_owned).or_else(|| {
        note.and_then(Note::custom_error_messages)
            .and_then(|custom| custom.get(rule))
            .cloned()
    });

    let text = match (template, placeholder) {
        (Some(template), Some(token)) if !token.is_empty() => template.replace(token, &display),
        (Some(template), _) => template,
        (None, _) => default_message(rule, &display, args.len()),
    };

    if args.is_empty() {
        text
    } else {
        format_positional(&text, &args)
    }
}
