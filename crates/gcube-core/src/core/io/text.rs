use std::any::type_name;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Malformed {expected} value: '{token}'")]
pub struct MalformedNumber {
    pub token: String,
    pub expected: &'static str,
}

/// Removes leading and trailing whitespace.
pub fn trim(line: &str) -> &str {
    line.trim()
}

/// Splits `line` on every occurrence of `delimiter`.
///
/// With `skip_empty` set, empty tokens produced by consecutive delimiters (or by a delimiter at
/// either end) are dropped.
pub fn split(line: &str, delimiter: char, skip_empty: bool) -> Vec<&str> {
    line.split(delimiter)
        .filter(|token| !skip_empty || !token.is_empty())
        .collect()
}

/// Parses a whole token as a number of type `T`.
///
/// The cast is strict: the token must consist of a valid representation of `T` and nothing
/// else, so `"12abc"`, `" 12"` and `""` are all rejected.
pub fn parse_number<T: FromStr>(token: &str) -> Result<T, MalformedNumber> {
    token.parse::<T>().map_err(|_| MalformedNumber {
        token: token.to_string(),
        expected: short_type_name::<T>(),
    })
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_removes_surrounding_whitespace() {
        assert_eq!(trim("   40    0.283459  \r\n"), "40    0.283459");
        assert_eq!(trim("\t\t"), "");
        assert_eq!(trim("x"), "x");
    }

    #[test]
    fn split_keeps_empty_tokens_when_asked() {
        assert_eq!(split("1  2", ' ', false), vec!["1", "", "2"]);
        assert_eq!(split(" a ", ' ', false), vec!["", "a", ""]);
    }

    #[test]
    fn split_skips_empty_tokens_when_asked() {
        assert_eq!(
            split("8    0.000000    0.000000", ' ', true),
            vec!["8", "0.000000", "0.000000"]
        );
        assert!(split("", ' ', true).is_empty());
    }

    #[test]
    fn parse_number_accepts_valid_tokens() {
        assert_eq!(parse_number::<i32>("-3"), Ok(-3));
        assert_eq!(parse_number::<u8>("255"), Ok(255));
        assert_eq!(parse_number::<f64>("0.283459"), Ok(0.283459));
        assert_eq!(parse_number::<f64>("1.5E-03"), Ok(1.5e-3));
        assert_eq!(parse_number::<f32>("-2.50000e+01"), Ok(-25.0));
    }

    #[test]
    fn parse_number_rejects_partial_and_malformed_tokens() {
        let err = parse_number::<u8>("Xx").unwrap_err();
        assert_eq!(err.token, "Xx");
        assert_eq!(err.expected, "u8");

        assert!(parse_number::<i32>("12abc").is_err());
        assert!(parse_number::<i32>(" 12").is_err());
        assert!(parse_number::<i32>("1.0").is_err());
        assert!(parse_number::<f64>("").is_err());
        assert!(parse_number::<u8>("256").is_err());
    }

    #[test]
    fn malformed_number_message_names_token_and_type() {
        let err = parse_number::<f64>("abc").unwrap_err();
        assert_eq!(err.to_string(), "Malformed f64 value: 'abc'");
    }
}
