//! Environment lookup helpers used by configuration builders
//!
//! Lookups go through a closure so configuration can be loaded from the
//! process environment in production and from a plain map in tests.

use std::str::FromStr;

/// Read a variable from the process environment, treating empty values as unset
pub fn env_var(key: &str) -> Option<String> {
    non_empty(std::env::var(key).ok())
}

/// Look up a key through `lookup`, treating empty or blank values as unset
pub fn lookup_var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(key))
}

/// Look up and parse a key through `lookup`
///
/// Returns `Ok(None)` when the key is unset and `Err` with a readable message
/// when the value does not parse.
pub fn lookup_parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup_var(lookup, key) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| format!("{key}={raw:?} is invalid: {e}")),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_lookup_var_blank_is_unset() {
        let lookup = lookup_from(&[("A", "  "), ("B", " value ")]);
        assert_eq!(lookup_var(&lookup, "A"), None);
        assert_eq!(lookup_var(&lookup, "B"), Some("value".to_string()));
        assert_eq!(lookup_var(&lookup, "C"), None);
    }

    #[test]
    fn test_env_var_unset() {
        assert_eq!(env_var("AGENT_UTILS_TEST_VARIABLE_THAT_IS_NEVER_SET"), None);
        assert_eq!(lookup_var(&env_var, "AGENT_UTILS_TEST_VARIABLE_THAT_IS_NEVER_SET"), None);
    }

    #[test]
    fn test_lookup_parsed() {
        let lookup = lookup_from(&[("N", "42"), ("BAD", "forty")]);
        assert_eq!(lookup_parsed::<_, u64>(&lookup, "N"), Ok(Some(42)));
        assert_eq!(lookup_parsed::<_, u64>(&lookup, "MISSING"), Ok(None));

        let err = lookup_parsed::<_, u64>(&lookup, "BAD").unwrap_err();
        assert!(err.starts_with("BAD=\"forty\" is invalid"));
    }
}
