//! Route matchers for the enabled/disabled route gates

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// How a route matcher is written in configuration
///
/// A bare string is a literal prefix, a table with a `pattern` key is a
/// regular expression:
///
/// ```toml
/// enabled_routes = ["/api/", { pattern = "^/v[0-9]+/orders" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteSpec {
    /// Literal path or path prefix
    Prefix(String),
    /// Regular expression searched in the full path
    Pattern {
        /// Regex source
        pattern: String,
    },
}

impl From<&str> for RouteSpec {
    fn from(prefix: &str) -> Self {
        Self::Prefix(prefix.to_string())
    }
}

/// A compiled route matcher
#[derive(Debug, Clone)]
pub enum RouteMatcher {
    /// Matches when the path equals or starts with the prefix
    Prefix(String),
    /// Matches when the regex finds a match in the path
    Pattern(Regex),
}

impl RouteMatcher {
    /// Create a literal prefix matcher
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Compile a pattern matcher
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoutePattern` if the regex does not compile
    pub fn pattern(pattern: &str) -> Result<Self, ConfigurationError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| ConfigurationError::InvalidRoutePattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    /// Compile a matcher from its configuration form
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoutePattern` for patterns that do not compile
    pub fn from_spec(spec: &RouteSpec) -> Result<Self, ConfigurationError> {
        match spec {
            RouteSpec::Prefix(prefix) => Ok(Self::prefix(prefix.clone())),
            RouteSpec::Pattern { pattern } => Self::pattern(pattern),
        }
    }

    /// Convert back into the configuration form
    #[must_use]
    pub fn to_spec(&self) -> RouteSpec {
        match self {
            Self::Prefix(prefix) => RouteSpec::Prefix(prefix.clone()),
            Self::Pattern(regex) => RouteSpec::Pattern {
                pattern: regex.as_str().to_string(),
            },
        }
    }

    /// Whether the path matches
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            // starts_with also covers equality
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
            Self::Pattern(regex) => regex.is_match(path),
        }
    }
}

/// Whether any matcher matches, evaluated in order with short-circuit
#[must_use]
pub fn matches_any(matchers: &[RouteMatcher], path: &str) -> bool {
    matchers.iter().any(|matcher| matcher.matches(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_equal_path() {
        assert!(RouteMatcher::prefix("/api/health").matches("/api/health"));
    }

    #[test]
    fn prefix_matches_longer_path() {
        let matcher = RouteMatcher::prefix("/api/");
        assert!(matcher.matches("/api/users"));
        assert!(!matcher.matches("/dashboard"));
        assert!(!matcher.matches("/ap"));
    }

    #[test]
    fn pattern_searches_path() {
        let matcher = RouteMatcher::pattern(r"^/v\d+/orders").unwrap();
        assert!(matcher.matches("/v2/orders/17"));
        assert!(!matcher.matches("/orders"));

        let unanchored = RouteMatcher::pattern("admin").unwrap();
        assert!(unanchored.matches("/api/admin/users"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = RouteMatcher::pattern("(unclosed").unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidRoutePattern { ref pattern, .. } if pattern == "(unclosed"
        ));
    }

    #[test]
    fn matches_any_checks_all() {
        let matchers = vec![
            RouteMatcher::prefix("/health"),
            RouteMatcher::pattern("^/internal").unwrap(),
        ];
        assert!(matches_any(&matchers, "/health"));
        assert!(matches_any(&matchers, "/internal/metrics"));
        assert!(!matches_any(&matchers, "/api/users"));
        assert!(!matches_any(&[], "/anything"));
    }

    #[test]
    fn spec_round_trips_through_matcher() {
        let specs = vec![
            RouteSpec::from("/api/"),
            RouteSpec::Pattern {
                pattern: "^/v1".to_string(),
            },
        ];
        for spec in specs {
            let matcher = RouteMatcher::from_spec(&spec).unwrap();
            assert_eq!(matcher.to_spec(), spec);
        }
    }

    #[test]
    fn spec_deserializes_untagged() {
        let specs: Vec<RouteSpec> =
            serde_json::from_str(r#"["/api/", {"pattern": "^/v[0-9]+"}]"#).unwrap();
        assert_eq!(specs[0], RouteSpec::Prefix("/api/".to_string()));
        assert_eq!(
            specs[1],
            RouteSpec::Pattern {
                pattern: "^/v[0-9]+".to_string()
            }
        );
    }
}
