//! Numeric settings read from `FORTUNE_*` environment variables.

/// Reads `var` and parses its trimmed value, falling back to `default`.
///
/// An absent variable is normal and stays quiet. A value that does not parse
/// is reported with a warning so a typo in the deployment is visible in logs.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    let Ok(raw) = std::env::var(var) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(
            var,
            value = %raw,
            default = %default,
            "unparsable setting, keeping default"
        );
        default
    })
}
