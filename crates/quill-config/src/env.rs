use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Point-in-time copy of the process environment
///
/// Captured once at the edge of the program and passed down explicitly, so
/// resolution and availability checks never read `std::env` themselves and
/// can be tested without mutating process state.
#[derive(Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Snapshot the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (Ok(key), Err(_)) => {
                    tracing::debug!(variable = %key, "skipping environment variable with non-UTF-8 value");
                    None
                }
                (Err(key), _) => {
                    tracing::debug!(
                        variable = %key.to_string_lossy(),
                        "skipping environment variable with non-UTF-8 name"
                    );
                    None
                }
            }
        });

        Self::from_pairs(vars)
    }

    /// Build a snapshot from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Look up a variable, treating empty or whitespace-only values as unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

// Values are frequently credentials
impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vars.keys()).finish()
    }
}

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// Supports an optional default value via `{{ env.VAR | default("fallback") }}`.
/// Lines starting with `#` (TOML comments) are passed through unchanged.
pub fn expand_env(input: &str, env: &EnvSnapshot) -> Result<String, String> {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1: the scoped key (e.g. `env.VAR_NAME`)
        // Group 2: optional default value inside default("...")
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;

        for captures in re().captures_iter(line) {
            let (Some(overall), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let default_value = captures.get(2).map(|m| m.as_str());

            output.push_str(&line[last_end..overall.start()]);

            let Some(var_name) = key.as_str().strip_prefix("env.").filter(|name| !name.contains('.')) else {
                return Err(format!(
                    "only variables scoped with 'env.' are supported: `{}`",
                    key.as_str()
                ));
            };

            match (env.get(var_name), default_value) {
                (Some(value), _) => output.push_str(value),
                (None, Some(default)) => output.push_str(default),
                (None, None) => return Err(format!("environment variable not found: `{var_name}`")),
            }

            last_end = overall.end();
        }

        output.push_str(&line[last_end..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
