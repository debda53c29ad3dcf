//! Environment overrides for property-test runs.
//!
//! Every property suite in the workspace reads its case count and fork mode
//! through [`ProptestRunProfile`] so CI can dial them up in one place.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable switching proptest into forked subprocesses.
pub const BARRIERS_PBT_FORK_ENV_KEY: &str = "BARRIERS_PBT_FORK";

/// Case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, falling back to the suite's
    /// defaults when a variable is unset or unparsable.
    ///
    /// # Examples
    ///
    /// ```
    /// use barriers_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(BARRIERS_PBT_FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Result<T, String>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("`{other}` is not a switch value")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Restores a variable to its previous value when dropped.
    struct ScopedVar {
        key: &'static str,
        previous: Option<String>,
    }

    impl ScopedVar {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let previous = env::var(key).ok();
            Self::apply(key, value);
            Self { key, previous }
        }

        fn apply(key: &'static str, value: Option<&str>) {
            match value {
                // SAFETY: tests serialize environment access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(key, value) },
                // SAFETY: tests serialize environment access with ENV_LOCK.
                None => unsafe { env::remove_var(key) },
            }
        }
    }

    impl Drop for ScopedVar {
        fn drop(&mut self) {
            Self::apply(self.key, self.previous.as_deref());
        }
    }

    fn load_with(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = ScopedVar::new(PROGTEST_CASES_ENV_KEY, cases);
        let _fork = ScopedVar::new(BARRIERS_PBT_FORK_ENV_KEY, fork);
        ProptestRunProfile::load(48, default_fork)
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let profile = load_with(None, None, false);
        assert_eq!(profile.cases(), 48);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 512 ", 512)]
    #[case("10000", 10_000)]
    fn valid_case_counts_override(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(load_with(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-4")]
    #[case("many")]
    fn invalid_case_counts_fall_back(#[case] raw: &str) {
        assert_eq!(load_with(Some(raw), None, false).cases(), 48);
    }

    #[rstest]
    #[case("true", true)]
    #[case("On", true)]
    #[case("1", true)]
    #[case("YES", true)]
    #[case("false", false)]
    #[case("off", false)]
    #[case("0", false)]
    #[case("no", false)]
    fn switch_values_override_fork(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(load_with(None, Some(raw), !expected).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("sometimes")]
    #[case("2")]
    fn invalid_switch_values_fall_back(#[case] raw: &str) {
        assert!(load_with(None, Some(raw), true).fork());
    }
}
