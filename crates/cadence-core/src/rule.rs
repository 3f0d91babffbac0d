//! Recurrence rule vocabulary and canonical rendering.
//!
//! A rule is carried as a map from key text to value text rather than a
//! fixed struct: keys arrive untrusted and the allow-list below is what
//! keeps unknown keys out. Values are left as text until the expansion
//! engine consumes them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

/// The fourteen recurrence keys a schedule may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKey {
    Freq,
    Interval,
    Count,
    Until,
    BySecond,
    ByMinute,
    ByHour,
    ByDay,
    ByMonthDay,
    ByYearDay,
    ByWeekNo,
    ByMonth,
    BySetPos,
    Wkst,
}

impl RuleKey {
    pub const ALL: [RuleKey; 14] = [
        RuleKey::Freq,
        RuleKey::Interval,
        RuleKey::Count,
        RuleKey::Until,
        RuleKey::BySecond,
        RuleKey::ByMinute,
        RuleKey::ByHour,
        RuleKey::ByDay,
        RuleKey::ByMonthDay,
        RuleKey::ByYearDay,
        RuleKey::ByWeekNo,
        RuleKey::ByMonth,
        RuleKey::BySetPos,
        RuleKey::Wkst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKey::Freq => "FREQ",
            RuleKey::Interval => "INTERVAL",
            RuleKey::Count => "COUNT",
            RuleKey::Until => "UNTIL",
            RuleKey::BySecond => "BYSECOND",
            RuleKey::ByMinute => "BYMINUTE",
            RuleKey::ByHour => "BYHOUR",
            RuleKey::ByDay => "BYDAY",
            RuleKey::ByMonthDay => "BYMONTHDAY",
            RuleKey::ByYearDay => "BYYEARDAY",
            RuleKey::ByWeekNo => "BYWEEKNO",
            RuleKey::ByMonth => "BYMONTH",
            RuleKey::BySetPos => "BYSETPOS",
            RuleKey::Wkst => "WKST",
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKey {
    type Err = ScheduleError;

    // Exact match only: `freq` is not `FREQ`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ScheduleError::Vocabulary(format!("unsupported key '{}'", s)))
    }
}

/// Recurrence frequency with its fixed step length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Seconds per step. Months are 30 days and years 365 days; there is no
    /// calendar rollover.
    pub fn step_seconds(&self) -> i64 {
        match self {
            Frequency::Secondly => 1,
            Frequency::Minutely => 60,
            Frequency::Hourly => 3_600,
            Frequency::Daily => 86_400,
            Frequency::Weekly => 604_800,
            Frequency::Monthly => 2_592_000,
            Frequency::Yearly => 31_536_000,
        }
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SECONDLY" => Ok(Frequency::Secondly),
            "MINUTELY" => Ok(Frequency::Minutely),
            "HOURLY" => Ok(Frequency::Hourly),
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            _ => Err(ScheduleError::Vocabulary(format!("invalid FREQ '{}'", s))),
        }
    }
}

/// Validates recurrence key/value pairs and renders them canonically.
///
/// Output is `KEY=value` pairs in lexicographic key order joined by `;`.
/// Only the vocabulary is checked here; whether `COUNT` is numeric or
/// `FREQ` is known is decided where those values are consumed.
pub fn canonicalize_rrule(key_values: &BTreeMap<String, String>) -> Result<String> {
    if !key_values.contains_key(RuleKey::Freq.as_str()) {
        return Err(ScheduleError::Vocabulary("FREQ required".to_string()));
    }

    for (key, value) in key_values {
        key.parse::<RuleKey>()?;
        if value.is_empty() {
            return Err(ScheduleError::Vocabulary(format!("empty value for {}", key)));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ScheduleError::Vocabulary(format!(
                "whitespace not allowed in value for {}",
                key
            )));
        }
    }

    // BTreeMap iteration is already lexicographic by key.
    Ok(key_values
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(";"))
}

/// Key/value view of a `KEY=value;...` rule, alive only while a rule is
/// being validated or expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleKeySet {
    pairs: BTreeMap<String, String>,
}

impl RuleKeySet {
    /// Splits rule text into pairs. A later duplicate key replaces an
    /// earlier one. Empty text has no pairs and one trailing `;` is
    /// ignored; any other empty segment is malformed.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut pairs = BTreeMap::new();
        let body = spec.strip_suffix(';').unwrap_or(spec);
        if body.is_empty() {
            return Ok(Self { pairs });
        }
        for pair in body.split(';') {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ScheduleError::Format(format!("invalid schedule specification token '{}'", pair))
            })?;
            pairs.insert(key.to_string(), value.to_string());
        }
        Ok(Self { pairs })
    }

    pub fn canonicalize(&self) -> Result<String> {
        canonicalize_rrule(&self.pairs)
    }

    pub fn get(&self, key: RuleKey) -> Option<&str> {
        self.pairs.get(key.as_str()).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.pairs
    }
}

impl From<BTreeMap<String, String>> for RuleKeySet {
    fn from(pairs: BTreeMap<String, String>) -> Self {
        Self { pairs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn kv(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_order() {
        let rule = canonicalize_rrule(&kv(&[("INTERVAL", "1"), ("FREQ", "DAILY")])).unwrap();
        assert_eq!(rule, "FREQ=DAILY;INTERVAL=1");

        let rule = canonicalize_rrule(&kv(&[
            ("WKST", "MO"),
            ("BYDAY", "MO,WE"),
            ("FREQ", "WEEKLY"),
            ("COUNT", "4"),
        ]))
        .unwrap();
        assert_eq!(rule, "BYDAY=MO,WE;COUNT=4;FREQ=WEEKLY;WKST=MO");
    }

    #[test]
    fn test_values_are_not_interpreted() {
        // Semantic checks belong to the expansion engine.
        let rule = canonicalize_rrule(&kv(&[("FREQ", "FORTNIGHTLY"), ("COUNT", "many")])).unwrap();
        assert_eq!(rule, "COUNT=many;FREQ=FORTNIGHTLY");
    }

    #[test]
    fn test_freq_required() {
        let err = canonicalize_rrule(&kv(&[("INTERVAL", "2")])).unwrap_err();
        assert_eq!(err, ScheduleError::Vocabulary("FREQ required".to_string()));
    }

    #[rstest]
    #[case(&[("FREQ", "DAILY"), ("BOGUS", "1")])]
    #[case(&[("FREQ", "DAILY"), ("interval", "1")])]
    #[case(&[("FREQ", "DAILY"), ("Count", "1")])]
    #[case(&[("FREQ", "")])]
    #[case(&[("FREQ", "DAILY"), ("BYDAY", "MO, TU")])]
    #[case(&[("FREQ", "DAILY\t")])]
    #[case(&[("FREQ", "DAILY"), ("", "1")])]
    fn test_vocabulary_rejections(#[case] pairs: &[(&str, &str)]) {
        assert!(matches!(
            canonicalize_rrule(&kv(pairs)),
            Err(ScheduleError::Vocabulary(_))
        ));
    }

    #[test]
    fn test_key_set_parse() {
        let set = RuleKeySet::parse("INTERVAL=2;FREQ=HOURLY;INTERVAL=3").unwrap();
        assert_eq!(set.get(RuleKey::Interval), Some("3"));
        assert_eq!(set.get(RuleKey::Freq), Some("HOURLY"));
        assert_eq!(set.get(RuleKey::Count), None);
        assert_eq!(set.canonicalize().unwrap(), "FREQ=HOURLY;INTERVAL=3");
    }

    #[rstest]
    #[case("FREQ=DAILY;COUNT")]
    #[case("FREQ=DAILY;;COUNT=2")]
    #[case("FREQ=DAILY;;")]
    #[case(";")]
    fn test_key_set_parse_missing_equals(#[case] spec: &str) {
        assert!(matches!(RuleKeySet::parse(spec), Err(ScheduleError::Format(_))));
    }

    #[test]
    fn test_key_set_parse_trailing_separator() {
        let set = RuleKeySet::parse("FREQ=DAILY;COUNT=2;").unwrap();
        assert_eq!(set.get(RuleKey::Count), Some("2"));
        assert_eq!(set.canonicalize().unwrap(), "COUNT=2;FREQ=DAILY");
    }

    #[test]
    fn test_key_set_parse_empty_requires_freq() {
        let set = RuleKeySet::parse("").unwrap();
        assert!(set.as_map().is_empty());
        assert!(matches!(set.canonicalize(), Err(ScheduleError::Vocabulary(_))));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let set = RuleKeySet::parse("FREQ=DAILY;BYDAY=a=b").unwrap();
        assert_eq!(set.get(RuleKey::ByDay), Some("a=b"));
    }

    #[test]
    fn test_rule_key_round_trip() {
        for key in RuleKey::ALL {
            assert_eq!(key.as_str().parse::<RuleKey>().unwrap(), key);
        }
        assert!("freq".parse::<RuleKey>().is_err());
    }

    #[rstest]
    #[case("SECONDLY", 1)]
    #[case("MINUTELY", 60)]
    #[case("HOURLY", 3_600)]
    #[case("DAILY", 86_400)]
    #[case("WEEKLY", 604_800)]
    #[case("MONTHLY", 2_592_000)]
    #[case("YEARLY", 31_536_000)]
    fn test_frequency_steps(#[case] text: &str, #[case] seconds: i64) {
        assert_eq!(text.parse::<Frequency>().unwrap().step_seconds(), seconds);
    }

    #[test]
    fn test_frequency_is_case_sensitive() {
        assert!(matches!("daily".parse::<Frequency>(), Err(ScheduleError::Vocabulary(_))));
    }

    fn arb_rule() -> impl Strategy<Value = BTreeMap<String, String>> {
        let key = proptest::sample::select(RuleKey::ALL.to_vec()).prop_map(|k| k.as_str().to_string());
        (
            "[A-Z]{3,8}",
            proptest::collection::btree_map(key, "[A-Z0-9,+-]{1,12}", 0..6),
        )
            .prop_map(|(freq, mut pairs)| {
                pairs.insert("FREQ".to_string(), freq);
                pairs
            })
    }

    proptest! {
        #[test]
        fn prop_canonicalization_is_idempotent(pairs in arb_rule()) {
            let canonical = canonicalize_rrule(&pairs).unwrap();
            let reparsed = RuleKeySet::parse(&canonical).unwrap();
            prop_assert_eq!(reparsed.canonicalize().unwrap(), canonical);
        }
    }
}
