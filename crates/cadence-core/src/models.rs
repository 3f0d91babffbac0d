use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::timestamp::format_utc;

/// A persisted reporting schedule, as handed over by the storage layer.
///
/// All timestamps are text in the forms accepted by [`crate::timestamp`];
/// nothing is parsed until the schedule is validated or expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingSchedule {
    /// `KEY=value;...` recurrence rule.
    pub schedule_spec: String,
    /// Anchor, local-naive `YYYY-MM-DDTHH:MM:SS`.
    #[serde(alias = "schedule_dtstart_local")]
    pub dtstart_local: String,
    /// IANA-shaped zone name, checked for syntax only.
    pub timezone: String,
    /// Explicit additional occurrences, local-naive.
    #[serde(default, alias = "schedule_rdates_local")]
    pub rdates_local: Vec<String>,
    /// Explicit excluded occurrences, local-naive.
    #[serde(default, alias = "schedule_exdates_local")]
    pub exdates_local: Vec<String>,
}

impl ReportingSchedule {
    pub fn new(
        schedule_spec: impl Into<String>,
        dtstart_local: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            schedule_spec: schedule_spec.into(),
            dtstart_local: dtstart_local.into(),
            timezone: timezone.into(),
            rdates_local: Vec::new(),
            exdates_local: Vec::new(),
        }
    }

    pub fn with_rdates<I, S>(mut self, rdates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rdates_local = rdates.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exdates<I, S>(mut self, exdates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exdates_local = exdates.into_iter().map(Into::into).collect();
        self
    }
}

/// Future occurrences of a schedule, ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceSet {
    instants: BTreeSet<DateTime<Utc>>,
}

impl OccurrenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, instant: DateTime<Utc>) -> bool {
        self.instants.insert(instant)
    }

    pub(crate) fn remove(&mut self, instant: &DateTime<Utc>) -> bool {
        self.instants.remove(instant)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Earliest occurrence, if any.
    pub fn first(&self) -> Option<DateTime<Utc>> {
        self.instants.first().copied()
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.instants.contains(instant)
    }

    pub fn iter(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.instants.iter().copied()
    }

    /// UTC-form strings in ascending order.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(format_utc).collect()
    }
}

impl Serialize for OccurrenceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(format_utc))
    }
}

impl<'a> IntoIterator for &'a OccurrenceSet {
    type Item = DateTime<Utc>;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, DateTime<Utc>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.instants.iter().copied()
    }
}
