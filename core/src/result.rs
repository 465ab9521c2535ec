//! Per-parse snapshot of matched parameters.

use serde::{Deserialize, Serialize};

use crate::spec::NameQuery;
use crate::{ParameterSpec, SpecId};

/// Occurrence count and captured values for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Parameter the entry belongs to.
    pub id: SpecId,
    /// Long spelling, if any.
    pub long: Option<String>,
    /// Short spelling, if any.
    pub short: Option<char>,
    /// Number of times the parameter appeared.
    pub count: usize,
    /// Captured argument values across all occurrences, in order.
    pub values: Vec<String>,
}

impl Occurrence {
    /// Returns `true` if the parameter appeared at least once.
    pub fn is_present(&self) -> bool {
        self.count > 0
    }

    fn matches(&self, query: NameQuery<'_>) -> bool {
        match query {
            NameQuery::Long(long) => self.long.as_deref() == Some(long),
            NameQuery::Short(short) => self.short == Some(short),
        }
    }
}

/// Outcome of one [`Parser::parse`](crate::Parser::parse) call.
///
/// Holds one entry per registered parameter, in registration order, including
/// parameters that never appeared. Values are owned copies of the tokens, so a
/// result can outlive the token vector it came from.
///
/// # Examples
///
/// ```
/// use flagtrie_core::{Param, Parser};
///
/// let mut parser = Parser::new();
/// parser.register(Param::new(Some("verbose"), Some('v'))).unwrap();
/// parser.register(Param::new(Some("files"), Some('f')).arity(1, 2)).unwrap();
///
/// parser.parse(&["prog", "-v", "--verbose", "-f", "a", "b"]).unwrap();
/// let result = parser.take_last_result().unwrap();
///
/// assert_eq!(result.count("v"), 2);
/// assert_eq!(result.count("verbose"), 2);
/// assert_eq!(result.values("files"), ["a", "b"]);
/// assert!(result.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    entries: Vec<Occurrence>,
}

impl ParseResult {
    /// Builds an empty snapshot covering every registered parameter.
    pub(crate) fn for_specs<'s>(specs: impl IntoIterator<Item = &'s ParameterSpec>) -> Self {
        let entries = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Occurrence {
                id: SpecId(index),
                long: spec.long().map(String::from),
                short: spec.short(),
                count: 0,
                values: Vec::new(),
            })
            .collect();
        Self { entries }
    }

    pub(crate) fn record_occurrence(&mut self, id: SpecId) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.count += 1;
        }
    }

    pub(crate) fn record_values(&mut self, id: SpecId, values: &[&str]) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.values.extend(values.iter().map(|value| value.to_string()));
        }
    }

    /// Looks up an entry by name.
    ///
    /// Names may be bare (`files`, `f`) or dashed (`--files`, `-f`). A
    /// one-character bare name only matches short spellings and a longer one
    /// only matches long spellings.
    pub fn get(&self, name: &str) -> Option<&Occurrence> {
        let query = NameQuery::from(name);
        self.entries.iter().find(|entry| entry.matches(query))
    }

    /// Looks up an entry by parameter id.
    pub fn by_id(&self, id: SpecId) -> Option<&Occurrence> {
        self.entries.get(id.0)
    }

    /// Number of occurrences, `0` for unknown names.
    pub fn count(&self, name: &str) -> usize {
        self.get(name).map_or(0, |entry| entry.count)
    }

    /// Captured values, empty for unknown names.
    pub fn values(&self, name: &str) -> &[String] {
        self.get(name)
            .map(|entry| entry.values.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if the named parameter appeared at least once.
    pub fn contains(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Iterates over all entries in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> {
        self.entries.iter()
    }

    /// Iterates over the entries of parameters that appeared.
    pub fn present(&self) -> impl Iterator<Item = &Occurrence> {
        self.entries.iter().filter(|entry| entry.is_present())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'r> IntoIterator for &'r ParseResult {
    type Item = &'r Occurrence;
    type IntoIter = std::slice::Iter<'r, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::Param;

    use super::*;

    fn sample() -> ParseResult {
        let files = Param::new(Some("files"), Some('f')).arity(1, 2);
        let license = Param::long("license");
        let short_only = Param::short('l');
        ParseResult::for_specs([files.spec(), license.spec(), short_only.spec()])
    }

    #[test]
    fn test_fresh_result_has_zero_counts() {
        let result = sample();

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|entry| entry.count == 0));
        assert!(result.iter().all(|entry| entry.values.is_empty()));
        assert_eq!(result.present().count(), 0);
    }

    #[test]
    fn test_records_accumulate() {
        let mut result = sample();
        result.record_occurrence(SpecId(0));
        result.record_values(SpecId(0), &["a", "b"]);
        result.record_occurrence(SpecId(0));
        result.record_values(SpecId(0), &["c"]);

        assert_eq!(result.count("files"), 2);
        assert_eq!(result.count("f"), 2);
        assert_eq!(result.values("-f"), ["a", "b", "c"]);
    }

    #[test]
    fn test_lookup_respects_name_length() {
        let result = sample();

        assert_eq!(result.get("l").map(|entry| entry.id), Some(SpecId(2)));
        assert_eq!(
            result.get("license").map(|entry| entry.id),
            Some(SpecId(1))
        );
        assert!(result.get("L").is_none());
        assert_eq!(result.count("nothing"), 0);
        assert!(result.values("nothing").is_empty());
    }

    #[test]
    fn test_serializes_entries() {
        let mut result = sample();
        result.record_occurrence(SpecId(1));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["entries"][1]["long"], "license");
        assert_eq!(json["entries"][1]["count"], 1);
    }
}
