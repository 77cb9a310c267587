//! Rendering of [`RequestOption`] sequences for transport.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::RequestOption;

/// Multi-valued query parameters, ready to be URL-encoded.
///
/// Keys are kept sorted; values for one key keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues(BTreeMap<String, Vec<String>>);

impl QueryValues {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values of `key`.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flattened `(key, value)` pairs, one per value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = QueryValues::new();
        for (k, v) in iter {
            values.add(k, v);
        }
        values
    }
}

/// Compile options into query parameters.
///
/// `None` entries are skipped. Repeated keys accumulate values.
///
/// ```
/// use stream_chat::options::{compile_query, RequestOption};
///
/// let query = compile_query([
///     Some(RequestOption::limit(10)),
///     None,
///     Some(RequestOption::offset(20)),
/// ]);
/// assert_eq!(query.get("limit"), Some("10"));
/// assert_eq!(query.get("offset"), Some("20"));
/// ```
pub fn compile_query<I, O>(opts: I) -> QueryValues
where
    I: IntoIterator<Item = O>,
    O: Into<Option<RequestOption>>,
{
    let mut values = QueryValues::new();
    for opt in opts {
        let opt: Option<RequestOption> = opt.into();
        if let Some(opt) = opt {
            values.add(opt.key(), opt.render());
        }
    }
    values
}

/// Compile options into a flat map suitable for a JSON body.
///
/// `None` entries are skipped. Every value is rendered as a JSON string;
/// the last option for a key wins.
pub fn compile_map<I, O>(opts: I) -> Map<String, Value>
where
    I: IntoIterator<Item = O>,
    O: Into<Option<RequestOption>>,
{
    let mut map = Map::new();
    for opt in opts {
        let opt: Option<RequestOption> = opt.into();
        if let Some(opt) = opt {
            map.insert(opt.key().to_string(), Value::String(opt.render()));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_sequences() {
        assert!(compile_query(Vec::<RequestOption>::new()).is_empty());
        assert!(compile_map(Vec::<RequestOption>::new()).is_empty());
        assert!(compile_query([None::<RequestOption>, None]).is_empty());
    }

    #[test]
    fn test_none_entries_are_skipped() {
        let a = RequestOption::ban_reason("spam");
        let b = RequestOption::timeout(Duration::from_secs(30));

        assert_eq!(
            compile_query([Some(a.clone()), None, Some(b.clone())]),
            compile_query([a.clone(), b.clone()])
        );
        assert_eq!(
            compile_map([Some(a.clone()), None, Some(b.clone())]),
            compile_map([a, b])
        );
    }

    #[test]
    fn test_query_stringification() {
        let query = compile_query([
            RequestOption::raw("q", "a b&c"),
            RequestOption::limit(25),
            RequestOption::hard_delete(),
        ]);

        assert_eq!(query.get("q"), Some("a b&c"));
        assert_eq!(query.get("limit"), Some("25"));
        assert_eq!(query.get("hard_delete"), Some("true"));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_query_repeated_keys_accumulate() {
        let query = compile_query([
            RequestOption::raw("target_ids", "a"),
            RequestOption::raw("target_ids", "b"),
        ]);

        assert_eq!(query.get_all("target_ids"), ["a", "b"]);
        let pairs: Vec<_> = query.pairs().collect();
        assert_eq!(pairs, vec![("target_ids", "a"), ("target_ids", "b")]);
    }

    #[test]
    fn test_map_last_value_wins() {
        let map = compile_map([RequestOption::limit(1), RequestOption::limit(2)]);

        assert_eq!(map.len(), 1);
        assert_eq!(map["limit"], Value::String("2".into()));
    }

    #[test]
    fn test_set_replaces_values() {
        let mut query: QueryValues = [("user_id", "a"), ("user_id", "b")].into_iter().collect();
        query.set("user_id", "c");
        assert_eq!(query.get_all("user_id"), ["c"]);
        assert!(query.get_all("missing").is_empty());
    }
}
