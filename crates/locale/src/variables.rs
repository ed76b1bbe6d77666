//! Case-insensitive variable map passed to each translation

use std::collections::HashMap;

/// Variables available to placeholders for a single translation.
///
/// Names are matched without regard to case. A variable may be present with
/// an explicit null value, which is distinct from being absent: absent names
/// fall through to locale node lookup, null names do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, Option<String>>,
}

impl Variables {
    /// Create an empty variable map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(name.as_ref().to_lowercase(), Some(value.into()));
    }

    /// Set a variable to an explicit null.
    pub fn insert_null(&mut self, name: impl AsRef<str>) {
        self.values.insert(name.as_ref().to_lowercase(), None);
    }

    /// Remove a variable.
    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.values.remove(&name.to_lowercase())
    }

    /// Look up a variable.
    ///
    /// The outer `Option` tells whether the name is present at all, the inner
    /// one whether its value is null.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.values
            .get(&name.to_lowercase())
            .map(|value| value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(lowercased name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Copy every variable of `other` into this map, overwriting clashes.
    pub fn extend(&mut self, other: &Variables) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Self::new();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let vars = Variables::new().with("Player", "Steve");

        assert_eq!(vars.get("player"), Some(Some("Steve")));
        assert_eq!(vars.get("PLAYER"), Some(Some("Steve")));
        assert!(vars.contains("pLaYeR"));
        assert_eq!(vars.get("sender"), None);
    }

    #[test]
    fn test_null_is_distinct_from_absent() {
        let mut vars = Variables::new();
        vars.insert_null("reason");

        assert_eq!(vars.get("reason"), Some(None));
        assert_eq!(vars.get("missing"), None);
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_from_iter_and_extend() {
        let mut vars: Variables = [("a", "1"), ("B", "2")].into_iter().collect();
        let other = Variables::new().with("b", "3").with("c", "4");
        vars.extend(&other);

        assert_eq!(vars.get("a"), Some(Some("1")));
        assert_eq!(vars.get("b"), Some(Some("3")));
        assert_eq!(vars.get("c"), Some(Some("4")));
        assert_eq!(vars.remove("A"), Some(Some("1".to_string())));
        assert_eq!(vars.len(), 2);
    }
}
