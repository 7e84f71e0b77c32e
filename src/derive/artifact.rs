use serde::Serialize;
use std::collections::BTreeMap;

/// Key/value content of one configuration file. Keys are unique and kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyValueSet(BTreeMap<String, String>);

impl KeyValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One host per line, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostList(Vec<String>);

impl HostList {
    pub fn new(hosts: Vec<String>) -> Self {
        Self(hosts)
    }

    pub fn single(host: &str) -> Self {
        Self(vec![host.to_string()])
    }

    /// Lines joined by `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.0.join("\n")
    }
}

/// Shell `export` lines prepended to an environment script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvPatch(Vec<(String, String)>);

impl EnvPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `value` is written as-is, so callers add quotes where needed.
    pub fn export(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn lines(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|(name, value)| format!("export {name}={value}"))
            .collect()
    }
}
