use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Category → amount mapping that remembers the order categories were added in.
///
/// Names are unique. Inserting an existing name overwrites its amount but keeps
/// its original position, so tables and charts follow the order the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseMap {
    entries: Vec<(String, Decimal)>,
}

impl ExpenseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a category. Returns the previous amount, if any.
    pub fn insert(&mut self, name: impl Into<String>, amount: Decimal) -> Option<Decimal> {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            let previous = entry.1;
            entry.1 = amount;
            return Some(previous);
        }
        self.entries.push((name, amount));
        None
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, amount)| *amount)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.entries.iter().map(|(n, a)| (n.as_str(), *a))
    }

    /// Sum of all amounts. An empty map totals zero. Saturates at the
    /// `Decimal` bounds; use [`ExpenseMap::checked_total`] to detect that.
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, (_, a)| acc.saturating_add(*a))
    }

    /// Sum of all amounts, or `None` if it does not fit in a `Decimal`.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, a)| acc.checked_add(*a))
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for ExpenseMap {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, amount) in iter {
            map.insert(name, amount);
        }
        map
    }
}

impl<S: Into<String>, const N: usize> From<[(S, Decimal); N]> for ExpenseMap {
    fn from(entries: [(S, Decimal); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for ExpenseMap {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, amount) in &self.entries {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

struct ExpenseMapVisitor;

impl<'de> Visitor<'de> for ExpenseMapVisitor {
    type Value = ExpenseMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category names to amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ExpenseMap::new();
        while let Some((name, amount)) = access.next_entry::<String, Decimal>()? {
            map.insert(name, amount);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ExpenseMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ExpenseMapVisitor)
    }
}
