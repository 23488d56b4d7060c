//! Country records as returned by the REST Countries v3.1 API.
//!
//! Every optional attribute is an `Option` so presence is decided once, at
//! decode time. Keys the explorer never displays are ignored.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: Option<Number>,
    #[serde(default)]
    pub area: Option<Number>,
    #[serde(default)]
    pub languages: Option<OrderedMap<String>>,
    #[serde(default)]
    pub currencies: Option<OrderedMap<Currency>>,
    #[serde(default)]
    pub timezones: Option<Vec<String>>,
    #[serde(default)]
    pub tld: Option<Vec<String>>,
    #[serde(default)]
    pub idd: Option<Idd>,
    #[serde(default)]
    pub car: Option<Car>,
    #[serde(default)]
    pub start_of_week: Option<String>,
    #[serde(default)]
    pub flags: Option<Flags>,
}

impl CountryRecord {
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// URL of the PNG rendition of the flag, when the API provides one.
    pub fn flag_png(&self) -> Option<&str> {
        self.flags.as_ref()?.png.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// International direct dialing prefix: `root` plus per-area `suffixes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Idd {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub suffixes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Car {
    #[serde(default)]
    pub side: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: Option<String>,
}

/// A JSON object decoded into its entries, keeping payload key order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        OrderedMap(iter.into_iter().collect())
    }
}

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for EntriesVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
