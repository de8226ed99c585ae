#[cfg(feature = "serde")]
use std::{fmt, marker::PhantomData};

#[cfg(feature = "serde")]
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

#[cfg(feature = "serde")]
use crate::BreakpointSet;
use crate::breakpoint::{Breakpoint, BreakpointsDefinition};

/// Library-wide settings that stylesheet and observer setup read from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LatticeConfig {
    pub breakpoints: BreakpointsDefinition<Breakpoint>,
    /// Prepended to every generated class name.
    pub namespace_prefix: String,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointsDefinition::default(),
            namespace_prefix: "nd_".to_string(),
        }
    }
}

#[cfg(feature = "serde")]
impl LatticeConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(feature = "serde")]
impl<B: BreakpointSet> Serialize for BreakpointsDefinition<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (breakpoint, width) in self.iter() {
            map.serialize_entry(breakpoint.name(), &width)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct DefinitionVisitor<B>(PhantomData<B>);

#[cfg(feature = "serde")]
impl<'de, B: BreakpointSet> Visitor<'de> for DefinitionVisitor<B> {
    type Value = BreakpointsDefinition<B>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from breakpoint name to minimum width")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(B::ALL.len()));
        while let Some((name, width)) = access.next_entry::<String, f64>()? {
            let breakpoint = B::from_name(&name).ok_or_else(|| {
                let expected: Vec<&str> = B::ALL.iter().map(|bp| bp.name()).collect();
                de::Error::custom(format!(
                    "unknown breakpoint \"{name}\", expected one of {}",
                    expected.join(", ")
                ))
            })?;
            entries.push((breakpoint, width));
        }
        BreakpointsDefinition::new(entries).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de, B: BreakpointSet> Deserialize<'de> for BreakpointsDefinition<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DefinitionVisitor(PhantomData))
    }
}
