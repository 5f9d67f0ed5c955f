//! Merge policy for a text file that already exists

use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// What to do with a file that was present before the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExistingFileStrategy {
    /// Append new content after the existing text
    Continue,

    /// Discard the existing text and write preamble and content
    Replace,

    /// Keep the existing file exactly as it is
    #[default]
    Leave,
}

impl ExistingFileStrategy {
    /// Option value as written in configuration
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Replace => "replace",
            Self::Leave => "leave",
        }
    }

    /// Parse an option value, ignoring case and surrounding whitespace
    ///
    /// Anything unrecognised is [`Self::Leave`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "continue" => Self::Continue,
            "replace" => Self::Replace,
            _ => Self::Leave,
        }
    }
}

impl Display for ExistingFileStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExistingFileStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl serde::Serialize for ExistingFileStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ExistingFileStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct StrategyVisitor;

        impl<'de> serde::de::Visitor<'de> for StrategyVisitor {
            type Value = ExistingFileStrategy;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("one of continue, replace, leave")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ExistingFileStrategy::parse_lenient(value))
            }

            fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ExistingFileStrategy::Leave)
            }

            fn visit_i64<E>(self, _value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ExistingFileStrategy::Leave)
            }

            fn visit_u64<E>(self, _value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ExistingFileStrategy::Leave)
            }

            fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ExistingFileStrategy::Leave)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ExistingFileStrategy::Leave)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(ExistingFileStrategy::Leave)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                while map
                    .next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?
                    .is_some()
                {}
                Ok(ExistingFileStrategy::Leave)
            }
        }

        deserializer.deserialize_any(StrategyVisitor)
    }
}
