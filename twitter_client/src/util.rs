use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// `serde_with` adapter for the REST API date format, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
/// Cached records are written back in the same format.
pub struct TwitterDate;

impl SerializeAs<DateTime<Utc>> for TwitterDate {
    fn serialize_as<S>(source: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&source.format(TWITTER_DATE_FORMAT))
    }
}

impl<'de> DeserializeAs<'de, DateTime<Utc>> for TwitterDate {
    fn deserialize_as<D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&s, TWITTER_DATE_FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
