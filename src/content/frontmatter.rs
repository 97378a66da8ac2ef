//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors raised while splitting and decoding a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front-matter block opened with `{0}` is never closed")]
    Unterminated(&'static str),
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A calendar date with optional month and day precision.
///
/// Resume dates are usually written as `2021-06` or just `2019`; ordering
/// compares year, then month, then day, with a missing component sorting
/// before any present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartialDate {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl PartialDate {
    /// Parse `YYYY`, `YYYY-MM` or `YYYY-MM-DD` (`/` separators also accepted)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        // Tolerate full timestamps by dropping the time portion
        let s = s.split(['T', ' ']).next().unwrap_or(s);
        let mut parts = s.split(['-', '/']);

        let year: i32 = parts.next()?.parse().ok()?;
        let month = match parts.next() {
            Some(m) => Some(m.parse::<u32>().ok().filter(|m| (1..=12).contains(m))?),
            None => None,
        };
        let day = match parts.next() {
            Some(d) => Some(d.parse::<u32>().ok().filter(|d| (1..=31).contains(d))?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }

        if let (Some(m), Some(d)) = (month, day) {
            chrono::NaiveDate::from_ymd_opt(year, m, d)?;
        }

        Some(Self { year, month, day })
    }

    /// Human readable form: `2019`, `Jun 2021` or `Jun 4, 2021`
    pub fn display(&self) -> String {
        match (self.month, self.day) {
            (Some(m), Some(d)) => format!("{} {}, {}", MONTHS[m as usize - 1], d, self.year),
            (Some(m), None) => format!("{} {}", MONTHS[m as usize - 1], self.year),
            _ => self.year.to_string(),
        }
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(m) = self.month {
            write!(f, "-{:02}", m)?;
        }
        if let Some(d) = self.day {
            write!(f, "-{:02}", d)?;
        }
        Ok(())
    }
}

impl Serialize for PartialDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PartialDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};

        struct PartialDateVisitor;

        impl<'de> Visitor<'de> for PartialDateVisitor {
            type Value = PartialDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a date like 2021, 2021-06 or 2021-06-04")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                PartialDate::parse(value)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                let year = i32::try_from(value)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))?;
                Ok(PartialDate {
                    year,
                    month: None,
                    day: None,
                })
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                let year = i32::try_from(value)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))?;
                Ok(PartialDate {
                    year,
                    month: None,
                    day: None,
                })
            }
        }

        deserializer.deserialize_any(PartialDateVisitor)
    }
}

/// Accepts a date, or a "still ongoing" marker (`present`, `current`, `now`, empty)
fn optional_end<'de, D>(deserializer: D) -> Result<Option<PartialDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum End {
        Date(PartialDate),
        Marker(String),
    }

    match Option::<End>::deserialize(deserializer)? {
        None => Ok(None),
        Some(End::Date(date)) => Ok(Some(date)),
        Some(End::Marker(marker)) => match marker.trim().to_ascii_lowercase().as_str() {
            "" | "present" | "current" | "now" | "ongoing" => Ok(None),
            other => Err(serde::de::Error::custom(format!(
                "invalid end date {:?}",
                other
            ))),
        },
    }
}

/// Start and optional end of an engagement; no end means ongoing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: PartialDate,
    #[serde(default, deserialize_with = "optional_end")]
    pub end: Option<PartialDate>,
}

impl DateRange {
    /// `Jan 2022 – Present`, or a single date when start and end coincide
    pub fn display(&self) -> String {
        match &self.end {
            Some(end) if *end == self.start => self.start.display(),
            Some(end) => format!("{} – {}", self.start.display(), end.display()),
            None => format!("{} – Present", self.start.display()),
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }
}

/// Front-matter data from a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub featured: bool,
    pub dates: Option<DateRange>,
    /// Single-day shorthand for `dates`
    pub date: Option<PartialDate>,
    /// Explicit position within the category; lower sorts first
    pub order: Option<i64>,
    /// Overrides the slug derived from the file name
    pub slug: Option<String>,

    pub organization: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub repo: Option<String>,
    pub image: Option<String>,

    /// Additional custom fields, in authoring order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or a leading object)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        // An empty block closes immediately
        let (yaml_content, remaining) = if let Some(after) = rest.strip_prefix("---") {
            ("", after)
        } else {
            let end_pos = rest
                .find("\n---")
                .ok_or(FrontMatterError::Unterminated("---"))?;
            (&rest[..end_pos], &rest[end_pos + 4..])
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest
                .find(";;;")
                .ok_or(FrontMatterError::Unterminated(";;;"))?;
            let json_content = &rest[..end_pos];
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
            let fm: FrontMatter = serde_json::from_str(json_content)?;
            return Ok((fm, remaining));
        }

        // Leading JSON object: find the matching closing brace
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut end_pos = None;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end_pos = end_pos.ok_or(FrontMatterError::Unterminated("{"))?;
        let fm: FrontMatter = serde_json::from_str(&content[..end_pos])?;
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);
        Ok((fm, remaining))
    }

    /// The effective date range: `dates`, or `date` as a single-day range
    pub fn date_range(&self) -> Option<DateRange> {
        self.dates.clone().or_else(|| {
            self.date.map(|d| DateRange {
                start: d,
                end: Some(d),
            })
        })
    }

    /// Start of the effective date range
    pub fn start(&self) -> Option<PartialDate> {
        self.dates.as_ref().map(|r| r.start).or(self.date)
    }
}

/// Newest first; undated entries sort after dated ones
pub fn newest_first(a: Option<PartialDate>, b: Option<PartialDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
