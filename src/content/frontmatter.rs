//! Front-matter parsing
//!
//! A content file may open with a YAML block fenced by `---` lines. The
//! block is split off the body here and deserialized into one of the typed
//! schemas below; turning a schema into a defaulted record is the job of the
//! record modules.

use serde::de::{self, DeserializeOwned, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Visitor accepting any YAML scalar as a string.
///
/// Authors write `date: 2024` or `title: 1984` without quotes; those should
/// not make the whole file unreadable.
struct ScalarString;

impl<'de> Visitor<'de> for ScalarString {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarString).map(Scalar)
    }
}

/// Optional scalar field, `~` and missing both mean `None`
fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| s.0))
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Option<Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(vec![value]))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Scalar>()? {
                vec.push(item.0);
            }
            Ok(Some(vec))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Frontmatter of a file under the projects directory
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFrontMatter {
    #[serde(deserialize_with = "optional_scalar")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub featured: Option<bool>,
    pub order: Option<i64>,
    #[serde(deserialize_with = "optional_scalar")]
    pub date: Option<String>,
    pub figma_link: Option<String>,
    pub mvp_link: Option<String>,
    pub slides: Option<u32>,

    /// Keys outside the schema, kept only so they can be reported
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Frontmatter of a file under the knowledge directory
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostFrontMatter {
    #[serde(deserialize_with = "optional_scalar")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub title: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Frontmatter of a file under the writing directory
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WritingFrontMatter {
    #[serde(deserialize_with = "optional_scalar")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub title: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Split a file into its raw YAML block and body.
///
/// Returns `None` for the YAML when the file has no fenced block, in which
/// case the body is the whole (left-trimmed) file.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let rest = match content.split_once('\n') {
        Some((first, rest)) if first.trim_end() == "---" => rest,
        _ => return (None, content),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);

            if !looks_like_yaml(yaml) {
                // A thematic break at the top of a note, not metadata
                return (None, content);
            }
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // No closing ---, treat as no front-matter
    (None, content)
}

/// Parse the frontmatter of `content` into schema `T`, returning it with the body.
///
/// Files without frontmatter get `T::default()`.
pub fn parse<T>(content: &str) -> Result<(T, &str), serde_yaml::Error>
where
    T: DeserializeOwned + Default,
{
    match split(content) {
        (Some(yaml), body) if !yaml.trim().is_empty() => Ok((serde_yaml::from_str(yaml)?, body)),
        (_, body) => Ok((T::default(), body)),
    }
}

pub(crate) fn log_unknown_keys(path: &Path, extra: &BTreeMap<String, serde_yaml::Value>) {
    if !extra.is_empty() {
        tracing::debug!(
            "Ignoring unknown frontmatter keys {:?} in {:?}",
            extra.keys().collect::<Vec<_>>(),
            path
        );
    }
}

/// An empty block, comments only, or at least one `key:` line.
fn looks_like_yaml(yaml: &str) -> bool {
    let mut lines = yaml
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .peekable();

    if lines.peek().is_none() {
        return true;
    }

    lines.any(|line| match line.split_once(':') {
        Some((key, value)) => {
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                && (value.is_empty() || value.starts_with(' '))
        }
        None => false,
    })
}
