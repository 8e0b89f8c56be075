use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /validate-id`. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub user_id: String,
    pub image_base64: String,
}

impl ValidationRequest {
    pub fn new(user_id: impl Into<String>, image_base64: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            image_base64: image_base64.into(),
        }
    }
}

/// Verdict returned by the validation service.
///
/// Only `status`, `message` and `user_id` are guaranteed. Everything below the
/// top level may be missing or null and is modelled as an explicit `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: String,
    pub message: String,
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_validation: TextValidation,
    #[serde(default)]
    pub ocr_confidence: Option<f64>,
    #[serde(default)]
    pub image_classification: Option<ImageClassification>,
    #[serde(default)]
    pub validation_score: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub is_fake_based_on_ocr: Option<bool>,
}

/// Text-extraction checks. Flags are always present after decoding; anything
/// the service leaves out decodes as `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextValidation {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub user_id_match: bool,
    // The service sends the extracted name itself (or null); only its presence matters here.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub name_extracted: bool,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub college_found: bool,
    #[serde(default)]
    pub matched_college: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub face_photo_found: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageClassification {
    #[serde(default)]
    pub predicted_class: Option<String>,
    #[serde(default)]
    pub genuine_confidence: Option<f64>,
    #[serde(default)]
    pub template_similarity_score: Option<f64>,
    #[serde(default)]
    pub all_probabilities: Option<ClassProbabilities>,
}

/// Label → probability entries, kept in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassProbabilities(pub Vec<(String, Option<f64>)>);

impl ClassProbabilities {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.0.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for ClassProbabilities {
    fn from_iter<I: IntoIterator<Item = (L, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(l, v)| (l.into(), Some(v))).collect())
    }
}

impl Serialize for ClassProbabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(label, value)| (label, value)))
    }
}

impl<'de> Deserialize<'de> for ClassProbabilities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ClassProbabilities;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of class label to probability")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, value)) = map.next_entry::<String, Option<f64>>()? {
                    entries.push((label, value));
                }
                Ok(ClassProbabilities(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// `GET /version` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub last_updated: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[allow(dead_code)]
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(text)) => !text.trim().is_empty(),
        Some(Flag::Other(_)) | None => false,
    })
}
