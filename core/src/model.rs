use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub emotion: String,
    pub confidence: f64,
    pub all_probabilities: Probabilities,
    pub poetry: Vec<Poem>,
    /// Echo of the submitted text, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poetry_count: Option<u32>,
}

/// Emotion name to probability, in the order the backend sent them.
///
/// A plain `HashMap` would lose the key order, which the ranked bar list
/// relies on to break ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Probabilities(Vec<(String, f64)>);

impl Probabilities {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, p)| (name.as_str(), *p))
    }

    pub fn get(&self, emotion: &str) -> Option<f64> {
        self.iter().find(|(name, _)| *name == emotion).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Probabilities {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for Probabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, p) in &self.0 {
            map.serialize_entry(name, p)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Probabilities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = Probabilities;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of emotion names to probabilities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, p)) = access.next_entry::<String, f64>()? {
                    entries.push((name, p));
                }
                Ok(Probabilities(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Body of `GET /health`. Every field is optional; only the status code is
/// load-bearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub emotions: Vec<String>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub total_poems: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probabilities_keep_backend_order() {
        let body = r#"{"sad": 0.2, "joy": 0.2, "love": 0.6}"#;
        let probs: Probabilities = serde_json::from_str(body).unwrap();
        let names: Vec<&str> = probs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["sad", "joy", "love"]);
        assert_eq!(probs.get("love"), Some(0.6));
        assert_eq!(probs.get("anger"), None);
    }

    #[test]
    fn test_response_accepts_backend_echo_fields() {
        let body = json!({
            "text": "أنا سعيد",
            "emotion": "joy",
            "confidence": 0.91,
            "all_probabilities": {"joy": 0.91, "love": 0.06, "sad": 0.03},
            "poetry": [{"text": "بيت"}],
            "poetry_count": 1
        });
        let resp: AnalysisResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.emotion, "joy");
        assert_eq!(resp.poetry_count, Some(1));
        assert_eq!(resp.poetry[0].text, "بيت");
        assert_eq!(resp.all_probabilities.len(), 3);
    }

    #[test]
    fn test_response_without_echo_fields() {
        let body = json!({
            "emotion": "sad",
            "confidence": 0.5,
            "all_probabilities": {},
            "poetry": []
        });
        let resp: AnalysisResponse = serde_json::from_value(body).unwrap();
        assert!(resp.text.is_none());
        assert!(resp.all_probabilities.is_empty());
    }

    #[test]
    fn test_response_missing_poetry_is_rejected() {
        let body = json!({"emotion": "sad", "confidence": 0.5, "all_probabilities": {}});
        assert!(serde_json::from_value::<AnalysisResponse>(body).is_err());
    }

    #[test]
    fn test_health_status_tolerates_partial_body() {
        let health: HealthStatus = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert_eq!(health.status.as_deref(), Some("healthy"));
        assert!(health.emotions.is_empty());
    }
}
