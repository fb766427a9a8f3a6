use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{CollaboratorId, InteractionId};

const fn default_count() -> u32 {
    1
}

/// One logged visitor-desk encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: InteractionId,

    pub collaborator_id: CollaboratorId,

    pub nationality: String,

    /// Number of visitors, always >= 1 once persisted.
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_of_stay: Option<String>,

    pub timestamp: DateTime<Utc>,

    /// Absent on records written before creation times were tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Interaction {
    /// Brings a record read from storage or supplied by a caller in line
    /// with the persisted invariants.
    pub fn normalize(&mut self) {
        self.nationality = self.nationality.trim().to_string();
        if self.count == 0 {
            self.count = 1;
        }
        self.visit_reason = normalize_optional(self.visit_reason.as_deref());
        self.length_of_stay = normalize_optional(self.length_of_stay.as_deref());
    }
}

/// Reads a stored headcount without failing the load. Anything that is not
/// a positive whole number comes back as 0 for [`Interaction::normalize`] to
/// floor.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let whole = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0)
                .map(|f| f.min(f64::from(u32::MAX)) as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    Ok(whole.map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX)))
}

/// Coerces a raw headcount: anything <= 0 becomes 1.
#[must_use]
pub fn coerce_count(raw: i64) -> u32 {
    if raw <= 0 {
        1
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

/// Trims optional free text and maps empty input to `None`.
#[must_use]
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_count_floors_at_one() {
        assert_eq!(coerce_count(0), 1);
        assert_eq!(coerce_count(-4), 1);
        assert_eq!(coerce_count(7), 7);
    }

    #[test]
    fn normalize_optional_drops_blank_text() {
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(None), None);
        assert_eq!(
            normalize_optional(Some(" Gastronomia ")),
            Some("Gastronomia".to_string())
        );
    }

    #[test]
    fn deserializes_legacy_record_without_count_or_created_at() {
        let json = r#"{
            "id": "int_1",
            "collaboratorId": "colab_1",
            "nationality": "França",
            "timestamp": "2024-05-03T10:15:00.000Z",
            "visitReason": ""
        }"#;

        let mut i: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(i.count, 1);
        assert!(i.created_at.is_none());

        i.normalize();
        assert_eq!(i.visit_reason, None);
    }

    #[test]
    fn malformed_stored_counts_are_floored_to_one() {
        for (raw, expected) in [
            ("null", 1),
            ("-3", 1),
            ("0", 1),
            ("2.5", 1),
            ("2.0", 2),
            ("\"4\"", 4),
            ("\"many\"", 1),
            ("true", 1),
        ] {
            let json = format!(
                r#"{{"id":"int_1","collaboratorId":"colab_1","nationality":"Itália",
                    "count":{raw},"timestamp":"2024-05-03T10:15:00Z"}}"#
            );
            let mut i: Interaction = serde_json::from_str(&json).unwrap();
            i.normalize();
            assert_eq!(i.count, expected, "count {raw}");
        }
    }

    #[test]
    fn serializes_with_camel_case_and_skips_absent_fields() {
        let i = Interaction {
            id: InteractionId::new("int_1"),
            collaborator_id: CollaboratorId::new("colab_1"),
            nationality: "Espanha".to_string(),
            count: 2,
            visit_reason: None,
            length_of_stay: Some("2 dias".to_string()),
            timestamp: "2024-05-03T10:15:00Z".parse().unwrap(),
            created_at: None,
        };

        let json = serde_json::to_string(&i).unwrap();
        assert!(json.contains("\"collaboratorId\":\"colab_1\""));
        assert!(json.contains("\"lengthOfStay\":\"2 dias\""));
        assert!(!json.contains("visitReason"));
        assert!(!json.contains("createdAt"));
    }
}
