use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnNull, serde_as};

/// One attendance or behavior report for a lesson.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceEvent {
    #[serde_as(as = "DefaultOnNull")]
    pub student_guid: String,
    #[serde_as(as = "DefaultOnNull")]
    pub event_code: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub justified: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub lesson_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub reporter_guid: String,
    #[serde_as(as = "DefaultOnNull")]
    pub timestamp: String,
    #[serde_as(as = "DefaultOnNull")]
    pub group_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub lesson_type: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub lesson: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub lesson_date: String,
    #[serde_as(as = "DefaultOnNull")]
    pub lesson_reporter: String,
    #[serde_as(as = "DefaultOnNull")]
    pub achva_code: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub achva_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub achva_aval: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub justification_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub justification: String,
    #[serde_as(as = "DefaultOnNull")]
    pub reporter: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subject: String,
    pub justified_by: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(feature = "chrono")]
impl AttendanceEvent {
    pub fn timestamp(&self) -> Option<chrono::NaiveDateTime> {
        super::parse_portal_date(&self.timestamp)
    }

    pub fn lesson_date(&self) -> Option<chrono::NaiveDateTime> {
        super::parse_portal_date(&self.lesson_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn justified_by_is_optional() {
        let event: AttendanceEvent = serde_json::from_value(json!({
            "studentGuid": "st-1",
            "eventCode": 1,
            "justified": -1,
            "lessonId": 300,
            "groupId": 12,
            "lesson": 3,
            "lessonDate": "2024-02-01T00:00:00",
            "achvaName": "Late",
            "subject": "Math"
        }))
        .unwrap();

        assert_eq!(event.justified, -1);
        assert_eq!(event.achva_name, "Late");
        assert_eq!(event.justified_by, None);
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let events: Vec<AttendanceEvent> = serde_json::from_str(
            r#"[{"lessonId":300,"justification":null,"reporter":null,"justificationId":null,"justifiedBy":null}]"#,
        )
        .unwrap();

        assert_eq!(events[0].lesson_id, 300);
        assert!(events[0].justification.is_empty());
        assert!(events[0].reporter.is_empty());
        assert_eq!(events[0].justification_id, 0);
        assert_eq!(events[0].justified_by, None);
    }
}
