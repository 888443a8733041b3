use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnNull, serde_as};

/// One graded event for the student.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeEntry {
    #[serde_as(as = "DefaultOnNull")]
    pub id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub year: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub student_guid: String,
    #[serde_as(as = "DefaultOnNull")]
    pub grading_event_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub grade: f64,
    pub range_grade: Option<String>,
    pub textual_grade: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub rate: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub timestamp: String,
    #[serde_as(as = "DefaultOnNull")]
    pub teacher_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub group_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub group_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subject_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub group_level: String,
    #[serde_as(as = "DefaultOnNull")]
    pub event_date: String,
    #[serde_as(as = "DefaultOnNull")]
    pub grading_period: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub grading_event: String,
    #[serde_as(as = "DefaultOnNull")]
    pub grade_rate: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub grade_type_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub grade_type: String,

    /// Fields the portal sent that have no dedicated member.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(feature = "chrono")]
impl GradeEntry {
    pub fn timestamp(&self) -> Option<chrono::NaiveDateTime> {
        super::parse_portal_date(&self.timestamp)
    }

    pub fn event_date(&self) -> Option<chrono::NaiveDateTime> {
        super::parse_portal_date(&self.event_date)
    }
}
