use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnNull, serde_as};

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupTeacher {
    #[serde_as(as = "DefaultOnNull")]
    pub teacher_guid: String,
    #[serde_as(as = "DefaultOnNull")]
    pub teacher_name: String,
}

/// A course group the student is enrolled in. `group_id` joins against
/// [`GradeEntry::group_id`](crate::GradeEntry) and [`AttendanceEvent::group_id`](crate::AttendanceEvent).
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyGroup {
    #[serde_as(as = "DefaultOnNull")]
    pub group_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub group_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subject_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub group_level: String,
    #[serde_as(as = "DefaultOnNull")]
    pub group_teachers: Vec<GroupTeacher>,
    #[serde_as(as = "DefaultOnNull")]
    pub group_inactive_teachers: Vec<GroupTeacher>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
