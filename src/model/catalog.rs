use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,
    pub name: String,
    /// short code, e.g. "SEM1"
    pub code: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub code: String,

    /// must reference an existing semester, checked by the backend only
    pub semester_id: String,

    /// embedded by the backend on list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<Semester>,

    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSemesterRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub semester_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subject_reads_denormalized_semester() {
        let subject: Subject = serde_json::from_value(json!({
            "id": "sub-1",
            "name": "Mathematics",
            "code": "MATH101",
            "semesterId": "sem-1",
            "semester": {"id": "sem-1", "name": "First", "code": "SEM1", "createdAt": "2024-01-01"},
            "createdAt": "2024-01-02",
            "updatedAt": "2024-01-03"
        }))
        .unwrap();

        assert_eq!(subject.semester_id, "sem-1");
        let semester: Semester = subject.semester.unwrap();
        assert_eq!(semester.code, "SEM1");
        assert_eq!(semester.created_at, "2024-01-01");
    }

    #[test]
    fn subject_without_semester_serializes_without_key() {
        let subject = Subject {
            id: "sub-1".into(),
            name: "Physics".into(),
            code: "PHY101".into(),
            semester_id: "sem-2".into(),
            semester: None,
            created_at: "2024-01-02".into(),
            updated_at: "2024-01-02".into(),
        };
        let value = serde_json::to_value(&subject).unwrap();
        assert!(value.get("semester").is_none());
        assert_eq!(value["semesterId"], "sem-2");
    }
}
