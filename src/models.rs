use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A stored student row. Holds the password hash, so it never leaves the
/// process; callers get a [`StudentInfo`] instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Student> for StudentInfo {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            age: student.age,
            gender: student.gender,
            phone: student.phone,
            email: student.email,
            created_at: student.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
    Others,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
            Gender::Others => "Others",
        }
    }
}

/// Signup body. Every field is optional on the wire so that a missing one is
/// answered with a validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// Partial update body. `None` means the field was absent, `Some(None)` means
/// it was sent as an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudent {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A fully validated student, ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
}

/// The sparse set of columns an update writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_body_tells_absent_from_null() {
        let update: UpdateStudent =
            serde_json::from_value(json!({"first_name": null, "age": 30, "email": ""})).unwrap();
        assert_eq!(update.first_name, Some(None));
        assert_eq!(update.last_name, None);
        assert_eq!(update.age, Some(Some(30)));
        assert_eq!(update.email, Some(Some(String::new())));
        assert_eq!(update.phone, None);
    }

    #[test]
    fn student_info_has_no_hash() {
        let student = Student {
            id: Uuid::new_v4(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            age: 30,
            gender: "F".into(),
            phone: "9812345670".into(),
            email: "ann@x.com".into(),
            password_hash: "$pbkdf2-sha256$secret".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(StudentInfo::from(student)).unwrap();
        assert!(value.get("password_hash").is_none());
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ann@x.com");
    }

    #[test]
    fn empty_changes() {
        assert!(StudentChanges::default().is_empty());
        let changes = StudentChanges {
            age: Some(20),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
