use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::StudentStore;
use crate::models::{NewStudent, Student, StudentChanges};
use crate::Error;

/// Vec-backed store for tests. Mirrors the unique indexes of the Postgres
/// schema so conflicts surface the same way.
#[derive(Debug, Default)]
pub struct MemoryStore {
    students: Mutex<Vec<Student>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> Vec<Student> {
        self.students.lock().unwrap().clone()
    }
}

fn same_name(student: &Student, first_name: &str, last_name: &str) -> bool {
    student.first_name.to_lowercase() == first_name.to_lowercase()
        && student.last_name.to_lowercase() == last_name.to_lowercase()
}

fn conflict() -> Error {
    Error::exists("Student with provided email/name already exists.")
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn all(&self) -> Result<Vec<Student>, Error> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, Error> {
        let students = self.students.lock().unwrap();
        Ok(students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<Student>, Error> {
        let students = self.students.lock().unwrap();
        Ok(students
            .iter()
            .filter(|s| Some(s.id) != excluding)
            .find(|s| s.email == email)
            .cloned())
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<Student>, Error> {
        let students = self.students.lock().unwrap();
        Ok(students
            .iter()
            .filter(|s| Some(s.id) != excluding)
            .find(|s| same_name(s, first_name, last_name))
            .cloned())
    }

    async fn insert(&self, student: NewStudent) -> Result<Uuid, Error> {
        let mut students = self.students.lock().unwrap();
        if students.iter().any(|s| {
            s.email == student.email || same_name(s, &student.first_name, &student.last_name)
        }) {
            return Err(conflict());
        }
        let id = Uuid::new_v4();
        students.push(Student {
            id,
            first_name: student.first_name,
            last_name: student.last_name,
            age: student.age,
            gender: student.gender.as_str().to_string(),
            phone: student.phone,
            email: student.email,
            password_hash: student.password_hash,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn update(&self, id: Uuid, changes: &StudentChanges) -> Result<u64, Error> {
        let mut students = self.students.lock().unwrap();
        let Some(student) = students.iter_mut().find(|s| s.id == id) else {
            return Ok(0);
        };
        if let Some(first_name) = &changes.first_name {
            student.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            student.last_name = last_name.clone();
        }
        if let Some(age) = changes.age {
            student.age = age;
        }
        if let Some(gender) = changes.gender {
            student.gender = gender.as_str().to_string();
        }
        if let Some(phone) = &changes.phone {
            student.phone = phone.clone();
        }
        if let Some(email) = &changes.email {
            student.email = email.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            student.password_hash = password_hash.clone();
        }
        Ok(1)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, Error> {
        let mut students = self.students.lock().unwrap();
        let before = students.len();
        students.retain(|s| s.id != id);
        Ok((before - students.len()) as u64)
    }
}

/// A store whose every call fails the way a lost database connection does.
#[derive(Debug, Default)]
pub struct Unreachable;

pub fn lost_connection() -> Error {
    Error::InternalError {
        kind: "DatabaseError",
        message: "connection refused".into(),
    }
}

#[async_trait]
impl StudentStore for Unreachable {
    async fn all(&self) -> Result<Vec<Student>, Error> {
        Err(lost_connection())
    }

    async fn find_by_id(&self, _: Uuid) -> Result<Option<Student>, Error> {
        Err(lost_connection())
    }

    async fn find_by_email(&self, _: &str, _: Option<Uuid>) -> Result<Option<Student>, Error> {
        Err(lost_connection())
    }

    async fn find_by_name(
        &self,
        _: &str,
        _: &str,
        _: Option<Uuid>,
    ) -> Result<Option<Student>, Error> {
        Err(lost_connection())
    }

    async fn insert(&self, _: NewStudent) -> Result<Uuid, Error> {
        Err(lost_connection())
    }

    async fn update(&self, _: Uuid, _: &StudentChanges) -> Result<u64, Error> {
        Err(lost_connection())
    }

    async fn delete(&self, _: Uuid) -> Result<u64, Error> {
        Err(lost_connection())
    }
}
