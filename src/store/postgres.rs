use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::StudentStore;
use crate::models::{NewStudent, Student, StudentChanges};
use crate::Error;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS students (
        id UUID PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        age INTEGER NOT NULL,
        gender TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS students_email_key ON students (email)",
    "CREATE UNIQUE INDEX IF NOT EXISTS students_name_key
        ON students (lower(first_name), lower(last_name))",
];

#[derive(Debug, Clone)]
pub struct PgStore {
    pg: PgPool,
}

impl PgStore {
    /// Opens the pool and makes sure the `students` table exists.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pg = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .context("Could not connect to the database")?;
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pg)
                .await
                .context("Could not create the students table")?;
        }
        Ok(Self { pg })
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn all(&self) -> Result<Vec<Student>, Error> {
        let students = sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY created_at")
            .fetch_all(&self.pg)
            .await?;
        Ok(students)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, Error> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pg)
            .await?;
        Ok(student)
    }

    async fn find_by_email(
        &self,
        email: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<Student>, Error> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2) LIMIT 1",
        )
        .bind(email)
        .bind(excluding)
        .fetch_optional(&self.pg)
        .await?;
        Ok(student)
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<Student>, Error> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students
             WHERE lower(first_name) = lower($1) AND lower(last_name) = lower($2)
               AND ($3::uuid IS NULL OR id <> $3)
             LIMIT 1",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(excluding)
        .fetch_optional(&self.pg)
        .await?;
        Ok(student)
    }

    async fn insert(&self, student: NewStudent) -> Result<Uuid, Error> {
        let id = Uuid::new_v4();
        let res = sqlx::query("INSERT INTO students VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)")
            .bind(id)
            .bind(student.first_name)
            .bind(student.last_name)
            .bind(student.age)
            .bind(student.gender.as_str())
            .bind(student.phone)
            .bind(student.email)
            .bind(student.password_hash)
            .bind(Utc::now())
            .execute(&self.pg)
            .await?;

        if res.rows_affected() < 1 {
            return Err(Error::InternalError {
                kind: "DatabaseError",
                message: "Could not save student to database!".to_string(),
            });
        }
        Ok(id)
    }

    async fn update(&self, id: Uuid, changes: &StudentChanges) -> Result<u64, Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE students SET ");
        {
            let mut set = query.separated(", ");
            if let Some(first_name) = &changes.first_name {
                set.push("first_name = ").push_bind_unseparated(first_name.as_str());
            }
            if let Some(last_name) = &changes.last_name {
                set.push("last_name = ").push_bind_unseparated(last_name.as_str());
            }
            if let Some(age) = changes.age {
                set.push("age = ").push_bind_unseparated(age);
            }
            if let Some(gender) = changes.gender {
                set.push("gender = ").push_bind_unseparated(gender.as_str());
            }
            if let Some(phone) = &changes.phone {
                set.push("phone = ").push_bind_unseparated(phone.as_str());
            }
            if let Some(email) = &changes.email {
                set.push("email = ").push_bind_unseparated(email.as_str());
            }
            if let Some(password_hash) = &changes.password_hash {
                set.push("password_hash = ")
                    .push_bind_unseparated(password_hash.as_str());
            }
        }
        query.push(" WHERE id = ").push_bind(id);

        let res = query.build().execute(&self.pg).await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, Error> {
        let res = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pg)
            .await?;
        Ok(res.rows_affected())
    }
}
