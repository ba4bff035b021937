pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewStudent, Student, StudentChanges};
use crate::Error;

pub use postgres::PgStore;

/// Persistence for student records.
///
/// `excluding` on the lookup methods skips the record with that id, which is
/// how an update avoids conflicting with itself.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Student>, Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, Error>;

    /// Exact, case-sensitive email match.
    async fn find_by_email(
        &self,
        email: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<Student>, Error>;

    /// Case-insensitive match on the (first name, last name) pair.
    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<Student>, Error>;

    /// Inserts the student and returns the id the store generated for it.
    async fn insert(&self, student: NewStudent) -> Result<Uuid, Error>;

    /// Writes only the populated fields of `changes`. Returns the number of
    /// matched records.
    async fn update(&self, id: Uuid, changes: &StudentChanges) -> Result<u64, Error>;

    async fn delete(&self, id: Uuid) -> Result<u64, Error>;
}
