use std::sync::Arc;

use uuid::Uuid;

use crate::auth::hash_password;
use crate::models::{NewStudent, SignupRequest, StudentInfo, UpdateStudent};
use crate::store::StudentStore;
use crate::update;
use crate::validation::{
    valid_age, valid_email, valid_gender, valid_name, valid_password, valid_phone,
};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Unchanged,
}

/// Student operations over an explicitly supplied store.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

fn parse_id(id: &str) -> Result<Uuid, Error> {
    Ok(Uuid::parse_str(id)?)
}

fn required(field: Option<String>) -> Result<String, Error> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::invalid("All fields are required."))
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<Uuid, Error> {
        let first_name = required(request.first_name)?;
        let last_name = required(request.last_name)?;
        let gender = required(request.gender)?;
        let age = request
            .age
            .filter(|age| *age != 0)
            .ok_or_else(|| Error::invalid("All fields are required."))?;
        let email = required(request.email)?;
        let phone = required(request.phone)?;
        let password = required(request.password)?;

        valid_age(age)?;
        let gender = valid_gender(&gender)?;
        valid_name(&first_name)?;
        valid_name(&last_name)?;
        valid_phone(&phone)?;
        valid_email(&email)?;

        if self.store.find_by_email(&email, None).await?.is_some() {
            return Err(Error::exists("Email already exists."));
        }
        if self
            .store
            .find_by_name(&first_name, &last_name, None)
            .await?
            .is_some()
        {
            return Err(Error::exists("User already exists."));
        }

        valid_password(&password)?;
        let password_hash = hash_password(&password)?;

        let id = self
            .store
            .insert(NewStudent {
                first_name,
                last_name,
                age: age as i32,
                gender,
                phone,
                email,
                password_hash,
            })
            .await?;
        log::info!("Created student {}", id);
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<StudentInfo>, Error> {
        let students = self.store.all().await?;
        Ok(students.into_iter().map(StudentInfo::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<StudentInfo, Error> {
        let id = parse_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .map(StudentInfo::from)
            .ok_or_else(|| Error::not_found("Student not found."))
    }

    pub async fn update(&self, id: &str, request: UpdateStudent) -> Result<UpdateOutcome, Error> {
        let id = parse_id(id)?;
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Student not found to be updated."))?;

        let changes = update::resolve(self.store.as_ref(), &existing, request).await?;
        if changes.is_empty() {
            return Ok(UpdateOutcome::Unchanged);
        }

        if self.store.update(id, &changes).await? == 0 {
            return Err(Error::not_found("Student not found to be updated."));
        }
        log::info!("Updated student {}", id);
        Ok(UpdateOutcome::Updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let id = parse_id(id)?;
        if self.store.delete(id).await? == 0 {
            return Err(Error::not_found("Student not found."));
        }
        log::info!("Deleted student {}", id);
        Ok(())
    }
}
