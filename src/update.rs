//! Turns a partial update request into the sparse set of columns to write.
//!
//! Fields are checked in a fixed order (names, gender, age, password, email,
//! phone) and the first failure is returned. Values equal to what is already
//! stored are dropped, so an update that changes nothing resolves to an empty
//! [`StudentChanges`].

use crate::auth::hash_password;
use crate::models::{Student, StudentChanges, UpdateStudent};
use crate::store::StudentStore;
use crate::validation::{
    valid_age, valid_email, valid_gender, valid_name, valid_password, valid_phone,
};
use crate::Error;

pub async fn resolve(
    store: &dyn StudentStore,
    existing: &Student,
    request: UpdateStudent,
) -> Result<StudentChanges, Error> {
    let mut changes = StudentChanges::default();

    let first = supplied_name(request.first_name)?;
    let last = supplied_name(request.last_name)?;
    if first.is_some() || last.is_some() {
        let first_name = first.as_deref().unwrap_or(&existing.first_name);
        let last_name = last.as_deref().unwrap_or(&existing.last_name);
        let taken = store
            .find_by_name(first_name, last_name, Some(existing.id))
            .await?;
        if taken.is_some() {
            return Err(Error::exists("First and last name already exist."));
        }
        changes.first_name = first.filter(|name| *name != existing.first_name);
        changes.last_name = last.filter(|name| *name != existing.last_name);
    }

    if let Some(gender) = request.gender {
        let gender = match gender {
            Some(gender) if !gender.trim().is_empty() => gender,
            _ => return Err(Error::invalid("Gender cannot be null or empty string.")),
        };
        let gender = valid_gender(&gender)?;
        if gender.as_str() != existing.gender {
            changes.gender = Some(gender);
        }
    }

    if let Some(age) = request.age {
        let age = age.ok_or_else(|| Error::invalid("Age cannot be null."))?;
        valid_age(age)?;
        let age = age as i32;
        if age != existing.age {
            changes.age = Some(age);
        }
    }

    if let Some(password) = request.password {
        let password = match password {
            Some(password) if !password.is_empty() => password,
            _ => return Err(Error::invalid("Password cannot be null or empty string.")),
        };
        valid_password(&password)?;
        changes.password_hash = Some(hash_password(&password)?);
    }

    if let Some(email) = request.email {
        let email = match email {
            Some(email) if !email.is_empty() => email,
            _ => return Err(Error::invalid("Email cannot be null or empty string.")),
        };
        valid_email(&email)?;
        if store
            .find_by_email(&email, Some(existing.id))
            .await?
            .is_some()
        {
            return Err(Error::exists("Email already exists."));
        }
        if email != existing.email {
            changes.email = Some(email);
        }
    }

    if let Some(phone) = request.phone {
        let phone = phone.ok_or_else(|| Error::invalid("Phone number cannot be null."))?;
        valid_phone(&phone)?;
        if phone != existing.phone {
            changes.phone = Some(phone);
        }
    }

    Ok(changes)
}

/// `None` when the name was not sent; a trimmed, well-formed name otherwise.
fn supplied_name(name: Option<Option<String>>) -> Result<Option<String>, Error> {
    match name {
        None => Ok(None),
        Some(None) => Err(Error::invalid("First and last name cannot be null.")),
        Some(Some(name)) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::invalid("First and last name cannot be empty."));
            }
            valid_name(name)?;
            Ok(Some(name.to_string()))
        }
    }
}
