use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Gender;

lazy_static! {
    static ref NAME: Regex = Regex::new(r"^[A-Za-z'-]{2,50}$").unwrap();
    static ref PHONE: Regex = Regex::new(r"^(?:\+91|91)?[789][0-9]{9}$").unwrap();
    static ref EMAIL: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]{2,}@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
}

pub const MIN_AGE: i64 = 2;
pub const MAX_AGE: i64 = 99;
pub const MIN_PASSWORD_LEN: usize = 8;

/// A failed field rule, carrying the reason shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation(pub &'static str);

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub fn valid_name(name: &str) -> Result<(), Violation> {
    if NAME.is_match(name) {
        Ok(())
    } else {
        Err(Violation("Invalid name format."))
    }
}

pub fn valid_age(age: i64) -> Result<(), Violation> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(Violation("Age must be between 2 and 99."))
    }
}

pub fn valid_gender(gender: &str) -> Result<Gender, Violation> {
    match gender {
        "M" => Ok(Gender::M),
        "F" => Ok(Gender::F),
        "Others" => Ok(Gender::Others),
        _ => Err(Violation("Gender must be M, F, or Others.")),
    }
}

pub fn valid_phone(phone: &str) -> Result<(), Violation> {
    if PHONE.is_match(phone) {
        Ok(())
    } else {
        Err(Violation("Invalid phone number format."))
    }
}

pub fn valid_email(email: &str) -> Result<(), Violation> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(Violation("Invalid email format."))
    }
}

pub fn valid_password(password: &str) -> Result<(), Violation> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(Violation("Password must be at least 8 characters long."))
    }
}
