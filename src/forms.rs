//! # Form Validation
//!
//! Field-level validation for submitted forms. A raw [`EmployeeForm`] holds
//! every value exactly as it was submitted so it can be echoed back with
//! errors; [`EmployeeForm::validate`] turns it into typed [`EmployeeFields`]
//! or a set of per-field [`ValidationErrors`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::employee::{
    self, DEFAULT_LEAVE_BALANCE, EMPLOYEE_NUMBER_MAX, EMPLOYEE_NUMBER_MIN,
};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_A_NUMBER: &str = "Enter a whole number.";
pub const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
pub const EMPLOYEE_NUMBER_DIGITS: &str = "Employee number must be 6 digits";

/// Maximum length of name-like text columns
pub const MAX_NAME_LENGTH: usize = 255;

/// Per-field error messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set holding a single error.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, empty if the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Employee form exactly as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmployeeForm {
    #[schema(example = "123456")]
    pub employee_number: Option<String>,
    #[schema(example = "Ah")]
    pub first_name: Option<String>,
    #[schema(example = "Tan")]
    pub last_name: Option<String>,
    #[schema(example = "2000")]
    pub salary: Option<String>,
    #[schema(example = "3")]
    pub months_employed: Option<String>,
    /// Owning user id
    #[schema(example = "1")]
    pub owner: Option<String>,
    /// Department id
    #[schema(example = "1")]
    pub department: Option<String>,
    /// Defaults to 14 when left blank
    #[schema(example = "14")]
    pub leave_balance: Option<String>,
}

/// Validated employee payload, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub employee_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub salary: i32,
    pub months_employed: i16,
    pub owner: i32,
    pub department: i32,
    pub leave_balance: i16,
}

impl EmployeeForm {
    /// Form pre-populated with an existing record's values.
    pub fn from_model(model: &employee::Model) -> Self {
        Self {
            employee_number: Some(model.employee_number.to_string()),
            first_name: Some(model.first_name.clone()),
            last_name: Some(model.last_name.clone()),
            salary: Some(model.salary.to_string()),
            months_employed: Some(model.months_employed.to_string()),
            owner: Some(model.user_id.to_string()),
            department: Some(model.department_id.to_string()),
            leave_balance: Some(model.leave_balance.to_string()),
        }
    }

    /// Run every field check, collecting all failures rather than stopping at the first.
    pub fn validate(&self) -> Result<EmployeeFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let employee_number = required(&mut errors, "employee_number", &self.employee_number)
            .and_then(|raw| integer(&mut errors, "employee_number", raw, 0, i64::from(i32::MAX)))
            .and_then(|value| match validate_employee_number(value) {
                Ok(number) => Some(number),
                Err(message) => {
                    errors.add("employee_number", message);
                    None
                }
            });
        let first_name = required(&mut errors, "first_name", &self.first_name)
            .and_then(|raw| text(&mut errors, "first_name", raw, MAX_NAME_LENGTH));
        let last_name = required(&mut errors, "last_name", &self.last_name)
            .and_then(|raw| text(&mut errors, "last_name", raw, MAX_NAME_LENGTH));
        let salary = required(&mut errors, "salary", &self.salary)
            .and_then(|raw| integer(&mut errors, "salary", raw, 0, i64::from(i32::MAX)));
        let months_employed = required(&mut errors, "months_employed", &self.months_employed)
            .and_then(|raw| integer(&mut errors, "months_employed", raw, 0, i64::from(i16::MAX)));
        let owner = required(&mut errors, "owner", &self.owner)
            .and_then(|raw| choice(&mut errors, "owner", raw));
        let department = required(&mut errors, "department", &self.department)
            .and_then(|raw| choice(&mut errors, "department", raw));
        let leave_balance = match optional(&self.leave_balance) {
            Some(raw) => integer(&mut errors, "leave_balance", raw, 0, i64::from(i16::MAX)),
            None => Some(i64::from(DEFAULT_LEAVE_BALANCE)),
        };

        match (
            employee_number,
            first_name,
            last_name,
            salary,
            months_employed,
            owner,
            department,
            leave_balance,
        ) {
            (
                Some(employee_number),
                Some(first_name),
                Some(last_name),
                Some(salary),
                Some(months_employed),
                Some(owner),
                Some(department),
                Some(leave_balance),
            ) if errors.is_empty() => Ok(EmployeeFields {
                employee_number,
                first_name,
                last_name,
                // range checked above
                salary: salary as i32,
                months_employed: months_employed as i16,
                owner,
                department,
                leave_balance: leave_balance as i16,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&EmployeeFields> for EmployeeForm {
    fn from(fields: &EmployeeFields) -> Self {
        Self {
            employee_number: Some(fields.employee_number.to_string()),
            first_name: Some(fields.first_name.clone()),
            last_name: Some(fields.last_name.clone()),
            salary: Some(fields.salary.to_string()),
            months_employed: Some(fields.months_employed.to_string()),
            owner: Some(fields.owner.to_string()),
            department: Some(fields.department.to_string()),
            leave_balance: Some(fields.leave_balance.to_string()),
        }
    }
}

/// Check that an employee number has exactly six digits.
pub fn validate_employee_number(value: i64) -> Result<i32, &'static str> {
    if value < i64::from(EMPLOYEE_NUMBER_MIN) || value > i64::from(EMPLOYEE_NUMBER_MAX) {
        return Err(EMPLOYEE_NUMBER_DIGITS);
    }
    Ok(value as i32)
}

/// Trim and check a required name-like field.
pub fn validate_name(field: &str, value: &str, max_length: usize) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return Err(errors);
    }
    text(&mut errors, field, value, max_length).ok_or(errors)
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(errors: &mut ValidationErrors, field: &str, value: &'a Option<String>) -> Option<&'a str> {
    let value = optional(value);
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

fn integer(errors: &mut ValidationErrors, field: &str, raw: &str, min: i64, max: i64) -> Option<i64> {
    let Ok(value) = raw.parse::<i64>() else {
        errors.add(field, NOT_A_NUMBER);
        return None;
    };
    if value < min {
        errors.add(field, format!("Ensure this value is greater than or equal to {min}."));
        return None;
    }
    if value > max {
        errors.add(field, format!("Ensure this value is less than or equal to {max}."));
        return None;
    }
    Some(value)
}

fn text(errors: &mut ValidationErrors, field: &str, raw: &str, max_length: usize) -> Option<String> {
    let length = raw.chars().count();
    if length > max_length {
        errors.add(
            field,
            format!("Ensure this value has at most {max_length} characters (it has {length})."),
        );
        return None;
    }
    Some(raw.to_string())
}

fn choice(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<i32> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, INVALID_CHOICE);
            None
        }
    }
}
