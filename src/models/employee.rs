use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::error::{AppError, AppResult};
use crate::utils::text::coerce_flag;

/// Employee as read from storage. `flags` holds the serialized list text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub flags: Option<String>,
}

/// `employees` row with the flags column selected as raw bytes, so rows
/// seeded with BLOB or INTEGER values still load.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub flags: Option<Vec<u8>>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            flags: row
                .flags
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

/// Benefit parameters copied out of the active department record.
/// Each field is `null` when the record lacks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitFields {
    pub salary: Value,
    pub bonus_percent: Value,
    pub days_off: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicEmployeeView {
    pub id: i64,
    pub name: String,
    pub flags: Vec<String>,
    pub active_department: String,
    pub department_info: Value,
    // Absent from the JSON entirely when the employee has no flags
    #[serde(flatten)]
    pub benefits: Option<BenefitFields>,
}

/// Validated body of `PATCH /api/employee/{id}/flags`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFlagsForm {
    pub flags: Vec<String>,
}

impl UpdateFlagsForm {
    /// Checks the decoded body shape and coerces every element to a string.
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let flags = body
            .as_object()
            .and_then(|obj| obj.get("flags"))
            .ok_or_else(|| AppError::Validation("missing 'flags' field".to_string()))?;

        let flags = flags
            .as_array()
            .ok_or_else(|| AppError::Validation("'flags' must be a list".to_string()))?;

        Ok(UpdateFlagsForm {
            flags: flags.iter().map(coerce_flag).collect(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFlagsResponse {
    pub id: i64,
    pub flags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(body: Value) -> String {
        match UpdateFlagsForm::from_json(&body) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_form_requires_flags_key() {
        assert_eq!(validation_message(json!({})), "missing 'flags' field");
        assert_eq!(validation_message(json!(["flags"])), "missing 'flags' field");
        assert_eq!(validation_message(json!(null)), "missing 'flags' field");
    }

    #[test]
    fn test_form_requires_list() {
        assert_eq!(validation_message(json!({"flags": "Sales"})), "'flags' must be a list");
        assert_eq!(validation_message(json!({"flags": {"a": 1}})), "'flags' must be a list");
        assert_eq!(validation_message(json!({"flags": null})), "'flags' must be a list");
    }

    #[test]
    fn test_form_coerces_elements() {
        let form = UpdateFlagsForm::from_json(&json!({"flags": ["Sales", 7, true, null]})).unwrap();
        assert_eq!(form.flags, vec!["Sales", "7", "True", "None"]);
    }

    #[test]
    fn test_view_omits_benefits_without_flags() {
        let view = PublicEmployeeView {
            id: 1,
            name: "Alice".to_string(),
            flags: vec![],
            active_department: "general".to_string(),
            department_info: json!({}),
            benefits: None,
        };
        let value = serde_json::to_value(&view).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("salary"));
        assert!(!obj.contains_key("bonus_percent"));
        assert!(!obj.contains_key("days_off"));
    }

    #[test]
    fn test_view_flattens_benefits() {
        let view = PublicEmployeeView {
            id: 2,
            name: "Bob".to_string(),
            flags: vec!["Ops".to_string()],
            active_department: "Ops".to_string(),
            department_info: json!({}),
            benefits: Some(BenefitFields {
                salary: json!(4000),
                bonus_percent: Value::Null,
                days_off: json!(21),
            }),
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["salary"], json!(4000));
        assert_eq!(value["days_off"], json!(21));
        assert!(value.as_object().unwrap().contains_key("bonus_percent"));
        assert!(value["bonus_percent"].is_null());
    }

    #[test]
    fn test_update_response_skips_missing_warning() {
        let resp = UpdateFlagsResponse {
            id: 3,
            flags: vec!["Sales".to_string()],
            warning: None,
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"id": 3, "flags": ["Sales"]})
        );
    }
}
