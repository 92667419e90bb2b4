use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::department::Departments;

/// Reads the department configuration document. Called on every request;
/// edits to the file are picked up without a restart.
pub async fn load_departments(path: impl AsRef<Path>) -> AppResult<Departments> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::DepartmentConfig(format!("{}: {}", path.display(), e)))?;

    let departments = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(records)) => Departments::new(records),
        Ok(_) => {
            return Err(AppError::DepartmentConfig(format!(
                "{}: expected a JSON object",
                path.display()
            )))
        }
        Err(e) => {
            return Err(AppError::DepartmentConfig(format!(
                "{}: {}",
                path.display(),
                e
            )))
        }
    };

    if departments.general().is_none() {
        tracing::warn!(
            "Department configuration {} has no 'general' entry",
            path.display()
        );
    }
    tracing::debug!(
        "Loaded {} departments from {}",
        departments.len(),
        path.display()
    );

    Ok(departments)
}
