use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::department::Departments;
use crate::models::employee::{PublicEmployeeView, UpdateFlagsResponse};
use crate::services::flags::serialize_flags;
use crate::services::resolver::to_public_view;
use crate::utils::text::quoted_list;

pub struct EmployeeService<'a> {
    db: &'a Database,
}

impl<'a> EmployeeService<'a> {
    pub fn new(db: &'a Database) -> Self {
        EmployeeService { db }
    }

    pub async fn list_employees(
        &self,
        departments: &Departments,
    ) -> AppResult<Vec<PublicEmployeeView>> {
        let employees = self.db.get_all_employees().await?;

        Ok(employees
            .into_iter()
            .map(|employee| to_public_view(employee, departments))
            .collect())
    }

    pub async fn get_employee(
        &self,
        id: i64,
        departments: &Departments,
    ) -> AppResult<Option<PublicEmployeeView>> {
        let employee = self.db.get_employee_by_id(id).await?;

        Ok(employee.map(|employee| to_public_view(employee, departments)))
    }

    /// Replaces the employee's flag list. Flags naming departments missing from
    /// `departments` are still stored; they are reported in `warning`.
    pub async fn update_flags(
        &self,
        id: i64,
        flags: Vec<String>,
        departments: &Departments,
    ) -> AppResult<UpdateFlagsResponse> {
        let unknown = unknown_departments(&flags, departments);
        let warning = if unknown.is_empty() {
            None
        } else {
            Some(format!("Unknown departments: {}", quoted_list(&unknown)))
        };

        if !self.db.employee_exists(id).await? {
            return Err(AppError::NotFound("employee not found".to_string()));
        }

        // Row may vanish between the check and the write
        if !self.db.set_employee_flags(id, &serialize_flags(&flags)).await? {
            return Err(AppError::NotFound("employee not found".to_string()));
        }

        if let Some(ref warning) = warning {
            tracing::warn!("Employee {} flags updated with {}", id, warning);
        } else {
            tracing::info!("Employee {} flags updated: {:?}", id, flags);
        }

        Ok(UpdateFlagsResponse { id, flags, warning })
    }
}

/// Flags not present in the department configuration, in order, duplicates kept.
pub fn unknown_departments<'f>(flags: &'f [String], departments: &Departments) -> Vec<&'f str> {
    flags
        .iter()
        .map(String::as_str)
        .filter(|flag| !departments.contains(flag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Departments {
        serde_json::from_value(json!({
            "general": {"salary": 3000, "bonus_percent": 5, "days_off": 20},
            "Sales": {"salary": 3500, "bonus_percent": 12, "days_off": 22}
        }))
        .unwrap()
    }

    fn flags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_departments_keeps_order_and_duplicates() {
        let f = flags(&["HR", "Sales", "Ops", "HR"]);
        assert_eq!(unknown_departments(&f, &sample()), vec!["HR", "Ops", "HR"]);
        assert!(unknown_departments(&flags(&["general", "Sales"]), &sample()).is_empty());
    }

    #[tokio::test]
    async fn test_update_with_unknown_department_warns_and_persists() {
        let db = Database::in_memory().await.unwrap();
        db.insert_employee(3, "Carol", Some(r#"["general"]"#)).await.unwrap();
        let service = EmployeeService::new(&db);

        let result = service
            .update_flags(3, flags(&["Sales", "HR"]), &sample())
            .await
            .unwrap();
        assert_eq!(result.flags, vec!["Sales", "HR"]);
        assert_eq!(result.warning.as_deref(), Some("Unknown departments: ['HR']"));

        let view = service.get_employee(3, &sample()).await.unwrap().unwrap();
        assert_eq!(view.flags, vec!["Sales", "HR"]);
        assert_eq!(view.active_department, "HR");
        assert_eq!(view.department_info["salary"], json!(3000));
        assert!(view.benefits.unwrap().salary.is_null());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_list() {
        let db = Database::in_memory().await.unwrap();
        db.insert_employee(1, "Alice", Some(r#"["general", "Sales"]"#)).await.unwrap();
        let service = EmployeeService::new(&db);

        let result = service.update_flags(1, Vec::new(), &sample()).await.unwrap();
        assert!(result.warning.is_none());

        let view = service.get_employee(1, &sample()).await.unwrap().unwrap();
        assert!(view.flags.is_empty());
        assert_eq!(view.active_department, "general");
        assert!(view.benefits.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_employee() {
        let db = Database::in_memory().await.unwrap();
        let service = EmployeeService::new(&db);

        match service.update_flags(42, flags(&["Sales"]), &sample()).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "employee not found"),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_missing_employee() {
        let db = Database::in_memory().await.unwrap();
        let service = EmployeeService::new(&db);
        assert!(service.get_employee(999, &sample()).await.unwrap().is_none());
        assert!(service.list_employees(&sample()).await.unwrap().is_empty());
    }
}
