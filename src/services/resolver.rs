use serde_json::{Map, Value};

use crate::models::department::{Departments, GENERAL_DEPARTMENT};
use crate::models::employee::{BenefitFields, Employee, PublicEmployeeView};
use crate::services::flags::parse_flags;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDepartment {
    pub active_department: String,
    pub department_info: Value,
}

/// Active department is the last flag, or `general` when there are none.
/// The record falls back to `general`, then to `{}`.
pub fn resolve(flags: &[String], departments: &Departments) -> ResolvedDepartment {
    let active = flags
        .last()
        .map(String::as_str)
        .unwrap_or(GENERAL_DEPARTMENT);

    let department_info = departments
        .get(active)
        .or_else(|| departments.general())
        .cloned()
        .unwrap_or_else(empty_record);

    ResolvedDepartment {
        active_department: active.to_string(),
        department_info,
    }
}

/// Benefit fields for the last flag. Unlike [`resolve`], an unknown last flag
/// does not fall back to `general`: the fields come back as nulls.
/// Returns `None` when there are no flags.
pub fn benefit_fields(flags: &[String], departments: &Departments) -> Option<BenefitFields> {
    let last = flags.last()?;
    let info = departments.get(last);
    let field = |key: &str| {
        info.and_then(|record| record.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    };

    Some(BenefitFields {
        salary: field("salary"),
        bonus_percent: field("bonus_percent"),
        days_off: field("days_off"),
    })
}

pub fn to_public_view(employee: Employee, departments: &Departments) -> PublicEmployeeView {
    let flags = parse_flags(employee.flags.as_deref());
    let resolved = resolve(&flags, departments);
    let benefits = benefit_fields(&flags, departments);

    PublicEmployeeView {
        id: employee.id,
        name: employee.name,
        flags,
        active_department: resolved.active_department,
        department_info: resolved.department_info,
        benefits,
    }
}

fn empty_record() -> Value {
    Value::Object(Map::new())
}
