use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the department used when an employee has no flags, and the
/// record used when the active department is not configured.
pub const GENERAL_DEPARTMENT: &str = "general";

/// Snapshot of the department configuration document: department name to an
/// opaque benefit record (`salary`, `bonus_percent`, `days_off`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Departments(Map<String, Value>);

impl Departments {
    pub fn new(records: Map<String, Value>) -> Self {
        Departments(records)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn general(&self) -> Option<&Value> {
        self.get(GENERAL_DEPARTMENT)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
