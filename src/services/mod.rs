pub mod department;
pub mod employee;
pub mod flags;
pub mod resolver;

pub use department::load_departments;
pub use employee::EmployeeService;
