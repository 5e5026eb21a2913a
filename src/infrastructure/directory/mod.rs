//! Employee directory - transient candidate search

mod search;

pub use search::EmployeeSearchService;
