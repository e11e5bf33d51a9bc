pub mod links;
pub mod snippets;
pub mod timesheet;
