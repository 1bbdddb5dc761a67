pub mod report;
pub mod table;

pub use report::MonthReport;
