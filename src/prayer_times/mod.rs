pub mod calculator;

pub use calculator::{CALC_METHODS, MonthCalculator};
