pub mod clock;
pub mod engine;
pub mod resolver;
pub mod rules;

pub use clock::{ClockParseError, ClockTime};
pub use engine::{DayIqamah, DisplayPolicy, MonthIqamah, ResolvedIqamah, resolve_month};
pub use rules::{IqamahRule, IqamahSchedule, RuleKind, RulePatch, ScheduleError};
