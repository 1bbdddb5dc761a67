pub mod prayer;
pub mod timings;

pub use prayer::PrayerType;
pub use timings::DayTimings;
