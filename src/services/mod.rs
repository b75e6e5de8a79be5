pub mod calendar;
pub mod journal;

pub use journal::Journal;
