pub(crate) mod calendar;
pub(crate) mod day;
