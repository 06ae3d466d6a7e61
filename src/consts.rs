/// Maximum valid year (inclusive), the largest that fits `YYYY`
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of a month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in one full 400-year Gregorian cycle
pub(crate) const DAYS_PER_ERA: i64 = 146_097;
/// Day number of 1970-01-01 counted from 0000-03-01
pub(crate) const UNIX_EPOCH_SHIFT: i64 = 719_468;

/// Date component separator (`YYYY-MM-DD`)
pub const DATE_SEPARATOR: char = '-';
/// Length of a `YYYY-MM-DD` string
pub const DATE_LEN: usize = 10;
/// Window separator (`start/end`)
pub const WINDOW_SEPARATOR: char = '/';

/// Reminders created for every anniversary cycle, in days before the date
pub const DEFAULT_LEAD_TIMES: [u32; 3] = [14, 7, 1];
/// Lead time used when a caller schedules a reminder without one
pub const DEFAULT_LEAD_DAYS: u32 = 7;
/// Largest lead time a caller may request
pub const MAX_LEAD_DAYS: u32 = 180;
/// Days ahead listed when a caller asks for upcoming reminders
pub const DEFAULT_WINDOW_DAYS: u32 = 60;
/// Largest upcoming-reminder window
pub const MAX_WINDOW_DAYS: u32 = 365;
