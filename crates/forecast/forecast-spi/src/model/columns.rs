//! Column names shared by the encoder and trained artifacts.

pub const SENSOR_NAME: &str = "Sensor_Name";
pub const HOUR_DAY: &str = "HourDay";
pub const LAG_1H: &str = "lag_1h";
pub const LAG_24H: &str = "lag_24h";
pub const LAG_168H: &str = "lag_168h";
pub const ROLL_3H: &str = "roll3h";
pub const IS_HOLIDAY: &str = "is_holiday";
pub const IS_LOCKDOWN: &str = "is_lockdown";
pub const DAY_OF_WEEK: &str = "day_of_week";
