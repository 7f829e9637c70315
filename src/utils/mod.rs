mod perf;
mod time_utils;

pub use time_utils::{
    TimeUtils, add_days, epoch_sec_to_date_string, epoch_to_datetime, parse_datetime,
};
