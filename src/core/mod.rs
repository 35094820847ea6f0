mod error;
mod types;

pub use error::{TimeError, TimeResult};
pub use types::{
    DEFAULT_RELEASE_THRESHOLD_TICKS, DueTime, FILETIME_EPOCH_OFFSET_NS, MIN_TIMED_SLEEP_S,
    NS_PER_TICK, Timestamp, ticks_to_timestamp, timestamp_to_ticks,
};
