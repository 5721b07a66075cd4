pub mod clock;
pub mod ids;
pub mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
