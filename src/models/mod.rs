// Domain models: samples in, statuses out

mod sample;
mod service;
mod status;

pub use sample::{DayBucket, Sample};
pub use service::ServiceDescriptor;
pub use status::{DailyStatus, InstantStatus, ServiceStatus};

pub(crate) use service::duration_str;
