mod gracefullshutdown;
mod logs;
mod metrics;
mod trace;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::trace::TracingContext;
