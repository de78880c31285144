pub mod api;
pub mod config;
pub mod error;
pub mod id;
pub mod invoke;
pub mod log;
pub mod repository;
pub mod route;
pub mod simulator;

pub use api::{Api, ApiStatus};
pub use config::PortalConfig;
pub use error::PortalError;
pub use id::ValidId;
pub use invoke::{Invocation, Invoker};
pub use log::{LogRecord, LogRecordInput};
pub use repository::{LogReader, LogStore, LogWriter, RouteRepository};
pub use route::{HttpMethod, Route};
pub use simulator::InvocationOutcome;
