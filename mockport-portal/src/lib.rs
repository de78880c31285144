pub mod handlers;
pub mod server;

pub use server::{PortalState, build_portal_router, start_portal};
