mod database;
mod email;
mod identity;
mod state_builder;

pub use database::connect_and_migrate;
pub use state_builder::{ServicePorts, build_app_state, build_service_ports};
