pub mod heartbeat;
pub mod routes;
pub mod state;
