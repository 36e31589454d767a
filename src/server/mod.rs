pub mod app;
mod deserializers;
mod routes;

pub use app::{router, run_server, AppState};
