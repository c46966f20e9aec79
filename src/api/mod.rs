pub mod routes;
mod server;
pub use server::{app, init_tracing, serve};
pub mod public;
pub mod session;
mod state;
pub use state::AppState;
mod utils;
