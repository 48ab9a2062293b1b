pub mod routes;
pub mod handlers;
pub mod server;
pub mod types;

pub use routes::create_router;
pub use server::start_server;
