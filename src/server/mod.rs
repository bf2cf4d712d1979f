// Server module entry
// Listener creation, connection serving and the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

#[cfg(test)]
pub(crate) mod testing;

// Rust does not allow `loop` as a module name (keyword), so use server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::run_server_loop;
pub use signal::{start_signal_handler, SignalHandler};
