//! qq: quick debug logging that prints the source expression next to every value.
//!
//! `qq!(ip, port, 5432)` appends `[15:04:05 main.rs:12 app::main] ip="1.2.3.4" port=443 5432`
//! to `qq.log` in the temp directory. The names are recovered by re-reading and
//! parsing the calling file on every call.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

mod macros;

pub use application::{global, init, Logger};
pub use config::Config;
pub use domain::call_site::CallSite;
pub use error::Error;
