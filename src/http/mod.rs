pub mod client;

pub use client::{DEFAULT_TIMEOUT, DispatchData, DispatchOptions, Dispatcher};

use std::sync::LazyLock;

/// Process-wide dispatcher, shared across invocations of a warm container.
pub static DISPATCHER: LazyLock<Dispatcher> = LazyLock::new(Dispatcher::default);
