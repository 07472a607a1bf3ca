pub mod change_stream;
pub mod gateway;
pub mod queue;

pub use gateway::GatewayDecoder;
