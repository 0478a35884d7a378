pub mod breakdown;
pub mod prompts;
pub mod retry;
pub mod service;

pub use breakdown::*;
pub use retry::RetryPolicy;
pub use service::*;
