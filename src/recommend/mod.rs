pub mod affinity;
pub mod engine;
pub mod genres;


pub use engine::*;
pub use genres::SessionInterests;
