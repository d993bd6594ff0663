pub mod builder;
pub mod chain;
pub mod frame;
pub mod runner;

pub use builder::Script;
pub use chain::{ActionChain, Step};
pub use frame::Frame;
pub use runner::ScriptRunner;
