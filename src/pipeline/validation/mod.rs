pub mod types;
pub mod prompt;
pub mod normalizer;
pub mod fallback;
pub mod orchestrator;

pub use types::*;
pub use prompt::*;
pub use normalizer::*;
pub use fallback::*;
pub use orchestrator::*;
