pub mod content;
pub mod progress;

pub use content::*;
pub use progress::*;
