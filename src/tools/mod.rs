pub mod instantiate;
pub mod model;
pub mod news;
pub mod weather;

pub use instantiate::default_registry;
pub use model::{Tool, ToolOutcome, ToolRegistry};
pub use news::NewsTool;
pub use weather::WeatherTool;
