use std::sync::Arc;

use crate::config::Config;
use crate::tools::model::ToolRegistry;
use crate::tools::news::NewsTool;
use crate::tools::weather::WeatherTool;

/// Registry with the stock tool set.
pub fn default_registry(config: &Config) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WeatherTool::new(config)));
    registry.register(Arc::new(NewsTool::new(config)));
    registry
}
