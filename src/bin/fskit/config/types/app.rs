use serde::{Deserialize, Serialize};

use super::{LoggingConfig, ToolsConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
}
