//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::LabConfig;
pub use site::Mode;
pub use site::RenderConfig;
pub use site::MODE_ENV_VAR;

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "mdlab.yml";
