use kidori::io::svg::SvgDrawOptions;
use serde::{Deserialize, Serialize};

/// Configuration of the command line front-end
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CliConfig {
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
    /// Write indented JSON files
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_pretty_json() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            svg_draw_options: SvgDrawOptions::default(),
            pretty_json: default_pretty_json(),
        }
    }
}
