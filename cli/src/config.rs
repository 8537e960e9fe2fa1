use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub render: RenderSettings,
    pub output: OutputSettings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RenderSettings {
    /// Text glyph for a mine cell
    pub mine: String,
    /// Text glyph for a safe cell
    pub safe: String,
    /// SVG pixels per cell
    pub tile_size: u32,
    pub mine_color: String,
    pub safe_color: String,
    pub outline_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mine: "X".into(),
            safe: ".".into(),
            tile_size: 100,
            mine_color: "red".into(),
            safe_color: "green".into(),
            outline_color: "black".into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml(
            r#"
            [render]
            mine = "*"
            tile_size = 40

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(settings.render.mine, "*");
        assert_eq!(settings.render.safe, ".");
        assert_eq!(settings.render.tile_size, 40);
        assert_eq!(settings.render.mine_color, "red");
        assert_eq!(settings.output.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("[render]\nglyph = \"#\"\n").is_err());
        assert!(Settings::from_toml("[theme]\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/minefair.toml"))).unwrap_err();
        assert!(err.to_string().contains("Could not read settings"));
    }
}
