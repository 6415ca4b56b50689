
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::aggregate::AveragingRule;
use crate::cleaning::CleaningPolicy;
use crate::cost_model::CostModelConfig;
use crate::pipeline::PipelineError;

/// Everything a run needs besides its input and output paths.
///
/// Loaded from YAML; every section is optional and falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub input: InputConfig,
    pub cleaning: CleaningPolicy,
    pub averaging: AveragingRule,
    pub cost_model: CostModelConfig
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Worksheet to read from a spreadsheet input. The first sheet when unset.
    pub sheet: Option<String>
}

impl RunConfig {
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        info!("Loading run configuration from [{}]", path.display());

        let content = fs::read_to_string(path).map_err(|error| PipelineError::io(path, error))?;
        let mut config = Self::from_yaml(&content).map_err(|error| PipelineError::config(path, error))?;
        config.resolve_relative_paths(path);

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
    }

    //NOTE: A cost table path inside the config file is relative to that file, not to the working directory.
    fn resolve_relative_paths(&mut self, config_path: &Path) {
        let Some(base) = config_path.parent() else {
            return;
        };

        if let CostModelConfig::Lookup { path: Some(table_path), .. } = &mut self.cost_model {
            if table_path.is_relative() {
                *table_path = base.join(&*table_path);
            }
        }
    }
}
