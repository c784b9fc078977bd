use household::{to_json, AnalysisConfig};

pub fn show_config(config: &AnalysisConfig) -> anyhow::Result<String> {
    Ok(to_json(config)?)
}
