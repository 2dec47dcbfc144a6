use crate::config::types::{Config, CrawlerConfig, FetcherConfig, ManifestConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    validate_manifest_config(&config.manifest)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.link_types.is_empty() {
        return Err(ConfigError::Validation(
            "link-types must contain at least one tag/attribute pair".to_string(),
        ));
    }

    for link_type in &config.link_types {
        validate_html_name("tag", &link_type.tag)?;
        validate_html_name("attribute", &link_type.attribute)?;
    }

    if let Some(pattern) = config.exclude.iter().find(|p| p.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "exclude patterns cannot be empty, got '{}'",
            pattern
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates manifest metadata
fn validate_manifest_config(config: &ManifestConfig) -> Result<(), ConfigError> {
    let name = &config.file_name;
    if name.is_empty() || name.contains('/') || name.contains('\\') || name == "." || name == ".."
    {
        return Err(ConfigError::Validation(format!(
            "manifest file-name must be a bare file name, got '{}'",
            name
        )));
    }

    for (field, value) in [
        ("author", &config.author),
        ("license", &config.license),
        ("version", &config.version),
        ("project", &config.project),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "manifest {} cannot be empty",
                field
            )));
        }
    }

    Ok(())
}

/// Validates a tag or attribute name used to build a CSS selector
fn validate_html_name(kind: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidLinkType(format!(
            "{} name cannot be empty",
            kind
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::InvalidLinkType(format!(
            "{} name '{}' contains invalid characters",
            kind, name
        )));
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidLinkType(format!(
            "{} name '{}' must start with a letter",
            kind, name
        )));
    }

    Ok(())
}
