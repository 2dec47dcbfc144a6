use serde::Deserialize;

/// Main configuration structure for Site-Mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
    pub manifest: ManifestConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Substrings that exclude a link outright
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Tag/attribute pairs scanned for links, in scan order
    #[serde(rename = "link-types")]
    pub link_types: Vec<LinkType>,

    /// Stop after this many processed URLs (0 = unlimited)
    #[serde(rename = "max-pages", default)]
    pub max_pages: u32,
}

/// An HTML tag and the attribute holding its link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkType {
    pub tag: String,
    pub attribute: String,
}

impl LinkType {
    pub fn new(tag: &str, attribute: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// CSS selector matching elements of this tag that carry the attribute
    pub fn selector(&self) -> String {
        format!("{}[{}]", self.tag.to_ascii_lowercase(), self.attribute_name())
    }

    /// Attribute name as stored by the HTML parser, which lower-cases names
    pub fn attribute_name(&self) -> String {
        self.attribute.to_ascii_lowercase()
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    format!("site-mirror/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory under which the `<host>/` mirror root is created
    pub directory: String,

    /// What to do when a mirrored file already exists
    #[serde(rename = "on-existing", default)]
    pub on_existing: ExistingFilePolicy,
}

/// Policy for files that already exist on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExistingFilePolicy {
    #[default]
    Overwrite,
    Skip,
}

/// Metadata written to the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestConfig {
    /// Manifest file name inside the mirror root
    #[serde(rename = "file-name", default = "default_manifest_file_name")]
    pub file_name: String,

    pub author: String,
    pub license: String,
    pub version: String,
    pub project: String,
}

fn default_manifest_file_name() -> String {
    "README.txt".to_string()
}
