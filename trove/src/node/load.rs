//! Loading node trees from JSON and TOML sources.

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Format, Json, Toml},
};

use super::ConfigNode;
use crate::{TroveError, TroveResult, TroveResultExt};

/// Text formats a node tree can be read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeFormat {
    /// JSON documents.
    Json,
    /// TOML documents.
    Toml,
}

impl NodeFormat {
    /// Pick a format from the extension of `path`, ignoring case.
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use trove::node::NodeFormat;
    ///
    /// assert_eq!(NodeFormat::from_path(Utf8Path::new("a.JSON")), Some(NodeFormat::Json));
    /// assert_eq!(NodeFormat::from_path(Utf8Path::new("a.yaml")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse `data` in `format` into a node tree.
///
/// The document must have a map at its root.
///
/// # Errors
///
/// Returns [`TroveError::Load`] when the text fails to parse.
pub fn parse(data: &str, format: NodeFormat) -> TroveResult<ConfigNode> {
    let figment = match format {
        NodeFormat::Json => Figment::from(Json::string(data)),
        NodeFormat::Toml => Figment::from(Toml::string(data)),
    };
    figment.extract::<ConfigNode>().into_trove()
}

/// Read and parse the node file at `path`.
///
/// # Errors
///
/// Returns [`TroveError::File`] when the extension is not recognised or the
/// file cannot be read or parsed.
pub fn load_file(path: &Utf8Path) -> TroveResult<ConfigNode> {
    let format = NodeFormat::from_path(path).ok_or_else(|| {
        TroveError::file(
            path,
            std::io::Error::other("unsupported extension: expected .json or .toml"),
        )
    })?;
    let data = std::fs::read_to_string(path).map_err(|e| TroveError::file(path, e))?;
    parse(&data, format).map_err(|e| TroveError::file(path, e))
}
