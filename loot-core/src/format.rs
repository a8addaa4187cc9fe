use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

/// File formats loot tables can be stored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Toml,
    Json,
}

impl TableFormat {
    pub const ALL: [Self; 2] = [Self::Toml, Self::Json];

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Detects the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for TableFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::TableFormat;

    #[test]
    fn test_from_path() {
        assert_eq!(
            TableFormat::from_path(Path::new("loot/zombie.toml")),
            Some(TableFormat::Toml)
        );
        assert_eq!(
            TableFormat::from_path(Path::new("SKELETON.JSON")),
            Some(TableFormat::Json)
        );
        assert_eq!(TableFormat::from_path(Path::new("zombie.yml")), None);
        assert_eq!(TableFormat::from_path(Path::new("zombie")), None);
    }
}
