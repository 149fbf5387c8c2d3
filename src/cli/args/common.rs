//! Common CLI types shared across commands

use crate::client::SortOrder;

/// Sort direction for list commands
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SortDir {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl From<SortDir> for SortOrder {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => SortOrder::Asc,
            SortDir::Desc => SortOrder::Desc,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_dir_maps_to_sort_order() {
        assert_eq!(SortOrder::from(SortDir::Asc), SortOrder::Asc);
        assert_eq!(SortOrder::from(SortDir::Desc), SortOrder::Desc);
    }
}
