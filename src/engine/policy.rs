use crate::types::PlaylistId;

pub const TITLE_PREFIX: &str = "Releasify";
pub const COMBINED_LABEL: &str = "Combined";

/// How source playlists map onto newly created destination playlists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationPolicy {
    /// One destination per source, named after the source.
    Separate,
    /// All sources feed one destination. A single source still gets a
    /// destination named after itself.
    Combined { name: Option<String> },
}

impl Default for DestinationPolicy {
    fn default() -> Self {
        DestinationPolicy::Combined { name: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationName {
    /// Use the source playlist's current name.
    FromSource(PlaylistId),
    Fixed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    pub name: DestinationName,
    pub sources: Vec<PlaylistId>,
}

impl DestinationPolicy {
    pub fn from_options(separate: bool, name: Option<String>) -> Self {
        if separate {
            DestinationPolicy::Separate
        } else {
            DestinationPolicy::Combined { name }
        }
    }

    pub fn plan(&self, sources: &[PlaylistId]) -> Vec<DestinationPlan> {
        match self {
            DestinationPolicy::Combined { name } if sources.len() > 1 => vec![DestinationPlan {
                name: DestinationName::Fixed(
                    name.clone().unwrap_or_else(|| COMBINED_LABEL.to_string()),
                ),
                sources: sources.to_vec(),
            }],
            _ => sources
                .iter()
                .map(|source| DestinationPlan {
                    name: DestinationName::FromSource(source.clone()),
                    sources: vec![source.clone()],
                })
                .collect(),
        }
    }
}

pub fn destination_title(base: &str) -> String {
    format!("{TITLE_PREFIX}: {base}")
}
