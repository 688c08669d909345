use std::collections::HashMap;
use std::path::Path;

/// Lowercase US state name → two-letter code, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    states: HashMap<String, String>,
}

impl StateTable {
    /// The table is required: a missing or malformed file stops startup
    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::StateTableError(format!("{}: {}", path.display(), e))
        })?;

        let states: HashMap<String, String> = serde_json::from_str(&contents).map_err(|e| {
            crate::Error::StateTableError(format!("{}: {}", path.display(), e))
        })?;

        Ok(Self::from_map(states))
    }

    pub fn from_map(states: HashMap<String, String>) -> Self {
        let states = states
            .into_iter()
            .map(|(name, code)| (name.to_lowercase(), code))
            .collect();
        Self { states }
    }

    /// Case-insensitive lookup by state name
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.states.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
