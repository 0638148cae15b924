use serde::{Deserialize, Serialize};

/// Slider position shown for a project whose difficulty has not been set yet.
pub const DEFAULT_PERCEIVED_DIFFICULTY: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectCategory {
    Professional,
    Personal,
    Learning,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_completion_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProjectCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_obstacles: Option<String>,
    #[serde(default)]
    pub skills_resources_needed: Vec<String>,
}

impl FormData {
    /// True when the user has typed anything worth keeping. Category and
    /// difficulty alone don't count.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.description.trim().is_empty()
            || !self.target_completion_date.trim().is_empty()
            || self
                .motivation
                .as_deref()
                .is_some_and(|m| !m.trim().is_empty())
            || self
                .known_obstacles
                .as_deref()
                .is_some_and(|o| !o.trim().is_empty())
            || !self.skills_resources_needed.is_empty()
    }

    pub fn perceived_difficulty_or_default(&self) -> u8 {
        self.perceived_difficulty
            .unwrap_or(DEFAULT_PERCEIVED_DIFFICULTY)
    }
}
