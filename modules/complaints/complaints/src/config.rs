use serde::{Deserialize, Serialize};

/// Configuration for the complaints module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplaintsConfig {
    /// Prepended to every complaint id, e.g. `C` gives `CH1-1`.
    #[serde(default = "default_complaint_id_prefix")]
    pub complaint_id_prefix: String,
    /// Upper bound on description length, in characters.
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
}

impl Default for ComplaintsConfig {
    fn default() -> Self {
        Self {
            complaint_id_prefix: default_complaint_id_prefix(),
            max_description_length: default_max_description_length(),
        }
    }
}

fn default_complaint_id_prefix() -> String {
    "C".to_owned()
}

fn default_max_description_length() -> usize {
    2000
}
