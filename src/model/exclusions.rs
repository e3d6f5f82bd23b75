use serde::Serialize;

pub const WILDTYPE_KEY: &str = "WT";
pub const SYNONYMOUS_MARKER: &str = "synonymous";

/// Groups dropped before the sweep.
///
/// `exact` entries match the whole group id; `contains` entries match any
/// group id containing them, ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionProfile {
    pub exact: Vec<String>,
    pub contains: Vec<String>,
}

impl ExclusionProfile {
    pub fn none() -> Self {
        Self {
            exact: Vec::new(),
            contains: Vec::new(),
        }
    }

    pub fn default_v1() -> Self {
        Self {
            exact: vec![WILDTYPE_KEY.to_string()],
            contains: vec![SYNONYMOUS_MARKER.to_string()],
        }
    }

    pub fn with_extra(mut self, exact: &[String], contains: &[String]) -> Self {
        for id in exact {
            if !self.exact.contains(id) {
                self.exact.push(id.clone());
            }
        }
        for pattern in contains {
            if !self.contains.contains(pattern) {
                self.contains.push(pattern.clone());
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.contains.is_empty()
    }

    pub fn excludes(&self, group_id: &str) -> bool {
        if self.exact.iter().any(|id| id == group_id) {
            return true;
        }
        if self.contains.is_empty() {
            return false;
        }
        let lower = group_id.to_ascii_lowercase();
        self.contains
            .iter()
            .any(|pattern| lower.contains(&pattern.to_ascii_lowercase()))
    }
}
