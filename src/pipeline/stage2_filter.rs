use crate::model::exclusions::ExclusionProfile;
use crate::model::records::CountRecord;

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub kept: Vec<CountRecord>,
    pub excluded: Vec<CountRecord>,
}

impl FilterOutcome {
    pub fn excluded_ids(&self) -> Vec<String> {
        self.excluded.iter().map(|r| r.group_id.clone()).collect()
    }

    pub fn excluded_count(&self) -> i128 {
        self.excluded.iter().map(|r| i128::from(r.count)).sum()
    }
}

pub fn apply_exclusions(records: &[CountRecord], profile: &ExclusionProfile) -> FilterOutcome {
    if profile.is_empty() {
        return FilterOutcome {
            kept: records.to_vec(),
            excluded: Vec::new(),
        };
    }

    let mut kept = Vec::with_capacity(records.len());
    let mut excluded = Vec::new();

    for record in records {
        if profile.excludes(&record.group_id) {
            excluded.push(record.clone());
        } else {
            kept.push(record.clone());
        }
    }

    if !excluded.is_empty() {
        tracing::info!(
            excluded_groups = excluded.len(),
            kept_groups = kept.len(),
            "dropped excluded groups before the sweep"
        );
        for record in &excluded {
            tracing::debug!(group = %record.group_id, count = record.count, "excluded");
        }
    }

    FilterOutcome { kept, excluded }
}
