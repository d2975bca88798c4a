//! Saved views: named, reusable filter criteria

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use core_kernel::SavedViewId;
use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;

/// Partial filter specification carried by a saved view
///
/// An empty status set and a blank type both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedViewCriteria {
    pub status: BTreeSet<ClaimStatus>,
    #[serde(rename = "type")]
    pub claim_type: Option<String>,
}

impl SavedViewCriteria {
    pub fn statuses(statuses: impl IntoIterator<Item = ClaimStatus>) -> Self {
        Self {
            status: statuses.into_iter().collect(),
            claim_type: None,
        }
    }

    pub fn matches(&self, claim: &Claim) -> bool {
        crate::filter::matches_status(&self.status, claim)
            && crate::filter::matches_type(self.claim_type.as_deref(), claim)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedView {
    pub id: SavedViewId,
    pub name: String,
    pub icon: String,
    pub criteria: SavedViewCriteria,
}

/// The saved views known to the system
#[derive(Debug, Clone, Default)]
pub struct SavedViewCatalog {
    views: Vec<SavedView>,
}

impl SavedViewCatalog {
    pub fn new(views: Vec<SavedView>) -> Result<Self, ClaimError> {
        let mut catalog = Self::default();
        for view in views {
            catalog.add(view)?;
        }
        Ok(catalog)
    }

    /// "My Open Claims" and "Approved & Settled"
    pub fn with_defaults() -> Self {
        let views = vec![
            SavedView {
                id: SavedViewId::from_static("sv1"),
                name: "My Open Claims".to_string(),
                icon: "\u{1F4DD}".to_string(),
                criteria: SavedViewCriteria::statuses([
                    ClaimStatus::PendingVerification,
                    ClaimStatus::PendingApproval,
                    ClaimStatus::Submitted,
                    ClaimStatus::UnderReview,
                ]),
            },
            SavedView {
                id: SavedViewId::from_static("sv2"),
                name: "Approved & Settled".to_string(),
                icon: "\u{2705}".to_string(),
                criteria: SavedViewCriteria::statuses([ClaimStatus::Approved, ClaimStatus::Settled]),
            },
        ];
        Self { views }
    }

    pub fn add(&mut self, view: SavedView) -> Result<(), ClaimError> {
        if self.get(&view.id).is_some() {
            return Err(ClaimError::Validation(format!("saved view {} already exists", view.id)));
        }
        if view.name.trim().is_empty() {
            return Err(ClaimError::Validation("saved view name is required".to_string()));
        }
        self.views.push(view);
        Ok(())
    }

    pub fn get(&self, id: &SavedViewId) -> Option<&SavedView> {
        self.views.iter().find(|v| &v.id == id)
    }

    /// Looks a view up by its raw id; unknown or malformed ids yield `None`
    pub fn resolve(&self, raw_id: Option<&str>) -> Option<&SavedView> {
        let id: SavedViewId = raw_id?.parse().ok()?;
        self.get(&id)
    }

    pub fn views(&self) -> &[SavedView] {
        &self.views
    }
}
