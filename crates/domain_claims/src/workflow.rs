//! Claims workflow stages
//!
//! Every claim carries exactly four stages in a fixed order. The layout is
//! an array, so neither the count nor the order can drift; deserialization
//! rejects anything else.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::add_days;
use crate::error::ClaimError;

/// Days from submission until each stage's SLA falls due
const SLA_OFFSETS_DAYS: [u64; 4] = [2, 7, 9, 15];

/// Stage of the claims pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageName {
    Submission,
    Verification,
    Approval,
    Settlement,
}

impl StageName {
    /// Pipeline order
    pub const ORDER: [StageName; 4] = [
        StageName::Submission,
        StageName::Verification,
        StageName::Approval,
        StageName::Settlement,
    ];

    fn index(&self) -> usize {
        match self {
            StageName::Submission => 0,
            StageName::Verification => 1,
            StageName::Approval => 2,
            StageName::Settlement => 3,
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Progress of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Active,
    Completed,
    Skipped,
}

/// One entry of a claim's workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStage {
    pub stage: StageName,
    pub status: StageStatus,
    /// Set when the stage became active or completed
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Absent for skipped stages
    #[serde(default)]
    pub sla_due: Option<NaiveDate>,
}

impl WorkflowStage {
    /// True once `today` is past the due date of a stage that has not completed
    pub fn is_sla_breached(&self, today: NaiveDate) -> bool {
        self.status != StageStatus::Completed && self.sla_due.is_some_and(|due| today > due)
    }

    pub fn view(&self, today: NaiveDate) -> StageView {
        StageView {
            stage: self.stage,
            status: self.status,
            date: self.date,
            sla_due: self.sla_due,
            sla_breach: self.is_sla_breached(today),
        }
    }
}

/// Read-side projection of a stage with the breach flag computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    pub stage: StageName,
    pub status: StageStatus,
    pub date: Option<NaiveDate>,
    pub sla_due: Option<NaiveDate>,
    pub sla_breach: bool,
}

/// The four stages of a claim, in pipeline order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WorkflowStage>", into = "Vec<WorkflowStage>")]
pub struct Workflow([WorkflowStage; 4]);

impl Workflow {
    /// Layout of a newly submitted claim: submission done, the rest pending
    pub fn submitted(today: NaiveDate) -> Self {
        let stage = |name: StageName| {
            let sla_due = Some(add_days(today, SLA_OFFSETS_DAYS[name.index()]));
            match name {
                StageName::Submission => WorkflowStage {
                    stage: name,
                    status: StageStatus::Completed,
                    date: Some(today),
                    sla_due,
                },
                _ => WorkflowStage {
                    stage: name,
                    status: StageStatus::Pending,
                    date: None,
                    sla_due,
                },
            }
        };
        Self(StageName::ORDER.map(stage))
    }

    pub fn stage(&self, name: StageName) -> &WorkflowStage {
        &self.0[name.index()]
    }

    pub fn stages(&self) -> &[WorkflowStage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn view(&self, today: NaiveDate) -> Vec<StageView> {
        self.0.iter().map(|s| s.view(today)).collect()
    }

    /// Stages currently past their SLA
    pub fn breached_stages(&self, today: NaiveDate) -> Vec<StageName> {
        self.0
            .iter()
            .filter(|s| s.is_sla_breached(today))
            .map(|s| s.stage)
            .collect()
    }

    fn complete(&mut self, name: StageName, today: NaiveDate) {
        let stage = &mut self.0[name.index()];
        stage.status = StageStatus::Completed;
        stage.date = Some(today);
    }

    fn activate(&mut self, name: StageName, today: NaiveDate) {
        let stage = &mut self.0[name.index()];
        stage.status = StageStatus::Active;
        stage.date = Some(today);
    }

    fn skip(&mut self, name: StageName) {
        let stage = &mut self.0[name.index()];
        stage.status = StageStatus::Skipped;
        stage.date = None;
        stage.sla_due = None;
    }

    /// Completes every open stage that comes before `name`
    fn close_before(&mut self, name: StageName, today: NaiveDate) {
        for earlier in &StageName::ORDER[..name.index()] {
            if matches!(self.stage(*earlier).status, StageStatus::Pending | StageStatus::Active) {
                self.complete(*earlier, today);
            }
        }
    }

    pub(crate) fn start_verification(&mut self, today: NaiveDate) {
        self.activate(StageName::Verification, today);
    }

    pub(crate) fn finish_verification(&mut self, today: NaiveDate) {
        self.close_before(StageName::Approval, today);
        self.activate(StageName::Approval, today);
    }

    pub(crate) fn record_approval(&mut self, approved: bool, today: NaiveDate) {
        self.close_before(StageName::Approval, today);
        self.complete(StageName::Approval, today);
        if approved {
            self.activate(StageName::Settlement, today);
        } else {
            self.skip(StageName::Settlement);
        }
    }

    pub(crate) fn record_settlement(&mut self, today: NaiveDate) {
        self.close_before(StageName::Settlement, today);
        self.complete(StageName::Settlement, today);
    }
}

impl TryFrom<Vec<WorkflowStage>> for Workflow {
    type Error = ClaimError;

    fn try_from(stages: Vec<WorkflowStage>) -> Result<Self, Self::Error> {
        let stages: [WorkflowStage; 4] = stages.try_into().map_err(|v: Vec<WorkflowStage>| {
            ClaimError::Validation(format!("workflow must have 4 stages, got {}", v.len()))
        })?;
        for (stage, expected) in stages.iter().zip(StageName::ORDER) {
            if stage.stage != expected {
                return Err(ClaimError::Validation(format!(
                    "workflow stage {} found where {} was expected",
                    stage.stage, expected
                )));
            }
        }
        Ok(Self(stages))
    }
}

impl From<Workflow> for Vec<WorkflowStage> {
    fn from(workflow: Workflow) -> Self {
        workflow.0.into()
    }
}
