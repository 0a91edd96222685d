//! Aggregation of per-approver comment signals into one decision.
//!
//! Comments are walked oldest first. Each comment from an approver that
//! classifies as an approval or denial overwrites that approver's signal, so
//! the final map holds every approver's most recent decision. Comments that
//! classify as neither leave the stored signal alone.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::ClassifyError;
use crate::keywords::classify;
use crate::types::{AggregateDecision, ApproverSet, Comment, ItemState, Signal};

/// A decision together with the per-approver signals it was folded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalReport {
    pub decision: AggregateDecision,
    pub item_state: ItemState,
    /// Final signal of every approver, ordered by identity
    pub signals: BTreeMap<String, Signal>,
}

/// Compute the aggregate decision for an item.
///
/// Any approver's denial is a veto. Approval requires every approver to have
/// approved. A closed item that never reached approval is denied, since no
/// further comments can resolve it.
///
/// An empty approver set approves vacuously. Callers that treat a zero-approver
/// policy as misconfiguration must reject it before calling this.
///
/// # Errors
/// Returns the first [`ClassifyError`] hit while classifying an approver's
/// comment. No decision is produced in that case.
pub fn compute_approval(
    comments: &[Comment],
    approvers: &ApproverSet,
    item_state: ItemState,
) -> Result<AggregateDecision, ClassifyError> {
    evaluate(comments, approvers, item_state).map(|report| report.decision)
}

/// Like [`compute_approval`], but also returns each approver's final signal.
pub fn evaluate(
    comments: &[Comment],
    approvers: &ApproverSet,
    item_state: ItemState,
) -> Result<ApprovalReport, ClassifyError> {
    let mut signals: BTreeMap<String, Signal> = approvers
        .iter()
        .map(|approver| (approver.to_string(), Signal::Pending))
        .collect();

    for comment in comments {
        let Some(current) = signals.get_mut(&comment.author) else {
            continue;
        };

        match classify(&comment.body)? {
            Signal::Pending => {}
            signal => {
                debug!("Approver {} signalled {}", comment.author, signal);
                *current = signal;
            }
        }
    }

    let decision = apply_item_state(fold_signals(signals.values().copied()), item_state);
    debug!(
        "Decision {} for {} approvers on {} item",
        decision,
        signals.len(),
        item_state
    );

    Ok(ApprovalReport {
        decision,
        item_state,
        signals,
    })
}

/// Denied beats everything; Approved needs unanimity.
fn fold_signals(signals: impl Iterator<Item = Signal>) -> AggregateDecision {
    let mut all_approved = true;
    for signal in signals {
        match signal {
            Signal::Denied => return AggregateDecision::Denied,
            Signal::Pending => all_approved = false,
            Signal::Approved => {}
        }
    }

    if all_approved {
        AggregateDecision::Approved
    } else {
        AggregateDecision::Pending
    }
}

fn apply_item_state(decision: AggregateDecision, item_state: ItemState) -> AggregateDecision {
    match (decision, item_state) {
        (AggregateDecision::Pending, ItemState::Closed) => AggregateDecision::Denied,
        (decision, _) => decision,
    }
}
