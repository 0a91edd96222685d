use anyhow::{Context, Result};
use approval_core::{ApproverSet, ItemState};
use std::env;

pub const APPROVERS_ENV: &str = "APPROVAL_APPROVERS";
pub const ITEM_STATE_ENV: &str = "APPROVAL_ITEM_STATE";

/// Evaluation settings resolved from command-line flags and the environment.
///
/// Flags take precedence over environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub approvers: ApproverSet,
    pub item_state: ItemState,
}

impl Config {
    /// Merge explicit flag values over the environment.
    pub fn resolve(flag_approvers: Vec<String>, flag_state: Option<String>) -> Result<Self> {
        let approvers = if flag_approvers.is_empty() {
            parse_approvers(env::var(APPROVERS_ENV).ok())
        } else {
            flag_approvers.into_iter().collect()
        };

        if approvers.is_empty() {
            anyhow::bail!(
                "No approvers configured; pass --approver or set {}",
                APPROVERS_ENV
            );
        }

        let item_state = match flag_state.or_else(|| env::var(ITEM_STATE_ENV).ok()) {
            Some(state) => state
                .parse::<ItemState>()
                .with_context(|| format!("Invalid item state {:?}", state))?,
            None => ItemState::Open,
        };

        Ok(Config {
            approvers,
            item_state,
        })
    }
}

/// Parse a comma-separated approver list.
///
/// Blank entries are skipped and surrounding whitespace is removed.
pub fn parse_approvers(value: Option<String>) -> ApproverSet {
    value
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
