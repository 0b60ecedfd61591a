//! Caller entitlement: who the account belongs to and whether its plan may generate decks.

use crate::error::{Result, SlidesError, UpstreamError};
use crate::http::{redact, ServiceClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Subscription plan of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Essential,
    Paid,
    Premium,
    Other(String),
}

impl Plan {
    /// Parse a plan name case-insensitively; unknown names are kept verbatim.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "essential" => Plan::Essential,
            "paid" => Plan::Paid,
            "premium" => Plan::Premium,
            _ => Plan::Other(raw.to_string()),
        }
    }

    /// Only essential, paid and premium plans may generate presentations.
    pub fn allows_generation(&self) -> bool {
        !matches!(self, Plan::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Plan::Essential => "essential",
            Plan::Paid => "paid",
            Plan::Premium => "premium",
            Plan::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved entitlement of the caller. Built per request and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    pub email: String,
    pub plan: Plan,
    /// Plan name exactly as the account service spelled it.
    pub plan_name: String,
    pub workspace_id: Option<String>,
}

#[derive(Serialize)]
struct AccountRequest<'a> {
    account_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct AccountRecord {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    plan: Option<String>,
    #[serde(default, rename = "workspaceId")]
    workspace_id: Option<String>,
    #[serde(default, rename = "workspace_id")]
    workspace_id_snake: Option<String>,
}

/// Client for the account-info service.
#[derive(Debug, Clone)]
pub struct AccountClient {
    client: ServiceClient,
    endpoint: String,
    pricing_url: String,
    timeout: Duration,
}

impl AccountClient {
    pub fn new(
        client: ServiceClient,
        endpoint: impl Into<String>,
        pricing_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            pricing_url: pricing_url.into(),
            timeout,
        }
    }

    /// Look up the account and enforce the plan allow-list.
    #[instrument(skip(self, account_id), fields(account = %redact(account_id)))]
    pub async fn resolve_entitlement(&self, account_id: &str) -> Result<Entitlement> {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(SlidesError::Entitlement(UpstreamError::new(
                "Invalid account ID. Please provide a correct account ID.",
            )));
        }

        let response = self
            .client
            .post_json(&self.endpoint, &AccountRequest { account_id }, self.timeout, None)
            .await
            .map_err(SlidesError::Entitlement)?;

        let entitlement = parse_account_response(response)?;

        if !entitlement.plan.allows_generation() {
            warn!("Plan '{}' is not allowed to generate presentations", entitlement.plan);
            return Err(SlidesError::PlanNotAllowed {
                plan: entitlement.plan.to_string(),
                upgrade_url: self.pricing_url.clone(),
            });
        }

        info!("Account resolved (plan: {})", entitlement.plan);
        Ok(entitlement)
    }
}

/// Interpret the account service response: a non-empty array whose first
/// element carries `email` and `plan`.
fn parse_account_response(response: Value) -> Result<Entitlement> {
    let first = match response {
        Value::Array(items) => items.into_iter().next(),
        _ => None,
    }
    .ok_or_else(|| {
        SlidesError::Entitlement(UpstreamError::new(
            "Invalid account ID. Please provide a correct account ID.",
        ))
    })?;

    let invalid_data = || {
        SlidesError::Entitlement(UpstreamError::new(
            "Invalid account data received. Please check your account ID.",
        ))
    };

    let record: AccountRecord = serde_json::from_value(first).map_err(|_| invalid_data())?;

    let email = record
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(invalid_data)?;
    let plan = record
        .plan
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(invalid_data)?;

    let workspace_id = [record.workspace_id, record.workspace_id_snake]
        .into_iter()
        .flatten()
        .find(|w| !w.trim().is_empty());

    Ok(Entitlement {
        email,
        plan: Plan::parse(&plan),
        plan_name: plan,
        workspace_id,
    })
}
