//! Vault governance and accounting properties.

use std::sync::Arc;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};

use crate::domain::{RawVaultProperties, VaultInfo};
use crate::error::{IntegrityError, Result};

use super::services::VaultServices;

pub struct InfoReader {
    services: Arc<VaultServices>,
}

impl InfoReader {
    pub fn new(services: Arc<VaultServices>) -> Self {
        Self { services }
    }

    /// Properties of `vault` with the last report as a calendar timestamp.
    pub async fn get_info(&self, vault: Address) -> Result<VaultInfo> {
        let raw = self.services.properties.get_properties(vault).await?;
        into_info(raw)
    }
}

fn into_info(raw: RawVaultProperties) -> Result<VaultInfo> {
    let value = raw.last_report;
    let invalid = || IntegrityError::InvalidTimestamp { value };
    let seconds = i64::try_from(value).map_err(|_| invalid())?;
    let last_report: DateTime<Utc> = DateTime::from_timestamp(seconds, 0).ok_or_else(invalid)?;

    Ok(VaultInfo {
        name: raw.name,
        symbol: raw.symbol,
        api_version: raw.api_version,
        emergency_shutdown: raw.emergency_shutdown,
        management_fee: raw.management_fee,
        performance_fee: raw.performance_fee,
        total_assets: raw.total_assets,
        deposit_limit: raw.deposit_limit,
        debt_ratio: raw.debt_ratio,
        management: raw.management,
        governance: raw.governance,
        guardian: raw.guardian,
        rewards: raw.rewards,
        last_report,
    })
}
