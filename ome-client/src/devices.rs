//! Device and group lookup endpoints
//!
//! Resolves a [`TargetSelector`] into the concrete device/group ids the
//! baseline endpoints want. Lookups go through OData `$filter` one value at
//! a time; OME has no `in` operator.

use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::OmeClient;
use crate::error::{ClientError, Result};
use ome_core::domain::target::{Target, TargetSelector, TargetType};
use ome_core::dto::odata::Collection;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DeviceRow {
    id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GroupRow {
    id: i64,
}

impl OmeClient {
    /// Resolve a target selector into baseline targets
    ///
    /// Every name or tag in the selector must resolve; the error lists the
    /// ones that did not so the caller can fix its input in one pass.
    pub async fn resolve_targets(&self, selector: &TargetSelector) -> Result<Vec<Target>> {
        match selector {
            TargetSelector::DeviceNames(names) => {
                self.resolve_devices(names, "DeviceName", "device name").await
            }
            TargetSelector::ServiceTags(tags) => {
                self.resolve_devices(tags, "DeviceServiceTag", "service tag")
                    .await
            }
            TargetSelector::GroupNames(names) => self.resolve_groups(names).await,
        }
    }

    async fn resolve_devices(
        &self,
        values: &[String],
        field: &str,
        kind: &str,
    ) -> Result<Vec<Target>> {
        let mut targets = Vec::with_capacity(values.len());
        let mut missing = Vec::new();

        for value in values {
            let filter = format!("{} eq '{}'", field, value);
            let response = self
                .request(Method::GET, "/api/DeviceService/Devices")
                .query(&[("$filter", filter.as_str())])
                .send()
                .await?;

            let devices: Collection<DeviceRow> = self.handle_response(response).await?;
            match devices.value.first() {
                Some(device) => {
                    debug!("{} '{}' resolved to device {}", kind, value, device.id);
                    targets.push(Target {
                        id: device.id,
                        target_type: TargetType::Device,
                    });
                }
                None => missing.push(value.clone()),
            }
        }

        if missing.is_empty() {
            Ok(targets)
        } else {
            Err(ClientError::NotFound(format!(
                "no device matches {}(s): {}",
                kind,
                missing.join(", ")
            )))
        }
    }

    async fn resolve_groups(&self, names: &[String]) -> Result<Vec<Target>> {
        let mut targets = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            let filter = format!("Name eq '{}'", name);
            let response = self
                .request(Method::GET, "/api/GroupService/Groups")
                .query(&[("$filter", filter.as_str())])
                .send()
                .await?;

            let groups: Collection<GroupRow> = self.handle_response(response).await?;
            match groups.value.first() {
                Some(group) => {
                    debug!("group '{}' resolved to {}", name, group.id);
                    targets.push(Target {
                        id: group.id,
                        target_type: TargetType::Group,
                    });
                }
                None => missing.push(name.clone()),
            }
        }

        if missing.is_empty() {
            Ok(targets)
        } else {
            Err(ClientError::NotFound(format!(
                "no group matches name(s): {}",
                missing.join(", ")
            )))
        }
    }
}
