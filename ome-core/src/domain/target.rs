//! Baseline target selection
//!
//! A baseline applies to a set of devices or groups. Callers identify them
//! by device name, group name, or service tag; exactly one of the three must
//! be used. The selector is validated once at construction so the rest of
//! the code never deals with half-filled selector combinations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OME target type id for a single device.
pub const TARGET_TYPE_DEVICE: i64 = 1000;
/// OME target type id for a device group.
pub const TARGET_TYPE_GROUP: i64 = 2000;

/// How the caller identifies the devices a baseline applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSelector {
    /// Devices identified by their OME device names.
    DeviceNames(Vec<String>),
    /// Device groups identified by their group names.
    GroupNames(Vec<String>),
    /// Devices identified by their service tags.
    ServiceTags(Vec<String>),
}

/// Error building a [`TargetSelector`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("one of device names, group names, or device service tags is required")]
    Empty,
    #[error("device names, group names, and device service tags are mutually exclusive")]
    Ambiguous,
}

impl TargetSelector {
    /// Builds a selector from the three optional input lists.
    ///
    /// Exactly one list must be non-empty; anything else is rejected here
    /// rather than resolved by precedence later.
    pub fn new(
        device_names: Vec<String>,
        group_names: Vec<String>,
        service_tags: Vec<String>,
    ) -> Result<Self, SelectorError> {
        let provided = [&device_names, &group_names, &service_tags]
            .iter()
            .filter(|list| !list.is_empty())
            .count();

        match provided {
            0 => Err(SelectorError::Empty),
            1 if !device_names.is_empty() => Ok(Self::DeviceNames(device_names)),
            1 if !group_names.is_empty() => Ok(Self::GroupNames(group_names)),
            1 => Ok(Self::ServiceTags(service_tags)),
            _ => Err(SelectorError::Ambiguous),
        }
    }

    /// The names or tags carried by this selector.
    pub fn values(&self) -> &[String] {
        match self {
            Self::DeviceNames(v) | Self::GroupNames(v) | Self::ServiceTags(v) => v,
        }
    }
}

/// A resolved baseline target, as the OME API wants it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: i64,
    pub target_type: TargetType,
}

/// OME target type descriptor (id + name pair on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    Device,
    Group,
}

impl TargetType {
    pub fn id(&self) -> i64 {
        match self {
            Self::Device => TARGET_TYPE_DEVICE,
            Self::Group => TARGET_TYPE_GROUP,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Device => "DEVICE",
            Self::Group => "GROUP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_selector_accepted() {
        let selector =
            TargetSelector::new(names(&["srv-1", "srv-2"]), Vec::new(), Vec::new()).unwrap();
        assert_eq!(selector, TargetSelector::DeviceNames(names(&["srv-1", "srv-2"])));

        let selector = TargetSelector::new(Vec::new(), names(&["rack-a"]), Vec::new()).unwrap();
        assert_eq!(selector, TargetSelector::GroupNames(names(&["rack-a"])));

        let selector = TargetSelector::new(Vec::new(), Vec::new(), names(&["SVCTAG1"])).unwrap();
        assert_eq!(selector, TargetSelector::ServiceTags(names(&["SVCTAG1"])));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = TargetSelector::new(Vec::new(), Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err, SelectorError::Empty);
    }

    #[test]
    fn test_ambiguous_input_rejected() {
        let err = TargetSelector::new(names(&["srv-1"]), names(&["rack-a"]), Vec::new())
            .unwrap_err();
        assert_eq!(err, SelectorError::Ambiguous);

        let err = TargetSelector::new(names(&["srv-1"]), names(&["rack-a"]), names(&["SVCTAG1"]))
            .unwrap_err();
        assert_eq!(err, SelectorError::Ambiguous);
    }

    #[test]
    fn test_target_type_wire_values() {
        assert_eq!(TargetType::Device.id(), 1000);
        assert_eq!(TargetType::Device.name(), "DEVICE");
        assert_eq!(TargetType::Group.id(), 2000);
        assert_eq!(TargetType::Group.name(), "GROUP");
    }
}
