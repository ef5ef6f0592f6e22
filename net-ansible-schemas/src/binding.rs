use serde::{Deserialize, Serialize};

/// Describes the neutron port a switch lookup is made for.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PortBinding {
    /// Baremetal port, the switch is described by the port's local link information.
    Baremetal {
        /// switch name as known to the inventory
        switch_info: Option<String>,
        /// switch MAC, used when `switch_info` is not set
        switch_id: Option<String>,
        port_id: String,
    },
    /// VM port bound to a compute host. A `pci_slot` marks an SR-IOV direct attachment.
    Normal {
        host_id: String,
        pci_slot: Option<String>,
    },
}
