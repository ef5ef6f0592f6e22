use net_ansible_schemas::binding::PortBinding;
use net_ansible_schemas::inventory::{Inventory, SwitchPort};
use crate::error::LookupError;
use crate::port_mappings::build_sriov_host_id;

/// Find the switch ports a port binding lands on.
///
/// Baremetal ports name their switch in the local link information, or give only its MAC, in
/// which case the switch is found through the inventory's MAC map. VM ports are looked up in the
/// port mappings by host id; SR-IOV ports use the PCI suffixed host id. A host without a mapping
/// has no ports.
pub fn switch_ports(inventory: &Inventory, binding: &PortBinding) -> Result<Vec<SwitchPort>, LookupError> {
    match binding {
        PortBinding::Baremetal { switch_info, switch_id, port_id } => {
            if port_id.is_empty() {
                return Err(LookupError::MissingLocalLinkInfo {
                    field: "port_id".into(),
                });
            }
            let switch_mac = switch_id.as_deref().unwrap_or_default().to_uppercase();
            let switch_name = match switch_info.as_deref().filter(|s| !s.is_empty()) {
                Some(name) => name.to_string(),
                None if switch_mac.is_empty() => {
                    return Err(LookupError::MissingLocalLinkInfo {
                        field: "switch_info or switch_id".into(),
                    });
                }
                None => inventory
                    .switch_for_mac(&switch_mac)
                    .map(|name| name.to_string())
                    .ok_or_else(|| LookupError::UnknownSwitch {
                        mac: switch_mac.clone(),
                    })?,
            };
            tracing::debug!("Local Link Info:: name: {} mac: {} port: {}", switch_name, switch_mac, port_id);
            Ok(vec![SwitchPort::new(switch_name, port_id.as_str())])
        }
        PortBinding::Normal { host_id, pci_slot } => {
            let host_id = match pci_slot {
                Some(slot) => build_sriov_host_id(host_id, slot),
                None => host_id.clone(),
            };
            tracing::debug!("Host-ID lookup: {}", host_id);
            match inventory.ports_for_host(&host_id) {
                Some(ports) => Ok(ports.to_vec()),
                None => {
                    tracing::debug!("no port mapping for host {}", host_id);
                    Ok(Vec::new())
                }
            }
        }
    }
}
