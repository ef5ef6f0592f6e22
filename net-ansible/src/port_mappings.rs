use net_ansible_schemas::inventory::{HostPortMapping, PortMappings, SwitchPort};
use crate::error::{FormatError, FormatErrorKind};
use crate::ini::IniSection;

const PORT_SEPARATOR: &str = "::";

/// Parse one `host_id = switch::port[,switch::port...]` entry of the port mappings section.
/// Only the first `::` of each specification separates the switch, the port name may contain
/// further colons.
pub fn parse_port_mapping(
    host_id: &str,
    value: &str,
    line: Option<usize>,
) -> Result<HostPortMapping, FormatError> {
    if host_id.contains(':') {
        return Err(FormatError::new(FormatErrorKind::ReservedSeparator, host_id, line));
    }
    let mut ports = Vec::new();
    for spec in value.split(',') {
        let spec = spec.trim();
        let Some((switch, port)) = spec.split_once(PORT_SEPARATOR) else {
            return Err(FormatError::new(
                FormatErrorKind::MissingPortSeparator,
                format!("{host_id} = {spec}"),
                line,
            ));
        };
        let (switch, port) = (switch.trim(), port.trim());
        if switch.is_empty() || port.is_empty() {
            return Err(FormatError::new(FormatErrorKind::EmptyName, spec, line));
        }
        ports.push(SwitchPort::new(switch, port));
    }
    Ok(HostPortMapping {
        host_id: host_id.to_string(),
        ports,
    })
}

pub fn parse_port_mappings(section: &IniSection) -> Result<PortMappings, FormatError> {
    let mut mappings = PortMappings::new();
    for entry in &section.entries {
        let mapping = parse_port_mapping(&entry.key, &entry.value, Some(entry.line))?;
        tracing::trace!("port mapping {} -> {:?}", mapping.host_id, mapping.ports);
        mappings.insert(mapping);
    }
    Ok(mappings)
}

/// Turn a port's PCI slot into the suffixed host id SR-IOV ports are mapped under, e.g.
/// `compute1` with slot `0000:37:0b.2` becomes `compute1-370b`.
pub fn build_sriov_host_id(host_id: &str, pci_slot: &str) -> String {
    let slot = pci_slot.split('.').next().unwrap_or_default();
    let slot = slot.replace("0000:", "").replace(':', "");
    format!("{host_id}-{slot}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::parse_ini;

    #[test]
    fn test_two_ports_in_order() {
        let mapping = parse_port_mapping("compute1", "switchA::portA,switchB::portB", None).unwrap();
        assert_eq!(mapping.ports, vec![
            SwitchPort::new("switchA", "portA"),
            SwitchPort::new("switchB", "portB"),
        ]);
    }

    #[test]
    fn test_pci_suffixed_host() {
        let mapping = parse_port_mapping("compute2_host_name-370b", "openswitch230_rack_23::port_y", None).unwrap();
        assert_eq!(mapping.host_id, "compute2_host_name-370b");
        assert_eq!(mapping.ports, vec![SwitchPort::new("openswitch230_rack_23", "port_y")]);
    }

    #[test]
    fn test_port_name_keeps_extra_colons() {
        let mapping = parse_port_mapping("compute1", "sw0::Ethernet1/1:2, sw1:::x", None).unwrap();
        assert_eq!(mapping.ports, vec![
            SwitchPort::new("sw0", "Ethernet1/1:2"),
            SwitchPort::new("sw1", ":x"),
        ]);
    }

    #[test]
    fn test_host_with_colon_rejected() {
        let err = parse_port_mapping("compute:1", "sw0::p1", Some(3)).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::ReservedSeparator);
        assert_eq!(err.subject, "compute:1");
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn test_missing_double_colon_rejected() {
        for value in ["sw0:port1", "sw0port1", "sw0::p1,sw1:p2", "sw0::p1,", ""] {
            let err = parse_port_mapping("compute1", value, None).unwrap_err();
            assert_eq!(err.kind, FormatErrorKind::MissingPortSeparator, "{value}");
        }
    }

    #[test]
    fn test_empty_switch_or_port_rejected() {
        assert_eq!(parse_port_mapping("c", "::p1", None).unwrap_err().kind, FormatErrorKind::EmptyName);
        assert_eq!(parse_port_mapping("c", "sw0::", None).unwrap_err().kind, FormatErrorKind::EmptyName);
    }

    #[test]
    fn test_parse_section_in_order() {
        let sections = parse_ini("[ansible:port_mappings]\nc2 = sw1::p1\nc1 = sw0::p0\n").unwrap();
        let mappings = parse_port_mappings(&sections[0]).unwrap();
        assert_eq!(mappings.hosts().collect::<Vec<_>>(), vec!["c2", "c1"]);
        assert_eq!(mappings.get("c1"), Some(&[SwitchPort::new("sw0", "p0")][..]));
    }

    #[test]
    fn test_bad_entry_reports_line() {
        let sections = parse_ini("[ansible:port_mappings]\nc1 = sw0::p0\nc2 = sw1-p1\n").unwrap();
        let err = parse_port_mappings(&sections[0]).unwrap_err();
        assert_eq!(err.line, Some(3));
        assert_eq!(err.subject, "c2 = sw1-p1");
    }

    #[test]
    fn test_sriov_host_id() {
        assert_eq!(build_sriov_host_id("compute2_host_name", "0000:37:0b.2"), "compute2_host_name-370b");
        assert_eq!(build_sriov_host_id("host", "0000:03:00.1"), "host-0300");
        assert_eq!(build_sriov_host_id("host", "37:0b"), "host-370b");
    }
}
