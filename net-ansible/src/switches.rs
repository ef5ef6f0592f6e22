use net_ansible_schemas::inventory::SwitchConfig;
use net_ansible_schemas::{BOOLEANS, CUSTOM_PARAM_PREFIX, DRIVER_TAG, PORT_MAPPINGS};
use crate::error::{FormatError, FormatErrorKind};
use crate::ini::IniSection;

pub use net_ansible_schemas::inventory::parse_bool;

/// The switch a section describes. Sections without the driver tag, and the port mappings
/// section, are not switches.
pub fn switch_name(section: &IniSection) -> Result<Option<&str>, FormatError> {
    let Some(name) = section.name.strip_prefix(DRIVER_TAG) else {
        return Ok(None);
    };
    if name == PORT_MAPPINGS {
        return Ok(None);
    }
    if name.is_empty() {
        return Err(FormatError::new(FormatErrorKind::EmptyName, &section.name, Some(section.line)));
    }
    if name.contains(':') {
        return Err(FormatError::new(FormatErrorKind::ReservedSeparator, &section.name, Some(section.line)));
    }
    Ok(Some(name))
}

pub fn parse_switch(name: &str, section: &IniSection) -> Result<SwitchConfig, FormatError> {
    let mut switch = SwitchConfig::new(name);
    for entry in &section.entries {
        if let Some(custom) = entry.key.strip_prefix(CUSTOM_PARAM_PREFIX) {
            if custom.is_empty() {
                return Err(FormatError::new(FormatErrorKind::EmptyName, &entry.key, Some(entry.line)));
            }
            switch.custom.insert(custom, entry.value.as_str());
            continue;
        }
        if BOOLEANS.contains(&entry.key.as_str()) && parse_bool(&entry.value).is_none() {
            return Err(FormatError::new(
                FormatErrorKind::InvalidBoolean,
                format!("{} = {}", entry.key, entry.value),
                Some(entry.line),
            ));
        }
        switch.standard.insert(entry.key.as_str(), entry.value.as_str());
    }
    Ok(switch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::parse_ini;

    #[test]
    fn test_switch_name() {
        let sections = parse_ini("[ansible:custom_platform]\n[ansible:port_mappings]\n[ml2_ansible]\n[DEFAULT]\n").unwrap();
        let names: Vec<Option<&str>> = sections.iter().map(|s| switch_name(s).unwrap()).collect();
        assert_eq!(names, vec![Some("custom_platform"), None, None, None]);
    }

    #[test]
    fn test_switch_name_rejected() {
        let sections = parse_ini("[ansible:rack:1]\n").unwrap();
        let err = switch_name(&sections[0]).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::ReservedSeparator);
        assert_eq!(err.subject, "ansible:rack:1");
        assert_eq!(err.line, Some(1));

        let sections = parse_ini("[ansible:]\n").unwrap();
        assert_eq!(switch_name(&sections[0]).unwrap_err().kind, FormatErrorKind::EmptyName);
    }

    #[test]
    fn test_custom_params_split() {
        let text = "\
[ansible:sw0]
ansible_network_os = openvswitch
cp_myparam = myvalue
stp_edge = True
cp_other = 2
";
        let sections = parse_ini(text).unwrap();
        let switch = parse_switch("sw0", &sections[0]).unwrap();
        assert_eq!(switch.custom.get("myparam"), Some("myvalue"));
        assert!(!switch.standard.contains_key("cp_myparam"));
        assert!(!switch.standard.contains_key("myparam"));
        assert_eq!(switch.standard.keys().collect::<Vec<_>>(), vec!["ansible_network_os", "stp_edge"]);
        assert_eq!(switch.custom.keys().collect::<Vec<_>>(), vec!["myparam", "other"]);
        assert!(switch.stp_edge());
    }

    #[test]
    fn test_invalid_boolean_rejected() {
        let sections = parse_ini("[ansible:sw0]\nmanage_vlans = sometimes\n").unwrap();
        let err = parse_switch("sw0", &sections[0]).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::InvalidBoolean);
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn test_bare_custom_prefix_rejected() {
        let sections = parse_ini("[ansible:sw0]\ncp_ = x\n").unwrap();
        assert_eq!(parse_switch("sw0", &sections[0]).unwrap_err().kind, FormatErrorKind::EmptyName);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
