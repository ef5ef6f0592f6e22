use std::path::Path;
use serde_json::{json, Map, Value};
use net_ansible_schemas::inventory::{Inventory, SwitchConfig};
use net_ansible_schemas::{BOOLEANS, CUSTOM_PARAM_PREFIX, DRIVER_TAG, PORT_MAPPINGS, SETTINGS_SECTION};
use crate::error::{FormatError, InventoryError};
use crate::ini::{parse_ini, write_ini, IniSection};
use crate::port_mappings::parse_port_mappings;
use crate::switches::{parse_bool, parse_switch, switch_name};

/// Build the inventory from the text of one configuration file. Sections that do not belong to
/// the driver are ignored, any malformed driver section fails the whole parse.
pub fn parse_inventory(text: &str) -> Result<Inventory, FormatError> {
    let mut inventory = Inventory::default();
    merge_into(&mut inventory, text)?;
    log_inventory(&inventory);
    Ok(inventory)
}

/// Load and merge the configuration files in order. A host mapping, switch or setting found in a
/// later file replaces the earlier one.
pub async fn load_inventory<P: AsRef<Path>>(paths: &[P]) -> Result<Inventory, InventoryError> {
    let mut inventory = Inventory::default();
    for path in paths {
        let path = path.as_ref();
        tracing::debug!("reading inventory from {:?}", path);
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| InventoryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        merge_into(&mut inventory, &text).map_err(|source| InventoryError::Format {
            path: path.to_path_buf(),
            source,
        })?;
    }
    log_inventory(&inventory);
    Ok(inventory)
}

fn merge_into(inventory: &mut Inventory, text: &str) -> Result<(), FormatError> {
    for section in parse_ini(text)? {
        if section.name == SETTINGS_SECTION {
            if let Some(uri) = section.get("coordination_uri") {
                inventory.settings.coordination_uri = Some(uri.to_string());
            }
            continue;
        }
        if section.name == format!("{DRIVER_TAG}{PORT_MAPPINGS}") {
            for mapping in parse_port_mappings(&section)?.iter() {
                inventory.port_mappings.insert(mapping.clone());
            }
            continue;
        }
        if let Some(name) = switch_name(&section)? {
            let switch = parse_switch(name, &section)?;
            inventory.insert_switch(switch);
        }
    }
    Ok(())
}

fn log_inventory(inventory: &Inventory) {
    tracing::info!("Ansible Host List: {}", inventory.switch_names().collect::<Vec<_>>().join(", "));
    tracing::debug!("Ansible Port Mappings: {:?}", inventory.port_mappings);
}

/// Serialize the inventory back to INI. Parsing the result gives back the same inventory.
pub fn render_inventory(inventory: &Inventory) -> String {
    let mut sections = Vec::new();

    if let Some(uri) = &inventory.settings.coordination_uri {
        let mut settings = IniSection::new(SETTINGS_SECTION);
        settings.push("coordination_uri", uri.as_str());
        sections.push(settings);
    }

    if !inventory.port_mappings.is_empty() {
        let mut mappings = IniSection::new(format!("{DRIVER_TAG}{PORT_MAPPINGS}"));
        for mapping in &inventory.port_mappings {
            let ports = mapping
                .ports
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            mappings.push(mapping.host_id.as_str(), ports);
        }
        sections.push(mappings);
    }

    for switch in &inventory.switches {
        sections.push(switch_section(switch));
    }

    write_ini(&sections)
}

fn switch_section(switch: &SwitchConfig) -> IniSection {
    let mut section = IniSection::new(format!("{DRIVER_TAG}{}", switch.name));
    for (k, v) in switch.standard.iter() {
        section.push(k, v);
    }
    for (k, v) in switch.custom.iter() {
        section.push(format!("{CUSTOM_PARAM_PREFIX}{k}"), v);
    }
    section
}

/// The switches as an ansible inventory, `{"all": {"hosts": {...}}}`, with the driver's boolean
/// flags as JSON booleans.
pub fn ansible_inventory(inventory: &Inventory) -> Value {
    let mut hosts = Map::new();
    for switch in &inventory.switches {
        let mut vars = Map::new();
        for (k, v) in switch.standard.iter() {
            let value = match BOOLEANS.contains(&k).then(|| parse_bool(v)).flatten() {
                Some(b) => Value::Bool(b),
                None => Value::String(v.to_string()),
            };
            vars.insert(k.to_string(), value);
        }
        for (k, v) in switch.custom.iter() {
            vars.insert(format!("{CUSTOM_PARAM_PREFIX}{k}"), Value::String(v.to_string()));
        }
        hosts.insert(switch.name.clone(), Value::Object(vars));
    }
    json!({ "all": { "hosts": hosts } })
}
