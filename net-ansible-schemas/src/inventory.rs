use std::fmt;
use std::fmt::Formatter;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::{DEFAULT_COORDINATION_URI, EXTRA_PARAMS};

/// One end of a host attachment, the switch and the port on that switch.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwitchPort {
    pub switch: String,
    pub port: String,
}

impl SwitchPort {
    pub fn new<S: Into<String>, P: Into<String>>(switch: S, port: P) -> Self {
        Self {
            switch: switch.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for SwitchPort {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.switch, self.port)
    }
}

/// The switch ports a compute host (or one of its SR-IOV functions, in which case the host id
/// carries a `-<pci address>` suffix) is cabled to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HostPortMapping {
    pub host_id: String,
    pub ports: Vec<SwitchPort>,
}

/// Host id to switch ports, kept in the order the hosts were declared.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct PortMappings(Vec<HostPortMapping>);

impl PortMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, host_id: &str) -> Option<&[SwitchPort]> {
        self.0
            .iter()
            .find(|m| m.host_id == host_id)
            .map(|m| m.ports.as_slice())
    }

    /// Adds the mapping, a mapping for the same host is replaced where it stands.
    pub fn insert(&mut self, mapping: HostPortMapping) {
        match self.0.iter_mut().find(|m| m.host_id == mapping.host_id) {
            Some(existing) => *existing = mapping,
            None => self.0.push(mapping),
        }
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|m| m.host_id.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostPortMapping> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PortMappings {
    type Item = &'a HostPortMapping;
    type IntoIter = std::slice::Iter<'a, HostPortMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// String to string parameters in declaration order. Serialized as a map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the parameter, an existing key keeps its position and gets the new value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct ParametersVisitor;

impl<'de> Visitor<'de> for ParametersVisitor {
    type Value = Parameters;

    fn expecting(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("a map of string parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut params = Parameters::new();
        while let Some((k, v)) = access.next_entry::<String, String>()? {
            params.insert(k, v);
        }
        Ok(params)
    }
}

impl<'de> Deserialize<'de> for Parameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ParametersVisitor)
    }
}

/// Parse a boolean the way oslo.config does, case insensitive.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// A switch declared with an `[ansible:<name>]` section.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SwitchConfig {
    pub name: String,
    /// ansible host variables and driver flags, passed through unchanged
    pub standard: Parameters,
    /// `cp_` parameters with the prefix stripped, only meaningful to the platform role
    pub custom: Parameters,
}

impl SwitchConfig {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            standard: Parameters::new(),
            custom: Parameters::new(),
        }
    }

    pub fn network_os(&self) -> Option<&str> {
        self.standard.get("ansible_network_os")
    }

    pub fn mac(&self) -> Option<&str> {
        self.standard.get("mac")
    }

    pub fn manage_vlans(&self) -> bool {
        self.flag("manage_vlans", true)
    }

    pub fn stp_edge(&self) -> bool {
        self.flag("stp_edge", false)
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.standard
            .get(key)
            .and_then(parse_bool)
            .unwrap_or(default)
    }

    /// The keyword arguments a network_runner call for this switch receives: the extra
    /// parameters that are set, then the custom parameters.
    pub fn runner_kwargs(&self) -> Parameters {
        let mut kwargs = Parameters::new();
        for (k, v) in self.standard.iter() {
            if EXTRA_PARAMS.contains(&k) {
                kwargs.insert(k, v);
            }
        }
        for (k, v) in self.custom.iter() {
            kwargs.insert(k, v);
        }
        kwargs
    }
}

/// Values from the `[ml2_ansible]` section.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverSettings {
    /// backend used for tooz coordination, only kept when set explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordination_uri: Option<String>,
}

impl DriverSettings {
    pub fn coordination_uri(&self) -> &str {
        self.coordination_uri
            .as_deref()
            .unwrap_or(DEFAULT_COORDINATION_URI)
    }
}

/// The loaded inventory. Built once from the configuration files and then only read.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    #[serde(default)]
    pub settings: DriverSettings,
    #[serde(default)]
    pub port_mappings: PortMappings,
    #[serde(default)]
    pub switches: Vec<SwitchConfig>,
    /// upper cased switch MAC to switch name
    #[serde(default)]
    pub mac_map: Vec<(String, String)>,
}

impl Inventory {
    pub fn switch(&self, name: &str) -> Option<&SwitchConfig> {
        self.switches.iter().find(|s| s.name == name)
    }

    pub fn switch_names(&self) -> impl Iterator<Item = &str> {
        self.switches.iter().map(|s| s.name.as_str())
    }

    pub fn switch_for_mac(&self, mac: &str) -> Option<&str> {
        let mac = mac.to_uppercase();
        self.mac_map
            .iter()
            .find(|(m, _)| *m == mac)
            .map(|(_, name)| name.as_str())
    }

    pub fn ports_for_host(&self, host_id: &str) -> Option<&[SwitchPort]> {
        self.port_mappings.get(host_id)
    }

    /// Adds the switch, replacing a switch of the same name in place, and rebuilds the MAC map.
    pub fn insert_switch(&mut self, switch: SwitchConfig) {
        match self.switches.iter_mut().find(|s| s.name == switch.name) {
            Some(existing) => *existing = switch,
            None => self.switches.push(switch),
        }
        self.rebuild_mac_map();
    }

    /// MACs in switch order. A MAC declared by several switches keeps its first position and
    /// resolves to the last switch declaring it.
    fn rebuild_mac_map(&mut self) {
        self.mac_map.clear();
        for switch in &self.switches {
            let Some(mac) = switch.mac() else {
                continue;
            };
            let mac = mac.to_uppercase();
            match self.mac_map.iter_mut().find(|(m, _)| *m == mac) {
                Some(existing) => existing.1 = switch.name.clone(),
                None => self.mac_map.push((mac, switch.name.clone())),
            }
        }
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
