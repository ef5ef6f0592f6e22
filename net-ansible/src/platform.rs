use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use net_ansible_schemas::inventory::{Parameters, SwitchConfig};
use crate::error::DispatchError;

/// Platforms network_runner ships a provider role for
#[derive(Debug, Deserialize, Serialize, EnumIter, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NetworkOs {
    Cumulus,
    Dellos10,
    Eos,
    Ios,
    Junos,
    Nxos,
    Openvswitch,
}

impl NetworkOs {
    pub fn name(&self) -> String {
        // plain unit variants always serialize
        serde_plain::to_string(self).unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        serde_plain::from_str(&name.to_lowercase()).ok()
    }

    pub fn print_platform_list() {
        tracing::info!("Supported ansible_network_os values:");
        for os in Self::iter() {
            tracing::info!("{}", os.name());
        }
    }
}

/// Everything needed to run the platform role against one switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformTask {
    pub switch: String,
    pub role: String,
    pub vars: Parameters,
}

/// Handles the switches of one `ansible_network_os`. The custom parameters of a switch reach
/// the role through `task_vars`.
pub trait PlatformHandler: Send + Sync {
    fn network_os(&self) -> &str;

    fn role(&self) -> String;

    fn task_vars(&self, switch: &SwitchConfig) -> Parameters {
        switch.runner_kwargs()
    }
}

/// Handler for a platform with a network_runner provider role.
#[derive(Debug, Clone)]
pub struct RunnerPlatform {
    os: String,
}

impl RunnerPlatform {
    pub fn new(os: NetworkOs) -> Self {
        Self { os: os.name() }
    }
}

impl PlatformHandler for RunnerPlatform {
    fn network_os(&self) -> &str {
        &self.os
    }

    fn role(&self) -> String {
        format!("network-runner/providers/{}", self.os)
    }
}

/// Picks the handler for a switch by its `ansible_network_os`.
pub struct PlatformRegistry {
    handlers: Vec<Box<dyn PlatformHandler>>,
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        for os in NetworkOs::iter() {
            registry.register(Box::new(RunnerPlatform::new(os)));
        }
        registry
    }
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Adds the handler, replacing any handler registered for the same platform.
    pub fn register(&mut self, handler: Box<dyn PlatformHandler>) {
        self.handlers.retain(|h| !h.network_os().eq_ignore_ascii_case(handler.network_os()));
        self.handlers.push(handler);
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.network_os())
    }

    pub fn handler_for(&self, switch: &SwitchConfig) -> Result<&dyn PlatformHandler, DispatchError> {
        let Some(os) = switch.network_os() else {
            return Err(DispatchError::MissingNetworkOs {
                switch: switch.name.clone(),
            });
        };
        self.handlers
            .iter()
            .find(|h| h.network_os().eq_ignore_ascii_case(os))
            .map(|h| h.as_ref())
            .ok_or_else(|| DispatchError::UnsupportedPlatform {
                switch: switch.name.clone(),
                network_os: os.to_string(),
            })
    }

    pub fn dispatch(&self, switch: &SwitchConfig) -> Result<PlatformTask, DispatchError> {
        let handler = self.handler_for(switch)?;
        tracing::debug!("switch {} handled by {}", switch.name, handler.network_os());
        Ok(PlatformTask {
            switch: switch.name.clone(),
            role: handler.role(),
            vars: handler.task_vars(switch),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch(os: Option<&str>) -> SwitchConfig {
        let mut switch = SwitchConfig::new("sw0");
        if let Some(os) = os {
            switch.standard.insert("ansible_network_os", os);
        }
        switch.standard.insert("stp_edge", "true");
        switch.custom.insert("custom", "param");
        switch
    }

    #[test]
    fn test_network_os_names() {
        assert_eq!(NetworkOs::Openvswitch.name(), "openvswitch");
        assert_eq!(NetworkOs::from_name("JunOS"), Some(NetworkOs::Junos));
        assert_eq!(NetworkOs::from_name("windows"), None);
        assert_eq!(NetworkOs::iter().count(), 7);
    }

    #[test]
    fn test_dispatch_default_registry() {
        let registry = PlatformRegistry::default();
        let task = registry.dispatch(&switch(Some("openvswitch"))).unwrap();
        assert_eq!(task.role, "network-runner/providers/openvswitch");
        let vars: Vec<(&str, &str)> = task.vars.iter().collect();
        assert_eq!(vars, vec![("stp_edge", "true"), ("custom", "param")]);
    }

    #[test]
    fn test_dispatch_errors() {
        let registry = PlatformRegistry::default();
        assert_eq!(registry.dispatch(&switch(None)).unwrap_err(), DispatchError::MissingNetworkOs {
            switch: "sw0".into(),
        });
        assert_eq!(registry.dispatch(&switch(Some("vyos"))).unwrap_err(), DispatchError::UnsupportedPlatform {
            switch: "sw0".into(),
            network_os: "vyos".into(),
        });
        assert!(PlatformRegistry::new().dispatch(&switch(Some("eos"))).is_err());
    }

    struct PrefixedVars;

    impl PlatformHandler for PrefixedVars {
        fn network_os(&self) -> &str {
            "eos"
        }

        fn role(&self) -> String {
            "site/eos".into()
        }

        fn task_vars(&self, switch: &SwitchConfig) -> Parameters {
            switch.custom.iter().map(|(k, v)| (format!("eos_{k}"), v.to_string())).collect()
        }
    }

    #[test]
    fn test_register_replaces_handler() {
        let mut registry = PlatformRegistry::default();
        registry.register(Box::new(PrefixedVars));
        assert_eq!(registry.platforms().filter(|p| *p == "eos").count(), 1);
        let task = registry.dispatch(&switch(Some("EOS"))).unwrap();
        assert_eq!(task.role, "site/eos");
        assert_eq!(task.vars.get("eos_custom"), Some("param"));
        assert!(!task.vars.contains_key("stp_edge"));
    }
}
