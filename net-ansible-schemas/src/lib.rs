pub mod binding;
pub mod cli_models;
pub mod inventory;

/// Section prefix marking a section as belonging to the ansible driver.
pub const DRIVER_TAG: &str = "ansible:";
/// Name (after the driver tag) of the section holding compute host to switch port mappings.
pub const PORT_MAPPINGS: &str = "port_mappings";
/// Parameters with this prefix are handed to the platform role with the prefix removed.
pub const CUSTOM_PARAM_PREFIX: &str = "cp_";
/// network_runner parameters passed through as runner kwargs.
pub const EXTRA_PARAMS: [&str; 1] = ["stp_edge"];
/// Switch parameters that are coerced to booleans at load time.
pub const BOOLEANS: [&str; 2] = ["manage_vlans", "stp_edge"];
/// Section holding the driver wide settings.
pub const SETTINGS_SECTION: &str = "ml2_ansible";
pub const DEFAULT_COORDINATION_URI: &str = "etcd://127.0.0.1:2379";
