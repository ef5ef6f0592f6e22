use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use crate::binding::PortBinding;

#[derive(Parser)]
#[command(version = "0.1", about = "Validate and inspect net-ansible switch inventories")]
pub struct Opts {
    #[arg(
    long,
    default_value = "ml2_conf_ansible.ini",
    help = "Configuration file, may be repeated and later files override earlier ones"
    )]
    pub input: Vec<String>,
    #[arg(short, long)]
    pub verbosity: Option<String>,
    #[command(subcommand)]
    pub sub_command: SubCommand,
}

#[derive(Subcommand, Debug, Deserialize, Serialize)]
pub enum SubCommand {
    #[command(about = "Load the inventory and report any format errors")]
    Check,
    #[command(about = "Print the normalized inventory")]
    Show(ShowCmd),
    #[command(about = "Print the switches as an ansible inventory")]
    AnsibleInventory,
    #[command(about = "Resolve the switch ports for a port binding")]
    Lookup(LookupCmd),
    #[command(about = "List the supported ansible_network_os values")]
    Platforms,
}

impl SubCommand {
    pub fn name(&self) -> String {
        match &self {
            SubCommand::Check => "check".into(),
            SubCommand::Show(_) => "show".into(),
            SubCommand::AnsibleInventory => "ansible inventory".into(),
            SubCommand::Lookup(_) => "lookup".into(),
            SubCommand::Platforms => "platforms".into(),
        }
    }
}

#[derive(ValueEnum, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Ini,
}

#[derive(Parser, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ShowCmd {
    #[clap(long, short, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Parser, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LookupCmd {
    #[clap(subcommand)]
    pub binding: LookupCmdType,
}

/// The two kinds of ports a lookup can be made for.
#[derive(Subcommand, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LookupCmdType {
    #[command(about = "VM port on a compute host, SR-IOV ports also give the PCI slot")]
    Host {
        #[clap(index = 1)]
        host_id: String,
        #[clap(long)]
        pci_slot: Option<String>,
    },
    #[command(about = "Baremetal port described by local link information")]
    Baremetal {
        #[clap(long)]
        switch_info: Option<String>,
        #[clap(long, help = "Switch MAC, resolved through the inventory when no switch name is given")]
        switch_id: Option<String>,
        #[clap(long)]
        port_id: String,
    },
}

impl LookupCmd {
    pub fn to_binding(&self) -> PortBinding {
        match &self.binding {
            LookupCmdType::Host { host_id, pci_slot } => PortBinding::Normal {
                host_id: host_id.clone(),
                pci_slot: pci_slot.clone(),
            },
            LookupCmdType::Baremetal { switch_info, switch_id, port_id } => PortBinding::Baremetal {
                switch_info: switch_info.clone(),
                switch_id: switch_id.clone(),
                port_id: port_id.clone(),
            },
        }
    }
}
