use anyhow::{anyhow, Context};
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing::level_filters::LevelFilter;
use net_ansible_lib::lookup::switch_ports;
use net_ansible_lib::platform::{NetworkOs, PlatformRegistry};
use net_ansible_lib::{ansible_inventory, load_inventory, render_inventory};
use net_ansible_schemas::cli_models::{Opts, OutputFormat, SubCommand};


#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    std::process::exit(match run_app().await {
        Ok(_) => 0,
        Err(err) => {
            tracing::error!("{:#}", err);
            1
        }
    });
}

fn log_level(s: &str) -> anyhow::Result<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Ok(LevelFilter::ERROR),
        "warn" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        _ => Err(anyhow!("Unknown Log LevelFilter {}", s)),
    }
}

/// Parses the CLI arguments, sets up logging and runs the sub command. Inventory output goes to
/// stdout, logs go to stderr so the output can be piped.
pub async fn run_app() -> Result<(), anyhow::Error> {
    let opts: Opts = Opts::parse();
    let mut e = None;
    let level = match &opts.verbosity {
        None => LevelFilter::INFO,
        Some(x) => match log_level(x) {
            Ok(l) => l,
            Err(err) => {
                e = Some(err);
                LevelFilter::INFO
            }
        },
    };

    let stderr_log = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();
    if let Some(e) = e {
        tracing::warn!("{}", e);
    }

    tracing::trace!("running {}", opts.sub_command.name());
    parse_command(opts).await.context("running CLI command")
}

pub async fn parse_command(opts: Opts) -> anyhow::Result<()> {
    if let SubCommand::Platforms = &opts.sub_command {
        NetworkOs::print_platform_list();
        return Ok(());
    }

    let inventory = load_inventory(opts.input.as_slice())
        .await
        .context("loading inventory")?;

    match &opts.sub_command {
        SubCommand::Check => {
            let registry = PlatformRegistry::default();
            for switch in &inventory.switches {
                // an unknown platform is only a problem once the switch is configured
                match registry.dispatch(switch) {
                    Ok(task) => tracing::info!("switch {} uses role {}", task.switch, task.role),
                    Err(err) => tracing::warn!("{}", err),
                }
            }
            tracing::info!(
                "inventory ok: {} switches, {} host port mappings, coordination via {}",
                inventory.switches.len(),
                inventory.port_mappings.len(),
                inventory.settings.coordination_uri()
            );
        }
        SubCommand::Show(show) => {
            let out = match show.format {
                OutputFormat::Json => serde_json::to_string_pretty(&inventory)?,
                OutputFormat::Yaml => serde_yaml::to_string(&inventory)?,
                OutputFormat::Ini => render_inventory(&inventory),
            };
            println!("{out}");
        }
        SubCommand::AnsibleInventory => {
            println!("{}", serde_json::to_string_pretty(&ansible_inventory(&inventory))?);
        }
        SubCommand::Lookup(lookup) => {
            let binding = lookup.to_binding();
            let ports = switch_ports(&inventory, &binding).context("looking up switch ports")?;
            if ports.is_empty() {
                tracing::warn!("no switch ports mapped for {:?}", binding);
            }
            for port in ports {
                println!("{port}");
            }
        }
        SubCommand::Platforms => {}
    }
    Ok(())
}
