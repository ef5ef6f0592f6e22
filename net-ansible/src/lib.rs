//! Parser and validator for the net-ansible switch inventory, the `[ansible:...]` sections of
//! an ML2 configuration file.

pub mod error;
pub mod ini;
pub mod inventory;
pub mod lookup;
pub mod platform;
pub mod port_mappings;
pub mod switches;

pub use error::{DispatchError, FormatError, FormatErrorKind, InventoryError, LookupError};
pub use inventory::{ansible_inventory, load_inventory, parse_inventory, render_inventory};
