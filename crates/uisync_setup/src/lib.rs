//! Copy shared UI components between sibling projects (`uisync-setup`) and
//! verify the destination is complete (`uisync-check`).

pub mod check;
pub mod cli;
pub mod layout;
pub mod message;
pub mod setup;

pub use check::{ReportCheck, SpecCheckEntry, check_layout};
pub use cli::{CheckCli, LayoutArgs, SetupCli};
pub use layout::{LayoutError, SpecLayout, SpecProjectPaths};
pub use message::{PrintMessage, Status};
pub use setup::{ReportSetup, SetupError, SpecTreeStep, run_setup};
