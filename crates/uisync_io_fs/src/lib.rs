//! `uisync_io_fs`:
//! filesystem copy engine behind the setup tool.
//!
//! - `copy`   : tree traversal, named-file copy
//! - `spec`   : options, statuses, errors
//! - `report` : run-time report models
//! - `util`   : shared helper functions

pub mod copy;
pub mod report;
pub mod spec;
mod util;

pub use copy::{copy_named_files, copy_tree};
pub use report::{ReportCopy, ReportCopyBuilder, ReportCopyFiles, SpecFileOutcome};
pub use spec::{CopyTreeError, EnumFileCopyStatus, SpecCopyOptions};
