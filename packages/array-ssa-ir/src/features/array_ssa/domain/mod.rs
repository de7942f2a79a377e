//! Array SSA domain models

pub mod array_version;
pub mod diagnostic;
pub mod exposed_map;
pub mod flow_graph;
pub mod output;
pub mod variable_table;
pub mod version_history;

pub use array_version::{ArrayVersion, PhiVersion, SingleVersion, VersionSignature};
pub use diagnostic::{Diagnostic, DiagnosticKind, FalsePhi};
pub use exposed_map::DownwardExposedVersionMap;
pub use flow_graph::{FlowEdge, FlowGraph};
pub use output::{ArraySsaOutput, ArraySsaStats};
pub use variable_table::ArrayVariableTable;
pub use version_history::{VersionHistory, VersionOrigin, VersionRecord};
