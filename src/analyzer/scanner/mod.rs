pub mod package;

pub use package::{
    DiscoveredModule, ModuleFile, PackageWalker, group_by_file, resolve_output_path,
};
