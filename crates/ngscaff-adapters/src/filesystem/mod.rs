//! Filesystem adapters.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;

use ngscaff_core::{application::ports::Filesystem, domain::ProjectStructure, error::ScaffoldResult};

/// Write every file of a rendered structure below its root.
pub(crate) fn write_structure(
    filesystem: &dyn Filesystem,
    structure: &ProjectStructure,
) -> ScaffoldResult<()> {
    for file in structure.files() {
        let path = structure.root().join(&file.path);
        if let Some(parent) = path.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.write_file(&path, &file.content)?;
    }
    Ok(())
}
