//! Domain Services
//!
//! Pure business logic with no I/O dependencies.

mod command_line;
mod entry;

pub use command_line::{
    bundle_command, transpile_command, typecheck_command, OutputOptions, Toolchain,
};
pub use entry::{
    import_specifier, is_source_file, render_entry, DECLARATION_SUFFIX, SCRATCH_ENTRY_NAME,
    SOURCE_SUFFIX,
};
