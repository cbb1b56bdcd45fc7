pub mod io;
pub mod types;

pub use io::FsRegistry;
pub use io::locking::IdLock;
pub use types::{CURRENT_RECORD_SCHEMA_VERSION, InstallRecord};
