pub mod local;
pub mod remote;

pub use local::{LocalCacheStore, LocalStoreConfig, LocalWriteOutcome, DEMO_USER_ID};
pub use remote::{DocumentMirror, MirrorConfig, NullMirror, RemoteMirror};
