pub mod matcher;
pub mod output;
pub mod patch;

pub use matcher::{apply_signature, check_signature, ByteWrite, Rejection, SignatureAttempt};
pub use output::{output_path, unix_timestamp, write_new_file};
pub use patch::{PatchOutcome, Patcher};
