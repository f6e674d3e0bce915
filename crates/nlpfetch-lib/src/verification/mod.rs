mod file_size;

pub use file_size::{VerificationError, verify_file_size};
