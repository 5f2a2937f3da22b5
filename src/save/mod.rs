//! Persistence ports: the on-disk save store and the portable password
//! codec. Both sides are traits so the orchestrating layer receives them
//! by injection rather than reaching for ambient globals.

pub mod password;
pub mod store;

pub use password::{DeflatePasswordCodec, PasswordCodec};
pub use store::{FileSaveStore, SaveData, SaveError, SaveStore};
