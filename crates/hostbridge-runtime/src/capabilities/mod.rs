//! Capability groups.
//!
//! `catalog` holds the `(service, action, tag, min_version)` rows; the group
//! types are thin typed wrappers that build each row's params and call
//! through the owning `Bridge`. String arguments are passed through as-is,
//! with `""` standing for "not given".

pub mod business;
pub mod catalog;
pub mod encrypt;
pub mod file;
pub mod map;
pub mod nav_bar;
pub mod pay;
pub mod pipe;
pub mod user;
pub mod util;
pub mod wallet;

use serde_json::{Map as JsonMap, Value};

pub use business::{Business, Page};
pub use catalog::Capability;
pub use encrypt::{Encrypt, EncryptMode};
pub use file::File;
pub use map::Map;
pub use nav_bar::NavBar;
pub use pay::Pay;
pub use pipe::{H5PipeRequest, HttpPipeRequest, Pipe};
pub use user::User;
pub use util::{TargetMode, Util};
pub use wallet::Wallet;

pub(crate) fn params<const N: usize>(pairs: [(&str, Value); N]) -> JsonMap<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}
