pub mod http;
pub mod memory;
pub mod signer;
pub mod traits;

pub use http::HttpObjectStore;
pub use memory::MemoryObjectStore;
pub use signer::{AccessClaims, TokenUrlSigner};
pub use traits::{ObjectStore, SignedUrl, UrlSigner};

#[cfg(test)]
pub use traits::{MockObjectStore, MockUrlSigner};
