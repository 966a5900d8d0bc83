pub mod error;
pub mod sheets;
pub mod store;

pub use error::StoreError;
pub use sheets::{ConfigKey, ConnectionStatus, CredentialProvider, SheetsClient};
pub use store::{SheetRecord, SheetStore};
