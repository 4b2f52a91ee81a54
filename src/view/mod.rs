pub mod card;
pub mod controller;
pub mod state;

pub use card::{CardSettings, OfferLine, ProductCard, format_price};
pub use controller::{CatalogView, StatusReport};
pub use state::{LOAD_FAILED_MESSAGE, ViewState};
