pub mod postgres;

pub use postgres::VendorStore;
