pub mod vendor;

pub use vendor::{BoundingBox, NewVendor, StatusUpdate, Vendor};
