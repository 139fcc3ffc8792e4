pub mod contact_ops;

pub use contact_ops::ContactService;
