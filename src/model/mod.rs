pub mod ids;
pub mod contact;

// Re-exports for convenience
pub use ids::ContactId;
pub use contact::Contact;
