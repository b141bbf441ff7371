//! Discord command implementations organized by category.

/// General utility commands
pub mod general;

/// Price lookup commands
pub mod prices;

/// Wishlist commands
pub mod wishlist;

// Export commands
pub use general::*;
pub use prices::*;
pub use wishlist::*;
