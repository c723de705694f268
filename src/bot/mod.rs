//! Pure message handling: intent routing and reply composition.

pub mod composer;
pub mod router;

pub use composer::compose;
pub use router::route;
