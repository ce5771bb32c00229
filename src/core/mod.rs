// Core workflow exports
pub mod confirmation;
pub mod error;
pub mod normalize;
pub mod resolver;
pub mod status;

pub use confirmation::{Confirmation, ConfirmationEngine};
pub use error::MatchError;
pub use normalize::{extend_match_ids, match_ids};
pub use resolver::MatchResolver;
pub use status::derive_status;
