pub mod content;
pub mod interaction;
pub mod platform;
pub mod user;

pub use content::{Content, ContentKind};
pub use interaction::{Interaction, InteractionKind};
pub use platform::{Platform, PlatformError};
pub use user::User;
