pub mod errors;
pub mod id;
pub mod language;
pub mod notifications;
pub mod types;

pub use errors::{BrowserError, ConfigError, StranError};
pub use id::{new_id, JobId};
pub use language::{language_name, Language, LANGUAGES};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::{Geometry, NavAction, NewContextKind, SurfaceEvent, TabId, WindowId};

pub type Result<T> = std::result::Result<T, StranError>;
