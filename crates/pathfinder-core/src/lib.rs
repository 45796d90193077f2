pub mod chat;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod notifier;
pub mod profile;
pub mod responder;
pub mod router;
pub mod session;
pub mod storage;
pub mod watcher;

// Re-export main types for convenience
pub use chat::{ChatAuthor, ChatMessage, ChatReply, Conversation, PendingReply};
pub use config::Config;
pub use dashboard::{Dashboard, RoadmapItem, UserStats};
pub use error::{PathfinderError, Result};
pub use form::{Field, FormNotice, ProfileForm, ResumeFile, SubmitError, ValidationErrors};
pub use notifier::{Notifier, SessionEvent, Subscription};
pub use profile::Profile;
pub use responder::{AssistantResponder, Responder, RoadmapResponder};
pub use router::{GuardOutcome, Location, Navigation, Route, Router};
pub use session::{AuthState, Session, SessionStore, PROFILE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use watcher::WatcherHandle;
