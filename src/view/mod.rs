// Screen state and derivations, independent of the terminal

pub mod alert;
pub mod clients;
pub mod navigation;
pub mod notes;
pub mod sessions;
pub mod template_detail;
pub mod templates;
pub mod trainer;

pub use alert::{Alert, AlertKind};
pub use clients::{filter_clients, ClientSearch};
pub use navigation::{ContactAction, ContactMethod, Route, TemplateSeed};
pub use notes::{NoteEditor, NoteSave, NoteTarget};
pub use sessions::{format_time, parse_time, SessionBoard};
pub use template_detail::{DeleteRequest, DetailAction, TemplateDetail, TemplatePhase};
pub use templates::TemplateList;
pub use trainer::{date_header, LoadState, QuickAction, Tab, TrainerView, QUICK_ACTIONS};
