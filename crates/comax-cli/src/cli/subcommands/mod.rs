mod app;
mod language;
mod org;

pub use app::AppCommands;
pub use language::LanguageCommands;
pub use org::OrgCommands;
