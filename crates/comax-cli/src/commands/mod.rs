pub mod app;
pub mod audit;
pub mod dispatch;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod language;
pub mod localization;
pub mod org;
pub mod search;
pub mod shared;
pub mod translate;
