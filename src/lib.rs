// Library root
// -----------
// The binary (`main.rs`) parses arguments and hands them to `cli::run`.
//
// Module responsibilities:
// - `api`: blocking HTTP client and one method per HvZ endpoint.
// - `validate`: maps status codes and error bodies to `HvzError`.
// - `pagination`: follows `continues` flags across listing pages.
// - `credentials`: the stored API key.
// - `models` / `render`: response shapes and their text output.
// - `commands`: one operation per subcommand.
// - `ui`: prompts for missing arguments and progress spinners.
// - `cli`: clap definitions and dispatch.
pub mod api;
pub mod cli;
pub mod commands;
pub mod credentials;
pub mod error;
pub mod models;
pub mod pagination;
pub mod render;
pub mod ui;
pub mod validate;

pub use error::{HvzError, Result};
