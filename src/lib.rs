//! Search and fetch ActiveState Code Recipes from the terminal
//!
//! A search runs a web search restricted to the recipe host, keeps up to
//! `max_results` recipe links as an indexed lookup, and prints them. Later
//! commands take either one of those indices or a raw recipe id and fetch the
//! recipe record from the host's JSON API.
//!
//! # Example Session
//!
//! ```text
//! recipes> search binary tree
//!    0: binary tree
//!    1: binary search tree
//! recipes> describe 1
//! recipes> show 577478
//! recipes> import #0
//! ```
//!
//! # Commands
//!
//! - `search <terms>` - Search and list results (`lookup`)
//! - `show <idx|id>` - Print a recipe's source (`fetch`)
//! - `import <idx|id>` - Bind a recipe's source as `recipe` in the workspace (`imply`)
//! - `place <idx|id>` - Pre-fill the next input with a recipe's source, where supported
//! - `describe <idx|id>` - Print a recipe's description (`desc`)
//! - `del <name>` - Remove a workspace binding
//! - `state` - Print the last lookup as JSON
//!
//! # Tokens
//!
//! A bare number below `max_results` is an index into the last lookup, `#n`
//! is always an index, and any other number is a recipe id. Indices the last
//! lookup does not hold are reported as not found.

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod lookup;
pub mod output;
pub mod search;
pub mod session;
pub mod shell;

pub use client::{RecipeClient, RecipeField, RecipeRecord};
pub use command::Command;
pub use config::Config;
pub use error::LookupError;
pub use host::{BufferHost, Host, Output, RecipeUnit, TerminalHost};
pub use lookup::{LookupCache, LookupEntry, LookupState, RecipeId};
pub use search::SearchProvider;
pub use session::{Flow, Session};
