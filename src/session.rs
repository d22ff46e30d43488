//! One interactive session: the last lookup plus the clients commands use.
//!
//! Every command goes through [`Session::execute`], which reports failures to
//! the host as diagnostics instead of returning them.

use crate::client::{RecipeClient, RecipeField};
use crate::command::Command;
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::host::{Host, Output, RecipeUnit};
use crate::lookup::{LookupCache, LookupState, RecipeId, LOOKUP_STATE_NAME};
use crate::output;
use crate::search::SearchProvider;

/// Workspace name `import` binds a recipe under.
pub const IMPORT_BINDING: &str = "recipe";

/// Whether the shell loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    provider: SearchProvider,
    client: RecipeClient,
    lookup: LookupState,
    max_results: usize,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            provider: SearchProvider::new(config),
            client: RecipeClient::new(config),
            lookup: LookupState::new(),
            max_results: config.max_results,
        }
    }

    /// The most recent lookup, if any search has completed.
    pub fn lookup(&self) -> Option<&LookupCache> {
        self.lookup.cache()
    }

    pub fn resolve(&self, token: &str) -> Result<RecipeId> {
        self.lookup.resolve(token, self.max_results)
    }

    /// Run one command against `host`. Errors become diagnostics.
    pub fn execute(&mut self, cmd: Command, host: &mut dyn Host) -> Flow {
        tracing::debug!(?cmd, "execute");
        let result = match cmd {
            Command::Search(query) => self.search(&query, host),
            Command::Show(token) => self.show(&token, host),
            Command::Import(token) => self.import(&token, host),
            Command::Place(token) => self.place(&token, host),
            Command::Describe(token) => self.describe(&token, host),
            Command::Unbind(name) => unbind(&name, host),
            Command::State => self.export_state(host),
            Command::Help => {
                host.emit(Output::Usage);
                Ok(())
            }
            Command::Quit => return Flow::Quit,
        };
        if let Err(err) = result {
            host.emit(Output::Diagnostic(err));
        }
        Flow::Continue
    }

    /// Search and display. An empty query only re-displays the last lookup.
    pub fn search(&mut self, query: &str, host: &mut dyn Host) -> Result<()> {
        if !query.trim().is_empty() {
            let pb = output::spinner("Searching recipes...");
            let result = self.provider.search(query);
            output::progress_done(pb);
            self.lookup.replace(result?);
        }

        match self.lookup.cache() {
            Some(cache) if !cache.is_empty() => {
                host.emit(Output::Listing(cache.entries().to_vec()))
            }
            _ => host.emit(Output::NoResults),
        }
        Ok(())
    }

    pub fn show(&self, token: &str, host: &mut dyn Host) -> Result<()> {
        if token.trim().is_empty() {
            host.emit(Output::Usage);
            return Ok(());
        }
        let (id, source) = self.fetch(token, RecipeField::Code)?;
        host.emit(Output::Code { id, source });
        Ok(())
    }

    /// Bind the recipe's source into the workspace under [`IMPORT_BINDING`].
    pub fn import(&self, token: &str, host: &mut dyn Host) -> Result<()> {
        if token.trim().is_empty() {
            host.emit(Output::Usage);
            return Ok(());
        }
        if host.is_bound(IMPORT_BINDING) {
            return Err(LookupError::StateConflict {
                name: IMPORT_BINDING.to_owned(),
            });
        }

        let (id, source) = self.fetch(token, RecipeField::Code)?;
        host.bind(RecipeUnit {
            name: IMPORT_BINDING.to_owned(),
            id: Some(id.clone()),
            source,
        })?;
        host.emit(Output::Info(format!(
            "Recipe {id} imported as \"{IMPORT_BINDING}\"."
        )));
        Ok(())
    }

    pub fn place(&self, token: &str, host: &mut dyn Host) -> Result<()> {
        if token.trim().is_empty() {
            host.emit(Output::Usage);
            return Ok(());
        }
        if !host.supports_next_input() {
            return Err(LookupError::UnsupportedMode(
                "placing a recipe on the next input".to_owned(),
            ));
        }
        let (_, source) = self.fetch(token, RecipeField::Code)?;
        host.set_next_input(source);
        Ok(())
    }

    pub fn describe(&self, token: &str, host: &mut dyn Host) -> Result<()> {
        if token.trim().is_empty() {
            host.emit(Output::Usage);
            return Ok(());
        }
        let (_, text) = self.fetch(token, RecipeField::Description)?;
        host.emit(Output::Description(text));
        Ok(())
    }

    fn export_state(&self, host: &mut dyn Host) -> Result<()> {
        let json = match self.lookup.cache() {
            Some(cache) => serde_json::to_string_pretty(cache)
                .map_err(|e| LookupError::Parse(e.to_string()))?,
            None => "null".to_owned(),
        };
        host.emit(Output::State {
            name: LOOKUP_STATE_NAME.to_owned(),
            json,
        });
        Ok(())
    }

    fn fetch(&self, token: &str, field: RecipeField) -> Result<(RecipeId, String)> {
        let id = self.resolve(token)?;
        let pb = output::spinner(&format!("Fetching recipe {id}..."));
        let value = self.client.fetch_field(&id, field);
        output::progress_done(pb);
        Ok((id, value?))
    }
}

fn unbind(name: &str, host: &mut dyn Host) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        host.emit(Output::Usage);
        return Ok(());
    }
    match host.unbind(name) {
        Some(RecipeUnit { name, id: Some(id), .. }) => {
            host.emit(Output::Info(format!("\"{name}\" (recipe {id}) removed.")));
            Ok(())
        }
        Some(RecipeUnit { name, id: None, .. }) => {
            host.emit(Output::Info(format!("\"{name}\" removed.")));
            Ok(())
        }
        None => Err(LookupError::not_found(name, "nothing bound under that name")),
    }
}
