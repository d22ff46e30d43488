//! The front end a session runs inside.
//!
//! A [`Host`] receives everything a command wants to show, owns the workspace
//! namespace that `import` binds into, and may or may not be able to pre-fill
//! the next input line. [`TerminalHost`] is the `recipes` binary's host;
//! [`BufferHost`] keeps everything in memory.

use crate::error::{LookupError, Result};
use crate::lookup::{LookupEntry, RecipeId};
use crate::output;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

/// A fetched recipe registered in the workspace. The source is never run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeUnit {
    pub name: String,
    /// `None` for a unit left on disk by an earlier session
    pub id: Option<RecipeId>,
    pub source: String,
}

/// Something a command wants the user to see.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Listing(Vec<LookupEntry>),
    NoResults,
    Code { id: RecipeId, source: String },
    Description(String),
    Info(String),
    /// Lookup state exported under a well-known name, as JSON
    State { name: String, json: String },
    Usage,
    Diagnostic(LookupError),
}

pub trait Host {
    fn emit(&mut self, output: Output);

    fn is_bound(&self, name: &str) -> bool;

    /// Register a unit under its name. Callers check [`Host::is_bound`] first.
    fn bind(&mut self, unit: RecipeUnit) -> Result<()>;

    /// Remove a binding, returning it if it existed.
    fn unbind(&mut self, name: &str) -> Option<RecipeUnit>;

    /// Whether [`Host::set_next_input`] does anything.
    fn supports_next_input(&self) -> bool {
        false
    }

    fn set_next_input(&mut self, _text: String) {}
}

/// Host for the terminal: colored output, optional on-disk workspace, no
/// input priming.
pub struct TerminalHost {
    bindings: BTreeMap<String, RecipeUnit>,
    workspace_dir: Option<PathBuf>,
    extension: String,
}

impl TerminalHost {
    pub fn new(workspace_dir: Option<PathBuf>, language: &str) -> Self {
        let extension = match language {
            "python" => "py".to_owned(),
            other => other.to_owned(),
        };
        Self {
            bindings: BTreeMap::new(),
            workspace_dir,
            extension,
        }
    }

    fn unit_path(&self, name: &str) -> Option<PathBuf> {
        self.workspace_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", name, self.extension)))
    }
}

impl Host for TerminalHost {
    fn emit(&mut self, out: Output) {
        match out {
            Output::Listing(entries) => {
                for entry in &entries {
                    output::list_entry(entry);
                }
            }
            Output::NoResults => output::info("Sorry, no results."),
            Output::Code { id, source } => {
                output::action(&format!("Recipe {id}"));
                output::code(&source);
            }
            Output::Description(text) => println!("{text}"),
            Output::Info(msg) => output::info(&msg),
            Output::State { name, json } => println!("{name} = {json}"),
            Output::Usage => output::usage(),
            Output::Diagnostic(err) => output::diagnostic(&err),
        }
    }

    /// A unit file in the workspace counts as bound even if this session
    /// never imported it.
    fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name) || self.unit_path(name).is_some_and(|p| p.exists())
    }

    fn bind(&mut self, unit: RecipeUnit) -> Result<()> {
        if let Some(path) = self.unit_path(&unit.name) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| LookupError::workspace(parent, e))?;
            }
            // create_new: never clobber a file that appeared after the conflict check
            std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .and_then(|mut file| file.write_all(unit.source.as_bytes()))
                .map_err(|e| LookupError::workspace(&path, e))?;
            output::detail(&format!("written to {}", path.display()));
        }
        self.bindings.insert(unit.name.clone(), unit);
        Ok(())
    }

    fn unbind(&mut self, name: &str) -> Option<RecipeUnit> {
        let in_memory = self.bindings.remove(name);
        let on_disk = self.unit_path(name).filter(|p| p.exists()).and_then(|path| {
            let source = std::fs::read_to_string(&path).unwrap_or_default();
            match std::fs::remove_file(&path) {
                Ok(()) => Some(RecipeUnit {
                    name: name.to_owned(),
                    id: None,
                    source,
                }),
                Err(e) => {
                    tracing::warn!("could not remove {}: {e}", path.display());
                    None
                }
            }
        });
        in_memory.or(on_disk)
    }
}

/// Host that records output and bindings in memory.
#[derive(Debug, Default)]
pub struct BufferHost {
    pub outputs: Vec<Output>,
    pub bindings: BTreeMap<String, RecipeUnit>,
    pub next_input: Option<String>,
    pub input_priming: bool,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer host that accepts `set_next_input`.
    pub fn with_input_priming() -> Self {
        Self {
            input_priming: true,
            ..Self::default()
        }
    }

    pub fn diagnostics(&self) -> Vec<&LookupError> {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                Output::Diagnostic(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&Output> {
        self.outputs.last()
    }
}

impl Host for BufferHost {
    fn emit(&mut self, output: Output) {
        self.outputs.push(output);
    }

    fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn bind(&mut self, unit: RecipeUnit) -> Result<()> {
        self.bindings.insert(unit.name.clone(), unit);
        Ok(())
    }

    fn unbind(&mut self, name: &str) -> Option<RecipeUnit> {
        self.bindings.remove(name)
    }

    fn supports_next_input(&self) -> bool {
        self.input_priming
    }

    fn set_next_input(&mut self, text: String) {
        if self.input_priming {
            self.next_input = Some(text);
        }
    }
}
