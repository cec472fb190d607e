//! JSON manifests describing an argtree declaration.
//!
//! A manifest mirrors the builder API: a parser name, optional settings, and
//! trees of arguments and commands. [`Manifest::into_parser`] turns it into a
//! ready [`argtree::Parser`].

use anyhow::{Context, Result, bail};
use argtree::{Arg, Command, Parser, Schema, Settings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub settings: Settings,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArgType {
    Flag,
    Option,
    Positional,
    Sequence,
    InfiniteSequence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDef {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ArgType,

    #[serde(default, skip_serializing_if = "OneOrMany::is_empty")]
    pub short: OneOrMany,

    #[serde(default, skip_serializing_if = "OneOrMany::is_empty")]
    pub long: OneOrMany,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDef>,

    /// Members of a `sequence`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDef {
    pub name: String,

    #[serde(default, alias = "aliases", skip_serializing_if = "OneOrMany::is_empty")]
    pub alias: OneOrMany,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDef>,
}

/// Value schema by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SchemaDef {
    String,
    Boolean,
    Integer,
    Number,
    Enum { values: Vec<String> },
    StringList,
    Any,
}

/// A string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl OneOrMany {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(items) => items.is_empty(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        };
        items.iter().map(String::as_str)
    }
}

impl SchemaDef {
    pub fn to_schema(&self) -> Schema {
        match self {
            Self::String => Schema::string(),
            Self::Boolean => Schema::boolean(),
            Self::Integer => Schema::integer(),
            Self::Number => Schema::number(),
            Self::Enum { values } => Schema::one_of(values.iter().cloned()),
            Self::StringList => Schema::string_list(),
            Self::Any => Schema::any(),
        }
    }
}

impl ArgumentDef {
    pub fn to_arg(&self) -> Result<Arg> {
        if self.kind != ArgType::Sequence && !self.arguments.is_empty() {
            bail!(
                "argument '{}' lists nested arguments but only sequences take members",
                self.name
            );
        }

        let mut arg = match self.kind {
            ArgType::Flag => argtree::flag(&self.name),
            ArgType::Option => argtree::option(&self.name),
            ArgType::Positional => argtree::positional(&self.name),
            ArgType::InfiniteSequence => argtree::infinite_sequence(&self.name),
            ArgType::Sequence => {
                let members = self
                    .arguments
                    .iter()
                    .map(|member| {
                        member
                            .to_arg()
                            .with_context(|| format!("in sequence '{}'", self.name))
                    })
                    .collect::<Result<Vec<_>>>()?;
                argtree::sequence(&self.name, members)
            }
        };

        for short in self.short.iter() {
            arg = arg.short(short);
        }
        for long in self.long.iter() {
            arg = arg.long(long);
        }
        if let Some(schema) = &self.schema {
            arg = arg.with_schema(schema.to_schema());
        }
        if let Some(description) = &self.description {
            arg = arg.with_description(description);
        }
        Ok(arg)
    }
}

impl CommandDef {
    pub fn to_command(&self) -> Result<Command> {
        let mut command = argtree::command(&self.name);
        for alias in self.alias.iter() {
            command = command.alias(alias);
        }
        if let Some(description) = &self.description {
            command = command.with_description(description);
        }
        for arg in &self.arguments {
            command = command.arg(
                arg.to_arg()
                    .with_context(|| format!("in command '{}'", self.name))?,
            );
        }
        for nested in &self.commands {
            command = command.command(
                nested
                    .to_command()
                    .with_context(|| format!("in command '{}'", self.name))?,
            );
        }
        Ok(command)
    }
}

impl Manifest {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("failed to parse manifest JSON")
    }

    /// Build and validate the declared parser.
    pub fn into_parser(self) -> Result<Parser> {
        let args = self
            .arguments
            .iter()
            .map(ArgumentDef::to_arg)
            .collect::<Result<Vec<_>>>()?;
        let commands = self
            .commands
            .iter()
            .map(CommandDef::to_command)
            .collect::<Result<Vec<_>>>()?;

        let parser = Parser::builder(&self.name)
            .args(args)
            .commands(commands)
            .settings(self.settings)
            .build()
            .with_context(|| format!("invalid declaration for '{}'", self.name))?;
        Ok(parser)
    }
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        bail!("manifest not found: {}", path.display());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        name = %manifest.name,
        arguments = manifest.arguments.len(),
        commands = manifest.commands.len(),
        "loaded manifest"
    );
    Ok(manifest)
}
