//! Subcommand definitions and dispatch.
//!
//! Every subcommand produces a JSON document; `main` prints it and maps
//! [`Outcome::exit_status`] onto the process exit status.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use hoshmarket_core::badge::parse_title;
use hoshmarket_core::form::seed_defaults;
use hoshmarket_core::serializer::serialize;
use hoshmarket_core::types::values_from_json;
use hoshmarket_core::{
    CategoryAttributeSchema, CategoryDetailsSchema, EngineConfig, FormSchema, FormValueMap,
    Validator,
};

/// Which schema flavour a `--schema` file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Attributes,
    Details,
}

impl SchemaKind {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "attributes" => Ok(Self::Attributes),
            "details" => Ok(Self::Details),
            other => bail!("unknown schema kind '{other}' (expected attributes or details)"),
        }
    }
}

/// Result of one subcommand run.
#[derive(Debug)]
pub struct Outcome {
    pub output: Value,
    /// `false` when the command ran but the answer is negative, e.g. a
    /// `validate` that found violations.
    pub success: bool,
}

/// Exit status when a command fails outright.
pub const ERROR_EXIT_STATUS: u8 = 2;

impl Outcome {
    fn ok(output: Value) -> Self {
        Self {
            output,
            success: true,
        }
    }

    /// `0` on success, `1` for a negative answer.
    pub fn exit_status(&self) -> u8 {
        if self.success {
            0
        } else {
            1
        }
    }
}

pub fn command() -> clap::Command {
    let schema = Arg::new("schema")
        .short('s')
        .long("schema")
        .value_name("SCHEMA")
        .help("Path to a category schema JSON file")
        .required(true);
    let kind = Arg::new("kind")
        .short('k')
        .long("kind")
        .value_name("KIND")
        .help("Schema kind")
        .value_parser(["attributes", "details"])
        .default_value("attributes");
    let values = Arg::new("values")
        .short('v')
        .long("values")
        .value_name("VALUES")
        .help("Path to a JSON object of form values")
        .required(true);

    clap::Command::new("hoshmarket")
        .about("Category-template form engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            clap::Command::new("defaults")
                .about("Print the initial form values for a schema")
                .arg(schema.clone())
                .arg(kind.clone())
                .arg(
                    values
                        .clone()
                        .required(false)
                        .help("Existing form values to keep; defaults fill the gaps"),
                ),
        )
        .subcommand(
            clap::Command::new("validate")
                .about("Validate form values against a schema")
                .arg(schema.clone())
                .arg(kind.clone())
                .arg(values.clone())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Enforce required fields")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("serialize")
                .about("Fold form values back into the schema payload")
                .arg(schema)
                .arg(kind)
                .arg(values),
        )
        .subcommand(
            clap::Command::new("parse-title")
                .about("Resolve badge tokens in a suggested title")
                .arg(
                    Arg::new("title")
                        .short('t')
                        .long("title")
                        .value_name("TITLE")
                        .required(true),
                )
                .arg(
                    Arg::new("attributes")
                        .long("attributes")
                        .value_name("ATTRIBUTES")
                        .help("Path to an attributes schema JSON file"),
                )
                .arg(
                    Arg::new("details")
                        .long("details")
                        .value_name("DETAILS")
                        .help("Path to a details schema JSON file"),
                ),
        )
}

pub fn run(matches: &ArgMatches, config: &EngineConfig) -> Result<Outcome> {
    match matches.subcommand() {
        Some(("defaults", sub)) => {
            let current = sub
                .get_one::<String>("values")
                .map(|path| load_values(path))
                .transpose()?
                .unwrap_or_default();
            match kind_of(sub)? {
                SchemaKind::Attributes => {
                    defaults(&load_attributes(required(sub, "schema")?)?, &current)
                }
                SchemaKind::Details => defaults(&load_details(required(sub, "schema")?)?, &current),
            }
        }
        Some(("validate", sub)) => {
            let values = load_values(required(sub, "values")?)?;
            let strict = sub.get_flag("strict");
            match kind_of(sub)? {
                SchemaKind::Attributes => {
                    let schema = load_attributes(required(sub, "schema")?)?;
                    validate(&schema, &values, strict, config)
                }
                SchemaKind::Details => {
                    let schema = load_details(required(sub, "schema")?)?;
                    validate(&schema, &values, strict, config)
                }
            }
        }
        Some(("serialize", sub)) => {
            let values = load_values(required(sub, "values")?)?;
            match kind_of(sub)? {
                SchemaKind::Attributes => {
                    let schema = load_attributes(required(sub, "schema")?)?;
                    fold(&schema, &values, config)
                }
                SchemaKind::Details => {
                    let schema = load_details(required(sub, "schema")?)?;
                    fold(&schema, &values, config)
                }
            }
        }
        Some(("parse-title", sub)) => {
            let title = required(sub, "title")?;
            let attributes = sub
                .get_one::<String>("attributes")
                .map(|path| load_attributes(path))
                .transpose()?;
            let details = sub
                .get_one::<String>("details")
                .map(|path| load_details(path))
                .transpose()?;
            let parse = parse_title(title, attributes.as_ref(), details.as_ref());
            info!(
                badges = parse.selected_badges.len(),
                skipped = parse.skipped_tokens.len(),
                "Parsed title"
            );
            Ok(Outcome::ok(to_json(&parse)?))
        }
        Some((other, _)) => bail!("unknown subcommand '{other}'"),
        None => bail!("no subcommand given"),
    }
}

fn defaults<S: FormSchema>(schema: &S, current: &FormValueMap) -> Result<Outcome> {
    Ok(Outcome::ok(to_json(&seed_defaults(schema, current))?))
}

fn validate<S: FormSchema>(
    schema: &S,
    values: &FormValueMap,
    strict: bool,
    config: &EngineConfig,
) -> Result<Outcome> {
    let result = Validator::new(Some(schema), strict, config).validate(values);
    info!(
        schema = S::NAME,
        strict,
        errors = result.errors.len(),
        "Validated form values"
    );
    Ok(Outcome {
        success: result.is_valid,
        output: to_json(&result)?,
    })
}

fn fold<S: FormSchema + Serialize>(
    schema: &S,
    values: &FormValueMap,
    config: &EngineConfig,
) -> Result<Outcome> {
    let payload = serialize(Some(schema), values, config)?;
    Ok(Outcome::ok(to_json(&payload)?))
}

fn kind_of(matches: &ArgMatches) -> Result<SchemaKind> {
    SchemaKind::parse(required(matches, "kind")?)
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing --{id}"))
}

fn read_json(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

pub fn load_attributes(path: impl AsRef<Path>) -> Result<CategoryAttributeSchema> {
    Ok(CategoryAttributeSchema::from_json(read_json(path)?)?)
}

pub fn load_details(path: impl AsRef<Path>) -> Result<CategoryDetailsSchema> {
    Ok(CategoryDetailsSchema::from_json(read_json(path)?)?)
}

pub fn load_values(path: impl AsRef<Path>) -> Result<FormValueMap> {
    let path = path.as_ref();
    values_from_json(read_json(path)?)
        .with_context(|| format!("{} is not a JSON object of form values", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}
