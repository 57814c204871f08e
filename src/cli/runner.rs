//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, KeyType, OutputFormat};
use crate::config::PaginationConfig;
use crate::cursor::CursorKey;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::Paginator;
use crate::page::AdditionalData;
use crate::params::{ParamsResolver, QueryParams};
use crate::query::{FindQuery, Pipeline, QueryDescriptor};
use crate::source::MemoryStore;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use serde_json::Value;
use std::convert::Infallible;
use std::fs;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Page {
                documents,
                pipeline,
                filter,
                page,
                size,
                limit,
                offset,
                cursor,
                include_total,
                key_type,
            } => {
                let raw = QueryParams {
                    page: *page,
                    size: *size,
                    limit: *limit,
                    offset: *offset,
                    cursor: cursor.clone(),
                    include_total: *include_total,
                };

                let store = MemoryStore::with_documents(read_documents(documents)?);
                let output = match pipeline {
                    Some(path) => {
                        let query = Pipeline::new(read_documents(path)?);
                        page_json(&store, &config, &query, &raw, *key_type).await?
                    }
                    None => {
                        let query = match filter {
                            Some(json) => FindQuery::with_filter(parse_object(json)?),
                            None => FindQuery::new(),
                        };
                        page_json(&store, &config, &query, &raw, *key_type).await?
                    }
                };
                self.output(&output);
                Ok(())
            }
            Commands::Config => {
                self.output(&serde_json::to_value(&config)?);
                Ok(())
            }
        }
    }

    /// Load the pagination config, or the defaults
    fn load_config(&self) -> Result<PaginationConfig> {
        match &self.cli.config {
            Some(path) => PaginationConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(PaginationConfig::default()),
        }
    }

    /// Print a JSON value
    fn output(&self, value: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// Paginate `query` over `store` and render the page as JSON
pub(crate) async fn page_json<Q: QueryDescriptor>(
    store: &MemoryStore,
    config: &PaginationConfig,
    query: &Q,
    raw: &QueryParams,
    key_type: KeyType,
) -> Result<Value> {
    let params = ParamsResolver::new(config.clone()).resolve(raw)?;

    match key_type {
        KeyType::ObjectId => page_with_key::<ObjectId, Q>(store, config, query, &params).await,
        KeyType::Int => page_with_key::<i64, Q>(store, config, query, &params).await,
    }
}

async fn page_with_key<K: CursorKey, Q: QueryDescriptor>(
    store: &MemoryStore,
    config: &PaginationConfig,
    query: &Q,
    params: &crate::params::PaginationParams,
) -> Result<Value> {
    let page = Paginator::<K>::from_config(store, config)
        .paginate_with(query, params, AdditionalData::new(), |docs: Vec<Document>| async move {
            Ok::<_, Infallible>(
                docs.into_iter()
                    .map(|d| Bson::Document(d).into_relaxed_extjson())
                    .collect::<Vec<_>>(),
            )
        })
        .await?;

    Ok(serde_json::to_value(&page)?)
}

/// Read a JSON array of objects (extended JSON allowed) from a file
fn read_documents(path: &Path) -> Result<Vec<Document>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_documents(&content).with_context(|| format!("Invalid documents in {}", path.display()))
}

/// Parse a JSON array of objects
pub(crate) fn parse_documents(json: &str) -> Result<Vec<Document>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(Error::config("expected a JSON array"));
    };

    items.into_iter().map(to_document).collect()
}

/// Parse a single JSON object
pub(crate) fn parse_object(json: &str) -> Result<Document> {
    to_document(serde_json::from_str(json)?)
}

fn to_document(value: Value) -> Result<Document> {
    match Bson::try_from(value) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(Error::config(format!("expected a JSON object, got {other}"))),
        Err(e) => Err(Error::config(format!("invalid extended JSON: {e}"))),
    }
}
