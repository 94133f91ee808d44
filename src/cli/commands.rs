//! Command implementations for the docviews CLI.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ViewsConfig;
use crate::document::StoredDocument;
use crate::document::converter::DocumentConverter;
use crate::document::converter::jsonl::JsonlDocumentConverter;
use crate::error::Result;
use crate::index::{MemoryViewIndex, ViewQuery};
use crate::retention::RetentionPolicy;
use crate::view::ViewRegistry;

/// Execute a CLI command.
pub fn execute_command(args: DocviewsArgs) -> Result<()> {
    let config = load_config(&args)?;
    let registry = Arc::new(ViewRegistry::standard());

    match &args.command {
        Command::Views => output_result(
            "Registered views",
            &list_views(&registry, &config),
            &args,
        ),
        Command::DesignDoc => output_result(
            "Design document",
            &registry.design_document(config.design_document.as_str()),
            &args,
        ),
        Command::Emit(emit_args) => output_result(
            "Emitted entries",
            &emit_documents(emit_args, &registry)?,
            &args,
        ),
        Command::Query(query_args) => output_result(
            "Query results",
            &query_view(query_args, registry, &config)?,
            &args,
        ),
        Command::PurgeCandidates(purge_args) => output_result(
            "Purge candidates",
            &purge_candidates(purge_args, registry, &config)?,
            &args,
        ),
    }
}

/// Load the config file named on the command line, or the defaults.
pub fn load_config(args: &DocviewsArgs) -> Result<ViewsConfig> {
    match &args.config {
        Some(path) => ViewsConfig::from_file(path),
        None => Ok(ViewsConfig::default()),
    }
}

/// Read every document of a JSONL export.
pub fn load_documents(path: &Path) -> Result<Vec<StoredDocument>> {
    let docs = JsonlDocumentConverter::new().convert_all(path)?;
    info!("read {} documents from {}", docs.len(), path.display());
    Ok(docs)
}

/// Build an in-memory index over a set of documents.
///
/// The indexing config is validated here, so configs built in code get the
/// same checks as ones loaded from a file.
pub fn build_index(
    docs: &[StoredDocument],
    registry: Arc<ViewRegistry>,
    config: &ViewsConfig,
) -> Result<MemoryViewIndex> {
    config.indexing.validate()?;

    let index = MemoryViewIndex::new(registry);
    if config.indexing.parallel {
        for batch in docs.chunks(config.indexing.batch_size) {
            index.apply_batch(batch);
        }
    } else {
        for stored in docs {
            index.apply(stored);
        }
    }
    debug!("index holds {} documents", index.document_count());
    Ok(index)
}

/// List registered views.
pub fn list_views(registry: &ViewRegistry, config: &ViewsConfig) -> ViewListResult {
    ViewListResult {
        design_document: config.design_document.clone(),
        views: registry.names().into_iter().map(str::to_string).collect(),
    }
}

/// Run the views over each document without building an index.
pub fn emit_documents(args: &EmitArgs, registry: &ViewRegistry) -> Result<EmitResult> {
    if let Some(view) = &args.view {
        registry.require(view)?;
    }

    let docs = load_documents(&args.input)?;
    let mut documents = Vec::new();
    for stored in &docs {
        let mut views = registry.map_all(&stored.doc, &stored.meta);
        if let Some(only) = &args.view {
            views.retain(|name, _| name == only);
        }
        views.retain(|_, entries| !entries.is_empty());

        if views.is_empty() && !args.include_empty {
            continue;
        }
        documents.push(DocumentEmission {
            id: stored.meta.id.clone(),
            views,
        });
    }

    Ok(EmitResult {
        documents_read: docs.len(),
        documents,
    })
}

/// Build the index and scan one view.
pub fn query_view(
    args: &QueryArgs,
    registry: Arc<ViewRegistry>,
    config: &ViewsConfig,
) -> Result<QueryResult> {
    registry.require(&args.view)?;

    let docs = load_documents(&args.input)?;
    let index = build_index(&docs, registry, config)?;

    let query = ViewQuery {
        key: args.key.clone(),
        start_key: args.start_key.clone(),
        end_key: args.end_key.clone(),
        inclusive_end: !args.exclusive_end,
        prefix: args.prefix.clone(),
        descending: args.descending,
        limit: args.limit,
    };
    let rows = index.query(&args.view, &query)?;

    Ok(QueryResult {
        view: args.view.clone(),
        total_rows: index.row_count(&args.view),
        rows,
    })
}

/// Build the index and select documents due for purging.
pub fn purge_candidates(
    args: &PurgeArgs,
    registry: Arc<ViewRegistry>,
    config: &ViewsConfig,
) -> Result<PurgeCandidatesResult> {
    let policy = args
        .retention_days
        .map(RetentionPolicy::new)
        .unwrap_or(config.retention);
    policy.validate()?;
    let now = args.now.unwrap_or_else(Utc::now);

    let docs = load_documents(&args.input)?;
    let index = build_index(&docs, registry, config)?;
    let candidates = policy.purge_candidates(&index, now)?;

    Ok(PurgeCandidatesResult {
        retention_days: policy.retention_days,
        cutoff: policy.cutoff_date(now),
        candidates,
    })
}
