//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use netconsole_application::{
    CollectionAdapter, ConvertCollection, ConvertEnvironments,
    EnvironmentContainerAdapter, TreeNode, resolve_inherited_authorization, summarize, walk_tree,
};
use netconsole_domain::{Authorization, NodeType};
use netconsole_infrastructure::{
    FormatRegistry, ReaderConfig, try_read_collection, try_read_environment,
};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Runs `command` against the formats of a registry built from `config`,
/// writing results to `out`.
///
/// # Errors
///
/// Any [`AppError`]; nothing is written to an output file when conversion
/// fails.
pub fn run(command: &Command, config: &AppConfig, out: &mut dyn Write) -> AppResult<()> {
    let registry = FormatRegistry::with_config(ReaderConfig {
        max_document_size: config.max_document_size,
    });

    match command {
        Command::Formats => list_formats(&registry, out),
        Command::Detect { file } => detect(&registry, file, out),
        Command::Tree { file } => tree(&registry, file, out),
        Command::Convert { file, to, output } => {
            let target = to.as_deref().unwrap_or(&config.default_collection_format);
            convert(&registry, file, target, output.as_deref(), out)
        }
        Command::ConvertEnv {
            file,
            to,
            select,
            output,
        } => convert_environments(&registry, file, to, select, output.as_deref(), out),
    }
}

fn list_formats(registry: &FormatRegistry, out: &mut dyn Write) -> AppResult<()> {
    for format in registry.collection_formats() {
        let access = if format.can_write() { "read-write" } else { "read-only" };
        writeln!(out, "{:<14} {:<26} {access}", format.format_id(), format.display_name())
            .map_err(AppError::Output)?;
    }
    Ok(())
}

fn detect(registry: &FormatRegistry, file: &Path, out: &mut dyn Write) -> AppResult<()> {
    let text = read(registry, file)?;
    let id = source_id(file);
    let kind = if let Some(collection) = try_read_collection(registry, &id, &text)? {
        format!("collection {}", collection.format_id())
    } else if let Some(environments) = try_read_environment(registry, &id, &text)? {
        format!("environment {}", environments.format_id())
    } else {
        return Err(AppError::Unrecognized(file.to_path_buf()));
    };
    writeln!(out, "{kind}").map_err(AppError::Output)
}

fn tree(registry: &FormatRegistry, file: &Path, out: &mut dyn Write) -> AppResult<()> {
    let collection = read_collection(registry, file)?;
    let root = collection.as_ref();

    for node in walk_tree(root)? {
        writeln!(out, "{}", render_node(root, &node)?).map_err(AppError::Output)?;
    }
    let summary = summarize(root)?;
    writeln!(
        out,
        "{} containers, {} items, depth {}",
        summary.containers, summary.items, summary.max_depth
    )
    .map_err(AppError::Output)
}

fn render_node(root: &dyn CollectionAdapter, node: &TreeNode) -> AppResult<String> {
    let indent = "  ".repeat(node.depth);
    let line = match (&node.node_type, &node.request_line) {
        (NodeType::Item, Some((verb, url))) => {
            format!("{indent}{} [{verb} {url}]", node.name)
        }
        _ => format!("{indent}{}/", node.name),
    };
    let auth = match &node.authorization {
        Authorization::Inherit if node.node_type == NodeType::Item => {
            match resolve_inherited_authorization(root, &node.id)? {
                Some(inherited) => format!(
                    "{} inherited from {}",
                    inherited.authorization.auth_type(),
                    inherited.display_path()
                ),
                None => "none inherited".to_string(),
            }
        }
        authorization => authorization.auth_type().to_string(),
    };
    Ok(format!("{line} auth={auth}"))
}

fn convert(
    registry: &FormatRegistry,
    file: &Path,
    target: &str,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> AppResult<()> {
    let format = registry
        .collection_format(target)
        .ok_or_else(|| AppError::UnknownFormat(target.to_string()))?;
    let source = read_collection(registry, file)?;

    let converted = ConvertCollection::new(format).execute(source.as_ref())?;
    emit(&converted.stringify()?, output, out)
}

fn convert_environments(
    registry: &FormatRegistry,
    file: &Path,
    target: &str,
    names: &[String],
    output: Option<&Path>,
    out: &mut dyn Write,
) -> AppResult<()> {
    let format = registry
        .environment_format(target)
        .ok_or_else(|| AppError::UnknownFormat(target.to_string()))?;
    let text = read(registry, file)?;
    let source = try_read_environment(registry, &source_id(file), &text)?
        .ok_or_else(|| AppError::Unrecognized(file.to_path_buf()))?;

    let selection = if names.is_empty() {
        None
    } else {
        Some(select_by_name(source.as_ref(), names)?)
    };
    let converted = ConvertEnvironments::new(format).execute(source.as_ref(), selection.as_deref())?;
    emit(&converted.stringify()?, output, out)
}

fn select_by_name(source: &dyn EnvironmentContainerAdapter, names: &[String]) -> AppResult<Vec<String>> {
    let mut named = Vec::new();
    for id in source.child_entry_ids() {
        let name = source.environment(&id)?.name().to_string();
        named.push((name, id));
    }
    names
        .iter()
        .map(|name| {
            named
                .iter()
                .find(|(candidate, _)| candidate == name)
                .map(|(_, id)| id.clone())
                .ok_or_else(|| AppError::UnknownEnvironment(name.clone()))
        })
        .collect()
}

fn read_collection(registry: &FormatRegistry, file: &Path) -> AppResult<Box<dyn CollectionAdapter>> {
    let text = read(registry, file)?;
    try_read_collection(registry, &source_id(file), &text)?
        .ok_or_else(|| AppError::Unrecognized(file.to_path_buf()))
}

fn read(registry: &FormatRegistry, file: &Path) -> AppResult<String> {
    let text = std::fs::read_to_string(file).map_err(|source| AppError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    if registry.exceeds_limit(&text) {
        return Err(AppError::TooLarge {
            path: file.to_path_buf(),
            size: text.len(),
            max: registry.config().max_document_size,
        });
    }
    Ok(text)
}

fn emit(text: &str, output: Option<&Path>, out: &mut dyn Write) -> AppResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).map_err(|source| AppError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = text.len(), "written");
            Ok(())
        }
        None => out.write_all(text.as_bytes()).map_err(AppError::Output),
    }
}

/// Entry identifiers are rooted at the file stem, so trees read `pets/0/1`.
fn source_id(file: &Path) -> String {
    file.file_stem()
        .map_or_else(|| "document".to_string(), |stem| stem.to_string_lossy().into_owned())
}
