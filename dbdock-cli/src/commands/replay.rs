//! Replay a script of layout commands.
//!
//! A script is a JSON array of layout commands (`{"op": "split_pane", ...}`).
//! Id fields may hold placeholders that are resolved against the live
//! layout right before each step runs:
//!
//! - `$root`, `$active`
//! - `$leaf:<n>`, `$split:<n>` (pre-order, zero-based)
//! - `$tab:<n>` (n-th tab created by the script, zero-based)

use std::fs;
use std::path::Path;

use dbdock_core::layout::{
    CommandOutcome, LayoutCommand, LayoutHint, LayoutStore, PaneId, TabId, TabKind,
    WorkspaceId, WorkspaceLayout,
};
use dbdock_core::tracing::span_names;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{load_settings, parse_placeholder};

/// Command fields that hold pane or tab ids.
const ID_FIELDS: [&str; 5] = ["pane_id", "from_pane_id", "to_pane_id", "split_id", "tab_id"];

/// Parameters for the replay command
pub struct ReplayParams<'a> {
    pub script: &'a Path,
    pub workspace: &'a str,
    pub format: OutputFormat,
    pub default_tab: bool,
}

/// A step the store rejected.
#[derive(Debug, Serialize)]
struct SkippedStep {
    index: usize,
    op: &'static str,
    reason: String,
}

#[derive(Serialize)]
struct TabSummary<'a> {
    id: TabId,
    kind: &'a TabKind,
    title: &'a str,
}

#[derive(Serialize)]
struct LeafSummary<'a> {
    id: PaneId,
    active_tab: Option<TabId>,
    tabs: Vec<TabSummary<'a>>,
}

#[derive(Serialize)]
struct LayoutSummary<'a> {
    workspace: &'a str,
    root: PaneId,
    active_pane: PaneId,
    applied: usize,
    skipped: &'a [SkippedStep],
    leaves: Vec<LeafSummary<'a>>,
}

/// Replay command handler
pub fn cmd_replay(settings_path: Option<&Path>, params: ReplayParams<'_>) -> Result<(), CliError> {
    let settings = load_settings(settings_path)?;
    let steps = read_script(params.script)?;

    let workspace = WorkspaceId::new(params.workspace);
    let mut store = LayoutStore::new(settings)?;
    let hint = if params.default_tab {
        LayoutHint::DefaultTab
    } else {
        LayoutHint::Empty
    };
    store.initialize_layout(&workspace, hint);

    let _span = dbdock_core::trace_operation!(
        span_names::LAYOUT_REPLAY,
        workspace_id = %workspace,
        steps = steps.len()
    )
    .entered();

    let mut created: Vec<TabId> = Vec::new();
    let mut skipped: Vec<SkippedStep> = Vec::new();
    let mut applied = 0;

    for (index, mut step) in steps.into_iter().enumerate() {
        let layout = store
            .layout(&workspace)
            .ok_or_else(|| CliError::Layout(format!("Workspace vanished: {workspace}")))?;
        resolve_placeholders(&mut step, layout, &created)
            .map_err(|e| CliError::Script(format!("step {index}: {e}")))?;
        let command: LayoutCommand = serde_json::from_value(step)
            .map_err(|e| CliError::Script(format!("step {index}: {e}")))?;

        let op = command.name();
        match store.apply(&workspace, command) {
            CommandOutcome::Applied { created_tab } => {
                applied += 1;
                created.extend(created_tab);
            }
            CommandOutcome::Skipped { reason } => {
                tracing::info!(step = index, op, %reason, "Step skipped");
                skipped.push(SkippedStep {
                    index,
                    op,
                    reason: reason.to_string(),
                });
            }
        }
    }

    let layout = store
        .layout(&workspace)
        .ok_or_else(|| CliError::Layout(format!("Workspace vanished: {workspace}")))?;
    match params.format {
        OutputFormat::Text => print_text(layout, applied, &skipped),
        OutputFormat::Json => print_json(params.workspace, layout, applied, &skipped)?,
    }
    Ok(())
}

fn read_script(path: &Path) -> Result<Vec<Value>, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Script(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Script(format!("{} is not a JSON array: {e}", path.display())))
}

/// Replaces placeholder strings in the id fields of one step.
fn resolve_placeholders(
    step: &mut Value,
    layout: &WorkspaceLayout,
    created: &[TabId],
) -> Result<(), String> {
    let fields = step
        .as_object_mut()
        .ok_or_else(|| "command is not a JSON object".to_owned())?;
    for key in ID_FIELDS {
        let Some(raw) = fields.get(key).and_then(Value::as_str).map(str::to_owned) else {
            continue;
        };
        if !raw.starts_with('$') {
            continue;
        }
        let id = parse_placeholder(&raw)
            .and_then(|(name, index)| resolve(name, index, layout, created))
            .ok_or_else(|| format!("unresolved placeholder {raw} in {key}"))?;
        fields.insert(key.to_owned(), Value::String(id));
    }
    Ok(())
}

fn resolve(
    name: &str,
    index: Option<usize>,
    layout: &WorkspaceLayout,
    created: &[TabId],
) -> Option<String> {
    let uuid = match (name, index) {
        ("root", None) => layout.root_id().0,
        ("active", None) => layout.active_pane_id().0,
        ("leaf", Some(n)) => layout.leaves().get(n)?.id().0,
        ("split", Some(n)) => layout.splits().get(n)?.id.0,
        ("tab", Some(n)) => created.get(n)?.0,
        _ => return None,
    };
    Some(uuid.to_string())
}

fn print_text(layout: &WorkspaceLayout, applied: usize, skipped: &[SkippedStep]) {
    print!("{}", layout.describe());
    println!();
    println!("Applied {applied} of {} commands", applied + skipped.len());
    for step in skipped {
        println!("  skipped step {} ({}): {}", step.index, step.op, step.reason);
    }
}

fn print_json(
    workspace: &str,
    layout: &WorkspaceLayout,
    applied: usize,
    skipped: &[SkippedStep],
) -> Result<(), CliError> {
    let leaves = layout
        .leaves()
        .into_iter()
        .map(|leaf| LeafSummary {
            id: leaf.id(),
            active_tab: leaf.active_tab_id(),
            tabs: leaf
                .tabs()
                .iter()
                .map(|tab| TabSummary {
                    id: tab.id,
                    kind: &tab.kind,
                    title: &tab.title,
                })
                .collect(),
        })
        .collect();
    let summary = LayoutSummary {
        workspace,
        root: layout.root_id(),
        active_pane: layout.active_pane_id(),
        applied,
        skipped,
        leaves,
    };
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::Output(format!("Failed to serialize summary: {e}")))?;
    println!("{json}");
    Ok(())
}
