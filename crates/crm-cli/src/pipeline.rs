//! Import pipeline with explicit stages.
//!
//! 1. **Configure**: load synonym overrides and phones already on record
//! 2. **Import**: read the file and detect its columns
//! 3. **Prepare**: normalize and validate rows, find repeated phones
//! 4. **Plan**: decide which rows become new customers
//! 5. **Output**: serialize the plan as JSON
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crm_ingest::{
    ImportOptions, ImportPlan, ImportProgress, KnownPhones, NoticeThrottle, PreparedImport,
    import_file, plan_import, prepare_customers,
};
use crm_map::{HeaderMatcher, SynonymOverrides, SynonymTable};
use crm_model::{DetectionResult, DuplicatePhone, ImportReport, IssueKind, RowIssue};

use crate::logging::redact_value;

// ============================================================================
// Stage 1: Configure
// ============================================================================

/// Inputs of the configure stage, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ImportSettings {
    pub options: ImportOptions,
    pub synonyms: Option<PathBuf>,
    pub existing: Option<PathBuf>,
}

/// Shared state for every file of one run.
#[derive(Debug, Clone)]
pub struct ImportContext {
    pub options: ImportOptions,
    pub table: SynonymTable,
    /// Phones already on record, plus those planned by earlier files.
    pub known: KnownPhones,
}

impl ImportContext {
    pub fn matcher(&self) -> HeaderMatcher<'_> {
        HeaderMatcher::new(&self.table)
    }

    /// Marks the phones a plan creates as known, so later files skip them.
    pub fn remember_created(&mut self, plan: &ImportPlan) {
        for planned in &plan.to_create {
            self.known.insert(&planned.customer.phone);
        }
    }
}

/// Built-in synonyms, extended with an overrides file when given.
pub fn load_synonyms(path: Option<&Path>) -> Result<SynonymTable> {
    let builtin = SynonymTable::builtin();
    let Some(path) = path else {
        return Ok(builtin.clone());
    };
    let overrides = SynonymOverrides::load(path)
        .with_context(|| format!("load synonyms {}", path.display()))?;
    let table = builtin
        .with_overrides(&overrides)
        .with_context(|| format!("apply synonyms {}", path.display()))?;
    info!(path = %path.display(), fields = overrides.fields.len(), "loaded synonym overrides");
    Ok(table)
}

pub fn configure(settings: &ImportSettings) -> Result<ImportContext> {
    let table = load_synonyms(settings.synonyms.as_deref())?;
    let known = match &settings.existing {
        Some(path) => KnownPhones::load(path, &settings.options.phone)
            .with_context(|| format!("load existing customers {}", path.display()))?,
        None => KnownPhones::new(),
    };
    info!(known_phones = known.len(), "import configured");
    Ok(ImportContext {
        options: settings.options.clone(),
        table,
        known,
    })
}

// ============================================================================
// Stage 2: Import
// ============================================================================

/// Reads one file and projects its rows.
///
/// The detection notice is logged; "nothing detected" warnings are limited
/// by `throttle` so a batch of unrelated files does not flood the log.
pub fn import_stage(
    path: &Path,
    context: &ImportContext,
    throttle: &mut NoticeThrottle,
) -> Result<ImportReport> {
    let mut on_progress = |notice: &ImportProgress| match notice {
        ImportProgress::Detected { .. } => info!("{notice}"),
        ImportProgress::NoneDetected if throttle.try_show() => warn!("{notice}"),
        ImportProgress::NoneDetected => debug!("{notice}"),
    };
    import_file(
        path,
        &context.options,
        &context.matcher(),
        Some(&mut on_progress),
    )
    .with_context(|| format!("import {}", path.display()))
}

// ============================================================================
// Stage 3: Prepare
// ============================================================================

fn issue_value(kind: &IssueKind) -> Option<&str> {
    match kind {
        IssueKind::InvalidPhone { value }
        | IssueKind::InvalidLoyaltyLevel { value }
        | IssueKind::InvalidBirthDay { value } => Some(value),
        _ => None,
    }
}

pub fn prepare_stage(report: &ImportReport, context: &ImportContext) -> PreparedImport {
    let prepared = prepare_customers(report, &context.options.phone);
    for issue in &prepared.issues {
        debug!(
            row = issue.row,
            field = %issue.field(),
            value = issue_value(&issue.kind).map(redact_value),
            "{}",
            issue.kind.message()
        );
    }
    for duplicate in &prepared.duplicates {
        debug!(
            phone = redact_value(&duplicate.phone),
            rows = ?duplicate.rows,
            "duplicate phone in file"
        );
    }
    prepared
}

// ============================================================================
// Stage 4: Plan
// ============================================================================

pub fn plan_stage(prepared: &PreparedImport, context: &ImportContext) -> ImportPlan {
    plan_import(prepared, &context.known)
}

/// Everything produced for one input file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub report: ImportReport,
    pub prepared: PreparedImport,
    pub plan: ImportPlan,
}

/// Runs stages 2 to 4 for one file and records its new phones in `context`.
pub fn process_file(
    path: &Path,
    context: &mut ImportContext,
    throttle: &mut NoticeThrottle,
) -> Result<FileOutcome> {
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();

    let report = import_stage(path, context, throttle)?;
    let prepared = prepare_stage(&report, context);
    let plan = plan_stage(&prepared, context);
    context.remember_created(&plan);

    Ok(FileOutcome {
        path: path.to_path_buf(),
        report,
        prepared,
        plan,
    })
}

// ============================================================================
// Stage 5: Output
// ============================================================================

/// JSON shape of one file's result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutput<'a> {
    pub file: String,
    pub headers: &'a [String],
    pub detected_columns: &'a DetectionResult,
    pub rows: usize,
    pub issues: &'a [RowIssue],
    pub duplicates: &'a [DuplicatePhone],
    pub plan: &'a ImportPlan,
}

impl FileOutcome {
    pub fn to_output(&self) -> FileOutput<'_> {
        FileOutput {
            file: self.path.display().to_string(),
            headers: &self.report.headers,
            detected_columns: &self.report.detected_columns,
            rows: self.report.row_count(),
            issues: &self.prepared.issues,
            duplicates: &self.prepared.duplicates,
            plan: &self.plan,
        }
    }
}

pub fn render_json(outcomes: &[FileOutcome]) -> Result<String> {
    let outputs: Vec<FileOutput<'_>> = outcomes.iter().map(FileOutcome::to_output).collect();
    serde_json::to_string_pretty(&outputs).context("serialize import plan")
}

pub fn write_json(path: &Path, outcomes: &[FileOutcome]) -> Result<()> {
    let json = render_json(outcomes)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), files = outcomes.len(), "wrote import plan");
    Ok(())
}
