use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{error, info, info_span};

use crm_cli::pipeline::{
    ImportSettings, configure, load_synonyms, process_file, render_json, write_json,
};
use crm_ingest::text::{parse_header_line, split_lines};
use crm_ingest::{ImportOptions, NoticeThrottle, expand_inputs, read_import_text};
use crm_map::HeaderMatcher;

use crate::cli::{DetectArgs, FieldsArgs, ImportArgs};
use crate::summary::{print_detection, print_fields};
use crate::types::{FileFailure, ImportRun};

fn import_options(max_file_size: Option<u64>, country_code: Option<&str>) -> ImportOptions {
    let mut options = ImportOptions::default();
    if let Some(bytes) = max_file_size {
        options = options.with_max_file_size(bytes);
    }
    if let Some(code) = country_code {
        options = options.with_country_code(code);
    }
    options
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let table = load_synonyms(args.synonyms.as_deref())?;
    print_fields(&table);
    Ok(())
}

pub fn run_detect(args: &DetectArgs) -> Result<()> {
    let table = load_synonyms(args.synonyms.as_deref())?;
    let options = import_options(args.max_file_size, None);
    let text = read_import_text(&args.file, &options)
        .with_context(|| format!("read {}", args.file.display()))?;
    let header_line = split_lines(&text)
        .first()
        .copied()
        .ok_or_else(|| anyhow!("{} has no header row", args.file.display()))?;
    let headers = parse_header_line(header_line);
    let detection = HeaderMatcher::new(&table).detect_detailed(&headers);
    info!(
        detected = detection.matches.len(),
        columns = headers.len(),
        "header detection finished"
    );
    print_detection(&args.file, &headers, &detection);
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<ImportRun> {
    let run_span = info_span!("import");
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let settings = ImportSettings {
        options: import_options(args.max_file_size, Some(args.country_code.as_str())),
        synonyms: args.synonyms.clone(),
        existing: args.existing.clone(),
    };
    let mut context = configure(&settings)?;

    let files = expand_inputs(&args.files).context("expand inputs")?;
    if files.is_empty() {
        return Err(anyhow!("no .csv or .txt files found in the given inputs"));
    }

    let mut throttle = NoticeThrottle::default();
    let mut run = ImportRun::default();
    for path in files {
        match process_file(&path, &mut context, &mut throttle) {
            Ok(outcome) => run.outcomes.push(outcome),
            Err(err) => {
                error!(path = %path.display(), "{err:#}");
                run.failures.push(FileFailure {
                    path,
                    message: format!("{err:#}"),
                });
            }
        }
    }

    if let Some(output) = &args.output {
        write_json(output, &run.outcomes)?;
        run.output = Some(output.clone());
    }
    if args.json {
        println!("{}", render_json(&run.outcomes)?);
    }

    info!(
        files = run.outcomes.len(),
        failed = run.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "import finished"
    );
    Ok(run)
}
