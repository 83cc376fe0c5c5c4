use crate::artifacts::{golden_path, got_path};
use crate::compare::{CompareError, FileCopy, FileDiff};
use crate::report::Reporter;
use annotest_annotations::parse_queries;
use annotest_engine::{invoke, write_query_result, AnalysisEngine, AnalysisScope, OutputMode};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Run configuration, threaded explicitly into the comparator
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Overwrite mismatching golden files with fresh output
    pub update: bool,

    /// Build/search context handed to the engine
    pub scope: AnalysisScope,
}

/// The sequential driver: one fixture at a time, one query at a time
pub struct Harness<'a> {
    engine: &'a dyn AnalysisEngine,
    diff: &'a dyn FileDiff,
    copy: &'a dyn FileCopy,
    config: HarnessConfig,
}

impl<'a> Harness<'a> {
    pub fn new(
        engine: &'a dyn AnalysisEngine,
        diff: &'a dyn FileDiff,
        copy: &'a dyn FileCopy,
        config: HarnessConfig,
    ) -> Self {
        Self {
            engine,
            diff,
            copy,
            config,
        }
    }

    /// Processes every fixture in the given order. Failures of one file
    /// never prevent the remaining files from being processed.
    pub fn run(&self, fixtures: &[impl AsRef<Path>], reporter: &mut Reporter) {
        for fixture in fixtures {
            self.run_file(fixture.as_ref(), reporter);
        }
    }

    /// Processes one fixture: parse, query, capture, compare, maybe update.
    pub fn run_file(&self, fixture: &Path, reporter: &mut Reporter) {
        let label = fixture.display().to_string();

        let outcome = match parse_queries(fixture) {
            Ok(outcome) => outcome,
            Err(err) => {
                // Fatal for this file only; siblings still run.
                reporter.fail(&label, err.to_string());
                return;
            }
        };
        for diagnostic in &outcome.diagnostics {
            reporter.fail(&label, diagnostic.to_string());
        }

        let mode = OutputMode::for_fixture(fixture);
        let got = got_path(fixture);
        let golden = golden_path(fixture);

        let mut got_file = match File::create(&got) {
            Ok(file) => file,
            Err(err) => {
                reporter.fail(&label, format!("Create({}) failed: {err}", got.display()));
                return;
            }
        };

        // Strictly in parsed order: later blocks must land in the got
        // artifact in a deterministic, diff-stable sequence.
        for query in &outcome.queries {
            let result = invoke(self.engine, query, &self.config.scope);
            if let Err(err) =
                write_query_result(&mut got_file, &query.verb, &query.id, result, mode)
            {
                reporter.fail(&label, format!("write {} failed: {err}", got.display()));
                return;
            }
        }
        if let Err(err) = got_file.flush() {
            reporter.fail(&label, format!("flush {} failed: {err}", got.display()));
            return;
        }
        drop(got_file);

        match self.diff.diff(&golden, &got) {
            Ok(None) => {}
            Ok(Some(diff_text)) => {
                reporter.fail(
                    &label,
                    format!("golden mismatch against {}:\n{diff_text}", golden.display()),
                );
                if self.config.update {
                    log::info!("Updating {}...", golden.display());
                    if let Err(err) = self.copy.copy(&got, &golden) {
                        reporter.fail(&label, format!("Update failed: {err}"));
                    }
                }
            }
            Err(CompareError::Unsupported(reason)) => {
                log::warn!("skipping golden comparison for {label}: {reason}");
            }
            Err(err) => {
                reporter.fail(&label, format!("diff failed: {err}"));
            }
        }
    }
}
