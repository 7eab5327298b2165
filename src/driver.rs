//! Open, parse, dump, destroy
//!
//! The [`Driver`] owns one parse run end to end. The input file is opened
//! before the parser is involved, so an unreadable path never allocates a
//! tree. Whatever tree the parser returns is destroyed before the run ends,
//! on the success path and on every error path after parsing.

use crate::parser::{ParseDiagnostic, ParseFailure, ParseOutcome, SyntaxParser};
use crate::tree::{destroy, traverse, DumpConfig, SyntaxNode, TreeError, TreeStats};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Could not open file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("tree viewer failed: {0}")]
    Inspect(#[source] io::Error),
}

/// What a run did
#[derive(Debug, Default)]
pub struct RunSummary {
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Nodes visited by the dump, 0 when it was skipped
    pub dumped: usize,
    /// Nodes released by the final teardown
    pub released: usize,
    /// Counts over the tree, only for clean parses
    pub stats: Option<TreeStats>,
}

impl RunSummary {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

pub struct Driver<P> {
    parser: P,
    dump: DumpConfig,
}

impl<P: SyntaxParser> Driver<P> {
    pub fn new(parser: P, dump: DumpConfig) -> Self {
        Driver { parser, dump }
    }

    /// Parse `path`, dump the tree to `out` when the parse was clean, then
    /// destroy it.
    pub fn run<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<RunSummary, DriverError> {
        self.run_with(path, out, |_| Ok(()))
    }

    /// Like [`Driver::run`], handing the tree to `inspect` after the dump.
    ///
    /// `inspect` only sees trees from clean parses.
    pub fn run_with<W, F>(
        &mut self,
        path: &Path,
        out: &mut W,
        inspect: F,
    ) -> Result<RunSummary, DriverError>
    where
        W: Write,
        F: FnOnce(&SyntaxNode) -> io::Result<()>,
    {
        let ParseOutcome { root, diagnostics } = self.parse_file(path)?;
        info!(
            path = %path.display(),
            errors = diagnostics.len(),
            "parse finished"
        );

        let mut summary = RunSummary {
            diagnostics,
            ..RunSummary::default()
        };

        let result = if summary.diagnostics.is_empty() {
            self.report(root.as_ref(), out, inspect, &mut summary)
        } else {
            debug!("dump skipped, parse reported errors");
            Ok(())
        };

        summary.released = destroy(root);
        result.map(|()| summary)
    }

    fn parse_file(&mut self, path: &Path) -> Result<ParseOutcome, DriverError> {
        let file = File::open(path).map_err(|source| DriverError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        self.parser.parse(&mut reader).map_err(|failure| match failure {
            ParseFailure::Io(source) => DriverError::Read {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Tree(err) => DriverError::Tree(err),
        })
    }

    fn report<W, F>(
        &self,
        root: Option<&SyntaxNode>,
        out: &mut W,
        inspect: F,
        summary: &mut RunSummary,
    ) -> Result<(), DriverError>
    where
        W: Write,
        F: FnOnce(&SyntaxNode) -> io::Result<()>,
    {
        summary.dumped = traverse(root, self.dump, out)?;

        if let Some(root) = root {
            let stats = TreeStats::collect(root);
            debug!(
                nodes = stats.nodes,
                leaves = stats.leaves,
                max_depth = stats.max_depth,
                "tree stats"
            );
            summary.stats = Some(stats);
            inspect(root).map_err(DriverError::Inspect)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TokenStreamParser;
    use std::io::Read;
    use tempfile::NamedTempFile;

    struct CountingParser {
        calls: usize,
    }

    impl SyntaxParser for CountingParser {
        fn parse(&mut self, _input: &mut dyn Read) -> Result<ParseOutcome, ParseFailure> {
            self.calls += 1;
            Ok(ParseOutcome::new(Some(SyntaxNode::non_terminal("Program", 1)), Vec::new()))
        }
    }

    /// Fails the way a parser does when a child sequence cannot grow
    struct ExhaustedParser;

    impl SyntaxParser for ExhaustedParser {
        fn parse(&mut self, _input: &mut dyn Read) -> Result<ParseOutcome, ParseFailure> {
            Err(TreeError::OutOfMemory {
                parent: "ExtDefList".to_string(),
                requested: 1,
            }
            .into())
        }
    }

    fn source_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_never_reaches_parser() {
        let mut parser = CountingParser { calls: 0 };
        let mut driver = Driver::new(&mut parser, DumpConfig::enabled());
        let mut out = Vec::new();

        let err = driver
            .run(Path::new("/definitely/not/here.cmm"), &mut out)
            .unwrap_err();

        assert!(matches!(err, DriverError::Open { .. }));
        assert_eq!(err.to_string(), "Could not open file /definitely/not/here.cmm");
        assert!(out.is_empty());
        drop(driver);
        assert_eq!(parser.calls, 0);
    }

    #[test]
    fn test_clean_parse_is_dumped_and_destroyed() {
        let file = source_file("int x;\n");
        let mut driver = Driver::new(TokenStreamParser::new(), DumpConfig::enabled());
        let mut out = Vec::new();

        let summary = driver.run(file.path(), &mut out).unwrap();

        assert_eq!(summary.error_count(), 0);
        assert_eq!(summary.dumped, 5);
        assert_eq!(summary.released, 5);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Program (1)\n  TokenLine (1)\n    TYPE: int\n    ID: x\n    SEMI\n"
        );
    }

    #[test]
    fn test_errors_skip_dump_but_still_destroy() {
        let file = source_file("int x = 1 # 2;\n");
        let mut driver = Driver::new(TokenStreamParser::new(), DumpConfig::enabled());
        let mut out = Vec::new();
        let mut inspected = false;

        let summary = driver
            .run_with(file.path(), &mut out, |_| {
                inspected = true;
                Ok(())
            })
            .unwrap();

        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.dumped, 0);
        assert!(summary.released > 0);
        assert!(summary.stats.is_none());
        assert!(out.is_empty());
        assert!(!inspected);
    }

    #[test]
    fn test_disabled_dump_still_inspects() {
        let file = source_file("while (a) { }\n");
        let mut driver = Driver::new(TokenStreamParser::new(), DumpConfig::default());
        let mut out = Vec::new();
        let mut seen = 0;

        let summary = driver
            .run_with(file.path(), &mut out, |root| {
                seen = root.subtree_size();
                Ok(())
            })
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(seen, 8);
        assert_eq!(summary.released, 8);
        assert_eq!(summary.stats.map(|s| s.nodes), Some(8));
    }

    #[test]
    fn test_inspect_failure_is_reported_after_destroy() {
        let file = source_file("x;\n");
        let mut driver = Driver::new(TokenStreamParser::new(), DumpConfig::default());
        let mut out = Vec::new();

        let err = driver
            .run_with(file.path(), &mut out, |_| {
                Err(io::Error::new(io::ErrorKind::Other, "terminal gone"))
            })
            .unwrap_err();
        assert!(matches!(err, DriverError::Inspect(_)));
    }

    #[test]
    fn test_allocation_failure_is_fatal() {
        let file = source_file("int x;\n");
        let mut driver = Driver::new(ExhaustedParser, DumpConfig::enabled());
        let mut out = Vec::new();

        let err = driver.run(file.path(), &mut out).unwrap_err();

        assert!(matches!(
            err,
            DriverError::Tree(TreeError::OutOfMemory { requested: 1, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_counted_not_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"int x; // caf\xe9\n").unwrap();
        let mut driver = Driver::new(TokenStreamParser::new(), DumpConfig::enabled());
        let mut out = Vec::new();

        let summary = driver.run(file.path(), &mut out).unwrap();

        assert_eq!(summary.error_count(), 1);
        assert_eq!(
            summary.diagnostics[0].to_string(),
            "Error type A at Line 1: Invalid UTF-8 sequence 0xE9."
        );
        assert_eq!(summary.dumped, 0);
        assert_eq!(summary.released, 5);
        assert!(out.is_empty());
    }
}
