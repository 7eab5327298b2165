//! Command line configuration

use crate::tree::DumpConfig;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Build and dump the syntax tree of a C-- source file
#[derive(Debug, Clone, Parser)]
#[command(name = "cmmtree", version)]
pub struct Cli {
    /// C-- source file to parse
    pub file: PathBuf,

    /// Do not print the syntax tree
    #[arg(short, long)]
    pub quiet: bool,

    /// Also print non-terminals that derived the empty string
    #[arg(short, long)]
    pub verbose: bool,

    /// Browse the syntax tree interactively after parsing
    #[arg(long)]
    pub view: bool,
}

impl Cli {
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args)
    }

    pub fn dump_config(&self) -> DumpConfig {
        DumpConfig {
            enabled: !self.quiet,
            verbose: self.verbose,
        }
    }
}
