use crate::vedirect::ProfileName;
use clap::Parser;

/// VE.Direct dump - decode Victron VE.Direct frames into JSON records
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Options {
    /// Config file to read
    #[clap(short = 'c', long = "config")]
    pub config_file: Option<String>,

    /// Scale profile, overrides the config file (fine or coarse)
    #[clap(short = 'p', long = "profile")]
    pub profile: Option<ProfileName>,

    /// Stop after this many frames
    #[clap(short = 'n', long = "frames")]
    pub frames: Option<u64>,

    /// File of JSON frames, one per line, or - for stdin
    #[clap(default_value = "-")]
    pub input: String,
}

impl Options {
    pub fn new() -> Self {
        Self::parse()
    }
}
