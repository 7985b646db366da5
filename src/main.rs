use clap::Parser;
use colored::Colorize;
use log::info;

use std::io::{self, BufWriter};
use std::process::ExitCode;

use primerscan::*;

/// Scan alignment reads (from a file, or piped from e.g. samtools view) for
/// sequences matching PCR primer pairs.
#[derive(Parser, Debug)]
#[command(name = "primerscan", version)]
struct Args {
    /// File containing primer pairs, two oligos per line
    primers: String,

    /// File containing reads, optionally gzipped (default: standard input)
    #[arg(short, long)]
    reads: Option<String>,

    /// YAML file with scan settings; flags given here take precedence
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    #[arg(long, value_enum)]
    schema: Option<Schema>,

    /// How ambiguity codes in primers are matched
    #[arg(long, value_enum)]
    degenerate: Option<DegenerateMode>,

    /// Edit distance allowed per oligo with the approx strategy
    #[arg(long)]
    max_edits: Option<usize>,

    /// Number of bases taken as the UMI
    #[arg(long)]
    umi_len: Option<usize>,

    /// Report progress every this many reads (0 to disable)
    #[arg(long)]
    progress_interval: Option<usize>,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn scan_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(file) => ScanConfig::from_file(file)?,
            None => ScanConfig::default(),
        };

        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(schema) = self.schema {
            config.schema = schema;
        }
        if let Some(degenerate) = self.degenerate {
            config.degenerate = degenerate;
        }
        if let Some(max_edits) = self.max_edits {
            config.max_edits = max_edits;
        }
        if let Some(umi_len) = self.umi_len {
            config.umi_len = umi_len;
        }
        if let Some(progress_interval) = self.progress_interval {
            config.progress_interval = progress_interval;
        }

        Ok(config)
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.scan_config()?;

    let catalog = PrimerCatalog::from_file(&args.primers)?;
    info!("Read {} primer pairs from {}", catalog.len(), args.primers);

    let matcher = build_matcher(&catalog, &config)?;
    info!("Built {:?} matcher", config.strategy);

    let annotator = Annotator::new(matcher, &config);
    let mut reads = SamReader::open(args.reads.as_deref(), annotator.schema().columns())?;
    let mut writer = BufWriter::new(io::stdout().lock());

    annotator.run(&mut reads, &mut writer, &LogObserver)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
