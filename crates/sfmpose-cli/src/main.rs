use std::path::{Path, PathBuf};

use clap::Parser;
use sfmpose::{
    convert_file, init_logging, load_options, write_diagnostics, ConversionReport,
    ConvertOptions, DuplicatePoseIdPolicy, PartialRecordPolicy, PoseLookup, Result,
};

/// Converts an SfM reconstruction into a frame-keyed pose table.
#[derive(Debug, Parser)]
#[command(name = "parse-sfm", author, version, about)]
struct Args {
    /// Path to the input `.sfm` JSON document.
    input: PathBuf,

    /// Path of the pose table to write.
    output: PathBuf,

    /// Optional JSON file with conversion options. Flags below override it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Drop a view when any rotation or center component fails to parse.
    #[arg(long)]
    strict: bool,

    /// Fail when two poses share an identifier.
    #[arg(long)]
    reject_duplicate_poses: bool,

    /// Build a pose index instead of scanning poses for every view.
    #[arg(long)]
    index: bool,

    /// Pretty-print the output document.
    #[arg(long)]
    pretty: bool,

    /// Also write the diagnostics as JSON to this path.
    #[arg(long, value_name = "PATH")]
    diagnostics: Option<PathBuf>,
}

impl Args {
    fn options(&self) -> Result<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => load_options(path)?,
            None => ConvertOptions::default(),
        };
        if self.strict {
            options.partial_records = PartialRecordPolicy::DropView;
        }
        if self.reject_duplicate_poses {
            options.duplicate_pose_ids = DuplicatePoseIdPolicy::Reject;
        }
        if self.index {
            options.lookup = PoseLookup::Indexed;
        }
        if self.pretty {
            options.pretty_output = true;
        }
        Ok(options)
    }
}

fn run(args: &Args) -> Result<ConversionReport> {
    let options = args.options()?;
    let report = convert_file(&args.input, &args.output, &options)?;
    if let Some(path) = &args.diagnostics {
        write_diagnostics(path, &report.diagnostics)?;
    }
    Ok(report)
}

fn summary(report: &ConversionReport, output: &Path) -> String {
    format!(
        "wrote {} of {} poses to {}",
        report.stats.records_emitted,
        report.stats.views_total,
        output.display()
    )
}

fn main() {
    init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(report) => log::info!("{}", summary(&report, &args.output)),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
