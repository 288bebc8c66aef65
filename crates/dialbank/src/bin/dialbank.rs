//! Command-line gauge-bank reader.
//!
//! Frames come from an image file maintained by an external capture
//! process (re-decoded every tick); circle candidates come from an
//! external detector's JSON output. Runs one cycle with `--once` or polls
//! on a fixed interval.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use dialbank::snapshot::SnapshotWriter;
use dialbank::{
    BankReading, CircleCandidate, CircleDetector, DialConvention, FrameSource, GaugeReader,
    GaugeReaderParams, GrayImageView, Orchestrator, ReadingSink, RgbImage,
};

#[derive(Parser, Debug)]
#[command(name = "dialbank", about = "Read a bank of analog dials from a still frame")]
struct Args {
    /// Frame image, re-decoded on every poll tick.
    #[arg(long)]
    frame: PathBuf,

    /// JSON array of detected circles: [{"center_x", "center_y", "radius"}].
    #[arg(long)]
    circles: PathBuf,

    /// Optional GaugeReaderParams JSON; overrides --dials.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Expected dial count; conventions alternate CW/CCW from the left.
    #[arg(long, default_value_t = 5)]
    dials: usize,

    /// Seconds between poll ticks.
    #[arg(long, default_value_t = 2.0)]
    interval: f64,

    /// Run a single cycle and exit (non-zero on an aborted cycle).
    #[arg(long)]
    once: bool,

    /// With --once, print the full per-dial breakdown as JSON.
    #[arg(long)]
    json: bool,

    /// Persist timestamped raw and annotated frames into this directory.
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Replace the plain logger with a tracing subscriber.
    #[cfg(feature = "tracing")]
    #[arg(long, value_enum)]
    tracing: Option<TraceArg>,
}

#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum TraceArg {
    Pretty,
    Json,
}

#[cfg(feature = "tracing")]
impl From<TraceArg> for dialbank::TraceFormat {
    fn from(arg: TraceArg) -> Self {
        match arg {
            TraceArg::Pretty => Self::Pretty,
            TraceArg::Json => Self::Json,
        }
    }
}

fn init_logging(args: &Args) {
    #[cfg(feature = "tracing")]
    if let Some(format) = args.tracing {
        dialbank::init_tracing(format.into());
        return;
    }

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = dialbank::init_with_level(level);
}

struct FileFrameSource {
    path: PathBuf,
}

impl FrameSource for FileFrameSource {
    fn acquire(&mut self) -> Option<RgbImage> {
        let decoded = image::open(&self.path)
            .map_err(|err| log::debug!("cannot decode {}: {err}", self.path.display()))
            .ok()?
            .to_rgb8();
        Some(RgbImage {
            width: decoded.width() as usize,
            height: decoded.height() as usize,
            data: decoded.into_raw(),
        })
    }
}

/// Stand-in for a live detector: candidates loaded once from JSON.
struct FixedCircles {
    candidates: Vec<CircleCandidate>,
}

impl CircleDetector for FixedCircles {
    fn detect(&mut self, _gray: &GrayImageView<'_>) -> Vec<CircleCandidate> {
        self.candidates.clone()
    }
}

struct CliSink {
    writer: Option<SnapshotWriter>,
    json: bool,
}

impl ReadingSink for CliSink {
    fn frame_acquired(&mut self, frame: &RgbImage) {
        if let Some(writer) = &self.writer {
            if let Err(err) = writer.save_raw(frame) {
                log::warn!("raw snapshot failed: {err}");
            }
        }
    }

    fn cycle_complete(&mut self, annotated: &RgbImage, reading: &BankReading) {
        if let Some(writer) = &self.writer {
            if let Err(err) = writer.save_annotated(annotated) {
                log::warn!("annotated snapshot failed: {err}");
            }
        }
        if self.json {
            match serde_json::to_string_pretty(reading) {
                Ok(out) => println!("{out}"),
                Err(err) => log::warn!("cannot serialize reading: {err}"),
            }
        } else {
            println!("{}", reading.reading);
        }
    }
}

fn load_params(args: &Args) -> Result<GaugeReaderParams, String> {
    if let Some(path) = &args.params {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
        return serde_json::from_str(&text)
            .map_err(|err| format!("bad params in {}: {err}", path.display()));
    }
    let conventions = (0..args.dials)
        .map(|i| {
            if i % 2 == 0 {
                DialConvention::Clockwise
            } else {
                DialConvention::Counterclockwise
            }
        })
        .collect();
    Ok(GaugeReaderParams::for_bank(conventions))
}

fn load_circles(path: &std::path::Path) -> Result<Vec<CircleCandidate>, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    serde_json::from_str(&text).map_err(|err| format!("bad circles in {}: {err}", path.display()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let (params, candidates) = match (load_params(&args), load_circles(&args.circles)) {
        (Ok(p), Ok(c)) => (p, c),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let source = FileFrameSource {
        path: args.frame.clone(),
    };
    let detector = FixedCircles { candidates };
    let sink = CliSink {
        writer: args.save_dir.clone().map(SnapshotWriter::new),
        json: args.json,
    };

    let mut orchestrator = Orchestrator::new(source, detector, GaugeReader::new(params), sink)
        .with_interval(Duration::from_secs_f64(args.interval.max(0.0)));

    if args.once {
        match orchestrator.run_once() {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("no reading: {err}");
                ExitCode::FAILURE
            }
        }
    } else {
        orchestrator.run()
    }
}
