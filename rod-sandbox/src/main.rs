use log::*;
use rod_core::Projection;
use rod_sandbox::{SandboxSettings, Summary};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Clone)]
#[structopt(
    name = "rod-sandbox",
    about = "Estimates the endpoints of a rod from the points a camera observed along it"
)]
struct Opt {
    /// The points observed by the first camera, one `x,y` row per point.
    #[structopt(parse(from_os_str))]
    camera: PathBuf,
    /// The interpolation parameter of every observed point along the rod.
    #[structopt(parse(from_os_str))]
    inputs: PathBuf,
    /// The points observed by the second camera.
    ///
    /// These are only plotted against the estimate projected into the second camera.
    #[structopt(long, parse(from_os_str))]
    second_camera: Option<PathBuf>,
    /// The delimiter between coordinates in the point files.
    #[structopt(short, long, default_value = ",")]
    delimiter: char,
    /// The file where settings are specified.
    ///
    /// This is in the format of `rod_sandbox::SandboxSettings`.
    #[structopt(short, long, default_value = "rod-settings.json", parse(from_os_str))]
    settings: PathBuf,
    /// Overrides the seed from the settings.
    #[structopt(long)]
    seed: Option<u64>,
    /// Overrides the number of iterations from the settings.
    #[structopt(short = "n", long)]
    iterations: Option<usize>,
    /// The directory the figures are written to.
    #[structopt(short, long, default_value = "figures", parse(from_os_str))]
    figures: PathBuf,
    /// The name used in the figure file names.
    #[structopt(long, default_value = "camera1")]
    name: String,
    /// Output JSON file to deposit a summary of the run
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();
    if let Err(e) = run(opt) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(opt: Opt) -> rod_sandbox::Result<()> {
    let mut settings = SandboxSettings::load(&opt.settings)?;
    if let Some(seed) = opt.seed {
        settings.sampler.seed = seed;
    }
    if let Some(iterations) = opt.iterations {
        settings.sampler.iterations = iterations;
    }

    let points = rod_sandbox::read_points(&opt.camera, opt.delimiter)?;
    let times = rod_sandbox::read_inputs(&opt.inputs)?;
    let second_points = opt
        .second_camera
        .as_ref()
        .map(|path| rod_sandbox::read_points(path, opt.delimiter))
        .transpose()?;
    info!("read {} points and {} inputs", points.len(), times.len());

    let chain = rod_sandbox::estimate(&settings, &times, &points)?;
    let summary = Summary::new(&opt.name, &chain, settings.camera());
    info!("MAP: {:?}", summary.map);
    info!("acceptance rate: {}", summary.acceptance_rate);
    if let Some(estimate) = summary.estimate {
        info!(
            "MAP for pi {} and pf {}",
            estimate.segment.initial, estimate.segment.terminal
        );
    }
    if let Some(projection) = summary.projection {
        info!(
            "MAP for qi {} and qf {}",
            projection.initial, projection.terminal
        );
    }
    if let Some(projection) = summary
        .estimate
        .and_then(|estimate| settings.second_camera().project_segment(estimate.segment))
    {
        info!(
            "second camera sees qi {} and qf {}",
            projection.initial, projection.terminal
        );
    }

    rod_sandbox::render_figures(
        &opt.figures,
        &opt.name,
        &settings,
        &chain,
        &points,
        second_points.as_deref(),
    )?;

    if let Some(path) = opt.output {
        info!("saving the summary");
        summary.save(path)?;
    }
    Ok(())
}
