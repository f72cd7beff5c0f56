use clap::Parser;
use ottv::output::FileOutput;
use ottv::{run_project, ProjectFlags};
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct OttvArgs {
    #[arg(help = "Path to the building model snapshot in .json format")]
    input_file: String,
    #[arg(
        long,
        short,
        help = "Directory to write results to, defaults to <input stem>__results next to the input"
    )]
    output_dir: Option<String>,
    #[clap(
        long,
        default_value_t = false,
        help = "Evaluate envelope walls in parallel"
    )]
    parallel: bool,
    #[clap(
        long,
        default_value_t = false,
        help = "Write only the summary, without the per surface tables"
    )]
    no_tables: bool,
    #[clap(long, short, default_value_t = false, help = "Log per surface detail")]
    verbose: bool,
    #[clap(long, default_value_t = false, help = "Whether to log out spans")]
    log_spans: bool,
}

impl From<&OttvArgs> for ProjectFlags {
    fn from(args: &OttvArgs) -> Self {
        let mut flags = ProjectFlags::empty();
        if args.parallel {
            flags.insert(ProjectFlags::PARALLEL_SURFACES);
        }
        if !args.no_tables {
            flags.insert(ProjectFlags::SURFACE_TABLES);
        }
        flags
    }
}

fn main() -> anyhow::Result<()> {
    let args = OttvArgs::parse();

    // set up basic tracing
    let tracing_subscriber = {
        let max_level = if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };
        let mut builder = tracing_subscriber::fmt::fmt().with_max_level(max_level);

        if args.log_spans {
            builder = builder.with_span_events(FmtSpan::CLOSE);
        }

        builder.finish()
    };
    tracing::subscriber::set_global_default(tracing_subscriber)?;

    let input_path = Path::new(args.input_file.as_str());
    let input_file_stem = input_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow::anyhow!("Input file '{}' has no name", args.input_file))?;

    let output_path = match &args.output_dir {
        Some(output_dir) => PathBuf::from(output_dir),
        None => input_path.with_file_name(format!("{input_file_stem}__results")),
    };
    fs::create_dir_all(&output_path)?;
    debug!("writing results to {}", output_path.display());

    let file_output = FileOutput::new(output_path, format!("{input_file_stem}__{{}}.{{}}"));

    let results = run_project(
        BufReader::new(File::open(input_path)?),
        &file_output,
        &(&args).into(),
    )?;

    info!(
        "{}: OTTV {} W/m2 ({:?})",
        results.report.project.building_name,
        results.report.ottv,
        results.report.compliance.compliance
    );

    Ok(())
}
