mod os_signal_termination;
mod parser;
mod report;
mod result;

use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use proctor_core::convert_case::Case;
use proctor_core::statistics::configure_statistic_logging;
use proctor_core::termination::Combinator;
use proctor_core::termination::DecisionBudget;
use proctor_core::termination::TimeBudget;
use proctor_core::Solver;
use proctor_core::SolverOptions;
use proctor_core::DEFAULT_INVIGILATOR_POOL_SIZE;
use result::CliError;
use result::CliResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instance to schedule. The file starts with the attributes
    ///   Number of students: <int>
    ///   Number of exams: <int>
    ///   Number of slots: <int>
    ///   Number of rooms: <int>
    ///   Room <r> capacity: <int>   (one line per room)
    /// followed by one '<exam> <student>' registration per line.
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The time limit of the search in milliseconds.
    ///
    /// When the limit is reached, the run reports that it timed out. Without a limit the search
    /// runs until it finds a schedule or proves that none exists.
    ///
    /// Possible values: u64
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The number of invigilators which can be put on duty.
    ///
    /// Possible values: usize
    #[arg(
        long = "invigilators",
        default_value_t = DEFAULT_INVIGILATOR_POOL_SIZE,
        verbatim_doc_comment
    )]
    invigilator_pool_size: usize,

    /// The maximum number of decisions the search is allowed to make.
    ///
    /// Unlike the time limit this stops every run at the same point, which makes runs which time
    /// out reproducible.
    ///
    /// Possible values: u64
    #[arg(long = "decision-limit", verbatim_doc_comment)]
    decision_limit: Option<u64>,

    /// Enables log message output from the scheduler.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the scheduler.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("%% proctor-stat:", Some(Case::Snake), None);
    }

    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    if proctor_core::asserts::PROCTOR_ASSERT_LEVEL_DEFINITION
        >= proctor_core::asserts::PROCTOR_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the Proctor assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            proctor_core::asserts::PROCTOR_ASSERT_LEVEL_DEFINITION
        );
    };

    let file = File::open(&args.instance_path)
        .map_err(|_| CliError::invalid_instance_file(args.instance_path.display()))?;
    let instance = parser::parse_instance(BufReader::new(file))?;
    info!(
        "Read {} exams, {} students, {} rooms and {} slots",
        instance.num_exams(),
        instance.num_students(),
        instance.num_rooms(),
        instance.num_slots()
    );

    let mut termination = Combinator::new(
        OsSignal::install()?,
        Combinator::new(
            args.time_limit
                .map(|limit| TimeBudget::starting_now(Duration::from_millis(limit))),
            args.decision_limit.map(DecisionBudget::new),
        ),
    );

    let solver = Solver::with_options(SolverOptions {
        invigilator_pool_size: args.invigilator_pool_size,
    });
    let outcome = solver.solve(&instance, &mut termination);

    if args.log_statistics {
        outcome.summary().log_statistics();
    }

    let mut stdout = std::io::stdout().lock();
    report::write_report(&mut stdout, &instance, &outcome)?;
    stdout.flush()?;

    Ok(())
}
