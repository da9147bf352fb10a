use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, ErrorKind};
use haplopar::{
    encodings::{HeterozygousEncoding, PairConstraintsEncoder},
    io::{InstanceReader, InstanceSummary, MsReader, SummaryWriter},
    sat::{
        DefaultSatSolverFactory, ExternalSatSolverFactory, SatSolverFactory, SolvingListener,
        SolvingResult,
    },
    solvers::{MinimumHaplotypeSetComputer, ParsimonySolver},
};
use log::{error, info, warn};
use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
    str::FromStr,
    sync::Once,
    time::SystemTime,
};
use strum::VariantNames;

const ARG_INSTANCE: &str = "INSTANCE";
const ARG_ENCODING: &str = "ENCODING";
const ARG_EXTERNAL_SAT_SOLVER: &str = "EXTERNAL_SAT_SOLVER";
const ARG_EXTERNAL_SAT_SOLVER_OPTIONS: &str = "EXTERNAL_SAT_SOLVER_OPTIONS";
const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

fn main() {
    let start_time = SystemTime::now();
    let arg_matches = match app().get_matches_safe() {
        Ok(m) => m,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => {
                init_logger_with_level(log::LevelFilter::Info);
                error!("an error occurred: {}", e);
                std::process::exit(1);
            }
        },
    };
    let level = log::LevelFilter::from_str(arg_matches.value_of(ARG_LOGGING_LEVEL).unwrap())
        .expect("invalid logging level");
    init_logger_with_level(level);
    info!(
        "{} {}",
        option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name"),
        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version")
    );
    sys_info();
    if let Err(e) = execute(&arg_matches) {
        error!("an error occurred: {}", e);
        e.chain()
            .skip(1)
            .for_each(|err| error!("caused by: {}", err));
        std::process::exit(1);
    }
    info!(
        "exiting successfully after {:?}",
        start_time.elapsed().unwrap_or_default()
    );
}

fn app() -> App<'static, 'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name"))
        .setting(AppSettings::DisableVersion)
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version"))
        .about("Haplopar, a pure parsimony haplotyping solver.")
        .arg(
            Arg::with_name(ARG_INSTANCE)
                .index(1)
                .help("the input file that contains the haplotype sample")
                .required(true),
        )
        .arg(
            Arg::with_name(ARG_ENCODING)
                .long("encoding")
                .empty_values(false)
                .multiple(false)
                .possible_values(HeterozygousEncoding::VARIANTS)
                .default_value("exhaustive")
                .help("the formulation used for heterozygous sites")
                .required(false),
        )
        .args(&external_sat_solver_args())
        .arg(
            Arg::with_name(ARG_LOGGING_LEVEL)
                .long("logging-level")
                .multiple(false)
                .default_value("info")
                .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
                .help("set the minimal logging level"),
        )
}

fn external_sat_solver_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_EXTERNAL_SAT_SOLVER)
            .long("external-sat-solver")
            .empty_values(false)
            .multiple(false)
            .help("a path to an external SAT solver to replace the embedded one")
            .required(false),
        Arg::with_name(ARG_EXTERNAL_SAT_SOLVER_OPTIONS)
            .long("external-sat-solver-opt")
            .requires(ARG_EXTERNAL_SAT_SOLVER)
            .empty_values(false)
            .multiple(true)
            .help("a option to give to the external SAT solver")
            .required(false),
    ]
}

fn execute(arg_matches: &ArgMatches<'_>) -> Result<()> {
    let instance_path = arg_matches.value_of(ARG_INSTANCE).unwrap();
    let canonicalized = canonicalize_file_path(instance_path)?;
    info!("reading instance file {:?}", canonicalized);
    let mut reader = MsReader::default();
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let mut file_reader = BufReader::new(File::open(canonicalized)?);
    let instance = reader.read(&mut file_reader)?;
    info!(
        "the instance has {} haplotype(s), {} genotype(s) and {} polymorphic site(s)",
        instance.n_haplotypes(),
        instance.n_genotypes(),
        instance.n_sites(),
    );
    instance
        .haplotypes()
        .iter()
        .for_each(|h| info!("haplotype {}", h));
    instance
        .genotypes()
        .iter()
        .for_each(|g| info!("genotype {}", g));
    let encoding = HeterozygousEncoding::from_str(arg_matches.value_of(ARG_ENCODING).unwrap())
        .expect("invalid encoding name");
    info!("using the {} heterozygous site formulation", encoding);
    let solver_factory = create_sat_solver_factory(arg_matches)?;
    let mut solver = ParsimonySolver::new_with_sat_solver_factory_and_constraints_encoder(
        &instance,
        solver_factory,
        Box::new(PairConstraintsEncoder::new_with_heterozygous_encoding(
            encoding,
        )),
    );
    let outcome = solver.compute_minimum_haplotype_set()?;
    let stats = outcome.stats();
    info!(
        "the search made {} probe(s) in {:?}",
        stats.n_probes(),
        stats.solve_time()
    );
    let writer = SummaryWriter::default();
    let mut out = std::io::stdout();
    let summary = match outcome.solution() {
        Some(solution) => {
            info!(
                "minimum number of explaining haplotypes: {}",
                solution.n_haplotypes()
            );
            writer.write_haplotypes(&mut out, solution.haplotypes())?;
            InstanceSummary::new(
                instance_path,
                true,
                instance.n_genotypes(),
                instance.n_sites(),
                solution.n_haplotypes(),
                stats.solve_time(),
                stats.n_clauses(),
                stats.n_vars(),
            )
        }
        None => InstanceSummary::new(
            instance_path,
            false,
            instance.n_genotypes(),
            instance.n_sites(),
            0,
            stats.solve_time(),
            stats.n_clauses(),
            stats.n_vars(),
        ),
    };
    writer.write_record(&mut out, &summary)
}

fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

fn create_sat_solver_factory(arg_matches: &ArgMatches<'_>) -> Result<Box<dyn SatSolverFactory>> {
    let external_solver = arg_matches
        .value_of(ARG_EXTERNAL_SAT_SOLVER)
        .map(|s| s.to_string());
    let external_solver_options = arg_matches
        .values_of(ARG_EXTERNAL_SAT_SOLVER_OPTIONS)
        .map(|v| v.map(|o| o.to_string()).collect::<Vec<String>>())
        .unwrap_or_default();
    if let Some(s) = external_solver {
        let path = canonicalize_file_path(&s)?;
        info!("using {:?} for problems requiring a SAT solver", path);
        let mut factory = ExternalSatSolverFactory::new(
            path.to_str().unwrap().to_string(),
            external_solver_options,
        );
        factory.add_solver_listener(Box::new(|| {
            Box::<SatSolvingLogger>::default() as Box<dyn SolvingListener>
        }));
        Ok(Box::new(factory))
    } else {
        info!("using the default SAT solver for problems requiring a SAT solver");
        let mut factory = DefaultSatSolverFactory::default();
        factory.add_solver_listener(Box::new(|| {
            Box::<SatSolvingLogger>::default() as Box<dyn SolvingListener>
        }));
        Ok(Box::new(factory))
    }
}

#[derive(Default)]
struct SatSolvingLogger;

impl SolvingListener for SatSolvingLogger {
    fn solving_start(&self, n_vars: usize, n_clauses: usize) {
        info!(
            "launching SAT solver on an instance with {} variables and {} clauses",
            n_vars, n_clauses
        );
    }

    fn solving_end(&self, result: &SolvingResult) {
        let r = match result {
            SolvingResult::Satisfiable(_) => "SAT",
            SolvingResult::Unsatisfiable => "UNSAT",
            SolvingResult::Unknown => "UNKNOWN",
        };
        info!("SAT solver ended with result {}", r);
    }
}

static LOGGER_INIT: Once = Once::new();

fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stdout())
            .apply()
            .unwrap_or(());
    });
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = sysinfo::System::new_all();
    let unknown = || "[unknown]".to_string();
    info!(
        "running on {}",
        sysinfo::System::host_name().unwrap_or_else(unknown)
    );
    info!(
        "OS is {} {} with kernel {}",
        sysinfo::System::name().unwrap_or_else(unknown),
        sysinfo::System::os_version().unwrap_or_else(unknown),
        sysinfo::System::kernel_version().unwrap_or_else(unknown)
    );
    let mut processor_kinds = sys
        .cpus()
        .iter()
        .map(|p| p.brand())
        .collect::<Vec<&str>>();
    processor_kinds.sort_unstable();
    processor_kinds.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count()
            .map(|c| c.to_string())
            .unwrap_or_else(unknown),
        processor_kinds
    );
    info!("total memory: {} KB", sys.total_memory() >> 10);
    info!("----------------------------------------");
}
