use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::fmt::SubscriberBuilder;

use blockshot::graph::{build, by_degree_asc, by_degree_desc, BuildCfg, CompareFn};
use blockshot::solvers::{BruteForceSolver, GreedySolver, RandomSolver, Solver, SolverCfg};

mod format;
mod gen;

/// Exit code when no dominating set was found.
const EXIT_NO_SOLUTION: u8 = 1;
/// Exit code for malformed input or arguments.
const EXIT_INVALID: u8 = 2;

#[derive(Parser)]
#[command(name = "blockshot")]
#[command(about = "Defensive placement planner for robot soccer")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SolverKind {
    Brute,
    Greedy,
    Random,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortOrder {
    DegreeDesc,
    DegreeAsc,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a problem file and write the chosen defender positions
    Solve {
        /// Problem description (JSON)
        #[arg(long)]
        input: PathBuf,
        /// Solution destination; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "brute")]
        solver: SolverKind,
        /// Candidate pre-sort applied before searching
        #[arg(long, value_enum)]
        sort: Option<SortOrder>,
        /// Randomized search: iteration budget
        #[arg(long, default_value_t = 10_000)]
        tries: u32,
        /// Randomized search: stagnation threshold before restarts
        #[arg(long, default_value_t = 100)]
        i_max: u32,
        /// Randomized search: probability of continuing the current permutation
        #[arg(long, default_value_t = 0.2)]
        prob: f64,
        /// Randomized search: wall-clock budget in milliseconds
        #[arg(long, default_value_t = 500)]
        timeout_ms: u64,
        /// Fixed RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Greedy: retry with the randomized solver on a dead-end
        #[arg(long)]
        fallback_random: bool,
        /// Scan with true triangle containment instead of the fast
        /// boundary heuristic
        #[arg(long)]
        exhaustive_triangles: bool,
    },
    /// Generate a random problem file
    Gen {
        #[arg(long)]
        out: PathBuf,
        /// Number of opponents; random 3..=8 when omitted
        #[arg(long)]
        opponents: Option<usize>,
        #[arg(long, value_enum, default_value = "basic")]
        variant: gen::Variant,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let run = match cmd.action {
        Action::Solve {
            input,
            out,
            solver,
            sort,
            tries,
            i_max,
            prob,
            timeout_ms,
            seed,
            fallback_random,
            exhaustive_triangles,
        } => solve(SolveArgs {
            input,
            out,
            solver,
            sort,
            tries,
            i_max,
            prob,
            timeout_ms,
            seed,
            fallback_random,
            exhaustive_triangles,
        }),
        Action::Gen {
            out,
            opponents,
            variant,
            seed,
        } => generate(out, opponents, variant, seed).map(|()| ExitCode::SUCCESS),
    };
    match run {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("aborting: {err:#}");
            ExitCode::from(EXIT_INVALID)
        }
    }
}

struct SolveArgs {
    input: PathBuf,
    out: Option<PathBuf>,
    solver: SolverKind,
    sort: Option<SortOrder>,
    tries: u32,
    i_max: u32,
    prob: f64,
    timeout_ms: u64,
    seed: Option<u64>,
    fallback_random: bool,
    exhaustive_triangles: bool,
}

fn solve(args: SolveArgs) -> Result<ExitCode> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let file: format::ProblemFile =
        serde_json::from_str(&text).context("malformed problem file")?;
    let problem = file.to_problem()?;

    let build_cfg = BuildCfg {
        exhaustive_containment: args.exhaustive_triangles,
    };
    let graph = build(&problem, &build_cfg)?;
    tracing::info!(
        candidates = graph.candidates.len(),
        shots = graph.nb_shots,
        "graph ready"
    );

    let compare: Option<CompareFn> = args.sort.map(|order| match order {
        SortOrder::DegreeDesc => by_degree_desc as CompareFn,
        SortOrder::DegreeAsc => by_degree_asc as CompareFn,
    });
    let cfg = SolverCfg {
        compare,
        tries: args.tries,
        i_max: args.i_max,
        prob: args.prob,
        timeout: Duration::from_millis(args.timeout_ms),
        perm: None,
        seed: args.seed,
        fallback_to_random: args.fallback_random,
    };
    let solver: &dyn Solver = match args.solver {
        SolverKind::Brute => &BruteForceSolver,
        SolverKind::Greedy => &GreedySolver,
        SolverKind::Random => &RandomSolver,
    };

    match solver.solve(&graph, &cfg) {
        Some(defenders) => {
            tracing::info!(size = defenders.len(), "solution found");
            let solution = format::SolutionFile::from_defenders(&defenders, problem.robot_radius);
            let body = serde_json::to_string_pretty(&solution)?;
            match &args.out {
                Some(path) => std::fs::write(path, body)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{body}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            tracing::warn!("no dominating set found; try another solver or relax constraints");
            Ok(ExitCode::from(EXIT_NO_SOLUTION))
        }
    }
}

fn generate(
    out: PathBuf,
    opponents: Option<usize>,
    variant: gen::Variant,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let file = gen::generate(variant, opponents, &mut rng);
    let body = serde_json::to_string_pretty(&file)?;
    std::fs::write(&out, body).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(path = %out.display(), "problem written");
    Ok(())
}
