use todo_page::logging;
use todo_page::scenario::{Pacing, Scenario, ScenarioRunner};

use color_eyre::eyre::eyre;
use color_eyre::Result;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "usage: todo-page <scenario.json> [--realtime] [--html] [--verbose]";

struct Options {
    path: String,
    realtime: bool,
    html: bool,
    verbose: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options> {
    let mut path = None;
    let mut realtime = false;
    let mut html = false;
    let mut verbose = false;

    for arg in args {
        match arg.as_str() {
            "--realtime" => realtime = true,
            "--html" => html = true,
            "--verbose" | "-v" => verbose = true,
            flag if flag.starts_with('-') => return Err(eyre!("unknown flag {flag}\n{USAGE}")),
            _ if path.is_some() => return Err(eyre!("more than one scenario given\n{USAGE}")),
            _ => path = Some(arg),
        }
    }

    Ok(Options {
        path: path.ok_or_else(|| eyre!(USAGE))?,
        realtime,
        html,
        verbose,
    })
}

fn main() -> Result<()> {
    // Handle --version flag before any initialization
    if std::env::args().any(|arg| arg == "--version") {
        println!("todo-page {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;

    let options = parse_args(std::env::args().skip(1))?;
    logging::init(options.verbose);

    let scenario = Scenario::from_json_file(&options.path)?;
    let pacing = if options.realtime {
        Pacing::Realtime
    } else {
        Pacing::Virtual
    };

    // The page is single-threaded, so a current-thread runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let report = runtime.block_on(ScenarioRunner::new(pacing).run(&scenario))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if options.html {
        println!("{}", report.html);
    }
    Ok(())
}
