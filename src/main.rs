//! Sens Doctor - A/B sensitivity questionnaire
//!
//! Single-session terminal front end: setup comes from flags, rounds are
//! answered with single keypresses, and finished sessions are appended to a
//! text log.

use clap::{Parser, ValueEnum};
use sens_doctor::cli::{summary_lines, Display, InputHandler};
use sens_doctor::report::{ResultLog, DEFAULT_LOG_FILE};
use sens_doctor::session::{EnvInfo, Phase, RoundMode, Session, SessionSetup, DPI_RANGE};
use sens_doctor::tuning::{Choice, GameTable, Style};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    Low,
    Mid,
    High,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Low => Style::Low,
            StyleArg::Mid => Style::Mid,
            StyleArg::High => Style::High,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// 5 rounds
    Quick,
    /// 6 rounds
    Balanced,
    /// 7 rounds
    Thorough,
}

impl From<ModeArg> for RoundMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Quick => RoundMode::Quick,
            ModeArg::Balanced => RoundMode::Balanced,
            ModeArg::Thorough => RoundMode::Thorough,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sens-doctor")]
#[command(about = "Find a comfortable in-game mouse sensitivity with quick A/B tests")]
struct Args {
    /// Game name (matched case-insensitively against the game table)
    #[arg(short, long, default_value = "Valorant")]
    game: String,

    /// Mouse DPI used for the test
    #[arg(
        short,
        long,
        default_value = "800",
        value_parser = clap::value_parser!(u32)
            .range(i64::from(*DPI_RANGE.start())..=i64::from(*DPI_RANGE.end()))
    )]
    dpi: u32,

    /// Style you normally play
    #[arg(short, long, value_enum, default_value = "mid")]
    current: StyleArg,

    /// Style to tune toward (defaults to the current style; a different one forces 7 rounds)
    #[arg(short, long, value_enum)]
    target: Option<StyleArg>,

    /// Number of A/B rounds
    #[arg(short, long, value_enum, default_value = "quick")]
    mode: ModeArg,

    /// Room temperature, e.g. "24.5C"
    #[arg(long)]
    temp: Option<String>,

    /// Humidity, e.g. "50%"
    #[arg(long)]
    humid: Option<String>,

    /// Weather, e.g. "sunny"
    #[arg(long)]
    weather: Option<String>,

    /// Time of day, e.g. "evening"
    #[arg(long)]
    timeband: Option<String>,

    /// Free-form note (hand condition, mouse pad, ...)
    #[arg(long)]
    note: Option<String>,

    /// Record the environment section even when no field is given
    #[arg(long)]
    record_env: bool,

    /// Path to a JSON game table (built-in table if missing)
    #[arg(long, default_value = "data/games.json")]
    games_file: PathBuf,

    /// List known games and exit
    #[arg(long)]
    list_games: bool,

    /// Result log file
    #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Do not write the result log
    #[arg(long)]
    no_log: bool,

    /// Answer all rounds up front (e.g. "ABMAB") instead of interactively
    #[arg(short, long)]
    answers: Option<String>,
}

impl Args {
    fn env_info(&self) -> Option<EnvInfo> {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        let env = EnvInfo {
            temperature: field(&self.temp),
            humidity: field(&self.humid),
            weather: field(&self.weather),
            time_band: field(&self.timeband),
            note: field(&self.note),
        };
        (self.record_env || env.has_any()).then_some(env)
    }

    fn setup(&self) -> SessionSetup {
        let current_style = Style::from(self.current);
        SessionSetup {
            game: self.game.clone(),
            dpi: self.dpi,
            current_style,
            target_style: self.target.map(Style::from).unwrap_or(current_style),
            mode: self.mode.into(),
            env: self.env_info(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse "ABMAB" / "a b n" style answers
fn parse_answers(answers: &str) -> Result<Vec<Choice>, Box<dyn Error>> {
    answers
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            Choice::from_char(c).ok_or_else(|| -> Box<dyn Error> {
                format!("Invalid answer {:?} (use A, B or M)", c).into()
            })
        })
        .collect()
}

/// Log a finished session; failures become a status message and never abort.
/// Nothing is written to stderr here, the alternate screen may be active.
fn persist(log: Option<&ResultLog>, session: &mut Session) -> Option<(bool, String)> {
    let log = log?;
    match log.record(session) {
        Ok(true) => Some((true, format!("Result saved to {}", log.path().display()))),
        Ok(false) => Some((
            true,
            format!("Result already saved to {}", log.path().display()),
        )),
        Err(e) => Some((false, format!("⚠ Could not save result: {}", e))),
    }
}

/// Enter the alternate screen, then raw mode; the display restores the screen if raw mode fails
fn open_terminal<D>(
    open_display: impl FnOnce() -> io::Result<D>,
    enable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<D> {
    let display = open_display()?;
    enable_raw()?;
    Ok(display)
}

fn run_scripted(
    setup: SessionSetup,
    table: &GameTable,
    log: Option<&ResultLog>,
    answers: &str,
) -> Result<(), Box<dyn Error>> {
    let mut session = Session::start(setup, table)?;
    let choices = parse_answers(answers)?;
    if choices.len() != session.total_rounds() as usize {
        return Err(format!(
            "Expected {} answers, got {}",
            session.total_rounds(),
            choices.len()
        )
        .into());
    }

    for choice in choices {
        session.submit(choice)?;
    }

    let outcome = session.outcome()?;
    println!("🎯 Sensitivity test complete");
    for line in summary_lines(&session, &outcome) {
        println!("{}", line);
    }
    if let Some((ok, message)) = persist(log, &mut session) {
        if ok {
            println!("{}", message);
        } else {
            tracing::warn!(path = ?log.map(ResultLog::path), "could not save result");
            eprintln!("{}", message);
        }
    }
    Ok(())
}

fn run_interactive(
    setup: SessionSetup,
    table: &GameTable,
    log: Option<&ResultLog>,
) -> Result<(), Box<dyn Error>> {
    let mut session = Session::start(setup, table)?;

    let display = open_terminal(Display::alternate, InputHandler::enable_raw_mode)?;
    let input = InputHandler::new();

    let result = session_loop(&display, &input, &mut session, table, log);

    display.shutdown()?;
    result
}

fn session_loop(
    display: &Display,
    input: &InputHandler,
    session: &mut Session,
    table: &GameTable,
    log: Option<&ResultLog>,
) -> Result<(), Box<dyn Error>> {
    'session: loop {
        if session.phase() != Phase::Result {
            display.show_test(session)?;
            let key = input.wait_key()?;
            if InputHandler::is_exit(&key) {
                tracing::info!(round = session.round(), "session aborted");
                break 'session;
            }
            if let Some(choice) = InputHandler::to_choice(&key) {
                session.submit(choice)?;
            }
            continue;
        }

        let outcome = session.outcome()?;
        let mut row = display.show_result(session, &outcome)?;
        if let Some((ok, message)) = persist(log, session) {
            if !ok {
                tracing::debug!(%message, "result not saved");
            }
            display.show_log_status(row, ok, &message)?;
            row += 2;
        }
        display.show_help(row, "R to start over with the same setup  |  Q to quit")?;

        loop {
            let key = input.wait_key()?;
            if InputHandler::is_restart(&key) {
                *session = session.restart(table)?;
                continue 'session;
            }
            if InputHandler::is_quit(&key) {
                break 'session;
            }
        }
    }
    Ok(())
}

fn list_games(table: &GameTable) {
    for game in &table.games {
        let baseline = table.baseline(&game.name);
        println!(
            "{:<20} low {:>6.0}  mid {:>6.0}  high {:>6.0}  (matches: {})",
            game.name,
            baseline.low,
            baseline.mid,
            baseline.high,
            game.keywords.join(", ")
        );
    }
    println!("{:<20} mid {:.0}", "(anything else)", table.default_mid_edpi);
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    let table = GameTable::load(&args.games_file)?;
    if args.list_games {
        list_games(&table);
        return Ok(());
    }

    let log = (!args.no_log).then(|| ResultLog::new(args.log_file.clone()));
    let setup = args.setup();

    match &args.answers {
        Some(answers) => run_scripted(setup, &table, log.as_ref(), answers),
        None => run_interactive(setup, &table, log.as_ref()),
    }
}
