pub mod parser;
mod utils;

use anyhow::Error;
use app::{App, Route};
use clap::{App as Cli, Arg};
use config::Config;
use controller::Controller;
use http_api::HttpController;
use indicatif::ProgressBar;
use parser::Statement;
use rustyline::Editor;
use simplelog::{LevelFilter, SimpleLogger, TermLogger, TerminalMode};
use std::future::Future;

macro_rules! prompt {
    ($ed:ident, $route:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = format!("({}) {}", $route, PROMPT);

        match $ed.readline(&msg) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";
const URL_VAR: &str = "MOVIE_RATINGS_URL";

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    if TermLogger::init(level, simplelog::Config::default(), TerminalMode::Mixed).is_err() {
        let _ = SimpleLogger::init(level, simplelog::Config::default());
    }
}

fn load_config(path: Option<&str>, url: Option<&str>) -> Result<Config, Error> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Ok(url) = dotenv::var(URL_VAR) {
        config.api.base_url = url;
    }

    if let Some(url) = url {
        config.api.base_url = url.into();
    }

    Ok(config)
}

/// Runs a request with a spinner, giving up when CTRL-C is pressed
async fn in_flight<F, T>(task: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(80);

    let result = tokio::select! {
        result = task => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("Cancelled")),
    };

    spinner.finish_and_clear();
    result
}

async fn fill_and_submit<C: Controller>(app: &mut App<C>, rl: &mut Editor<()>) -> Result<(), Error> {
    let fields = app.fields();
    if fields.is_empty() {
        println!("Nothing to fill in {}", app.route());
        return Ok(());
    }

    for (label, value) in utils::build_prototype(rl, fields)? {
        app.fill(label, value)?;
    }

    in_flight(app.submit()).await
}

async fn execute<C: Controller>(
    app: &mut App<C>,
    rl: &mut Editor<()>,
    statement: Statement,
) -> Result<(), Error> {
    match statement {
        Statement::Goto(route) => {
            in_flight(async {
                app.navigate(route).await;
                Ok(())
            })
            .await
        }

        Statement::Click(name) => in_flight(app.click(&name)).await,
        Statement::Press(name) => in_flight(app.click_button(&name)).await,
        Statement::Type(label, text) => app.type_text(&label, &text),
        Statement::Select(label, value) => app.select_option(&label, &value),

        Statement::Rate(score) => {
            app.select_option("score", &score.to_string())?;
            in_flight(app.submit()).await
        }

        Statement::SignIn => {
            if app.route() != &Route::Login {
                in_flight(async {
                    app.navigate(Route::Login).await;
                    Ok(())
                })
                .await?;
            }

            fill_and_submit(app, rl).await
        }

        Statement::Fill => fill_and_submit(app, rl).await,

        Statement::Back => {
            in_flight(async {
                app.back().await;
                Ok(())
            })
            .await
        }

        Statement::Reload => {
            in_flight(async {
                app.reload().await;
                Ok(())
            })
            .await
        }

        Statement::Logout => {
            in_flight(async {
                app.logout().await;
                Ok(())
            })
            .await
        }
    }
}

fn print_help() {
    println!("Main help:");
    println!("h | help                       Shows this help");
    println!("q | quit                       Quit");
    println!("v | version                    Shows the version");
    println!("home | movies | login | ratings  Go to that page");
    println!("movie(<id>)                    Go to a movie");
    println!("goto('<path>')                 Go to a path, e.g. goto('/movies/1')");
    println!("click('<name>')                Click a button of the page, else a link");
    println!("press('<name>')                Press a button");
    println!("type('<label>', '<text>')      Type into a field");
    println!("select('<label>', '<value>')   Choose an option");
    println!("rate(<score>)                  Rate the current movie");
    println!("signin                         Log in");
    println!("fill                           Fill and submit the current form");
    println!("back | reload | logout");
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let matches = Cli::new("movie-ratings")
        .version(VERSION)
        .about("Browse and rate movies from the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("url")
                .short("u")
                .long("url")
                .value_name("URL")
                .help("Base URL of the ratings service")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging, repeat for debug output"),
        )
        .get_matches();

    init_logger(matches.occurrences_of("verbose"));
    let config = load_config(matches.value_of("config"), matches.value_of("url"))?;

    let controller = HttpController::with_config(&config.api)?;
    log::info!("Talking to {}", controller.base_url());
    let mut app = App::new(controller, config.app);
    let mut rl = Editor::<()>::new();

    println!("Welcome to movie-ratings {}", VERSION);
    println!("{}", app.screen());

    loop {
        let route = app.route().path();
        let opt: String = prompt!(rl, route)?;

        match opt.trim() {
            "?" | "h" | "help" => print_help(),

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(stmt) => match execute(&mut app, &mut rl, stmt).await {
                    Ok(()) => println!("{}", app.screen()),
                    Err(e) => println!("{}", e),
                },

                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/example.toml");

    #[test]
    fn url_overrides_in_order() -> Result<(), Error> {
        std::env::remove_var(URL_VAR);
        let config = load_config(Some(EXAMPLE), None)?;
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 5);

        std::env::set_var(URL_VAR, "http://ratings.test:8080");
        let config = load_config(Some(EXAMPLE), None)?;
        assert_eq!(config.api.base_url, "http://ratings.test:8080");
        assert_eq!(config.api.timeout_secs, 5);

        let config = load_config(Some(EXAMPLE), Some("http://127.0.0.1:4000"))?;
        assert_eq!(config.api.base_url, "http://127.0.0.1:4000");

        std::env::remove_var(URL_VAR);
        let config = load_config(None, None)?;
        assert_eq!(config.api.base_url, config::DEFAULT_BASE_URL);

        Ok(())
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(load_config(Some("no/such/config.toml"), None).is_err());
    }
}
