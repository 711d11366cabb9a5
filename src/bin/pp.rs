extern crate periodpicker as lib;

use flexi_logger::{FileSpec, Logger};
use lib::config::Config;
use lib::dropdown::PredefinedOption;
use lib::events::Dispatcher;
use lib::field::{FieldEvent, FieldProps, PeriodField};
use lib::props;
use lib::ui::{App, Context};
use nix::sys::termios;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use toml::value::{Table, Value};
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pp",
    about = "Period picker - pick a date or a range of dates in the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "l", long = "locale", help = "locale tag, e.g. 'de' or 'en-gb'")]
    pub locale: Option<String>,

    #[structopt(long = "from", help = "start of the initial period (YYYY-MM-DD)")]
    pub from: Option<String>,

    #[structopt(long = "to", help = "end of the initial period (YYYY-MM-DD)")]
    pub to: Option<String>,

    #[structopt(long = "min-from", help = "first day of the 'overall' period")]
    pub min_from: Option<String>,

    #[structopt(long = "max-to", help = "last day of the 'overall' period")]
    pub max_to: Option<String>,

    #[structopt(short = "p", long = "placeholder", help = "text shown without a period")]
    pub placeholder: Option<String>,

    #[structopt(long = "pull-right", help = "align the dropdown to the right of the field")]
    pub pull_right: bool,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the initial period non-interactively"
    )]
    pub show: bool,

    #[structopt(
        short = "o",
        long = "option",
        help = "pick a predefined period (today, yesterday, last7days, last30days, thisMonth, lastMonth, overall) and print it"
    )]
    pub option: Option<PredefinedOption>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Command line values win over the config file.
    fn apply_to(&self, config: &mut Config) {
        if let Some(locale) = &self.locale {
            config.locale = locale.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = placeholder.clone();
        }
        if self.from.is_some() || self.to.is_some() {
            config.from = self.from.clone();
            config.to = self.to.clone();
        }
        if self.min_from.is_some() {
            config.min_from = self.min_from.clone();
        }
        if self.max_to.is_some() {
            config.max_to = self.max_to.clone();
        }

        if self.pull_right {
            let mut flags = Table::new();
            flags.insert("pull_right".to_owned(), Value::Boolean(true));
            config.dropdown = props::build_from(&config.dropdown).and(&flags).result();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    args.apply_to(&mut config);

    let today = chrono::Local::now().date_naive();
    let mut field = PeriodField::new(FieldProps::from(&config), today, config.hover_delay());

    if let Some(option) = args.option {
        match field.pick(option) {
            Some(FieldEvent::Change { from, to }) => println!("{} {}", from, to),
            None => log::warn!("option '{}' is not available", option),
        }
        return Ok(());
    }

    if args.show {
        println!("{}", field.toggle_text());
        return Ok(());
    }

    const STDOUT: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDOUT)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDOUT, termios::SetArg::TCSANOW, &attr);
        }

        println!("The period picker ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    let mut app = App::new(Context::new(field, today));
    {
        // Setup unsegen terminal
        let stdout = stdout();
        let term = Terminal::new(stdout.lock())?;
        app.run(dispatcher, term)?;
    }

    if let Some(FieldEvent::Change { from, to }) = app.context().last_change() {
        println!("{} {}", from, to);
    }

    Ok(())
}
