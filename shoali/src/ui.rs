//! Utilities for printing and everything related to "UI".

use std::{
    fmt::Display,
    io::{stdout, Write},
    time::{Duration, Instant},
};

use failure::{err_msg, Error};
use log::{Level, LevelFilter, Log, Metadata, Record};
use term_painter::{Color, Style, ToStyle};

macro_rules! print_msg {
    ($kind:ident: $icon:literal => $($args:tt)*) => {
        crate::ui::print_wrapped(crate::ui::MsgKind::$kind, $icon, &format!($($args)*))
    };
}

macro_rules! info {
    () => { info!("") };
    ($($t:tt)*) => {
        print_msg!(Info: 'i' => $($t)*)
    };
}

macro_rules! warn {
    () => { warn!("") };
    ($($t:tt)*) => {
        print_msg!(Warning: 'w' => $($t)*)
    };
}

macro_rules! error {
    () => { error!("") };
    ($($t:tt)*) => {
        print_msg!(Error: '!' => $($t)*)
    };
}

pub enum MsgKind {
    Error,
    Warning,
    Info,
    Debug,
    Progress,
}

impl MsgKind {
    pub fn icon_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::Red.bold(),
            MsgKind::Warning => Color::Yellow.bold(),
            MsgKind::Info => Color::Blue.bold(),
            MsgKind::Debug => Color::White.dim(),
            MsgKind::Progress => Color::Green.bold(),
        }
    }

    pub fn body_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::BrightRed.to_style(),
            MsgKind::Warning => Color::BrightYellow.to_style(),
            MsgKind::Info => Color::NotSet.to_style(),
            MsgKind::Debug => Color::White.dim(),
            MsgKind::Progress => Color::NotSet.to_style(),
        }
    }
}


/// Width available for message bodies: the terminal width (at most 100)
/// minus the icon column.
fn body_width() -> usize {
    let width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
    width.min(100).saturating_sub(7).max(20)
}

/// Splits `body` into lines of at most `width` characters, breaking at
/// whitespace. Words longer than `width` get a line of their own.
pub fn wrap(body: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in body.split_whitespace() {
        let len = current.chars().count();
        if len > 0 && len + 1 + word.chars().count() > width {
            lines.push(std::mem::replace(&mut current, String::new()));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);

    lines
}

/// Prints a message with an icon. Continuation lines are indented and
/// connected to the icon.
pub fn print_wrapped(kind: MsgKind, icon: char, body: &str) {
    let icon_style = kind.icon_style();
    let body_style = kind.body_style();

    let lines = wrap(body, body_width());
    for (i, line) in lines.iter().enumerate() {
        let prefix = match i {
            0 => format!("[{}] ", icon),
            _ if i == lines.len() - 1 => "    └ ".to_string(),
            _ => "    │ ".to_string(),
        };

        println!("{}{}", icon_style.paint(prefix), body_style.paint(line));
    }
}

/// Runs `f` while showing `msg` as a pending step. The line is completed
/// with the elapsed time once `f` returns.
pub fn progress<T>(msg: impl Display, f: impl FnOnce() -> T) -> T {
    let kind = MsgKind::Progress;
    print!("{} {} ... ", kind.icon_style().paint("[…]"), kind.body_style().paint(&msg));
    let _ = stdout().flush();

    let before = Instant::now();
    let out = f();
    let time = before.elapsed();

    println!(
        "\r{} {} ... {} (in {})",
        kind.icon_style().paint("[✓]"),
        kind.body_style().paint(&msg),
        kind.icon_style().paint("done"),
        fmt_duration(time),
    );
    out
}

/// Label for frame `frame` (0-based) of `frames`, e.g. `[ 3/12]`. Empty for
/// a single frame.
pub fn frame_label(frame: u32, frames: u32) -> String {
    if frames <= 1 {
        return String::new();
    }

    let digits = frames.to_string().len();
    format!("[{:>width$}/{}] ", frame + 1, frames, width = digits)
}

/// Formats a duration with a unit that fits its magnitude.
pub fn fmt_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else if secs >= 1e-3 {
        format!("{:.2}ms", secs * 1e3)
    } else {
        format!("{:.0}µs", secs * 1e6)
    }
}

/// Prints `e` and all its causes. The backtrace is printed if
/// `RUST_BACKTRACE=1`.
pub fn report_error(e: &Error) {
    error!("An error occured: {}", e);
    for cause in e.iter_causes() {
        error!("  ... caused by: {}", cause);
    }

    if std::env::var("RUST_BACKTRACE").map(|v| v == "1").unwrap_or(false) {
        error!();
        error!("{}", e.backtrace());
    }
}


/// Forwards log messages of the `shoal` library to our UI macros.
struct Logger;

static LOGGER: Logger = Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            Level::Error => error!("{}", record.args()),
            Level::Warn => warn!("{}", record.args()),
            Level::Info => info!("{}", record.args()),
            Level::Debug | Level::Trace => {
                print_msg!(Debug: '·' => "{}: {}", record.target(), record.args())
            }
        }
    }

    fn flush(&self) {}
}

/// Installs the logger. Without `-v` only warnings and errors are shown.
pub fn init_logger(verbosity: u64) -> Result<(), Error> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    log::set_logger(&LOGGER).map_err(|_| err_msg("logger was already initialized"))?;
    log::set_max_level(level);
    Ok(())
}

/// Formats the given integer with `,` as thousand separator.
pub fn fmt_with_thousand_sep(mut v: u64) -> String {
    let mut groups = Vec::new();
    loop {
        groups.push(v % 1000);
        v /= 1000;
        if v == 0 {
            break;
        }
    }

    let mut out = groups.pop().unwrap_or(0).to_string();
    for group in groups.iter().rev() {
        out += &format!(",{:03}", group);
    }

    out
}
