use crate::api;
use crate::store::ContactBook;
use crate::types::ApiResponse;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name="garimpo", version, about="Contact extraction from rendered pages (JSON only)")]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a rendered HTML document for Brazilian contact data
    Scan(ScanArgs),
    #[command(subcommand)]
    Contacts(ContactsCmd),
    #[command(subcommand)]
    Session(SessionCmd),
    /// Read the activity log
    Logs(LogsArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Path to a rendered HTML file, or "-" for stdin
    file: String,
    /// Source URL recorded on extracted contacts
    #[arg(long, default_value = "about:blank")]
    url: String,
    /// Collect the scanned records into the local contact store
    #[arg(long)]
    collect: bool,
}

#[derive(Subcommand)]
enum ContactsCmd {
    /// List the stored contacts
    List,
    /// Remove every stored contact
    Clear {
        #[arg(long = "yes")]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SessionCmd {
    /// Show the saved session snapshot
    Read,
    /// Drop the saved session snapshot
    Clear,
}

#[derive(Args)]
struct LogsArgs {
    /// Only show error entries
    #[arg(long)]
    errors: bool,
}

pub fn run() {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Scan(args) => scan_cmd(args),
        Command::Contacts(cc) => contacts_cmd(cc),
        Command::Session(sc) => session_cmd(sc),
        Command::Logs(args) => {
            finish(
                crate::log::ActivityLogger::new().and_then(|logger| logger.read_logs(None, args.errors)),
            );
        }
    }
}

fn scan_cmd(args: ScanArgs) {
    use std::io::Read;
    let html = if args.file == "-" {
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            return print_json(ApiResponse::<()>::err(format!("cannot read stdin: {e}")));
        }
        buf
    } else {
        match std::fs::read_to_string(&args.file) {
            Ok(s) => s,
            Err(e) => {
                return print_json(ApiResponse::<()>::err(format!(
                    "cannot read {}: {e}",
                    args.file
                )))
            }
        }
    };

    if args.collect {
        let mut book = match ContactBook::open(&args.url) {
            Ok(b) => b,
            Err(e) => return print_json(ApiResponse::<()>::err(e.to_string())),
        };
        finish(api::scan_into(&mut book, &html).map(|accepted| {
            serde_json::json!({ "accepted": accepted, "total": book.count() })
        }));
    } else {
        finish(api::scan_html(&html, &args.url));
    }
}

fn contacts_cmd(cc: ContactsCmd) {
    let mut book = match ContactBook::open("about:blank") {
        Ok(b) => b,
        Err(e) => return print_json(ApiResponse::<()>::err(e.to_string())),
    };
    match cc {
        ContactsCmd::List => print_json(ApiResponse::ok(book.get_all())),
        ContactsCmd::Clear { yes } => {
            if !yes {
                return print_json(ApiResponse::<()>::err("refusing to clear without --yes"));
            }
            let cleared = book.count();
            book.clear();
            print_json(ApiResponse::ok(serde_json::json!({ "cleared": cleared })));
        }
    }
}

fn session_cmd(sc: SessionCmd) {
    let book = match ContactBook::open("about:blank") {
        Ok(b) => b,
        Err(e) => return print_json(ApiResponse::<()>::err(e.to_string())),
    };
    match sc {
        SessionCmd::Read => match book.load_session() {
            Some(snapshot) => print_json(ApiResponse::ok(snapshot)),
            None => print_json(ApiResponse::<()>::err("no saved session")),
        },
        SessionCmd::Clear => {
            finish(book.clear_session().map(|_| serde_json::json!({ "cleared": true })))
        }
    }
}

fn finish<T: serde::Serialize>(res: crate::Result<T>) {
    match res {
        Ok(v) => print_json(ApiResponse::ok(v)),
        Err(e) => print_json(ApiResponse::<()>::err(e.to_string())),
    }
}
fn print_json<T: serde::Serialize>(val: T) {
    // pretty JSON output
    println!("{}", serde_json::to_string_pretty(&val).unwrap());
}
