use clap::Parser;

mod commands;
mod output;
mod tty;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "elementary-init")]
#[command(version = VERSION)]
#[command(about = "Rename the Elementary Theme scaffold to a new theme identity")]
struct Cli {
    /// Only remove scaffold-only files (CI config, init script, templates, docs)
    #[arg(short = 'c', long)]
    clean: bool,
}

fn main() -> std::process::ExitCode {
    // Unknown arguments exit with a usage error before anything is touched.
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(|e| {
            elementary_init::Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        })
        .and_then(|root| {
            if cli.clean {
                commands::cleanup::run(&root)
            } else {
                commands::init::run(&root)
            }
        });

    let (response, exit_code) = output::envelope(result);
    if let Err(err) = output::print(&response) {
        eprintln!("{}", err.summary());
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
