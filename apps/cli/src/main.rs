mod args;
mod config;
mod dirs;

use std::io;
use std::net::SocketAddr;
use std::process::Command;

use app_api::{AppContext, expand_home_path};
use funnel_app::{AppPaths, AppState, ensure_app_data_dir};
use http_api::HttpState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let config = config::load_or_create().map_err(io::Error::other)?;
    if config.created {
        println!(
            "Created config at {} (default port {}, workbook {:?}).",
            config.paths.file.display(),
            config.config.port,
            config.config.workbook
        );
    }

    let data_dir = dirs::resolve_data_dir().map_err(io::Error::other)?;
    if data_dir.matched_existing {
        println!("Using existing data dir: {}", data_dir.dir.display());
    } else {
        println!("Using data dir: {}", data_dir.dir.display());
    }

    let port = args.port.unwrap_or(config.config.port);

    let paths = AppPaths::new(data_dir.dir.clone());
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;

    let workbook_dir = match &args.workbook_dir {
        Some(dir) => expand_home_path(dir),
        None => paths.workbook_dir.clone(),
    };
    println!(
        "Reading workbook {:?} from {}",
        config.config.workbook,
        workbook_dir.display()
    );

    let app_state = AppState::new(workbook_dir, config.config.workbook.clone());

    let context = AppContext {
        app_state,
        app_data_dir: data_dir.dir,
    };

    let state = HttpState::with_generated_token(context);
    let router = http_api::router(state);

    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    let url = format!("http://127.0.0.1:{actual_port}");

    if used_fallback {
        eprintln!("Configured port {port} was unavailable; using {actual_port} for this run.");
    }

    println!("Funnel Dash is running at {url}");
    println!("Press Ctrl+C to stop.");

    if !args.no_open {
        if let Err(err) = open_url(&url) {
            eprintln!("failed to open browser: {}", err);
        }
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

fn open_url(url: &str) -> io::Result<()> {
    let command = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    let status = Command::new(command).arg(url).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other("browser command failed"))
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        eprintln!("failed to listen for shutdown signal: {}", err);
    }
}
