use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use page_loader::{
    ConnectionErrorKind, EnvironmentErrorKind, HttpFetcher, PageLoaderBuilder, PageLoaderError,
};
use tracing_subscriber::EnvFilter;

/// Download a web page and save it locally with its images, styles and scripts.
#[derive(Parser, Debug)]
#[command(name = "page-loader", version)]
struct Args {
    /// Page address.
    url: String,

    /// Folder to save the page in. Defaults to the current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Give up on a request after this many seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let fetcher = match HttpFetcher::with_timeout(Duration::from_secs(args.timeout)) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("page-loader: {e}");
            return ExitCode::from(exit_code(&e));
        }
    };

    let builder = PageLoaderBuilder::new().fetcher(fetcher);
    let builder = match args.output {
        Some(dir) => builder.output_dir(dir),
        None => builder,
    };

    match builder.build().download(&args.url).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("page-loader: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &PageLoaderError) -> u8 {
    match err {
        PageLoaderError::Connection { kind, .. } => match kind {
            ConnectionErrorKind::BadUrl => 10,
            ConnectionErrorKind::BadResponse => 11,
            ConnectionErrorKind::Other => 19,
        },
        PageLoaderError::Environment { kind, .. } => match kind {
            EnvironmentErrorKind::NotFound => 20,
            EnvironmentErrorKind::NotWritable => 21,
        },
        PageLoaderError::Filesystem { source, .. } => {
            if source.kind() == std::io::ErrorKind::PermissionDenied {
                21
            } else {
                22
            }
        }
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_loader::FetchError;

    fn connection(kind: ConnectionErrorKind) -> PageLoaderError {
        PageLoaderError::Connection {
            kind,
            url: "http://a.test".into(),
            source: FetchError::Status {
                url: "http://a.test".into(),
                status: 500,
            },
        }
    }

    #[test]
    fn each_failure_class_has_its_own_code() {
        assert_eq!(exit_code(&connection(ConnectionErrorKind::BadUrl)), 10);
        assert_eq!(exit_code(&connection(ConnectionErrorKind::BadResponse)), 11);
        assert_eq!(exit_code(&connection(ConnectionErrorKind::Other)), 19);

        let missing = PageLoaderError::Environment {
            kind: EnvironmentErrorKind::NotFound,
            path: "missing".into(),
        };
        assert_eq!(exit_code(&missing), 20);

        let denied = PageLoaderError::Filesystem {
            path: "page.html".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(exit_code(&denied), 21);

        let full = PageLoaderError::Filesystem {
            path: "page.html".into(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(exit_code(&full), 22);

        assert_eq!(exit_code(&PageLoaderError::Config("bad".into())), 1);
    }

    #[test]
    fn parses_output_and_url() {
        let args = Args::parse_from(["page-loader", "-o", "/tmp/out", "hexlet.io/courses"]);
        assert_eq!(args.url, "hexlet.io/courses");
        assert_eq!(args.output, Some(PathBuf::from("/tmp/out")));
        assert_eq!(args.timeout, 30);
    }
}
