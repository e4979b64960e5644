use tracing::info;

use roomcheck::command::{self, USAGE};
use roomcheck::config::Config;
use roomcheck::ingest::Snapshot;
use roomcheck::observability::{status_label, QUERIES_TOTAL};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = Config::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmd = match command::parse_args(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{USAGE}");
            return Err(e.into());
        }
    };

    info!("snapshot: {}", config.snapshot_path.display());
    info!("malformed dates: {:?}", config.malformed_dates);
    let snapshot = Snapshot::load(&config.snapshot_path, &config)?;

    let today = chrono::Local::now().date_naive();
    let result = command::execute(&cmd, &snapshot, today);
    metrics::counter!(
        QUERIES_TOTAL,
        "command" => cmd.label(),
        "status" => status_label(&result)
    )
    .increment(1);

    println!("{}", serde_json::to_string_pretty(&result?)?);
    Ok(())
}
