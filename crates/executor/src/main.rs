pub mod config;
pub mod csv_streamer;
pub mod error;
pub mod loader;
pub mod producer;
pub mod searcher;
pub mod simulator;
pub mod stdin_streamer;
pub mod types;
pub mod writer;

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, mpsc::Receiver, mpsc::Sender};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use csv_streamer::CsvStreamer;
use error::Error;
use periodic_path_core::{PeriodicGraph, TimeExpandedDijkstra};
use producer::Producer;
use searcher::QueryRunner;
use simulator::SimulatorStreamer;
use stdin_streamer::StdinStreamer;
use types::{DataSource, JoinHandleResult, QueryOutcome, QueryRequest};
use writer::ResultWriter;

/// Overrides the configuration file location.
const CONFIG_PATH_VAR: &str = "EXECUTOR_CONFIG";

#[tokio::main]
async fn main() {
    let (graph_path, source) = parse_args();

    let config_path = env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(config::DEFAULT_CONFIG_PATH));

    let config = match config::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config);

    if let Err(e) = run(&graph_path, source, config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Parse command-line arguments into the graph path and query source
fn parse_args() -> (PathBuf, DataSource) {
    let args: Vec<String> = env::args().collect();

    let program = args.first().map(String::as_str).unwrap_or("executor");

    let Some(graph_path) = args.get(1) else {
        usage(program)
    };

    let source = args
        .get(2)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "stdin".to_string());

    let source = match source.as_str() {
        "stdin" => DataSource::STDIN,
        "sim" => DataSource::SIM,
        "csv" => match args.get(3) {
            Some(path) => DataSource::CSV(PathBuf::from(path)),
            None => usage(program),
        },
        _ => usage(program),
    };

    (PathBuf::from(graph_path), source)
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <graph_file> [STDIN|CSV|SIM] [path_to_csv]\n  - STDIN: read `start end` queries from standard input (default)\n  - CSV: read queries from a CSV file with start,end columns\n  - SIM: answer randomly generated queries",
        program
    );
    std::process::exit(1);
}

/// Logs go to stderr; stdout carries query results only.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(graph_path: &Path, source: DataSource, config: Config) -> Result<(), Error> {
    let graph = Arc::new(loader::load_graph_file(graph_path)?);

    let (query_sender, query_receiver) = mpsc::channel::<Vec<QueryRequest>>(config.executor.buffer_size);
    let (outcome_sender, outcome_receiver) =
        mpsc::channel::<Vec<QueryOutcome>>(config.executor.buffer_size);

    // Spawn tasks
    let producer_handle = spawn_producer(&source, query_sender, &config, graph.num_vertices());
    let runner_handle = spawn_runner(graph, query_receiver, outcome_sender);

    let stdout = std::io::stdout();
    let writer = ResultWriter::new(stdout.lock(), config.output.clone(), outcome_receiver);
    let summary = writer.process_outcomes().await;

    let producer_result = producer_handle.await?;
    let runner_result = runner_handle.await?;
    let summary = summary?;
    producer_result?;
    runner_result?;

    info!(
        found = summary.found,
        missing = summary.missing,
        failed = summary.failed,
        "Pipeline shut down."
    );
    Ok(())
}

pub fn spawn_producer(
    source: &DataSource,
    sender: Sender<Vec<QueryRequest>>,
    config: &Config,
    num_vertices: usize,
) -> JoinHandleResult {
    let batch_size = config.producer.batch_size;
    match source {
        DataSource::STDIN => {
            info!("Starting StdinStreamer producer task...");
            Producer::new(StdinStreamer::stdin(batch_size)).spawn(sender)
        }
        DataSource::CSV(path) => {
            info!("Starting CsvStreamer producer task...");
            Producer::new(CsvStreamer::new(path.clone(), batch_size)).spawn(sender)
        }
        DataSource::SIM => {
            info!("Starting SimulatorStreamer producer task...");
            let streamer = SimulatorStreamer::new(&config.simulator, num_vertices, batch_size);
            Producer::new(streamer).spawn(sender)
        }
    }
}

/// Spawn query runner task
fn spawn_runner(
    graph: Arc<PeriodicGraph>,
    receiver: Receiver<Vec<QueryRequest>>,
    sender: Sender<Vec<QueryOutcome>>,
) -> JoinHandleResult {
    let runner = QueryRunner::new(graph, TimeExpandedDijkstra, receiver, sender);
    tokio::spawn(runner.run_queries())
}
