use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use forkjoin_bfs::{build_graph, Algorithm, Graph, RunConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "forkjoin-bfs workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the criterion benchmarks and summarize them
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
    /// Run every algorithm of a JSON run config, check it against the sequential
    /// baseline and write timings as JSON
    Report {
        /// Path to the run config
        #[arg(long)]
        config: PathBuf,

        /// Where to write the report
        #[arg(long, default_value = "benchmark_results/bfs_report.json")]
        out: PathBuf,
    },
}

const BENCHES: &[&str] = &["bfs_benchmark", "primitives_benchmark"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_bench_report()?;
        }
        Commands::Report { config, out } => run_report(&config, &out)?,
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running benchmarks...");

    // Build first to avoid measuring build time
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--benches", "--release"])
        .status()?;
    if !status.success() {
        bail!("Failed to compile benchmarks");
    }

    for bench in BENCHES {
        println!("\n>>> {bench}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.arg("bench").arg("--bench").arg(bench);

        // Args for the test runner (Criterion) go after --
        cmd.arg("--");
        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to run bench {bench}"))?;

        if status.success() {
            println!("Finished {bench} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: benchmark {bench} failed");
        }
    }

    Ok(())
}

fn generate_bench_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = BTreeMap::new();
    collect_results(criterion_dir, criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::fmt::Write;
    let mut report = String::from("# Benchmark Report\n\n| Benchmark | Mean |\n|---|---|\n");
    for (name, time_ns) in &results {
        writeln!(report, "| {name} | {} |", format_nanos(*time_ns))?;
    }
    fs::write(report_path, report)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_nanos(ns: f64) -> String {
    if ns > 1e9 {
        format!("{:.2} s", ns / 1e9)
    } else if ns > 1e6 {
        format!("{:.2} ms", ns / 1e6)
    } else if ns > 1e3 {
        format!("{:.2} µs", ns / 1e3)
    } else {
        format!("{ns:.0} ns")
    }
}

/// Collects `.../<benchmark>/new/estimates.json` mean times keyed by benchmark path.
fn collect_results(root: &Path, dir: &Path, results: &mut BTreeMap<String, f64>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) != Some("report") {
                collect_results(root, &path, results);
            }
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }
        let Some(run_dir) = path.parent() else { continue };
        if run_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }
        let Some(bench_dir) = run_dir.parent() else { continue };
        let Ok(name) = bench_dir.strip_prefix(root) else { continue };

        let mean = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|json| json.get("mean")?.get("point_estimate")?.as_f64());
        if let Some(time_ns) = mean {
            results.insert(name.display().to_string(), time_ns);
        }
    }
}

#[derive(Serialize)]
struct AlgorithmRun {
    algorithm: String,
    start: usize,
    /// Pool and scratch construction, shared by every start of this algorithm.
    setup_millis: f64,
    /// The traversal alone.
    millis: f64,
    matches_sequential: bool,
    reached: usize,
    max_distance: i32,
}

#[derive(Serialize)]
struct RunReport {
    nodes: usize,
    edges: usize,
    build_millis: f64,
    runs: Vec<AlgorithmRun>,
}

fn run_report(config_path: &Path, out: &Path) -> Result<()> {
    let json = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = RunConfig::from_json_str(&json)
        .with_context(|| format!("Invalid run config {}", config_path.display()))?;

    let built = Instant::now();
    let graph = build_graph(&config.graph).context("Failed to build graph")?;
    let build_millis = built.elapsed().as_secs_f64() * 1e3;
    println!(
        "Graph: {} nodes, {} edges (built in {build_millis:.1} ms)",
        graph.node_count(),
        graph.edge_count()
    );

    let mut baselines = Vec::with_capacity(config.starts.len());
    for &start in &config.starts {
        let expected = Algorithm::Sequential
            .run(start, &graph)
            .with_context(|| format!("Sequential baseline failed from {start}"))?;
        baselines.push((start, expected));
    }

    let mut runs = Vec::new();
    for algorithm in &config.algorithms {
        let timer = Instant::now();
        let mut prepared = algorithm
            .prepare(&graph)
            .with_context(|| format!("Failed to set up {algorithm}"))?;
        let setup_millis = timer.elapsed().as_secs_f64() * 1e3;
        println!("{algorithm:<36} setup {setup_millis:>10.2} ms");

        for (start, expected) in &baselines {
            let start = *start;
            let timer = Instant::now();
            let result = prepared
                .run(start, &graph)
                .with_context(|| format!("{algorithm} failed from {start}"))?;
            let millis = timer.elapsed().as_secs_f64() * 1e3;

            let matches_sequential = &result == expected;
            if !matches_sequential {
                eprintln!("Warning: {algorithm} from {start} disagrees with the sequential baseline");
            }
            println!("{algorithm:<36} start={start:<8} {millis:>10.2} ms");

            runs.push(AlgorithmRun {
                algorithm: algorithm.to_string(),
                start,
                setup_millis,
                millis,
                matches_sequential,
                reached: result.iter().filter(|&&d| d >= 0).count(),
                max_distance: result.iter().copied().max().unwrap_or(-1),
            });
        }
    }

    let report = RunReport {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        build_millis,
        runs,
    };

    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Report written to {}", out.display());

    if report.runs.iter().any(|r| !r.matches_sequential) {
        bail!("some runs disagree with the sequential baseline");
    }
    Ok(())
}
