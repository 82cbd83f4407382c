use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use glimpse_client::capture::{RECORD_WINDOW, capture_frame};
use glimpse_client::device::{CameraTrack, MicrophoneTrack};
use glimpse_client::{
    AnalysisClient, AnalysisResult, Config, LiveCapture, Orchestrator, SessionStatus,
    StreamManager,
};

/// Glimpse - multimodal capture and analysis client for AI assistants
#[derive(Parser)]
#[command(name = "glimpse", version, about)]
struct Cli {
    /// Analysis service endpoint (e.g. "http://localhost:8000/analyze")
    #[arg(short, long, env = "GLIMPSE_ENDPOINT")]
    endpoint: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture one frame and one audio clip and ask the analysis service
    Analyze {
        /// What you are trying to accomplish
        intent: String,
    },
    /// Test microphone input
    TestMic,
    /// Test camera capture
    TestCamera,
    /// Check the analysis service health endpoint
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,glimpse_client=info",
        1 => "info,glimpse_client=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_with_endpoint(cli.endpoint.as_deref())?;

    match cli.command {
        Command::Analyze { intent } => cmd_analyze(&config, &intent).await,
        Command::TestMic => cmd_test_mic().await,
        Command::TestCamera => cmd_test_camera(&config),
        Command::Health => cmd_health(&config).await,
    }
}

/// Run one capture-and-query cycle and render the answer
#[allow(clippy::future_not_send)]
async fn cmd_analyze(config: &Config, intent: &str) -> anyhow::Result<()> {
    println!("Acquiring camera and microphone...");
    let stream = StreamManager::acquire(config)?;

    // Let the stream decode its first frames before capturing.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let orchestrator = Orchestrator::new(
        Box::new(LiveCapture::new(stream)),
        Box::new(AnalysisClient::new(&config.endpoint)),
    );

    let mut status_rx = orchestrator.watch_status();
    let narrate = async {
        loop {
            if status_rx.changed().await.is_err() {
                break;
            }
            match *status_rx.borrow() {
                SessionStatus::Observing => println!("observing..."),
                SessionStatus::Thinking => println!("thinking..."),
                SessionStatus::Idle | SessionStatus::Result => {}
            }
        }
    };

    tokio::select! {
        () = orchestrator.analyze(intent) => {}
        () = narrate => {}
    }

    match orchestrator.result() {
        Some(result) => {
            render_result(&result);
            Ok(())
        }
        None => {
            let message = orchestrator
                .error()
                .unwrap_or_else(|| "analysis failed".to_string());
            anyhow::bail!(message)
        }
    }
}

/// Render the structured answer as a console insight card
fn render_result(result: &AnalysisResult) {
    if result.intervention_needed {
        let confidence = (result.confidence * 100.0).round();
        println!("\n--- Insight ({confidence:.0}% confident) ---");
        println!("Goal detected:    {}", result.inferred_goal);
        println!("Observation:      {}", result.insight);
        println!("Suggested action: {}", result.suggested_action);
        println!("Why it matters:   {}", result.why_it_matters);
    } else {
        println!("\nEverything looks good. No intervention needed.");
        if !result.why_it_matters.is_empty() {
            println!("note: {}", result.why_it_matters);
        }
    }
}

/// Record one fixed-window clip and report its levels
#[allow(clippy::future_not_send)]
async fn cmd_test_mic() -> anyhow::Result<()> {
    println!(
        "Recording a {}ms test clip... speak into your microphone!",
        RECORD_WINDOW.as_millis()
    );

    let track = MicrophoneTrack::open()?;
    let session = track.begin_capture()?;
    tokio::time::sleep(RECORD_WINDOW).await;
    let samples = session.finish()?;

    let energy = calculate_rms(&samples);
    let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let meter_len = (energy * 100.0).min(50.0) as usize;
    let meter: String = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

    println!("Samples: {} at {} Hz", samples.len(), track.sample_rate());
    println!("RMS: {energy:.4} | Peak: {peak:.4} | [{meter}]");

    if energy < 0.001 {
        println!("\nRMS stayed near 0. Check:");
        println!("  1. Is your mic plugged in?");
        println!("  2. Run: pactl info | grep 'Default Source'");
        println!("  3. Run: arecord -l (to list devices)");
    } else {
        println!("\nYour mic is working!");
    }

    Ok(())
}

/// Calculate RMS energy
#[allow(clippy::cast_precision_loss)]
fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Open the camera and capture one frame
fn cmd_test_camera(config: &Config) -> anyhow::Result<()> {
    println!("Opening camera {}...", config.camera.index);

    let camera = CameraTrack::open(config.camera)?;
    let (width, height) = camera.resolution();
    println!("Stream resolution: {width}x{height}");

    let stream = StreamManager::from_camera(camera);
    match capture_frame(&stream) {
        Ok(frame) => {
            let (w, h) = frame.dimensions();
            println!("Captured {}x{} JPEG, {} bytes", w, h, frame.data().len());
            println!("\nYour camera is working!");
        }
        Err(e) => {
            println!("Capture failed: {e}");
            println!("The stream may not have produced a frame yet - try again.");
        }
    }

    Ok(())
}

/// Probe the analysis service
async fn cmd_health(config: &Config) -> anyhow::Result<()> {
    let client = AnalysisClient::new(&config.endpoint);
    client.health().await?;
    println!("Analysis service is healthy: {}", client.endpoint());
    Ok(())
}
