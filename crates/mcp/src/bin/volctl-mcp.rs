// volctl-mcp: system volume control served over MCP on stdio.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use volctl_core::{system_mixer, FakeMixer, Mixer, VolumeController};
use volctl_mcp::resources::ResourceRegistry;
use volctl_mcp::server::McpServer;
use volctl_mcp::tools::{
    ApplyPresetTool, GetVolumeTool, MuteTool, SetVolumeTool, ToggleMuteTool, ToolRegistry,
    UnmuteTool,
};

#[derive(Parser, Debug)]
#[command(name = "volctl-mcp")]
#[command(about = "Windows system-volume control over MCP (stdio)", long_about = None)]
struct Args {
    /// Mixer backend to drive
    #[arg(long, value_enum, env = "VOLCTL_MIXER", default_value = "system")]
    mixer: MixerKind,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "VOLCTL_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MixerKind {
    /// Default OS render endpoint
    System,
    /// In-memory mixer, for development off-Windows
    Fake,
}

// The COM apartment belongs to the thread that initialized it, so the
// whole server stays on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Stdout is the protocol channel; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mixer: Box<dyn Mixer> = match args.mixer {
        MixerKind::System => {
            system_mixer().context("failed to open the system audio endpoint")?
        }
        MixerKind::Fake => {
            tracing::info!("using the in-memory fake mixer");
            Box::new(FakeMixer::default())
        }
    };

    let controller = Arc::new(VolumeController::new(mixer));

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(GetVolumeTool::new(controller.clone())))?;
    tools.register(Arc::new(SetVolumeTool::new(controller.clone())))?;
    tools.register(Arc::new(MuteTool::new(controller.clone())))?;
    tools.register(Arc::new(UnmuteTool::new(controller.clone())))?;
    tools.register(Arc::new(ToggleMuteTool::new(controller.clone())))?;
    tools.register(Arc::new(ApplyPresetTool::new(controller.clone())))?;

    let resources = ResourceRegistry::new(controller);

    tracing::info!(tools = tools.len(), "volctl MCP server starting");

    let server = McpServer::new(tools, resources);
    server.run().await
}
