//! ImageClass CLI - serve the gateway or classify images from the shell
//!
//! ```bash
//! imageclass serve                    # Start HTTP gateway (port 5000)
//! imageclass classify photo.jpg       # Classify one image
//! imageclass health                   # Check the prediction service
//! ```

use clap::{Parser, Subcommand};
use imageclass::{GatewayConfig, ImageUpload, PredictResponse, PredictionClient};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "imageclass")]
#[command(about = "Classify images with a remote prediction model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP gateway
    Serve {
        /// Port to listen on (default: IMAGECLASS_PORT or 5000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Upload an image and print the prediction
    Classify {
        /// Image file (png, jpg, jpeg, gif, bmp, webp)
        input: PathBuf,

        /// Prediction service URL (default: IMAGECLASS_UPSTREAM_URL)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show prediction service health
    Health {
        /// Prediction service URL (default: IMAGECLASS_UPSTREAM_URL)
        #[arg(short, long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    colog::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Classify { input, url } => cmd_classify(&input, url).await,
        Commands::Health { url } => cmd_health(url).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    imageclass::server::serve_from_env(port).await?;
    Ok(())
}

async fn cmd_classify(input: &Path, url: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = with_url(GatewayConfig::from_env()?, url);
    eprintln!("📄 Classifying: {}", input.display());

    let upload = ImageUpload::from_path(input, config.max_upload_bytes).await?;
    let client = PredictionClient::new(&config.upstream_url);
    let reply = client.predict(&upload).await?;

    if !reply.body.success {
        let message = reply.body.error.unwrap_or_else(|| "Prediction failed".to_string());
        return Err(format!("{} (status {})", message, reply.status).into());
    }

    print!("{}", format_prediction(&reply.body.ranked(config.top_k)));
    Ok(())
}

/// Render a successful prediction the way `classify` prints it.
fn format_prediction(body: &PredictResponse) -> String {
    let mut out = format!(
        "This image is most likely a: {}\nConfidence: {:.2}%\n",
        body.prediction.as_deref().unwrap_or("unknown"),
        body.confidence.unwrap_or_default()
    );
    for (rank, score) in body.all_predictions.iter().enumerate() {
        out.push_str(&format!("  {}. {:<12} {:.1}%\n", rank + 1, score.class, score.confidence));
    }
    out
}

async fn cmd_health(url: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = with_url(GatewayConfig::from_env()?, url);
    let client = PredictionClient::new(&config.upstream_url);

    let status = client.health().await?;
    if status.is_healthy() {
        println!("✅ {}: {}", client.base_url(), status.model_status);
        Ok(())
    } else {
        Err(format!("{}: {}", client.base_url(), status.model_status).into())
    }
}

fn with_url(config: GatewayConfig, url: Option<String>) -> GatewayConfig {
    match url {
        Some(url) => config.with_upstream(&url),
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageclass::ClassScore;

    #[test]
    fn test_format_prediction() {
        let body = PredictResponse {
            success: true,
            prediction: Some("cat".to_string()),
            confidence: Some(97.3456),
            all_predictions: vec![
                ClassScore { class: "cat".to_string(), confidence: 97.3456 },
                ClassScore { class: "dog".to_string(), confidence: 2.04 },
            ],
            error: None,
        };

        let text = format_prediction(&body);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "This image is most likely a: cat");
        assert_eq!(lines[1], "Confidence: 97.35%");
        assert_eq!(lines[2], "  1. cat          97.3%");
        assert_eq!(lines[3], "  2. dog          2.0%");
        assert_eq!(lines.len(), 4);
    }
}
