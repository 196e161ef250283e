use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, bail};
use clap::{Args, Parser, Subcommand};
use splashgen::{
    AnimationConfig, AppController, ConfigEdit, GenerationClient, GenerationStatus, Settings,
    config::{AnimationDuration, BackgroundAnimation, Color, LogoAnimation, TextAnimation},
    export::{CopyIndicator, SystemClipboard, copy_to_clipboard, to_file, to_integration_snippet},
    preview::RenderedPreview,
    prompt::build_prompt,
    sanitize::sanitize,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SNIPPET_FILE_NAME: &str = "AnimatedSplash.jsx";

#[derive(Parser, Debug)]
#[command(name = "splashgen", version, about = "Generate animated SVG splash screens")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an animation and export it.
    Generate(GenerateArgs),
    /// Print the request that would be sent for these options.
    Prompt(ConfigArgs),
    /// Strip code fences from a saved model answer.
    Sanitize {
        file: PathBuf,
    },
    /// Print a React component that embeds an SVG file.
    Snippet {
        file: PathBuf,
    },
    /// Print the JSON schema of configuration presets.
    Schema,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON preset, applied before the flags below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logo text.
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    logo_animation: Option<LogoAnimation>,

    #[arg(long)]
    text_animation: Option<TextAnimation>,

    #[arg(long)]
    background_animation: Option<BackgroundAnimation>,

    /// Loop length in seconds (1 to 10).
    #[arg(long)]
    duration: Option<AnimationDuration>,

    #[arg(long)]
    background_color: Option<Color>,

    #[arg(long)]
    primary_color: Option<Color>,

    #[arg(long)]
    secondary_color: Option<Color>,

    /// Request no background fill.
    #[arg(long, conflicts_with = "opaque")]
    transparent: bool,

    /// Request a solid background in `--background-color`.
    #[arg(long)]
    opaque: bool,
}

impl ConfigArgs {
    async fn resolve(&self) -> anyhow::Result<AnimationConfig> {
        let base = match &self.config {
            Some(path) => AnimationConfig::from_json_file(path)
                .await
                .with_context(|| format!("load preset '{}'", path.display()))?,
            None => AnimationConfig::default(),
        };

        let mut edits = Vec::new();
        if let Some(name) = &self.name {
            edits.push(ConfigEdit::LogoName(name.clone()));
        }
        if let Some(animation) = self.logo_animation {
            edits.push(ConfigEdit::LogoAnimation(animation));
        }
        if let Some(animation) = self.text_animation {
            edits.push(ConfigEdit::TextAnimation(animation));
        }
        if let Some(animation) = self.background_animation {
            edits.push(ConfigEdit::BackgroundAnimation(animation));
        }
        if let Some(duration) = self.duration {
            edits.push(ConfigEdit::Duration(duration));
        }
        if let Some(color) = &self.background_color {
            edits.push(ConfigEdit::BackgroundColor(color.clone()));
        }
        if let Some(color) = &self.primary_color {
            edits.push(ConfigEdit::PrimaryColor(color.clone()));
        }
        if let Some(color) = &self.secondary_color {
            edits.push(ConfigEdit::SecondaryColor(color.clone()));
        }
        if self.transparent {
            edits.push(ConfigEdit::Transparent(true));
        }
        if self.opaque {
            edits.push(ConfigEdit::Transparent(false));
        }

        Ok(base.with_edits(edits))
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Logo file (SVG, PNG or JPG). Its file name seeds the logo text unless `--name` is set.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Directory that receives splash-animation.svg.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Also write a React component next to the SVG.
    #[arg(long, default_value_t = false)]
    snippet: bool,

    /// Copy the SVG markup to the clipboard.
    #[arg(long, default_value_t = false)]
    copy: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("splashgen=info".parse()?)
                .add_directive("splashgen_model_provider=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args).await,
        Command::Prompt(args) => {
            let config = args.resolve().await?;
            println!("{}", build_prompt(&config));
            Ok(())
        }
        Command::Sanitize { file } => {
            let raw = read_text(&file).await?;
            println!("{}", sanitize(&raw));
            Ok(())
        }
        Command::Snippet { file } => {
            let markup = read_text(&file).await?;
            println!("{}", to_integration_snippet(&sanitize(&markup)));
            Ok(())
        }
        Command::Schema => {
            let schema = schemars::schema_for!(AnimationConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

async fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let config = args.config.resolve().await?;

    let client = GenerationClient::from_settings(&settings).await?;
    let controller = AppController::with_config(Arc::new(client), config);

    if let Some(path) = &args.logo {
        let seeded = controller
            .upload_logo_file(path)
            .await
            .with_context(|| format!("upload logo '{}'", path.display()))?;
        if let Some(name) = seeded {
            info!(name = %name, "Logo name taken from upload");
        }
        if let Some(name) = &args.config.name {
            controller.update(ConfigEdit::LogoName(name.clone()));
        }
    }

    let result = match controller.generate().await {
        GenerationStatus::Success(markup) => markup,
        GenerationStatus::Error(message) => bail!(message),
        other => bail!("Generation did not settle: {other:?}"),
    };

    let preview = RenderedPreview::render(&result);
    if let Some(root) = preview.root() {
        info!(
            view_box = root.view_box.as_deref().unwrap_or("none"),
            "Preview has an animatable root"
        );
    }

    let path = to_file(&result).save_into(&args.out).await?;
    println!("{}", path.display());

    if args.snippet {
        let snippet_path = args.out.join(SNIPPET_FILE_NAME);
        tokio::fs::write(&snippet_path, to_integration_snippet(&result))
            .await
            .with_context(|| format!("write snippet '{}'", snippet_path.display()))?;
        println!("{}", snippet_path.display());
    }

    if args.copy {
        let mut indicator = CopyIndicator::new();
        match copy_to_clipboard(&SystemClipboard, &result, &mut indicator).await {
            Ok(()) => eprintln!("{}", indicator.label()),
            Err(e) => warn!("SVG was saved but not copied: {e}"),
        }
    }

    Ok(())
}

async fn read_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read '{}'", path.display()))
}
