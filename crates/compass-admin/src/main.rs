//! `compass-admin` — command-line admin client for the Compass card server.
//!
//! # Usage
//!
//! ```
//! compass-admin --url http://localhost:8080 --user admin --password secret \
//!   --tenant biz_123 list
//! compass-admin --config ~/.config/compass/admin.toml --tenant biz_123 \
//!   move 42 0
//! ```

mod client;
mod ordering;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use client::{ApiClient, ApiConfig};
use compass_core::{
  TenantId,
  card::{Card, CardId, CardKind, CardPatch, NewCard},
};
use ordering::OrderingController;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "compass-admin", about = "Admin client for the Compass card server")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the compass server (default: http://localhost:8080).
  #[arg(long, env = "COMPASS_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "COMPASS_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "COMPASS_PASSWORD")]
  password: Option<String>,

  /// Tenant (business) identifier the command operates on.
  #[arg(short, long, env = "COMPASS_TENANT")]
  tenant: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List the tenant's cards in display order.
  List,

  /// Create a card, appended at the end of the list.
  Add {
    /// Card type: text, image, or video.
    #[arg(value_enum)]
    kind: CardKindArg,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    content: Option<String>,

    /// Media URL for image/video cards.
    #[arg(long)]
    media_url: Option<String>,
  },

  /// Update fields of an existing card.
  Edit {
    id: CardId,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    content: Option<String>,

    #[arg(long)]
    media_url: Option<String>,

    /// Clear the title instead of setting it.
    #[arg(long, conflicts_with = "title")]
    clear_title: bool,

    /// Clear the content instead of setting it.
    #[arg(long, conflicts_with = "content")]
    clear_content: bool,
  },

  /// Delete a card.
  Rm { id: CardId },

  /// Move a card to a new position (0-based; past-the-end means last).
  Move { id: CardId, to: usize },

  /// Show or reset the tenant's theme.
  Theme {
    #[command(subcommand)]
    command: ThemeCommand,
  },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
  /// Print the effective theme as JSON.
  Show,
  /// Save theme tokens from a JSON file.
  Set {
    /// Path to a JSON file containing the theme token groups.
    file: std::path::PathBuf,
  },
  /// Delete the custom theme, falling back to the default.
  Reset,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CardKindArg {
  Text,
  Image,
  Video,
}

impl From<CardKindArg> for CardKind {
  fn from(value: CardKindArg) -> Self {
    match value {
      CardKindArg::Text => CardKind::Text,
      CardKindArg::Image => CardKind::Image,
      CardKindArg::Video => CardKind::Video,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    username: args
      .user
      .or_else(|| (!file_cfg.username.is_empty()).then(|| file_cfg.username.clone()))
      .unwrap_or_default(),
    password: args
      .password
      .or_else(|| (!file_cfg.password.is_empty()).then(|| file_cfg.password.clone()))
      .unwrap_or_default(),
  };

  let client = ApiClient::new(api_config)?;
  let tenant = TenantId::new(args.tenant);

  match args.command {
    Command::List => {
      let cards = client.list_cards(&tenant).await?;
      print_cards(&cards);
    }

    Command::Add {
      kind,
      title,
      content,
      media_url,
    } => {
      let mut input = NewCard::new(kind.into());
      if let Some(title) = title {
        input = input.with_title(title);
      }
      if let Some(content) = content {
        input = input.with_content(content);
      }
      if let Some(media_url) = media_url {
        input = input.with_media_url(media_url);
      }
      let card = client.create_card(&tenant, &input).await?;
      println!("created card {} at position {}", card.id, card.order);
    }

    Command::Edit {
      id,
      title,
      content,
      media_url,
      clear_title,
      clear_content,
    } => {
      let mut patch = CardPatch::default();
      if clear_title {
        patch = patch.set_title(None);
      } else if let Some(title) = title {
        patch = patch.set_title(Some(title));
      }
      if clear_content {
        patch = patch.set_content(None);
      } else if let Some(content) = content {
        patch = patch.set_content(Some(content));
      }
      if let Some(media_url) = media_url {
        patch = patch.set_media_url(Some(media_url));
      }
      if patch.is_empty() {
        return Err(anyhow!("no fields to update"));
      }
      let card = client.update_card(&tenant, id, &patch).await?;
      println!("updated card {}", card.id);
    }

    Command::Rm { id } => {
      client.delete_card(&tenant, id).await?;
      println!("deleted card {id}");
    }

    Command::Move { id, to } => {
      move_card(&client, &tenant, id, to).await?;
    }

    Command::Theme { command } => match command {
      ThemeCommand::Show => {
        let lookup = client.get_theme(&tenant).await?;
        println!("{}", serde_json::to_string_pretty(&lookup)?);
      }
      ThemeCommand::Set { file } => {
        let raw = std::fs::read_to_string(&file)
          .with_context(|| format!("reading theme file {}", file.display()))?;
        let fields: compass_core::theme::ThemeFields =
          serde_json::from_str(&raw).context("parsing theme file")?;
        let theme = client.save_theme(&tenant, &fields).await?;
        println!("saved theme for tenant {}", theme.tenant_id);
      }
      ThemeCommand::Reset => {
        client.reset_theme(&tenant).await?;
        println!("theme reset to default");
      }
    },
  }

  Ok(())
}

// ─── Commands ─────────────────────────────────────────────────────────────────

/// Move one card to a new index via the ordering controller, rolling the
/// local view back when the server rejects the reorder.
async fn move_card(
  client: &ApiClient,
  tenant: &TenantId,
  id: CardId,
  to: usize,
) -> Result<()> {
  let cards = client.list_cards(tenant).await?;
  let source = cards
    .iter()
    .position(|c| c.id == id)
    .ok_or_else(|| anyhow!("card {id} not found for tenant {tenant}"))?;

  let mut controller = OrderingController::new(cards);
  if !controller.begin_drag(source) {
    return Err(anyhow!("cannot start move from position {source}"));
  }
  let Some(committed) = controller.drop_at(Some(to)) else {
    println!("card {id} already in place, nothing to do");
    return Ok(());
  };

  match client.reorder_cards(tenant, &committed).await {
    Ok(()) => {
      controller.confirm();
      print_cards(controller.cards());
      Ok(())
    }
    Err(err) => {
      controller.rollback();
      Err(err.context("reorder rejected, local order unchanged"))
    }
  }
}

fn print_cards(cards: &[Card]) {
  for card in cards {
    let title = card.title.as_deref().unwrap_or("(untitled)");
    println!("{:>3}  #{:<6} {:<6} {title}", card.order, card.id, card.kind);
  }
}
