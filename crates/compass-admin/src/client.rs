//! Async HTTP client wrapping the Compass JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use compass_core::{
  TenantId,
  card::{Card, CardId, CardPatch, NewCard},
  theme::{Theme, ThemeFields, ThemeLookup},
};

/// Connection settings for the Compass API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the Compass JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Deserialize)]
struct CardsEnvelope {
  cards: Vec<Card>,
}

#[derive(Deserialize)]
struct CardEnvelope {
  card: Card,
}

#[derive(Deserialize)]
struct ThemeEnvelope {
  theme: Theme,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  // ── Cards ─────────────────────────────────────────────────────────────────

  /// `GET /cards?tenant=<id>`
  pub async fn list_cards(&self, tenant: &TenantId) -> Result<Vec<Card>> {
    let resp = self
      .auth(self.client.get(self.url("/cards")))
      .query(&[("tenant", tenant.as_str())])
      .send()
      .await
      .context("GET /cards failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /cards → {}", resp.status()));
    }
    let envelope: CardsEnvelope =
      resp.json().await.context("deserialising cards")?;
    Ok(envelope.cards)
  }

  /// `POST /cards?tenant=<id>`
  pub async fn create_card(&self, tenant: &TenantId, input: &NewCard) -> Result<Card> {
    let resp = self
      .auth(self.client.post(self.url("/cards")))
      .query(&[("tenant", tenant.as_str())])
      .json(input)
      .send()
      .await
      .context("POST /cards failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /cards → {}", resp.status()));
    }
    let envelope: CardEnvelope = resp.json().await.context("deserialising card")?;
    Ok(envelope.card)
  }

  /// `PATCH /cards/{id}?tenant=<id>`
  pub async fn update_card(
    &self,
    tenant: &TenantId,
    id: CardId,
    patch: &CardPatch,
  ) -> Result<Card> {
    let resp = self
      .auth(self.client.patch(self.url(&format!("/cards/{id}"))))
      .query(&[("tenant", tenant.as_str())])
      .json(patch)
      .send()
      .await
      .context("PATCH /cards/{id} failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("PATCH /cards/{id} → {}", resp.status()));
    }
    let envelope: CardEnvelope = resp.json().await.context("deserialising card")?;
    Ok(envelope.card)
  }

  /// `DELETE /cards/{id}?tenant=<id>`
  pub async fn delete_card(&self, tenant: &TenantId, id: CardId) -> Result<()> {
    let resp = self
      .auth(self.client.delete(self.url(&format!("/cards/{id}"))))
      .query(&[("tenant", tenant.as_str())])
      .send()
      .await
      .context("DELETE /cards/{id} failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("DELETE /cards/{id} → {}", resp.status()));
    }
    Ok(())
  }

  /// `POST /cards/reorder?tenant=<id>` — body `{"cardIds":[…]}`
  pub async fn reorder_cards(&self, tenant: &TenantId, ids: &[CardId]) -> Result<()> {
    let resp = self
      .auth(self.client.post(self.url("/cards/reorder")))
      .query(&[("tenant", tenant.as_str())])
      .json(&serde_json::json!({ "cardIds": ids }))
      .send()
      .await
      .context("POST /cards/reorder failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /cards/reorder → {}", resp.status()));
    }
    Ok(())
  }

  // ── Themes ────────────────────────────────────────────────────────────────

  /// `GET /themes?tenant=<id>`
  pub async fn get_theme(&self, tenant: &TenantId) -> Result<ThemeLookup> {
    let resp = self
      .auth(self.client.get(self.url("/themes")))
      .query(&[("tenant", tenant.as_str())])
      .send()
      .await
      .context("GET /themes failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /themes → {}", resp.status()));
    }
    resp.json().await.context("deserialising theme lookup")
  }

  /// `POST /themes` — body `{"tenant":…,"theme":…}`
  pub async fn save_theme(
    &self,
    tenant: &TenantId,
    fields: &ThemeFields,
  ) -> Result<Theme> {
    let resp = self
      .auth(self.client.post(self.url("/themes")))
      .json(&serde_json::json!({ "tenant": tenant, "theme": fields }))
      .send()
      .await
      .context("POST /themes failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /themes → {}", resp.status()));
    }
    let envelope: ThemeEnvelope =
      resp.json().await.context("deserialising theme")?;
    Ok(envelope.theme)
  }

  /// `DELETE /themes?tenant=<id>`
  pub async fn reset_theme(&self, tenant: &TenantId) -> Result<()> {
    let resp = self
      .auth(self.client.delete(self.url("/themes")))
      .query(&[("tenant", tenant.as_str())])
      .send()
      .await
      .context("DELETE /themes failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("DELETE /themes → {}", resp.status()));
    }
    Ok(())
  }
}
