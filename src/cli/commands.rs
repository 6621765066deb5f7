//! CLI command handlers for login, status, logout, listing, and granting.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::{DeviceAuthFlow, FileTokenStore, Session, SessionManager};
use crate::config::{Credentials, Endpoints};
use crate::reconcile::{Reconciler, Status};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn session_manager() -> SessionManager {
    SessionManager::new(Arc::new(FileTokenStore::new_default()))
}

fn api_client() -> ApiClient {
    ApiClient::new().with_base_url(Endpoints::from_env().api_base_url)
}

/// Restore the cached session or exit with a hint.
fn restore_or_exit(manager: &mut SessionManager) -> Result<Session, Box<dyn std::error::Error>> {
    match manager.restore()? {
        Some(session) => Ok(session),
        None => {
            eprintln!("❌ Not authenticated, run `attache login` first");
            std::process::exit(1);
        }
    }
}

/// Handle `attache login`.
pub async fn handle_login() -> CliResult {
    let credentials = Credentials::from_env()?;
    let endpoints = Endpoints::from_env();
    let flow = DeviceAuthFlow::new(credentials)
        .with_device_code_url(endpoints.device_code_url())
        .with_token_url(endpoints.token_url());

    let grant = flow.begin().await?;
    println!("🔗 Visit: {}", grant.verification_uri);
    println!("📋 Enter code: {}", grant.user_code);
    if webbrowser::open(&grant.verification_uri).is_err() {
        println!("   (could not open a browser, use the URL above)");
    }
    println!("⏳ Waiting for authorization...");

    let mut session = flow.wait_for_authorization(&grant).await?;

    // Identity lookup; failure leaves the email unset but keeps the token.
    match api_client().current_user(&session).await {
        Ok(profile) => session.email = profile.email,
        Err(err) => println!("⚠️  Could not resolve the authenticated identity: {err}"),
    }

    let mut manager = session_manager();
    manager.adopt(session)?;
    match manager.session().and_then(|s| s.email.as_deref()) {
        Some(email) => println!("✅ Authenticated as {email}"),
        None => println!("✅ Authenticated"),
    }
    Ok(())
}

/// Handle `attache status`.
pub async fn handle_status() -> CliResult {
    let mut manager = session_manager();
    match manager.restore()? {
        Some(session) => {
            let email = session.email.as_deref().unwrap_or("<unknown identity>");
            let expires = session.expires_at.format("%Y-%m-%d %H:%M:%S");
            if manager.near_expiry() {
                println!("⚠️  Authenticated as {email} (expires {expires}, expiring soon)");
            } else {
                println!("✅ Authenticated as {email} (expires {expires})");
            }
        }
        None => println!("❌ Not authenticated"),
    }
    Ok(())
}

/// Handle `attache logout`.
pub async fn handle_logout() -> CliResult {
    let mut manager = session_manager();
    manager.invalidate()?;
    println!("✅ Logged out");
    Ok(())
}

/// Handle `attache assistants <email>`.
pub async fn handle_assistants(email: &str) -> CliResult {
    let mut manager = session_manager();
    let session = restore_or_exit(&mut manager)?;

    let api = api_client();
    let user_id = api.resolve_user(email, &session).await?;
    let assistants = api.list_assistants(&user_id, &session).await?;

    if assistants.is_empty() {
        println!("No assistants found for {email}");
        return Ok(());
    }
    println!("Assistants for {email}:");
    for (i, assistant) in assistants.iter().enumerate() {
        println!("  {}. {}", i + 1, assistant.email.as_deref().unwrap_or("<no email>"));
    }
    Ok(())
}

/// Handle `attache grant --target <email> <assistants>...`.
pub async fn handle_grant(target: &str, assistants: &[String]) -> CliResult {
    let mut manager = session_manager();
    restore_or_exit(&mut manager)?;

    let reconciler = Reconciler::new(api_client());
    let report = reconciler.reconcile(&mut manager, target, assistants).await?;

    for entry in &report.entries {
        let marker = if entry.status == Status::Ok { "✓" } else { "✗" };
        match &entry.detail {
            Some(detail) => println!("{marker} [{}] {} — {detail}", entry.phase, entry.email),
            None => println!("{marker} [{}] {}", entry.phase, entry.email),
        }
    }
    println!("Done: {} ok, {} failed", report.successes(), report.failures());
    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
