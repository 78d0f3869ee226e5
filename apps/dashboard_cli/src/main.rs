//! Terminal viewer for the supply-risk dashboard: loads supplier and
//! warehouse data through the orchestrator and prints the resulting
//! snapshot. Serves as a reference consumer of the `client_core` API.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{DashboardOrchestrator, DashboardState, HttpRiskBackend};
use shared::domain::{SupplierRecord, WarehouseRecord};

mod config;

use config::{load_settings, normalize_backend_url};

#[derive(Parser, Debug)]
#[command(about = "Terminal viewer for the supply-risk dashboard backend")]
struct Args {
    /// Backend base URL; overrides dashboard.toml and environment settings.
    #[arg(long)]
    backend_url: Option<String>,
    /// Distribution-center city to select after the initial load.
    #[arg(long)]
    city: Option<String>,
    /// Trigger a pipeline re-run before rendering.
    #[arg(long)]
    run_pipeline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(city) = args.city {
        settings.initial_city = Some(city);
    }
    let backend_url = normalize_backend_url(&settings.backend_url)?;

    let backend = Arc::new(HttpRiskBackend::new(backend_url)?);
    let orchestrator = DashboardOrchestrator::new(backend);
    let mut updates = orchestrator.subscribe();

    orchestrator.initial_load().await;
    if args.run_pipeline {
        orchestrator.run_pipeline_and_reload().await;
    }
    if let Some(city) = &settings.initial_city {
        orchestrator.select_city(city).await;
    }

    let snapshot = updates.borrow_and_update().clone();
    render(&snapshot);
    Ok(())
}

fn render(state: &DashboardState) {
    println!("Status: {}", state.status);
    match &state.selected_city {
        Some(city) => println!("Distribution center: {city}"),
        None => println!("Distribution center: (none)"),
    }
    println!();
    render_best_suppliers(&state.best_suppliers);
    println!();
    render_warehouses(&state.warehouses);
    println!();
    println!(
        "{} suppliers evaluated, {} candidate cities: {}",
        state.all_suppliers.len(),
        state.unique_cities.len(),
        state.unique_cities.join(", ")
    );
}

fn render_best_suppliers(suppliers: &[SupplierRecord]) {
    if suppliers.is_empty() {
        println!("No best-supplier picks available.");
        return;
    }
    println!(
        "{:<24} {:<24} {:<14} {:>8} {:>8} {:>10}",
        "Product", "Supplier", "City", "Score", "P(fail)", "Dist (km)"
    );
    for s in suppliers {
        println!(
            "{:<24} {:<24} {:<14} {:>8.3} {:>8.3} {:>10.1}",
            s.product, s.supplier_name, s.city, s.combined_score, s.failure_prob, s.distance_km
        );
    }
}

fn render_warehouses(warehouses: &[WarehouseRecord]) {
    if warehouses.is_empty() {
        println!("No warehouses reported.");
        return;
    }
    println!("Warehouses:");
    for w in warehouses {
        println!(
            "  {:<6} {:<14} {} ({:.2}, {:.2})",
            w.warehouse_id, w.city, w.country, w.latitude, w.longitude
        );
    }
}
