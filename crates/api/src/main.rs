//! `localstore` command-line client

#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use localstore_core::{Decision, JobView, JobViewer};
use localstore_domain::{Application, Config, LocalStoreError};
use localstore_lib::cli::{Cli, Command};
use localstore_lib::commands::{self, JobListing, JobQuery, ViewerKind};
use localstore_lib::utils::init_logging;
use localstore_lib::AppContext;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging().context("failed to initialise logging")?;

    let cli = Cli::parse();
    let config = load_config(&cli).context("failed to load configuration")?;
    let ctx = AppContext::new(config).await.context("failed to build application context")?;

    info!(version = env!("CARGO_PKG_VERSION"), "localstore starting");

    let outcome = run(&ctx, cli.command).await;
    if let Some(navigation) = ctx.session_guard.pending() {
        println!("Session expired. Sign in again ({}).", navigation.route());
    }
    outcome.map_err(anyhow::Error::from)
}

fn load_config(cli: &Cli) -> std::result::Result<Config, LocalStoreError> {
    match &cli.config {
        Some(path) => localstore_infra::config::load_from_file(Some(path.clone())),
        None => localstore_infra::config::load(),
    }
}

async fn run(ctx: &AppContext, command: Command) -> std::result::Result<(), LocalStoreError> {
    match command {
        Command::Login { username, password } => {
            commands::login(ctx, &username, &password).await?;
            println!("Signed in as {username}.");
        }
        Command::Logout => {
            commands::logout(ctx).await?;
            println!("Signed out.");
        }
        Command::Whoami => {
            let user = commands::current_user(ctx).await?;
            println!("{} ({}) #{}", user.username, user.role, user.id);
        }
        Command::Jobs { search, page, near } => {
            let listing = commands::list_jobs(ctx, &JobQuery { search, page, near }).await?;
            print_listing(&listing);
        }
        Command::Job { id } => {
            let view = commands::job_detail(ctx, id).await?;
            print_job(&view);
        }
        Command::Applications => {
            let applications = commands::my_applications(ctx).await?;
            print_applications(&applications);
        }
        Command::Decide { job_id, application_id, status, note, reject_others } => {
            let mut decision = Decision::new(status);
            if let Some(note) = note {
                decision = decision.with_note(note);
            }
            if let Some(reject_note) = reject_others {
                decision = decision.rejecting_others(reject_note);
            }
            let applications =
                commands::decide(ctx, job_id, application_id, &decision).await?;
            print_applications(&applications);
        }
        Command::Analytics => {
            let analytics = commands::shop_analytics(ctx).await?;
            println!(
                "jobs: {}  views: {}  applications: {}  verified: {}",
                analytics.kpis.total_jobs,
                analytics.kpis.total_views,
                analytics.kpis.total_applications,
                analytics.shop_verified
            );
            for job in &analytics.jobs_performance {
                println!("  {:<30} {:>6} views {:>4} applications", job.name, job.views, job.applications);
            }
            for status in &analytics.applications_status {
                println!("  {:<12} {}", status.name, status.value);
            }
        }
    }
    Ok(())
}

fn print_listing(listing: &JobListing) {
    if listing.jobs.is_empty() {
        println!("No jobs found.");
    }
    for job in &listing.jobs {
        let status = match listing.viewer {
            ViewerKind::JobSeeker => {
                listing.statuses.get(&job.id).map(|s| format!(" [{s}]")).unwrap_or_default()
            }
            ViewerKind::Guest | ViewerKind::ShopOwner => String::new(),
        };
        println!("#{:<5} {} @ {} ({}){status}", job.id, job.title, job.shop.company_name, job.job_type);
    }
    println!("page {}/{} ({} jobs)", listing.page, listing.total_pages.max(1), listing.total_items);

    for nearby in &listing.shops {
        match nearby.distance_km {
            Some(km) => println!("  {:.1} km  {}", km, nearby.shop.company_name),
            None => println!("  ?        {}", nearby.shop.company_name),
        }
    }
}

fn print_job(view: &JobView) {
    let job = &view.job;
    println!("#{} {} @ {}", job.id, job.title, job.shop.company_name);
    if !job.description.is_empty() {
        println!("{}", job.description);
    }
    match &view.viewer {
        JobViewer::Guest => println!("Sign in to apply."),
        JobViewer::Owner { applications } => {
            println!("{} application(s):", applications.len());
            print_applications(applications);
        }
        JobViewer::Seeker { application: Some(application) } => {
            println!("You applied: {}", application.status);
        }
        JobViewer::Seeker { application: None } => println!("You have not applied yet."),
    }
}

fn print_applications(applications: &[Application]) {
    for application in applications {
        let who = application
            .applicant
            .as_ref()
            .map_or_else(|| format!("job #{}", application.job), |a| a.username.clone());
        println!("  #{:<5} {:<20} {}", application.id, who, application.status);
    }
}
