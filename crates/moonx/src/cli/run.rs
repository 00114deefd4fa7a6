//! Scheduled run and phase preview handlers.

use chrono::{DateTime, FixedOffset, Utc};
use moonx::{
    AstronomyClient, AuditStore, MoonPipeline, MoonxConfig, MoonxResult, PostgresPostLogRepository,
    RunOutcome, TwitterClient, fetch_phase,
};

fn astronomy_client(config: &MoonxConfig) -> MoonxResult<AstronomyClient> {
    let settings = config.settings();
    AstronomyClient::builder(config.secrets().ipgeo_api_key()?)
        .base_url(settings.astronomy().base_url())
        .coordinate(*settings.location().latitude(), *settings.location().longitude())
        .timeout(settings.http_timeout())
        .build()
}

fn local_now(config: &MoonxConfig) -> MoonxResult<DateTime<FixedOffset>> {
    Ok(Utc::now().with_timezone(&config.settings().utc_offset()?))
}

/// Run the full workflow once and return the process exit status.
///
/// Every credential is checked before the first request goes out.
pub async fn run_once(config: &MoonxConfig, dry_run: bool) -> MoonxResult<u8> {
    let settings = config.settings();
    let source = astronomy_client(config)?;
    let poster = TwitterClient::with_base_url(
        config.secrets().twitter_auth()?,
        settings.twitter().base_url(),
        Some(settings.http_timeout()),
    )?;
    let database = config.secrets().database()?;
    let store = AuditStore::new(settings.output().directory())?;
    let now = local_now(config)?;

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let outcome = pipeline
        .run(|| Ok(PostgresPostLogRepository::connect(&database)?), now, dry_run)
        .await?;

    report(&outcome);
    Ok(outcome.exit_code())
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Posted { record } => {
            println!("Posted {} (log row {})", record.tweet_id, record.id);
            if let Some(target) = &record.replied_with_id {
                println!("  in reply to {}", target);
            }
            println!("  {}", record.text);
        }
        RunOutcome::DryRun { text, reply_to } => {
            println!("Dry run, nothing posted");
            match reply_to {
                Some(target) => println!("  would reply to {}", target),
                None => println!("  would start a new thread"),
            }
            println!("  {}", text);
        }
        RunOutcome::PostFailed { text, error, .. } => {
            eprintln!("Post failed, nothing logged: {}", error);
            eprintln!("  {}", text);
        }
        RunOutcome::LogFailed {
            post_id,
            text,
            reply_to,
            error,
        } => {
            eprintln!("Post {} is live but was not logged: {}", post_id, error);
            eprint!("  reconcile with: moonx record --tweet-id {} --text {:?}", post_id, text);
            match reply_to {
                Some(target) => eprintln!(" --replied-with-id {}", target),
                None => eprintln!(),
            }
        }
    }
}

/// Fetch and translate the current phase, print it, and post nothing.
pub async fn preview_phase(config: &MoonxConfig) -> MoonxResult<u8> {
    let source = astronomy_client(config)?;
    let store = AuditStore::new(config.settings().output().directory())?;
    let (reading, phase) = fetch_phase(&source, &store).await?;
    let now = local_now(config)?;

    println!("{}: {}", reading.code(), phase.localized());
    println!("  {}", moonx::compose_message(phase, now.timestamp()));
    Ok(0)
}
