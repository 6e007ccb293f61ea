// Interactive discovery session runner
//
// Connects to Postgres, optionally seeds a demo profile set, and plays a
// discovery session for a viewer on stdin: r = reject, a = accept,
// s = super-accept, u = undo, q = quit.

use anyhow::{bail, Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use engine_core::common::{ProfileId, SwipeDirection};
use engine_core::domains::discovery::actions::{start_session, swipe};
use engine_core::domains::discovery::session::DecisionSession;
use engine_core::domains::profiles::models::{Preferences, Profile, Purpose};
use engine_core::kernel::{
    BaseProfileStore, BaseRandomSource, EngineDeps, SeededRandomSource, ThreadRandomSource,
};
use engine_core::Config;

/// Stable id for the seeded demo viewer, so repeated --seed runs upsert
/// instead of duplicating.
const DEMO_VIEWER_ID: &str = "00000000-0000-7000-8000-000000000001";

#[derive(Parser)]
#[command(name = "discovery_cli", about = "Play a discovery session against the database")]
struct Args {
    /// Viewer profile id. Defaults to the demo viewer when --seed is given.
    #[arg(long)]
    viewer: Option<ProfileId>,

    /// Upsert the demo profile set before starting.
    #[arg(long)]
    seed: bool,

    /// Seed the match resolver's entropy for a reproducible run.
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,engine_core=debug,sqlx=warn".into()),
        )
        .init();

    let args = Args::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let random: Arc<dyn BaseRandomSource> = match args.rng_seed {
        Some(seed) => Arc::new(SeededRandomSource::new(seed)),
        None => Arc::new(ThreadRandomSource),
    };
    let deps = EngineDeps::postgres(pool, random);

    if args.seed {
        seed_demo_profiles(&deps).await?;
    }

    let viewer_id = match (args.viewer, args.seed) {
        (Some(id), _) => id,
        (None, true) => ProfileId::parse(DEMO_VIEWER_ID)?,
        (None, false) => bail!("pass --viewer <uuid>, or --seed to use the demo viewer"),
    };

    let mut session = start_session(viewer_id, &deps).await?;
    println!(
        "Discovery session for {viewer_id}: {} candidate(s)\n",
        session.len()
    );

    run_loop(&mut session, &deps).await
}

async fn run_loop(session: &mut DecisionSession, deps: &EngineDeps) -> Result<()> {
    let stdin = io::stdin();
    loop {
        let Some(current) = session.current() else {
            println!("No more profiles. Adjust your filters to see more people nearby.");
            return Ok(());
        };
        print_card(current);
        if let Some(next) = session.peek_next() {
            println!("  (up next: {})", next.display_name);
        }

        print!("[r]eject / [a]ccept / [s]uper-accept / [u]ndo / [q]uit > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let direction = match line.trim() {
            "r" => SwipeDirection::Reject,
            "a" => SwipeDirection::Accept,
            "s" => SwipeDirection::SuperAccept,
            "u" => {
                match session.undo() {
                    Some(decision) => {
                        println!("Undid decision on {}\n", decision.candidate.display_name)
                    }
                    None => println!("Nothing to undo\n"),
                }
                continue;
            }
            "q" => return Ok(()),
            other => {
                println!("Unknown input {other:?}\n");
                continue;
            }
        };

        let outcome = swipe(session, direction, deps).await?;
        if outcome.matched {
            match outcome.conversation_id {
                Some(id) => println!(
                    "It's a match with {}! Conversation {id}\n",
                    outcome.candidate.display_name
                ),
                None => println!("It's a match with {}!\n", outcome.candidate.display_name),
            }
        } else {
            println!();
        }
    }
}

fn print_card(profile: &Profile) {
    let badge = if profile.verified { " [verified]" } else { "" };
    println!(
        "{}, {}{badge} - {:.1} mi - {}",
        profile.display_name, profile.age, profile.distance_miles, profile.purpose
    );
    if !profile.bio.is_empty() {
        println!("  {}", profile.bio);
    }
    if !profile.interests.is_empty() {
        println!("  interests: {}", profile.interests.join(", "));
    }
}

/// Demo profile set, adapted from the app's onboarding mocks.
async fn seed_demo_profiles(deps: &EngineDeps) -> Result<()> {
    let viewer = demo_profile(
        DEMO_VIEWER_ID,
        "You",
        29,
        Purpose::Hangout,
        0.0,
        true,
        "The demo viewer profile.",
        &[],
    )?;
    deps.profiles
        .upsert_profile(&viewer, &Preferences::default())
        .await?;

    let candidates = [
        demo_profile(
            "00000000-0000-7000-8000-000000000011",
            "Isabella",
            24,
            Purpose::ConcertPartner,
            2.5,
            true,
            "Looking for someone to explore the indie music scene with.",
            &["Music", "Travel", "Art"],
        )?,
        demo_profile(
            "00000000-0000-7000-8000-000000000012",
            "Marcus",
            27,
            Purpose::ExerciseBuddy,
            5.1,
            false,
            "Training for a half-marathon and need a running buddy who can keep up!",
            &["Fitness", "Hiking", "Tech"],
        )?,
        demo_profile(
            "00000000-0000-7000-8000-000000000013",
            "Priya",
            26,
            Purpose::CoffeeDate,
            1.2,
            true,
            "Third-wave coffee enthusiast, terrible at small talk, great at long walks.",
            &["Foodie", "Reading", "Yoga"],
        )?,
        demo_profile(
            "00000000-0000-7000-8000-000000000014",
            "Daniel",
            31,
            Purpose::StudyTogether,
            8.7,
            false,
            "Grinding through an MBA, looking for a library accountability partner.",
            &["Reading", "Tech", "Movies"],
        )?,
    ];

    for candidate in &candidates {
        deps.profiles
            .upsert_profile(candidate, &Preferences::default())
            .await?;
    }

    tracing::info!(count = candidates.len() + 1, "Demo profiles seeded");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn demo_profile(
    id: &str,
    name: &str,
    age: i32,
    purpose: Purpose,
    distance_miles: f64,
    verified: bool,
    bio: &str,
    interests: &[&str],
) -> Result<Profile> {
    Ok(Profile {
        id: ProfileId::parse(id)?,
        display_name: name.to_string(),
        age,
        gender: None,
        purpose,
        bio: bio.to_string(),
        location_name: "Downtown".to_string(),
        distance_miles,
        interests: interests.iter().map(|s| s.to_string()).collect(),
        image_urls: vec![],
        verified,
    })
}
