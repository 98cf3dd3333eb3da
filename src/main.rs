use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use tournament_sim::config::Config;
use tournament_sim::ranking::{self, FootballDataClient, RankingFile};
use tournament_sim::sim::TeamRegistry;
use tournament_sim::{stats, tournament};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let cache = RankingFile::new(&config.ranking_file);
    if config.fetch_ranking {
        let client = FootballDataClient::new(
            config.football_data_api_key.as_deref(),
            Some(config.football_data_url.as_str()),
        )?;
        ranking::refresh_cache(&client, &cache).await?;
    }

    let ranking = if config.no_ranking {
        info!("Rankings disabled – all teams start level");
        None
    } else {
        let loaded = cache.load().await?;
        match &loaded {
            Some(r) => info!(
                "Loaded {} ranking entries from {}",
                r.len(),
                cache.path().display()
            ),
            None => warn!(
                "⚠️ Ranking file {} not found – use --fetch-ranking. Teams are unranked.",
                cache.path().display()
            ),
        }
        loaded
    };

    let mut teams = TeamRegistry::new();
    for team in ranking::ranked_teams(&config.teams, ranking.as_ref(), config.fallback_rank) {
        teams.add(team).context("Invalid team list")?;
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Simulating {} teams (seed {})", teams.len(), seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let report = tournament::run(&mut teams, &config.tournament_settings(), &mut rng)?;

    for m in &report.matches {
        println!("{}", m.summary(&teams));
    }

    println!();
    for group in &report.groups {
        println!("{}", group.label);
        for (pos, &id) in group.standings.iter().enumerate() {
            println!("  {}. {}", pos + 1, teams[id]);
        }
    }

    println!();
    println!("🏆 Mistrz: {}", teams[report.champion].name);
    println!("🥈 Finalista: {}", teams[report.runner_up].name);
    if let Some(third) = report.third_place {
        println!("🥉 Trzecie miejsce: {}", teams[third].name);
    }
    println!("Łączna liczba goli: {}", stats::total_goals(teams.teams()));

    if config.charts {
        println!();
        print!("{}", stats::render_goals_chart(&stats::goals_table(teams.teams())?));
        println!();
        print!(
            "{}",
            stats::render_points_distribution(&stats::points_distribution(teams.teams())?)
        );
    }

    if config.json {
        let snapshot = stats::snapshot(teams.teams());
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
