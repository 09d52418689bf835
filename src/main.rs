//! Fruit Rally Host
//!
//! Demo harness: runs a complete match end-to-end over the in-process
//! channel, with scripted participants holding movement, and logs the
//! event stream and final standings.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::info;
use tracing_subscriber::EnvFilter;

use fruit_rally::{
    ActivityChannel, ActivityHost, GameConfig, GameStatus, LocalChannel, MoveDirection,
    ParticipantClient, RosterEntry, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Fruit Rally host v{}", VERSION);

    // Shortened match so the demo finishes quickly
    let config = GameConfig {
        countdown_secs: 3,
        match_duration_secs: 10,
        ..Default::default()
    };

    let roster = vec![
        RosterEntry::new("ada", "Ada", "🦊"),
        RosterEntry::new("grace", "Grace", "🐙"),
        RosterEntry::new("alan", "Alan", "🦉"),
    ];

    let channel: Arc<dyn ActivityChannel> = Arc::new(LocalChannel::new(1024));
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;

    let host = ActivityHost::spawn(&roster, config.clone(), channel.clone(), seed);
    info!(session = %host.session_id(), seed, "host spawned");

    let mut clients: Vec<ParticipantClient> = roster
        .iter()
        .map(|entry| ParticipantClient::new(entry.id.clone(), channel.clone(), &config))
        .collect();

    host.start().await?;
    tokio::time::sleep(Duration::from_secs(config.countdown_secs as u64)).await;

    // Scripted play: every second each participant flips direction so the
    // paddles sweep the playfield under the falling fruit
    for round in 0..config.match_duration_secs {
        for (i, client) in clients.iter_mut().enumerate() {
            let direction = if (round as usize + i) % 2 == 0 {
                MoveDirection::Left
            } else {
                MoveDirection::Right
            };
            client.move_start(direction);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    for client in clients.iter_mut() {
        client.move_stop();
    }

    // Wait for the final snapshot to land on a participant
    let mut final_snapshot = None;
    for _ in 0..50 {
        if let Some(snap) = clients[0].latest_snapshot() {
            if snap.status == GameStatus::Ended {
                final_snapshot = Some(snap);
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    match final_snapshot {
        Some(snap) => {
            info!("=== Final Standings ===");
            let mut ranked = snap.players.clone();
            ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
            for (place, player) in ranked.iter().take(5).enumerate() {
                info!(
                    "#{}: {} {} - {} pts",
                    place + 1,
                    player.avatar_glyph,
                    player.display_name,
                    player.score
                );
            }
        }
        None => info!("match did not finish in time"),
    }

    host.close().await;
    channel.close();
    Ok(())
}
