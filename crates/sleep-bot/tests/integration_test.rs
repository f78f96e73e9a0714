//! Integration tests for sleep-bot crate.
//!
//! These tests drive the bot the way the binary does: events in as JSON
//! lines, replies out as JSON lines, with rollover jobs on the scheduler.

use std::sync::Arc;

use sleep_bot::{Outbound, SleepBot, SledStore};
use sleep_common::test_utils::{init_test_logging, shanghai};
use sleep_config::{Config, ConfigCache};
use sleep_core::{MemoryStore, SleepStore};
use tempfile::TempDir;

const ASSIGN: &str = r#"{"platform":"onebot","guild_id":"20001","assignee":"bot-1"}"#;
const MORNING: &str = r#"{"content":"早安","guild_id":"20001","user_id":"10001","platform":"onebot","self_id":"bot-1"}"#;
const STATS: &str = r#"{"content":"早晚安统计","guild_id":"20001","user_id":"10001","platform":"onebot","self_id":"bot-1"}"#;

fn quiet_config() -> Arc<ConfigCache> {
    Arc::new(ConfigCache::new(Config {
        morning_prompts: Vec::new(),
        night_prompts: Vec::new(),
        ..Config::default()
    }))
}

async fn bot() -> SleepBot {
    init_test_logging();
    let store: Arc<dyn SleepStore> = Arc::new(MemoryStore::new());
    SleepBot::new(quiet_config(), store).await.unwrap()
}

#[tokio::test]
async fn test_assignment_then_greeting() {
    let bot = bot().await;
    let now = shanghai(2024, 1, 1, 7, 0, 0);

    assert_eq!(bot.handle_line(ASSIGN, now).await.unwrap(), None);
    let outbound = bot.handle_line(MORNING, now).await.unwrap().unwrap();

    assert_eq!(outbound.guild_id.unwrap().0, "20001");
    assert_eq!(outbound.user_id.unwrap().0, "10001");
    assert_eq!(outbound.reply, "早安成功！你是本群今天第1个起床的！");
}

#[tokio::test]
async fn test_greeting_without_assignment_is_ignored() {
    let bot = bot().await;
    assert_eq!(bot.handle_line(MORNING, shanghai(2024, 1, 1, 7, 0, 0)).await.unwrap(), None);
}

#[tokio::test]
async fn test_statistics_by_command_name() {
    let bot = bot().await;
    let now = shanghai(2024, 1, 1, 7, 0, 0);
    bot.handle_line(ASSIGN, now).await.unwrap();
    bot.handle_line(MORNING, now).await.unwrap();

    let outbound = bot.handle_line(STATS, now).await.unwrap().unwrap();

    assert_eq!(outbound.guild_id.unwrap().0, "20001");
    assert!(outbound.reply.contains("║  早安次数:      1"));
}

#[tokio::test]
async fn test_invalid_line_is_an_error() {
    let bot = bot().await;
    assert!(bot.handle_line("not json", shanghai(2024, 1, 1, 7, 0, 0)).await.is_err());
    assert_eq!(bot.handle_line("   ", shanghai(2024, 1, 1, 7, 0, 0)).await.unwrap(), None);
}

#[tokio::test]
async fn test_run_loop_skips_bad_lines() {
    let bot = bot().await;
    let input = format!("{ASSIGN}\nnot json\n{{\"content\":\"hello\"}}\n");
    let mut output = Vec::new();

    bot.run(input.as_bytes(), &mut output).await.unwrap();

    assert!(output.is_empty());
}

#[tokio::test]
async fn test_run_loop_writes_json_lines() {
    let bot = bot().await;
    let input = format!("{ASSIGN}\n{STATS}\n");
    let mut output = Vec::new();

    bot.run(input.as_bytes(), &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let outbound: Outbound = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(outbound.guild_id.unwrap().0, "20001");
    assert_eq!(outbound.user_id.unwrap().0, "10001");
    assert!(outbound.reply.starts_with("✨ 今日睡眠统计 ("));
    assert!(outbound.reply.contains("║  早安次数:      0"));
}

#[tokio::test]
async fn test_start_registers_rollover_jobs() {
    let bot = bot().await;

    let jobs = bot.start().await.unwrap();
    assert_eq!(jobs.len(), 2);

    let mut names: Vec<_> = bot.scheduler().list_jobs().await.into_iter().map(|job| job.name).collect();
    names.sort();
    assert_eq!(names, vec!["daily_reset", "weekly_rollover"]);

    let daily = bot.scheduler().get_job(jobs[0]).await.unwrap();
    assert_eq!(daily.cron_expression, "0 0 21 * * *");

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_bot_over_sled_store() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn SleepStore> = Arc::new(SledStore::open(dir.path().join("db")).unwrap());
    let bot = SleepBot::new(quiet_config(), Arc::clone(&store)).await.unwrap();
    let now = shanghai(2024, 1, 1, 7, 0, 0);

    bot.handle_line(ASSIGN, now).await.unwrap();
    bot.handle_line(MORNING, now).await.unwrap().unwrap();

    let groups = store.groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].morning_count, 1);
}
