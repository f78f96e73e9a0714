//! Default values matching the plugin's shipped configuration.

use crate::schema::{Config, StorageBackend, StorageConfig};
use sleep_common::logging::LoggingConfig;
use std::path::PathBuf;

/// Default morning trigger keywords.
pub const DEFAULT_MORNING_MESSAGES: &[&str] = &[
    "早安",
    "早哇",
    "起床",
    "早上好",
    "ohayo",
    "哦哈哟",
    "お早う",
    "good morning",
];

/// Default night trigger keywords.
pub const DEFAULT_NIGHT_MESSAGES: &[&str] = &[
    "晚安",
    "睡觉",
    "睡了",
    "晚安哇",
    "good night",
    "おやすみ",
    "お休みなさい",
];

/// Default morning prompts.
pub const DEFAULT_MORNING_PROMPTS: &[&str] = &[
    "元气满满的一天开始啦！ (/▽＼)",
    "迎接美好的一天吧！ (￣▽￣)~*",
    "今天也要干劲满满哦~ (๑•̀ㅂ•́)و✧",
    "今天也要加油哦！ (ง •_•)ง",
];

/// Default night prompts.
pub const DEFAULT_NIGHT_PROMPTS: &[&str] = &[
    "很累了罢~(。-ω-)zzz",
    "祝你有个好梦～(￣o￣) . z Z",
    "晚安(∪｡∪)｡｡｡zzz",
    "おやすみなさい～(´-ω-)`~*",
    "睡个好觉哦(˘ω˘)ｽﾞﾔｧ…",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "Asia/Shanghai".to_string(),
            morning_enable: true,
            morning_start_hour: 6,
            morning_end_hour: 14,
            multi_get_up_enable: false,
            multi_get_up_interval: 6,
            super_get_up_enable: false,
            super_get_up_interval: 1,
            night_enable: true,
            night_start_hour: 21,
            night_end_hour: 6,
            good_sleep_enable: true,
            good_sleep_interval: 6,
            deep_sleep_enable: false,
            deep_sleep_interval: 3,
            morning_messages: owned(DEFAULT_MORNING_MESSAGES),
            night_messages: owned(DEFAULT_NIGHT_MESSAGES),
            morning_prompts: owned(DEFAULT_MORNING_PROMPTS),
            night_prompts: owned(DEFAULT_NIGHT_PROMPTS),
            prompt_seed: None,
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sled,
            path: PathBuf::from("data/sleep"),
        }
    }
}
