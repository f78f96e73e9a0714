//! Reply texts for check-in verdicts.

use sleep_common::{split_minutes, CheckinKind};

use crate::aggregator::AppliedCheckin;
use crate::evaluator::{Standing, Verdict};
use crate::tier::Tier;

/// Reply to a check-in attempted outside a group.
pub const PRIVATE_CHECKIN_REPLY: &str = "私聊早晚安还在开发中，去群里试试吧～";

/// Reply to a statistics request outside a group.
pub const PRIVATE_STATISTICS_REPLY: &str = "只能在群聊中使用早晚安统计哦～";

/// Renders the reply for a rejected verdict. Accepted and inert verdicts
/// yield `None`.
pub fn rejection(kind: CheckinKind, verdict: &Verdict) -> Option<String> {
    let reply = match (kind, verdict) {
        (CheckinKind::Morning, Verdict::OutsideWindow(hours)) => {
            format!("现在不能早安哦，可以早安的时间为{}时到{}时~", hours.start, hours.end)
        }
        (CheckinKind::Night, Verdict::OutsideWindow(hours)) => {
            format!("现在不能晚安哦，可以晚安的时间为{}时到{}时~", hours.start, hours.end)
        }
        (CheckinKind::Morning, Verdict::TooSoon { min_interval, .. }) => {
            format!("距离上次起床还不到{}小时，现在不能再早安哦~", min_interval.num_hours())
        }
        (CheckinKind::Night, Verdict::TooSoon { min_interval, .. }) => {
            format!("距离上次晚安还不到{}小时，现在不能再晚安哦~", min_interval.num_hours())
        }
        (CheckinKind::Morning, Verdict::AlreadyCheckedIn) => "你今天已经起过床了哦~".to_string(),
        (CheckinKind::Night, Verdict::AlreadyCheckedIn) => "你已经晚安过了哦~".to_string(),
        (_, Verdict::Inert | Verdict::Accepted(_)) => return None,
    };
    Some(reply)
}

/// Renders the reply for an accepted check-in, with `prompt` as its last line.
pub fn success(kind: CheckinKind, standing: Standing, applied: &AppliedCheckin, prompt: Option<&str>) -> String {
    let mut lines = match standing {
        Standing::Repeat(tier) => vec![repeat(tier).to_string()],
        Standing::First => first(kind, applied),
    };
    if let Some(prompt) = prompt {
        lines.push(prompt.to_string());
    }
    lines.join("\n")
}

const fn repeat(tier: Tier) -> &'static str {
    match tier {
        Tier::MultiGetUp => "早安成功！又起床啦，回笼觉睡得还好吗？",
        Tier::SuperGetUp => "早安成功！刚起床又起床，精神过于饱满了吧？",
        Tier::GoodSleep => "晚安成功！又要睡啦，祝你好梦~",
        Tier::DeepSleep => "晚安成功！进入深度睡眠模式，不要再熬夜啦~",
    }
}

fn first(kind: CheckinKind, applied: &AppliedCheckin) -> Vec<String> {
    let (head, span, order) = match kind {
        CheckinKind::Morning => ("早安成功！", applied.sleep_minutes.map(|m| ("你的睡眠时长为", m)), "起床"),
        CheckinKind::Night => ("晚安成功！", applied.awake_minutes.map(|m| ("你今天的清醒时长为", m)), "睡觉"),
    };

    let mut lines = Vec::with_capacity(3);
    let position = format!("你是本群今天第{}个{order}的！", applied.position);
    match span {
        Some((label, minutes)) => {
            let (hours, minutes) = split_minutes(minutes);
            lines.push(format!("{head}{label}{hours}时{minutes}分，"));
            lines.push(position);
        }
        None => lines.push(format!("{head}{position}")),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sleep_config::WindowHours;

    fn applied(position: u32, sleep: Option<u32>, awake: Option<u32>) -> AppliedCheckin {
        AppliedCheckin {
            position,
            sleep_minutes: sleep,
            awake_minutes: awake,
        }
    }

    #[test]
    fn test_outside_window_names_hours() {
        let verdict = Verdict::OutsideWindow(WindowHours { start: 6, end: 14 });
        assert_eq!(
            rejection(CheckinKind::Morning, &verdict).unwrap(),
            "现在不能早安哦，可以早安的时间为6时到14时~"
        );
    }

    #[test]
    fn test_too_soon_names_interval() {
        let verdict = Verdict::TooSoon {
            min_interval: Duration::hours(3),
            elapsed: Duration::hours(1),
        };
        assert_eq!(
            rejection(CheckinKind::Night, &verdict).unwrap(),
            "距离上次晚安还不到3小时，现在不能再晚安哦~"
        );
    }

    #[test]
    fn test_inert_has_no_reply() {
        assert_eq!(rejection(CheckinKind::Morning, &Verdict::Inert), None);
    }

    #[test]
    fn test_first_morning_with_sleep_and_prompt() {
        let reply = success(CheckinKind::Morning, Standing::First, &applied(2, Some(485), None), Some("早起的鸟儿有虫吃"));
        assert_eq!(reply, "早安成功！你的睡眠时长为8时5分，\n你是本群今天第2个起床的！\n早起的鸟儿有虫吃");
    }

    #[test]
    fn test_first_night_without_span_or_prompt() {
        let reply = success(CheckinKind::Night, Standing::First, &applied(1, None, None), None);
        assert_eq!(reply, "晚安成功！你是本群今天第1个睡觉的！");
    }

    #[test]
    fn test_repeat_tier_reply() {
        let reply = success(CheckinKind::Night, Standing::Repeat(Tier::DeepSleep), &applied(1, None, None), None);
        assert_eq!(reply, "晚安成功！进入深度睡眠模式，不要再熬夜啦~");

        let prompted = success(CheckinKind::Morning, Standing::Repeat(Tier::SuperGetUp), &applied(1, None, None), Some("喝杯水吧"));
        assert_eq!(prompted, "早安成功！刚起床又起床，精神过于饱满了吧？\n喝杯水吧");
    }
}
