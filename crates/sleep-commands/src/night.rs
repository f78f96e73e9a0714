//! Night check-in command.

use sleep_common::CheckinKind;

use crate::framework::{Command, CommandFuture, Context};

/// `night`: records that the sender is going to sleep.
pub fn night() -> Command {
    Command {
        name: CheckinKind::Night.command_name(),
        description: "晚安消息打卡",
        action: run,
    }
}

fn run(ctx: Context<'_>) -> CommandFuture<'_> {
    Box::pin(crate::greeting::respond(ctx, CheckinKind::Night))
}
