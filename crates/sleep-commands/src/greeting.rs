//! Shared handler behind the `morning` and `night` commands.

use sleep_common::CheckinKind;
use sleep_core::replies::PRIVATE_CHECKIN_REPLY;
use tracing::debug;

use crate::framework::{Context, Error};

pub(crate) async fn respond(ctx: Context<'_>, kind: CheckinKind) -> Result<Option<String>, Error> {
    let Some(session) = ctx.session.filter(|session| session.text().is_some()) else {
        return Ok(None);
    };

    let Some((user_id, group_id)) = session.group_sender() else {
        debug!(%kind, "check-in outside a group");
        return Ok(Some(PRIVATE_CHECKIN_REPLY.to_string()));
    };

    let config = ctx.config();
    let outcome = ctx
        .data
        .service
        .check_in(&config, kind, user_id, group_id, ctx.now)
        .await?;
    Ok(outcome.reply)
}
