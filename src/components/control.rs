use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex, MutexGuard},
};

use futures_timer::Delay;

use crate::error::{FieldError, FieldResult};

use super::field_config::FieldConfig;
use super::field_state::{FieldState, MountGuard, SettleTicket};

type FieldStore = HashMap<String, FieldState>;

static FIELD_STATE: LazyLock<Mutex<FieldStore>> = LazyLock::new(|| Mutex::new(HashMap::new()));

fn lock(context: &'static str) -> FieldResult<MutexGuard<'static, FieldStore>> {
    FIELD_STATE.lock().map_err(|_| {
        tracing::warn!(context, "field state lock poisoned");
        FieldError::StatePoisoned(context)
    })
}

/// Creates the state for `id` on first use and returns its mount guard.
pub fn mount(id: &str, config: &FieldConfig) -> FieldResult<MountGuard> {
    let mut fields = lock("mounting field")?;
    let state = fields.entry(id.to_string()).or_insert_with(|| {
        tracing::trace!(field = id, "mounting field");
        FieldState::mount(config)
    });
    Ok(state.guard().clone())
}

pub fn with_field<R>(id: &str, apply: impl FnOnce(&mut FieldState) -> R) -> FieldResult<R> {
    let mut fields = lock("updating field")?;
    let state = fields
        .get_mut(id)
        .ok_or_else(|| FieldError::UnknownField(id.to_string()))?;
    Ok(apply(state))
}

pub fn is_mounted(id: &str) -> bool {
    lock("checking field").is_ok_and(|fields| fields.contains_key(id))
}

/// Drops the state for `id`. Settle tickets issued before this point turn
/// into no-ops.
pub fn unmount(id: &str) -> bool {
    let Ok(mut fields) = lock("unmounting field") else {
        return false;
    };
    let Some(state) = fields.remove(id) else {
        return false;
    };
    state.guard().release();
    tracing::trace!(field = id, "field unmounted");
    true
}

pub fn clear_all() {
    if let Ok(mut fields) = lock("clearing fields") {
        for (_, state) in fields.drain() {
            state.guard().release();
        }
    }
}

/// Waits out the transition behind `ticket`, then settles it.
pub async fn settle_after(id: String, ticket: SettleTicket) -> bool {
    Delay::new(ticket.delay).await;
    if !ticket.guard.is_mounted() {
        tracing::trace!(field = %id, "settle skipped, field unmounted");
        return false;
    }
    match with_field(&id, |state| state.settle(ticket.generation)) {
        Ok(settled) => settled,
        Err(error) => {
            tracing::trace!(field = %id, %error, "settle skipped");
            false
        }
    }
}
